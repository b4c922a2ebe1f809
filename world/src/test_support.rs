use upstairs_core::{EngineError, Layout, LayoutCell, LayoutGenerator};

/// Generator that always returns a floor without walls.
pub(crate) struct OpenFloor;

impl LayoutGenerator for OpenFloor {
    fn generate(&mut self, rows: u32, columns: u32) -> Result<Layout, EngineError> {
        Ok(Layout::filled(rows, columns, LayoutCell::Empty))
    }
}
