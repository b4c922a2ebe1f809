use std::io::Write;

use anyhow::{Context, Result};
use upstairs_rendering::{PresentationSink, RenderRequest, TextScreen};

/// Presentation sink that prints each frame as plain text.
#[derive(Debug)]
pub(crate) struct TextSink<W> {
    screen: TextScreen,
    out: W,
}

impl<W: Write> TextSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            screen: TextScreen::standard(),
            out,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationSink for TextSink<W> {
    fn present(&mut self, request: &RenderRequest) -> Result<()> {
        self.screen.compose(request);
        write!(self.out, "{}", self.screen).context("failed to write frame")?;
        self.out.flush().context("failed to flush frame")
    }
}
