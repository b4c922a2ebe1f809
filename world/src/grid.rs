//! Fixed-size cell matrix with bounded access and occupant relocation.

use upstairs_core::{
    ActorClass, EngineError, FloorMarker, Layout, LayoutCell, Position, TimedEffect,
};

use crate::actor::{Actor, ActorArena, ActorId};

/// One slot of the grid.
#[derive(Clone, Debug)]
pub struct Cell {
    position: Position,
    occupant: Option<ActorId>,
    floor_marker: FloorMarker,
    effects: Vec<TimedEffect>,
}

impl Cell {
    fn empty(position: Position) -> Self {
        Self {
            position,
            occupant: None,
            floor_marker: FloorMarker::Bare,
            effects: Vec::new(),
        }
    }

    /// Coordinate of the cell; always equal to its index in the grid.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Handle of the actor standing on the cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<ActorId> {
        self.occupant
    }

    /// Reports whether no actor stands on the cell.
    #[must_use]
    pub const fn is_unoccupied(&self) -> bool {
        self.occupant.is_none()
    }

    /// Marker painted on the floor of the cell.
    #[must_use]
    pub const fn floor_marker(&self) -> FloorMarker {
        self.floor_marker
    }

    /// Effects projected onto the cell during the current frame.
    #[must_use]
    pub fn effects(&self) -> &[TimedEffect] {
        &self.effects
    }
}

/// Rectangular matrix of cells whose dimensions never change.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
    actors: ActorArena,
}

impl Grid {
    /// Creates a grid of empty cells.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let capacity = usize::try_from(u64::from(rows) * u64::from(columns)).unwrap_or(0);
        let mut cells = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::empty(Position::new(row as i32, column as i32)));
            }
        }
        Self {
            rows,
            columns,
            cells,
            actors: ActorArena::default(),
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the cell at `position`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn at(&self, position: Position) -> Option<&Cell> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Resolves an actor handle.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Returns the actor standing on `position`, if any.
    #[must_use]
    pub fn occupant_at(&self, position: Position) -> Option<&Actor> {
        self.at(position)
            .and_then(Cell::occupant)
            .and_then(|id| self.actors.get(id))
    }

    /// Places a new actor on an unoccupied cell and returns its handle.
    pub fn place(&mut self, position: Position, actor: Actor) -> Result<ActorId, EngineError> {
        let index = self
            .index(position)
            .ok_or(EngineError::OutOfBounds { position })?;
        if self.cells[index].occupant.is_some() {
            return Err(EngineError::DestinationOccupied { position });
        }
        let id = self.actors.insert(actor);
        self.cells[index].occupant = Some(id);
        Ok(id)
    }

    /// Paints `marker` on the floor of the cell at `position`.
    pub fn set_floor_marker(
        &mut self,
        position: Position,
        marker: FloorMarker,
    ) -> Result<(), EngineError> {
        let index = self
            .index(position)
            .ok_or(EngineError::OutOfBounds { position })?;
        self.cells[index].floor_marker = marker;
        Ok(())
    }

    /// Relocates the occupant of `from` onto `to`, keeping its identity.
    ///
    /// Either both cells change or neither does.
    pub fn move_occupant(&mut self, from: Position, to: Position) -> Result<(), EngineError> {
        let from_index = self
            .index(from)
            .ok_or(EngineError::OutOfBounds { position: from })?;
        let occupant = self.cells[from_index]
            .occupant
            .ok_or(EngineError::OccupantMissing { position: from })?;
        let to_index = self
            .index(to)
            .ok_or(EngineError::OutOfBounds { position: to })?;
        if self.cells[to_index].occupant.is_some() {
            return Err(EngineError::DestinationOccupied { position: to });
        }

        self.cells[from_index].occupant = None;
        self.cells[to_index].occupant = Some(occupant);
        Ok(())
    }

    /// Finds the only cell whose occupant reports `class`.
    pub fn find_sole_occupant_of_class(&self, class: ActorClass) -> Result<&Cell, EngineError> {
        let mut matches = self.cells.iter().filter(|cell| {
            cell.occupant
                .and_then(|id| self.actors.get(id))
                .is_some_and(|actor| actor.class() == class)
        });

        let first = matches.next().ok_or(EngineError::NotFound { class })?;
        let extra = matches.count();
        if extra > 0 {
            return Err(EngineError::Ambiguous {
                class,
                count: extra + 1,
            });
        }
        Ok(first)
    }

    /// Drops the effect projections of the previous frame from every cell.
    pub fn clear_effect_projections(&mut self) {
        for cell in &mut self.cells {
            cell.effects.clear();
        }
    }

    /// Projects `effect` onto every in-bounds cell of its area.
    ///
    /// Fragments outside the grid are skipped.
    pub fn project_effect(&mut self, effect: &TimedEffect) {
        for fragment in effect.area() {
            if let Some(index) = self.index(*fragment) {
                self.cells[index].effects.push(effect.clone());
            }
        }
    }

    /// Rebuilds occupants and floor markers from `layout`.
    ///
    /// Every previously placed actor is dropped. Walls in the layout become
    /// [`Actor::Wall`] occupants.
    pub fn apply_layout(&mut self, layout: &Layout) -> Result<(), EngineError> {
        if layout.rows() != self.rows || layout.columns() != self.columns {
            return Err(EngineError::LayoutGenerationFailed {
                reason: format!(
                    "layout is {}x{} but the grid is {}x{}",
                    layout.rows(),
                    layout.columns(),
                    self.rows,
                    self.columns
                ),
            });
        }

        self.actors.clear();
        for cell in &mut self.cells {
            cell.occupant = None;
            cell.floor_marker = FloorMarker::Bare;
            cell.effects.clear();
        }

        for (position, content) in layout.iter() {
            if content == LayoutCell::UnbreakableWall {
                let _ = self.place(position, Actor::Wall)?;
            }
        }
        Ok(())
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !position.in_bounds(self.rows, self.columns) {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}
