//! Occupant behaviours and the arena that owns them.

use upstairs_core::{ActorClass, Direction, Position, TimedEffect};

/// Number of frames an avatar strike stays on the field.
pub const STRIKE_DURATION_FRAMES: u64 = 3;

/// Handle identifying an actor independently of the cell it stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u32);

impl ActorId {
    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Behaviour attached to anything that occupies a cell.
///
/// New kinds of occupant are added as variants here; the rest of the engine only
/// talks to actors through [`Actor::class`] and [`Actor::act`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Actor {
    /// Inert wall segment.
    Wall,
    /// The player's alter ego.
    Avatar,
}

impl Actor {
    /// Class tag reported by the actor.
    #[must_use]
    pub const fn class(&self) -> ActorClass {
        match self {
            Self::Wall => ActorClass::Wall,
            Self::Avatar => ActorClass::Avatar,
        }
    }

    /// Performs the actor's action while standing on `position`.
    #[must_use]
    pub fn act(&self, frame: u64, position: Position) -> Vec<TimedEffect> {
        match self {
            Self::Wall => Vec::new(),
            Self::Avatar => vec![TimedEffect::new(
                vec![position.offset(Direction::Up)],
                frame,
                STRIKE_DURATION_FRAMES,
            )],
        }
    }
}

/// Storage that owns every actor placed on a grid.
#[derive(Clone, Debug, Default)]
pub(crate) struct ActorArena {
    actors: Vec<Actor>,
}

impl ActorArena {
    pub(crate) fn insert(&mut self, actor: Actor) -> ActorId {
        let id = ActorId(u32::try_from(self.actors.len()).unwrap_or(u32::MAX));
        self.actors.push(actor);
        id
    }

    pub(crate) fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0 as usize)
    }

    pub(crate) fn clear(&mut self) {
        self.actors.clear();
    }
}
