#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translates raw key presses into the single command run on each tick.

use upstairs_core::{Command, Direction};

/// Non-character keys the engine reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedKey {
    /// Up arrow.
    ArrowUp,
    /// Right arrow.
    ArrowRight,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Space bar.
    Space,
}

/// One key press as reported by the host terminal.
///
/// Hosts report printable keys as a character and everything else as a named
/// key. Either half may be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyInput {
    /// Printable character, if the key produced one.
    pub character: Option<char>,
    /// Named key, if the key has no printable character.
    pub key: Option<NamedKey>,
}

impl KeyInput {
    /// Key press that produced a printable character.
    #[must_use]
    pub const fn character(character: char) -> Self {
        Self {
            character: Some(character),
            key: None,
        }
    }

    /// Key press of a named key.
    #[must_use]
    pub const fn named(key: NamedKey) -> Self {
        Self {
            character: None,
            key: Some(key),
        }
    }
}

/// Resolves a key press into a command.
///
/// Restart wins over movement, movement over acting, and anything
/// unrecognised only advances time.
#[must_use]
pub fn command_for(input: KeyInput) -> Command {
    let KeyInput { character, key } = input;

    if character == Some('s') {
        return Command::StartOrRestartMatch;
    }

    let direction = match (key, character) {
        (Some(NamedKey::ArrowUp), _) | (_, Some('k')) => Some(Direction::Up),
        (Some(NamedKey::ArrowRight), _) | (_, Some('l')) => Some(Direction::Right),
        (Some(NamedKey::ArrowDown), _) | (_, Some('j')) => Some(Direction::Down),
        (Some(NamedKey::ArrowLeft), _) | (_, Some('h')) => Some(Direction::Left),
        _ => None,
    };
    if let Some(direction) = direction {
        return Command::MoveAvatar { direction };
    }

    if key == Some(NamedKey::Space) || character == Some(' ') {
        return Command::AvatarActs;
    }

    Command::AdvanceTime
}

/// Holds the most recent key press until the next tick consumes it.
#[derive(Clone, Debug, Default)]
pub struct CommandLatch {
    pending: Option<KeyInput>,
}

impl CommandLatch {
    /// Creates an empty latch.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Records a key press, replacing any press not yet consumed.
    pub fn press(&mut self, input: KeyInput) {
        self.pending = Some(input);
    }

    /// Reports whether a key press is waiting.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the pending key press and returns the command for this tick.
    pub fn take(&mut self) -> Command {
        self.pending.take().map_or(Command::AdvanceTime, command_for)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn vi_keys_and_arrows_move_the_avatar() {
        let cases = [
            ('k', NamedKey::ArrowUp, Direction::Up),
            ('l', NamedKey::ArrowRight, Direction::Right),
            ('j', NamedKey::ArrowDown, Direction::Down),
            ('h', NamedKey::ArrowLeft, Direction::Left),
        ];
        for (character, key, direction) in cases {
            let expected = Command::MoveAvatar { direction };
            assert_eq!(command_for(KeyInput::character(character)), expected);
            assert_eq!(command_for(KeyInput::named(key)), expected);
        }
    }

    #[test]
    fn restart_beats_movement() {
        let input = KeyInput {
            character: Some('s'),
            key: Some(NamedKey::ArrowUp),
        };
        assert_eq!(command_for(input), Command::StartOrRestartMatch);
    }

    #[test]
    fn movement_beats_acting() {
        let input = KeyInput {
            character: Some(' '),
            key: Some(NamedKey::ArrowLeft),
        };
        assert_eq!(
            command_for(input),
            Command::MoveAvatar {
                direction: Direction::Left
            }
        );
    }

    #[test]
    fn space_bar_acts() {
        assert_eq!(
            command_for(KeyInput::named(NamedKey::Space)),
            Command::AvatarActs
        );
    }

    #[test]
    fn latch_clears_after_one_read() {
        let mut latch = CommandLatch::new();
        latch.press(KeyInput::character('x'));
        latch.press(KeyInput::character('j'));
        assert!(latch.is_pending());

        assert_eq!(
            latch.take(),
            Command::MoveAvatar {
                direction: Direction::Down
            }
        );
        assert!(!latch.is_pending());
        assert_eq!(latch.take(), Command::AdvanceTime);
    }

    proptest! {
        #[test]
        fn unbound_characters_only_advance_time(character in any::<char>()) {
            prop_assume!(!"skljh ".contains(character));
            prop_assert_eq!(command_for(KeyInput::character(character)), Command::AdvanceTime);
        }
    }
}
