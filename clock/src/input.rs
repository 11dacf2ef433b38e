use serde::{Deserialize, Serialize};
use winit::event::VirtualKeyCode;

use crate::state::ClockCommand;

/// Keys for the four clock commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub switch: VirtualKeyCode,
    pub pause: VirtualKeyCode,
    pub restart: VirtualKeyCode,
    pub pass: VirtualKeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            switch: VirtualKeyCode::Right,
            pause: VirtualKeyCode::Space,
            restart: VirtualKeyCode::R,
            pass: VirtualKeyCode::P,
        }
    }
}

impl KeyBindings {
    /// Command bound to `key`. If a key is bound twice, the first match in
    /// switch / pause / restart / pass order wins.
    pub fn command_for(&self, key: VirtualKeyCode) -> Option<ClockCommand> {
        [
            (self.switch, ClockCommand::Switch),
            (self.pause, ClockCommand::TogglePause),
            (self.restart, ClockCommand::Restart),
            (self.pass, ClockCommand::Pass),
        ]
        .into_iter()
        .find_map(|(bound, command)| (bound == key).then_some(command))
    }

    pub fn has_duplicates(&self) -> bool {
        let keys = [self.switch, self.pause, self.restart, self.pass];
        keys.iter()
            .enumerate()
            .any(|(i, k)| keys[i + 1..].contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_map_all_commands() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command_for(VirtualKeyCode::Right),
            Some(ClockCommand::Switch)
        );
        assert_eq!(
            keys.command_for(VirtualKeyCode::Space),
            Some(ClockCommand::TogglePause)
        );
        assert_eq!(
            keys.command_for(VirtualKeyCode::R),
            Some(ClockCommand::Restart)
        );
        assert_eq!(keys.command_for(VirtualKeyCode::P), Some(ClockCommand::Pass));
        assert_eq!(keys.command_for(VirtualKeyCode::Q), None);
        assert!(!keys.has_duplicates());
    }

    #[test]
    fn rebinding_switch_moves_the_command() {
        let keys = KeyBindings {
            switch: VirtualKeyCode::S,
            ..KeyBindings::default()
        };
        assert_eq!(keys.command_for(VirtualKeyCode::S), Some(ClockCommand::Switch));
        assert_eq!(keys.command_for(VirtualKeyCode::Right), None);
    }

    #[test]
    fn duplicate_binding_is_detected_and_first_wins() {
        let keys = KeyBindings {
            pass: VirtualKeyCode::Space,
            ..KeyBindings::default()
        };
        assert!(keys.has_duplicates());
        assert_eq!(
            keys.command_for(VirtualKeyCode::Space),
            Some(ClockCommand::TogglePause)
        );
    }

    #[test]
    fn bindings_round_trip_through_json() {
        let keys = KeyBindings::default();
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(serde_json::from_str::<KeyBindings>(&json).unwrap(), keys);
    }
}
