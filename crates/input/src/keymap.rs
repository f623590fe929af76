//! Key mapping from device-neutral key names to game actions.
//!
//! Key names follow the DOM `KeyboardEvent.key` convention (`"ArrowLeft"`,
//! `" "`, `"z"`), which most front ends can produce directly.

use crate::handler::RepeatKey;
use crate::types::GameAction;

/// Map a key name to a game action.
pub fn action_for_key(key: &str) -> Option<GameAction> {
    match key {
        // Movement
        "ArrowLeft" => Some(GameAction::MoveLeft),
        "ArrowRight" => Some(GameAction::MoveRight),
        "ArrowDown" => Some(GameAction::SoftDrop),

        // Rotation
        "ArrowUp" => Some(GameAction::RotateCw),
        "z" | "Z" => Some(GameAction::RotateCcw),

        // Actions
        " " => Some(GameAction::HardDrop),
        "c" | "C" => Some(GameAction::Hold),
        "p" | "P" => Some(GameAction::Pause),

        _ => None,
    }
}

/// The repeatable direction driven by a key, if any.
pub fn repeat_key_for(key: &str) -> Option<RepeatKey> {
    action_for_key(key).and_then(RepeatKey::from_action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(action_for_key("ArrowLeft"), Some(GameAction::MoveLeft));
        assert_eq!(action_for_key("ArrowRight"), Some(GameAction::MoveRight));
        assert_eq!(action_for_key("ArrowDown"), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(action_for_key("ArrowUp"), Some(GameAction::RotateCw));
        assert_eq!(action_for_key("z"), Some(GameAction::RotateCcw));
        assert_eq!(action_for_key("Z"), Some(GameAction::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(action_for_key(" "), Some(GameAction::HardDrop));
        assert_eq!(action_for_key("C"), Some(GameAction::Hold));
        assert_eq!(action_for_key("p"), Some(GameAction::Pause));
        assert_eq!(action_for_key("Enter"), None);
    }

    #[test]
    fn test_only_directions_repeat() {
        assert_eq!(repeat_key_for("ArrowLeft"), Some(RepeatKey::Left));
        assert_eq!(repeat_key_for("ArrowDown"), Some(RepeatKey::Down));
        assert_eq!(repeat_key_for("ArrowUp"), None);
        assert_eq!(repeat_key_for(" "), None);
    }
}
