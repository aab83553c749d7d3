use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Left,
    Right,
    Jump,
    Punch,
    Kick,
    Block,
    Dash,
    Crouch,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Punch,
        Action::Kick,
        Action::Block,
        Action::Dash,
        Action::Crouch,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Jump => "jump",
            Action::Punch => "punch",
            Action::Kick => "kick",
            Action::Block => "block",
            Action::Dash => "dash",
            Action::Crouch => "crouch",
        }
    }
}

/// Bitmask of actions, one bit per [`Action`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSet(pub u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub fn of(actions: &[Action]) -> ActionSet {
        actions.iter().fold(ActionSet::EMPTY, |set, a| set.with(*a))
    }

    pub fn with(self, action: Action) -> ActionSet {
        ActionSet(self.0 | action.bit())
    }

    pub fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn minus(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Actions held during one tick, for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub held: ActionSet,
}

pub const NULL_INPUT: FrameInput = FrameInput {
    held: ActionSet::EMPTY,
};

impl FrameInput {
    pub fn holding(actions: &[Action]) -> FrameInput {
        FrameInput {
            held: ActionSet::of(actions),
        }
    }
}

/// Held set plus the press/release edges against the previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub held: ActionSet,
    pub pressed: ActionSet,
    pub released: ActionSet,
}

impl Intent {
    pub fn from_frames(prev: &FrameInput, current: &FrameInput) -> Intent {
        Intent {
            held: current.held,
            pressed: current.held.minus(prev.held),
            released: prev.held.minus(current.held),
        }
    }

    /// A direction key went up this tick.
    pub fn released_direction(&self) -> bool {
        self.released.contains(Action::Left) || self.released.contains(Action::Right)
    }

    /// -1, 0 or 1. Opposing directions cancel out.
    pub fn horizontal(&self) -> i32 {
        match (
            self.held.contains(Action::Left),
            self.held.contains(Action::Right),
        ) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Key-name → action table for one player. Key identity is opaque to the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub keys: BTreeMap<String, Action>,
}

impl Bindings {
    pub fn new(pairs: &[(&str, Action)]) -> Bindings {
        Bindings {
            keys: pairs
                .iter()
                .map(|(key, action)| (key.to_string(), *action))
                .collect(),
        }
    }

    /// Default layout for the given player slot (0 or 1).
    pub fn default_for(slot: usize) -> Bindings {
        if slot == 0 {
            Bindings::new(&[
                ("A", Action::Left),
                ("D", Action::Right),
                ("W", Action::Jump),
                ("J", Action::Punch),
                ("K", Action::Kick),
                ("L", Action::Block),
                ("Q", Action::Dash),
                ("S", Action::Crouch),
            ])
        } else {
            Bindings::new(&[
                ("Left", Action::Left),
                ("Right", Action::Right),
                ("Up", Action::Jump),
                ("Num1", Action::Punch),
                ("Num2", Action::Kick),
                ("Num3", Action::Block),
                ("Num0", Action::Dash),
                ("Down", Action::Crouch),
            ])
        }
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(key).copied()
    }

    /// First key (in key order) bound to `action`.
    pub fn key_for(&self, action: Action) -> Option<&str> {
        self.keys
            .iter()
            .find(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
    }

    /// Rebind `key` to `action`, dropping any key previously mapped to it.
    pub fn rebind(&mut self, key: &str, action: Action) {
        self.keys.retain(|_, a| *a != action);
        self.keys.insert(key.to_string(), action);
    }

    /// Unbound keys are ignored.
    pub fn translate<S: AsRef<str>>(&self, keys_down: &[S]) -> FrameInput {
        let held = keys_down
            .iter()
            .filter_map(|k| self.action_for(k.as_ref()))
            .fold(ActionSet::EMPTY, ActionSet::with);
        FrameInput { held }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_from_consecutive_frames() {
        let prev = FrameInput::holding(&[Action::Left, Action::Block]);
        let current = FrameInput::holding(&[Action::Left, Action::Punch]);
        let intent = Intent::from_frames(&prev, &current);
        assert!(intent.pressed.contains(Action::Punch));
        assert!(!intent.pressed.contains(Action::Left));
        assert!(intent.released.contains(Action::Block));
        assert!(!intent.released_direction());
        assert_eq!(intent.horizontal(), -1);

        let let_go = Intent::from_frames(&current, &NULL_INPUT);
        assert!(let_go.released_direction());
    }

    #[test]
    fn opposing_directions_cancel() {
        let both = FrameInput::holding(&[Action::Left, Action::Right]);
        let intent = Intent::from_frames(&NULL_INPUT, &both);
        assert_eq!(intent.horizontal(), 0);
    }

    #[test]
    fn translate_ignores_unbound_keys() {
        let bindings = Bindings::default_for(0);
        let input = bindings.translate(&["D", "J", "F12"]);
        assert_eq!(input.held, ActionSet::of(&[Action::Right, Action::Punch]));
    }

    #[test]
    fn rebind_moves_action() {
        let mut bindings = Bindings::default_for(1);
        bindings.rebind("Space", Action::Jump);
        assert_eq!(bindings.action_for("Space"), Some(Action::Jump));
        assert_eq!(bindings.action_for("Up"), None);
        assert_eq!(bindings.key_for(Action::Jump), Some("Space"));
    }

    #[test]
    fn action_names_parse() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
        assert_eq!(Action::from_name("taunt"), None);
    }
}
