use serde::{Deserialize, Serialize};

use crate::arena::LevelId;
use crate::constants::{KICK_KNOCKBACK, PUNCH_KNOCKBACK, ROUND_SECONDS};

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

pub type Tick = u32;

/// Axis-aligned box stored as edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Rect {
    pub fn centered(center: Vec2, width: f64, height: f64) -> Self {
        Rect {
            left: center.x - width / 2.0,
            right: center.x + width / 2.0,
            bottom: center.y - height / 2.0,
            top: center.y + height / 2.0,
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.bottom < other.top
            && self.top > other.bottom
    }
}

// ── Fighters ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FighterId {
    P1,
    P2,
}

impl FighterId {
    pub const ALL: [FighterId; 2] = [FighterId::P1, FighterId::P2];

    pub fn index(self) -> usize {
        match self {
            FighterId::P1 => 0,
            FighterId::P2 => 1,
        }
    }

    pub fn opponent(self) -> FighterId {
        match self {
            FighterId::P1 => FighterId::P2,
            FighterId::P2 => FighterId::P1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Right = 1, Left = -1.
    pub fn sign(self) -> f64 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Facing {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    Punch,
    Kick,
}

impl AttackKind {
    /// Unsigned (horizontal, vertical) knockback imparted on a clean hit.
    pub fn knockback(self) -> (f64, f64) {
        match self {
            AttackKind::Punch => PUNCH_KNOCKBACK,
            AttackKind::Kick => KICK_KNOCKBACK,
        }
    }
}

// ── Events ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Miss,
    Hit,
    Block,
    Parry,
    Fatal,
    Landed,
    DashStarted,
}

/// One cosmetic occurrence for audio, particles and camera consumers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub kind: EventKind,
    pub actor: FighterId,
    pub position: Vec2,
}

// ── Result ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(FighterId),
    Draw,
}

// ── Config ──────────────────────────────────────────────────

/// Already-validated match settings handed to the core by its caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub level: LevelId,
    pub names: [String; 2],
    pub round_seconds: u32,
    /// Enables the slow-motion window after a fatal blow.
    pub slow_motion: bool,
    /// Unix seconds; stamped onto the match record.
    pub started_at: i64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            level: LevelId::Dojo,
            names: ["Player 1".to_string(), "Player 2".to_string()],
            round_seconds: ROUND_SECONDS,
            slow_motion: true,
            started_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_overlap_is_strict() {
        let a = Rect::centered(Vec2 { x: 0.0, y: 0.0 }, 10.0, 10.0);
        let touching = Rect::centered(Vec2 { x: 10.0, y: 0.0 }, 10.0, 10.0);
        let inside = Rect::centered(Vec2 { x: 9.0, y: 0.0 }, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn fighter_ids_pair_up() {
        assert_eq!(FighterId::P1.opponent(), FighterId::P2);
        assert_eq!(FighterId::P2.opponent().index(), 0);
    }

    #[test]
    fn facing_sign_and_flip() {
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::Right.flipped(), Facing::Left);
        assert_eq!(Facing::Left.sign(), -1.0);
    }
}
