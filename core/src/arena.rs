use serde::{Deserialize, Serialize};

use crate::constants::{EDGE_MARGIN, FIGHTER_WIDTH};
use crate::types::Rect;

/// One-way platform: only its top surface collides, and only from above.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub left: f64,
    pub right: f64,
    pub top: f64,
}

/// Solid wall spanning the full level height, centered on `x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub x: f64,
    pub width: f64,
}

impl Border {
    pub fn left_edge(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right_edge(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn overlaps(&self, body: &Rect) -> bool {
        body.left < self.right_edge() && body.right > self.left_edge()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelId {
    Dojo,
    Rooftops,
}

impl LevelId {
    pub const ALL: [LevelId; 2] = [LevelId::Dojo, LevelId::Rooftops];

    pub fn name(self) -> &'static str {
        match self {
            LevelId::Dojo => "dojo",
            LevelId::Rooftops => "rooftops",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        LevelId::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
    }
}

/// Static level geometry. Platforms are kept in evaluation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub level: LevelId,
    pub left: f64,
    pub right: f64,
    pub ground_y: f64,
    pub platforms: Vec<Platform>,
    pub borders: [Border; 2],
    /// Spawn x per fighter; both spawn on the ground.
    pub spawn_x: [f64; 2],
}

const LEVEL_WIDTH: f64 = 2000.0;
const GROUND_Y: f64 = 120.0;
const BORDER_WIDTH: f64 = 40.0;

impl Arena {
    pub fn for_level(level: LevelId) -> Arena {
        let platforms = match level {
            // Two low ledges and a high center perch.
            LevelId::Dojo => vec![
                Platform { left: 300.0, right: 600.0, top: 250.0 },
                Platform { left: 1400.0, right: 1700.0, top: 250.0 },
                Platform { left: 850.0, right: 1150.0, top: 400.0 },
            ],
            LevelId::Rooftops => vec![
                Platform { left: 150.0, right: 450.0, top: 220.0 },
                Platform { left: 800.0, right: 1200.0, top: 260.0 },
                Platform { left: 1550.0, right: 1850.0, top: 220.0 },
            ],
        };
        Arena {
            level,
            left: 0.0,
            right: LEVEL_WIDTH,
            ground_y: GROUND_Y,
            platforms,
            borders: [
                Border { x: BORDER_WIDTH / 2.0, width: BORDER_WIDTH },
                Border { x: LEVEL_WIDTH - BORDER_WIDTH / 2.0, width: BORDER_WIDTH },
            ],
            spawn_x: [500.0, 1500.0],
        }
    }

    /// Allowed range for a fighter's center x.
    pub fn x_limits(&self) -> (f64, f64) {
        let half = FIGHTER_WIDTH / 2.0;
        (self.left + half + EDGE_MARGIN, self.right - half - EDGE_MARGIN)
    }

    pub fn clamp_x(&self, x: f64) -> f64 {
        let (min, max) = self.x_limits();
        x.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dojo_structure() {
        let arena = Arena::for_level(LevelId::Dojo);
        assert_eq!(arena.platforms.len(), 3);
        assert_eq!(arena.ground_y, 120.0);
        assert_eq!(arena.borders[0].left_edge(), 0.0);
        assert_eq!(arena.borders[1].right_edge(), 2000.0);
    }

    #[test]
    fn spawns_sit_inside_limits() {
        for level in LevelId::ALL {
            let arena = Arena::for_level(level);
            for x in arena.spawn_x {
                assert_eq!(arena.clamp_x(x), x);
            }
        }
    }

    #[test]
    fn level_names_round_trip() {
        assert_eq!(LevelId::from_name("Rooftops"), Some(LevelId::Rooftops));
        assert_eq!(LevelId::from_name("dojo"), Some(LevelId::Dojo));
        assert_eq!(LevelId::from_name("moon"), None);
    }
}
