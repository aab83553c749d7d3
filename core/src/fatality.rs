//! Scripted finishing sequence: launch, fall, then a fixed bounce table.
//!
//! Entered once when a fighter's health reaches zero and never left except
//! into `Dead`. Normal physics and the slow-motion factor do not apply; the
//! whole sequence is a function of the launch velocity alone.

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::constants::*;
use crate::physics::Body;
use crate::types::Facing;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalityPhase {
    /// Fixed-length launch with light gravity.
    Launch,
    /// Heavy fall until ground contact.
    Fall,
    /// Ground pauses and bounces from `BOUNCE_HEIGHTS`.
    Bounce,
}

impl FatalityPhase {
    pub fn number(self) -> u8 {
        match self {
            FatalityPhase::Launch => 1,
            FatalityPhase::Fall => 2,
            FatalityPhase::Bounce => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fatality {
    pub phase: FatalityPhase,
    /// Launch countdown in phase 1, ground pause in phase 3.
    pub phase_ticks: u32,
    pub bounce_count: u32,
    /// Direction the body travels.
    pub direction: Facing,
    /// Horizontal speed kept after the fall, before per-bounce decay.
    pub carry: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub landed: bool,
    pub finished: bool,
}

impl Fatality {
    pub fn launch(direction: Facing) -> Fatality {
        Fatality {
            phase: FatalityPhase::Launch,
            phase_ticks: FATAL_LAUNCH_TICKS,
            bounce_count: 0,
            direction,
            carry: 0.0,
        }
    }
}

/// Horizontal factor for the n-th bounce (0-based); never reverses direction.
pub fn bounce_carry_factor(index: u32) -> f64 {
    (1.0 - index as f64 * FATAL_BOUNCE_DECAY).max(0.0)
}

/// Advance the sequence by one tick. `body.vel` holds the launch velocity on entry.
pub fn advance(seq: &mut Fatality, body: &mut Body, arena: &Arena) -> Progress {
    match seq.phase {
        FatalityPhase::Launch => {
            integrate(body, arena, FATAL_LAUNCH_GRAVITY, FATAL_LAUNCH_CARRY);
            if body.bottom() < arena.ground_y {
                body.set_bottom(arena.ground_y);
            }
            seq.phase_ticks = seq.phase_ticks.saturating_sub(1);
            if seq.phase_ticks == 0 {
                body.vel.x *= FATAL_DAMPING;
                body.vel.y = FATAL_REBOUND_VY;
                seq.phase = FatalityPhase::Fall;
            }
            Progress::default()
        }
        FatalityPhase::Fall => {
            integrate(body, arena, FATAL_FALL_GRAVITY, FATAL_FALL_CARRY);
            if body.bottom() > arena.ground_y {
                return Progress::default();
            }
            seq.carry = body.vel.x.abs() * FATAL_DAMPING * seq.direction.sign();
            touch_down(seq, body, arena);
            seq.phase = FatalityPhase::Bounce;
            Progress {
                landed: true,
                finished: false,
            }
        }
        FatalityPhase::Bounce if body.on_ground => {
            if seq.bounce_count as usize >= BOUNCE_HEIGHTS.len() {
                body.vel.x = 0.0;
                return Progress {
                    landed: false,
                    finished: true,
                };
            }
            seq.phase_ticks = seq.phase_ticks.saturating_sub(1);
            if seq.phase_ticks == 0 {
                let index = seq.bounce_count;
                body.vel.y = BOUNCE_HEIGHTS[index as usize];
                body.vel.x = seq.carry * bounce_carry_factor(index);
                body.on_ground = false;
                seq.bounce_count += 1;
            }
            Progress::default()
        }
        FatalityPhase::Bounce => {
            integrate(body, arena, FATAL_FALL_GRAVITY, FATAL_FALL_CARRY);
            if body.bottom() > arena.ground_y {
                return Progress::default();
            }
            touch_down(seq, body, arena);
            Progress {
                landed: true,
                finished: false,
            }
        }
    }
}

fn integrate(body: &mut Body, arena: &Arena, gravity_scale: f64, carry: f64) {
    body.vel.y -= GRAVITY * gravity_scale;
    body.pos.y += body.vel.y;
    body.pos.x = arena.clamp_x(body.pos.x + body.vel.x * carry);
}

/// Snap to the ground and arm the pause before the next bounce.
fn touch_down(seq: &mut Fatality, body: &mut Body, arena: &Arena) {
    body.set_bottom(arena.ground_y);
    body.vel = Default::default();
    body.on_ground = true;
    seq.phase_ticks = FATAL_GROUND_PAUSE;
}
