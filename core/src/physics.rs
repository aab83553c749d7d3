use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::constants::*;
use crate::types::{Rect, Vec2};

/// Kinematic part of a fighter. `pos` is the body center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Body {
    /// Standing on the ground at `x`.
    pub fn grounded_at(x: f64, ground_y: f64) -> Body {
        Body {
            pos: Vec2 { x, y: ground_y + FIGHTER_HEIGHT / 2.0 },
            vel: Vec2::default(),
            on_ground: true,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y - FIGHTER_HEIGHT / 2.0
    }

    pub fn set_bottom(&mut self, y: f64) {
        self.pos.y = y + FIGHTER_HEIGHT / 2.0;
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, FIGHTER_WIDTH, FIGHTER_HEIGHT)
    }
}

/// Physics scale for the current tick.
pub fn slow_factor(slow_motion_ticks: u32, enabled: bool) -> f64 {
    if enabled && slow_motion_ticks > 0 {
        SLOW_MOTION_FACTOR
    } else {
        1.0
    }
}

pub fn apply_gravity(b: &Body, slow: f64) -> Body {
    let mut vel = b.vel;
    vel.y -= GRAVITY * slow;
    Body { vel, ..*b }
}

/// Result of one integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moved {
    pub body: Body,
    /// Went from airborne to grounded during this step.
    pub landed: bool,
}

/// Integrate position, then resolve platforms, ground, border walls and
/// the level clamp in that order.
pub fn move_and_collide(b: &Body, arena: &Arena, slow: f64) -> Moved {
    let prev_bottom = b.bottom();
    let mut next = Body {
        pos: Vec2 {
            x: b.pos.x + b.vel.x * slow,
            y: b.pos.y + b.vel.y * slow,
        },
        on_ground: false,
        ..*b
    };

    land_on_platforms(&mut next, prev_bottom, arena);

    if !next.on_ground && next.bottom() <= arena.ground_y {
        next.set_bottom(arena.ground_y);
        next.vel.y = 0.0;
        next.on_ground = true;
    }

    push_out_of_borders(&mut next, arena);
    clamp_to_level(&mut next, arena);

    Moved {
        body: next,
        landed: next.on_ground && !b.on_ground,
    }
}

/// One-way landings. Only a falling (or resting) body can be caught, and only
/// within the snap band around the platform top.
fn land_on_platforms(b: &mut Body, prev_bottom: f64, arena: &Arena) {
    if b.vel.y > 0.0 {
        return;
    }
    let half = FIGHTER_WIDTH / 2.0;
    for plat in &arena.platforms {
        let over = b.pos.x + half > plat.left && b.pos.x - half < plat.right;
        if over
            && prev_bottom >= plat.top - PLATFORM_SNAP
            && b.bottom() <= plat.top + PLATFORM_SNAP
        {
            b.set_bottom(plat.top);
            b.vel.y = 0.0;
            b.on_ground = true;
            return;
        }
    }
}

fn push_out_of_borders(b: &mut Body, arena: &Arena) {
    let half = FIGHTER_WIDTH / 2.0;
    for wall in &arena.borders {
        if !wall.overlaps(&b.rect()) {
            continue;
        }
        if b.pos.x < wall.x {
            b.pos.x = wall.left_edge() - half;
        } else {
            b.pos.x = wall.right_edge() + half;
        }
        b.vel.x = 0.0;
    }
}

fn clamp_to_level(b: &mut Body, arena: &Arena) {
    let clamped = arena.clamp_x(b.pos.x);
    if clamped != b.pos.x {
        b.pos.x = clamped;
        b.vel.x = 0.0;
    }
}
