//! Per-fighter state machine.
//!
//! `FighterState` is the only record of what a fighter is doing. Per-state
//! data (attack timers, block window, dash direction, fatality progress)
//! lives inside the variant, so it exists exactly while that state is active.
//! Transition attempts that fail their guard are no-ops and report `false`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::*;
use crate::fatality::Fatality;
use crate::fighter::Fighter;
use crate::input::{Action, Intent};
use crate::types::{AttackKind, Facing};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub kind: AttackKind,
    pub combo_index: u32,
    pub ticks_remaining: u32,
    pub miss_checked: bool,
    pub hit_checked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub ticks_remaining: u32,
    /// Short freeze after absorbing a hit; the block cannot lapse during it.
    pub stun_ticks: u32,
}

impl Block {
    /// The first `PARRY_TICKS` ticks of the block.
    pub fn parry_active(&self) -> bool {
        self.ticks_remaining > BLOCK_TICKS - PARRY_TICKS
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dash {
    pub ticks_remaining: u32,
    pub direction: Facing,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub ticks_remaining: u32,
    pub direction: Facing,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FighterState {
    Idle,
    Run,
    Airborne { rising: bool },
    /// Grounded and held down: no running, no jumping.
    Crouch,
    Slide(Slide),
    Block(Block),
    Dash(Dash),
    Attack(Attack),
    Hit { ticks_remaining: u32 },
    Stunned { ticks_remaining: u32 },
    Fatality(Fatality),
    Dead,
}

impl FighterState {
    /// Idle, Run and Airborne are re-derived from the body every tick.
    pub fn is_free(&self) -> bool {
        matches!(
            self,
            FighterState::Idle | FighterState::Run | FighterState::Airborne { .. }
        )
    }

    /// Fatality or Dead: nothing else can touch this fighter.
    pub fn is_finished(&self) -> bool {
        matches!(self, FighterState::Fatality(_) | FighterState::Dead)
    }

    pub fn pose(&self) -> Pose {
        match self {
            FighterState::Idle => Pose::Idle,
            FighterState::Run => Pose::Run,
            FighterState::Airborne { rising: true } => Pose::Jump,
            FighterState::Airborne { rising: false } => Pose::Fall,
            FighterState::Crouch => Pose::Crouch,
            FighterState::Slide(_) => Pose::Slide,
            FighterState::Block(b) => Pose::Block { parry: b.parry_active() },
            FighterState::Dash(_) => Pose::Dash,
            FighterState::Attack(a) => Pose::Attack {
                kind: a.kind,
                index: a.combo_index,
            },
            FighterState::Hit { .. } => Pose::Hit,
            // A stunned attacker reels exactly like a hit one.
            FighterState::Stunned { .. } => Pose::Hit,
            FighterState::Fatality(f) => Pose::Fatality {
                phase: f.phase.number(),
            },
            FighterState::Dead => Pose::Dead,
        }
    }
}

/// Render-facing state tag with the sub-phase a pose picker needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    Run,
    Jump,
    Fall,
    Crouch,
    Slide,
    Block { parry: bool },
    Dash,
    Attack { kind: AttackKind, index: u32 },
    Hit,
    Fatality { phase: u8 },
    Dead,
}

impl Fighter {
    /// Hit, Stunned, Fatality and Dead ignore all input.
    pub fn can_act(&self) -> bool {
        !matches!(
            self.state,
            FighterState::Hit { .. }
                | FighterState::Stunned { .. }
                | FighterState::Fatality(_)
                | FighterState::Dead
        )
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(self.state, FighterState::Dash(_))
    }

    pub fn try_attack(&mut self, kind: AttackKind) -> bool {
        if !self.state.is_free() && self.state != FighterState::Crouch {
            return false;
        }
        if self.body.on_ground {
            self.body.vel.x = 0.0;
        }
        self.state = FighterState::Attack(Attack {
            kind,
            combo_index: self.combo.counter,
            ticks_remaining: ATTACK_TICKS,
            miss_checked: false,
            hit_checked: false,
        });
        debug!(fighter = ?self.id, ?kind, "attack started");
        true
    }

    pub fn try_block(&mut self) -> bool {
        if self.block_cooldown > 0 || !self.can_act() {
            return false;
        }
        if matches!(
            self.state,
            FighterState::Dash(_) | FighterState::Attack(_) | FighterState::Block(_)
        ) {
            return false;
        }
        self.body.vel.x = 0.0;
        self.state = FighterState::Block(Block {
            ticks_remaining: BLOCK_TICKS,
            stun_ticks: 0,
        });
        debug!(fighter = ?self.id, "block started");
        true
    }

    /// Ground-only burst in the current facing, with full invulnerability.
    pub fn try_dash(&mut self) -> bool {
        if !self.body.on_ground || self.dash_cooldown > 0 || !self.can_act() {
            return false;
        }
        if matches!(self.state, FighterState::Dash(_)) {
            return false;
        }
        if matches!(self.state, FighterState::Block(_)) {
            self.block_cooldown = BLOCK_COOLDOWN_TICKS;
        }
        self.dash_cooldown = DASH_COOLDOWN_TICKS;
        self.body.vel.x = self.facing.sign() * DASH_SPEED;
        self.state = FighterState::Dash(Dash {
            ticks_remaining: DASH_TICKS,
            direction: self.facing,
        });
        debug!(fighter = ?self.id, facing = ?self.facing, "dash started");
        true
    }

    pub fn try_jump(&mut self) -> bool {
        let can_jump = matches!(
            self.state,
            FighterState::Idle | FighterState::Run | FighterState::Slide(_)
        );
        if !can_jump || !self.body.on_ground {
            return false;
        }
        self.body.vel.y = JUMP_VELOCITY;
        self.body.on_ground = false;
        self.state = FighterState::Airborne { rising: true };
        true
    }

    /// Held direction drives free states; letting go while running slides.
    /// A crouching fighter only turns.
    pub fn apply_horizontal(&mut self, direction: i32, released: bool) {
        if self.state == FighterState::Crouch {
            if direction != 0 {
                self.facing = if direction > 0 { Facing::Right } else { Facing::Left };
            }
            self.body.vel.x = 0.0;
            return;
        }
        let free = self.state.is_free() || matches!(self.state, FighterState::Slide(_));
        if !free {
            return;
        }
        if direction != 0 {
            self.facing = if direction > 0 { Facing::Right } else { Facing::Left };
            self.body.vel.x = direction as f64 * RUN_SPEED;
            if matches!(self.state, FighterState::Slide(_)) {
                self.state = FighterState::Run;
            }
            return;
        }
        match self.state {
            FighterState::Run if released && self.body.on_ground && self.body.vel.x != 0.0 => {
                let direction = if self.body.vel.x > 0.0 {
                    Facing::Right
                } else {
                    Facing::Left
                };
                self.state = FighterState::Slide(Slide {
                    ticks_remaining: SLIDE_TICKS,
                    direction,
                });
            }
            FighterState::Slide(_) => {}
            _ => self.body.vel.x = 0.0,
        }
    }

    /// Crouch follows the held key, but only from grounded Idle, Run or Slide.
    pub fn apply_crouch(&mut self, held: bool) {
        if held {
            let can_crouch = matches!(
                self.state,
                FighterState::Idle | FighterState::Run | FighterState::Slide(_)
            );
            if can_crouch && self.body.on_ground {
                self.body.vel.x = 0.0;
                self.state = FighterState::Crouch;
            }
        } else if self.state == FighterState::Crouch {
            self.state = FighterState::Idle;
        }
    }

    /// Consume one tick of player intent. Returns true when a dash started.
    pub fn apply_intent(&mut self, intent: &Intent) -> bool {
        if !self.can_act() {
            return false;
        }
        let pressed = intent.pressed;
        let dashed = pressed.contains(Action::Dash) && self.try_dash();
        if pressed.contains(Action::Block) {
            self.try_block();
        }
        if pressed.contains(Action::Punch) {
            self.try_attack(AttackKind::Punch);
        } else if pressed.contains(Action::Kick) {
            self.try_attack(AttackKind::Kick);
        }
        self.apply_crouch(intent.held.contains(Action::Crouch));
        if pressed.contains(Action::Jump) {
            self.try_jump();
        }
        self.apply_horizontal(intent.horizontal(), intent.released_direction());
        self.settle();
        dashed
    }

    /// Velocity the active state imposes before integration.
    pub(crate) fn drive(&mut self) {
        match self.state {
            FighterState::Dash(d) => self.body.vel.x = d.direction.sign() * DASH_SPEED,
            FighterState::Slide(s) => {
                self.body.vel.x =
                    s.direction.sign() * RUN_SPEED * s.ticks_remaining as f64 / SLIDE_TICKS as f64;
            }
            FighterState::Hit { .. } => self.body.vel.x *= HIT_FRICTION,
            _ => {}
        }
    }

    /// Advance the active state's timer by one tick and apply expiry.
    pub(crate) fn advance_state(&mut self) {
        match &mut self.state {
            FighterState::Attack(a) => {
                a.ticks_remaining = a.ticks_remaining.saturating_sub(1);
                if a.ticks_remaining == 0 {
                    self.finish_attack();
                }
            }
            FighterState::Block(b) => {
                b.ticks_remaining = b.ticks_remaining.saturating_sub(1);
                b.stun_ticks = b.stun_ticks.saturating_sub(1);
                if b.ticks_remaining == 0 && b.stun_ticks == 0 {
                    self.end_block();
                }
            }
            FighterState::Dash(d) => {
                d.ticks_remaining = d.ticks_remaining.saturating_sub(1);
                if d.ticks_remaining == 0 {
                    self.body.vel.x = 0.0;
                    self.state = FighterState::Idle;
                }
            }
            FighterState::Slide(s) => {
                s.ticks_remaining = s.ticks_remaining.saturating_sub(1);
                if s.ticks_remaining == 0 {
                    self.body.vel.x = 0.0;
                    self.state = FighterState::Idle;
                }
            }
            FighterState::Hit { ticks_remaining } | FighterState::Stunned { ticks_remaining } => {
                *ticks_remaining = ticks_remaining.saturating_sub(1);
                if *ticks_remaining == 0 {
                    self.body.vel.x = 0.0;
                    self.state = FighterState::Idle;
                }
            }
            FighterState::Crouch if !self.body.on_ground => {
                self.state = FighterState::Airborne { rising: false };
            }
            _ => {}
        }
        self.settle();
    }

    /// Re-derive Idle/Run/Airborne from the body.
    pub(crate) fn settle(&mut self) {
        if !self.state.is_free() {
            return;
        }
        self.state = if !self.body.on_ground {
            FighterState::Airborne {
                rising: self.body.vel.y > 0.0,
            }
        } else if self.body.vel.x != 0.0 {
            FighterState::Run
        } else {
            FighterState::Idle
        };
    }

    pub(crate) fn finish_attack(&mut self) {
        if matches!(self.state, FighterState::Attack(_)) {
            self.state = FighterState::Idle;
            self.settle();
        }
    }

    /// Any block exit arms the block cooldown.
    pub(crate) fn end_block(&mut self) {
        if matches!(self.state, FighterState::Block(_)) {
            self.block_cooldown = BLOCK_COOLDOWN_TICKS;
            self.state = FighterState::Idle;
            self.settle();
        }
    }

    pub(crate) fn enter_hit(&mut self) {
        self.state = FighterState::Hit {
            ticks_remaining: HIT_TICKS,
        };
    }

    /// Penalty for having an attack parried.
    pub(crate) fn enter_stun(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.body.vel.x = 0.0;
        self.state = FighterState::Stunned {
            ticks_remaining: STUN_TICKS,
        };
        debug!(fighter = ?self.id, "stunned");
    }
}
