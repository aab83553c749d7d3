use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arena::Arena;
use crate::constants::*;
use crate::fatality::{self, Fatality};
use crate::physics::{apply_gravity, move_and_collide, Body};
use crate::state::FighterState;
use crate::types::{AttackKind, CombatEvent, EventKind, Facing, FighterId};

/// Rolling combo chain of the fighter as an attacker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub counter: u32,
    pub ticks_remaining: u32,
    /// Combo counter is worth displaying (two or more hits).
    pub show: bool,
}

/// Hit counters for the current match; `reset_for_round` carries them over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hits_landed: u32,
    pub combos_triggered: u32,
}

/// What a hit did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Target was untouchable (dashing, already finished).
    Ignored,
    /// Caught in the parry window: no damage, attacker gets punished.
    Parried,
    /// Absorbed by a late block at reduced damage.
    Blocked,
    Landed,
    /// Health reached zero and the fatality sequence began.
    Fatal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    pub body: Body,
    pub facing: Facing,
    pub health: i32,
    pub max_health: i32,
    pub state: FighterState,
    pub block_cooldown: u32,
    pub dash_cooldown: u32,
    pub combo: Combo,
    pub stats: Stats,
}

impl Fighter {
    pub fn new(id: FighterId, name: &str, spawn_x: f64, ground_y: f64) -> Fighter {
        Fighter {
            id,
            name: name.to_string(),
            body: Body::grounded_at(spawn_x, ground_y),
            facing: spawn_facing(id),
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            state: FighterState::Idle,
            block_cooldown: 0,
            dash_cooldown: 0,
            combo: Combo::default(),
            stats: Stats::default(),
        }
    }

    /// Back to spawn with every transient field cleared. Keeps name and stats.
    pub fn reset_for_round(&mut self, spawn_x: f64, ground_y: f64) {
        *self = Fighter {
            name: std::mem::take(&mut self.name),
            stats: self.stats,
            ..Fighter::new(self.id, "", spawn_x, ground_y)
        };
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.state, FighterState::Dead)
    }

    /// Per-tick update: timers, velocity, integration, state expiry.
    /// Returns a `Landed` event on touchdown.
    pub fn update(&mut self, arena: &Arena, slow: f64) -> Option<CombatEvent> {
        match self.state {
            FighterState::Dead => return None,
            FighterState::Fatality(mut seq) => {
                let progress = fatality::advance(&mut seq, &mut self.body, arena);
                self.state = if progress.finished {
                    debug!(fighter = ?self.id, "fatality finished");
                    FighterState::Dead
                } else {
                    FighterState::Fatality(seq)
                };
                return progress.landed.then(|| self.event(EventKind::Landed));
            }
            _ => {}
        }

        self.block_cooldown = self.block_cooldown.saturating_sub(1);
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.tick_combo();

        self.drive();
        let body = apply_gravity(&self.body, slow);
        let moved = move_and_collide(&body, arena, slow);
        self.body = moved.body;
        self.advance_state();

        moved.landed.then(|| self.event(EventKind::Landed))
    }

    /// Defender side of a hit. `attacker_facing` is the direction the blow travels.
    pub fn take_hit(&mut self, damage: i32, attacker_facing: Facing, kind: AttackKind) -> HitOutcome {
        if self.state.is_finished() || self.is_invulnerable() {
            return HitOutcome::Ignored;
        }

        let outcome = match &mut self.state {
            FighterState::Block(block) if block.parry_active() => {
                self.end_block();
                return HitOutcome::Parried;
            }
            FighterState::Block(block) => {
                block.stun_ticks = BLOCK_STUN_TICKS;
                let reduced = (damage as f64 * BLOCK_DAMAGE_FACTOR) as i32;
                self.health = (self.health - reduced).max(0);
                HitOutcome::Blocked
            }
            _ => {
                self.health = (self.health - damage).max(0);
                self.facing = attacker_facing.flipped();
                let (kx, ky) = kind.knockback();
                self.body.vel.x = attacker_facing.sign() * kx;
                self.body.vel.y = ky;
                self.body.on_ground = false;
                self.enter_hit();
                HitOutcome::Landed
            }
        };

        if self.health <= 0 {
            self.start_fatality(attacker_facing, kind);
            return HitOutcome::Fatal;
        }
        outcome
    }

    /// Fatal blows always end here, never directly in Dead.
    fn start_fatality(&mut self, attacker_facing: Facing, kind: AttackKind) {
        self.health = 0;
        self.facing = attacker_facing;
        let (kx, ky) = kind.knockback();
        self.body.vel.x = attacker_facing.sign() * kx;
        self.body.vel.y = ky;
        self.body.on_ground = false;
        self.state = FighterState::Fatality(Fatality::launch(attacker_facing));
        debug!(fighter = ?self.id, "fatality triggered");
    }

    /// Attacker-side bookkeeping for a landed or blocked hit.
    pub fn register_hit(&mut self) {
        self.stats.hits_landed += 1;
        self.combo.counter += 1;
        self.combo.ticks_remaining = COMBO_WINDOW_TICKS;
        self.combo.show = self.combo.counter >= 2;
        if self.combo.counter == 2 {
            self.stats.combos_triggered += 1;
        }
    }

    fn tick_combo(&mut self) {
        if self.combo.counter == 0 {
            return;
        }
        self.combo.ticks_remaining = self.combo.ticks_remaining.saturating_sub(1);
        if self.combo.ticks_remaining == 0 {
            self.combo = Combo::default();
        }
    }

    pub(crate) fn event(&self, kind: EventKind) -> CombatEvent {
        CombatEvent {
            kind,
            actor: self.id,
            position: self.body.pos,
        }
    }
}

fn spawn_facing(id: FighterId) -> Facing {
    match id {
        FighterId::P1 => Facing::Right,
        FighterId::P2 => Facing::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::LevelId;
    use crate::state::Block;

    fn arena() -> Arena {
        Arena::for_level(LevelId::Dojo)
    }

    fn fighter_with_health(health: i32) -> Fighter {
        let arena = arena();
        let mut f = Fighter::new(FighterId::P2, "Ken", arena.spawn_x[1], arena.ground_y);
        f.health = health;
        f
    }

    #[test]
    fn clean_punch_scenario() {
        let mut f = fighter_with_health(10);
        let outcome = f.take_hit(7, Facing::Right, AttackKind::Punch);
        assert_eq!(outcome, HitOutcome::Landed);
        assert_eq!(f.health, 3);
        assert_eq!(f.state, FighterState::Hit { ticks_remaining: HIT_TICKS });
        assert_eq!(f.facing, Facing::Left);
        assert_eq!(f.body.vel.x, 16.0);
        assert_eq!(f.body.vel.y, 6.0);
    }

    #[test]
    fn kick_knockback_follows_attack_direction() {
        let mut f = fighter_with_health(50);
        f.take_hit(7, Facing::Left, AttackKind::Kick);
        assert_eq!(f.body.vel.x, -12.0);
        assert_eq!(f.body.vel.y, 10.0);
        assert_eq!(f.facing, Facing::Right);
    }

    #[test]
    fn parry_negates_damage() {
        let mut f = fighter_with_health(50);
        assert!(f.try_block());
        let outcome = f.take_hit(7, Facing::Right, AttackKind::Punch);
        assert_eq!(outcome, HitOutcome::Parried);
        assert_eq!(f.health, 50);
        assert_eq!(f.state, FighterState::Idle);
        assert_eq!(f.block_cooldown, BLOCK_COOLDOWN_TICKS);
    }

    #[test]
    fn late_block_halves_damage() {
        let mut f = fighter_with_health(50);
        f.state = FighterState::Block(Block {
            ticks_remaining: 10,
            stun_ticks: 0,
        });
        let outcome = f.take_hit(7, Facing::Right, AttackKind::Kick);
        assert_eq!(outcome, HitOutcome::Blocked);
        assert_eq!(f.health, 47);
        assert_eq!(
            f.state,
            FighterState::Block(Block {
                ticks_remaining: 10,
                stun_ticks: BLOCK_STUN_TICKS
            })
        );
    }

    #[test]
    fn dash_makes_hits_ignored() {
        let mut f = fighter_with_health(50);
        assert!(f.try_dash());
        assert_eq!(f.take_hit(70, Facing::Right, AttackKind::Kick), HitOutcome::Ignored);
        assert_eq!(f.health, 50);
    }

    #[test]
    fn lethal_hit_clamps_and_starts_fatality() {
        let mut f = fighter_with_health(5);
        let outcome = f.take_hit(7, Facing::Right, AttackKind::Punch);
        assert_eq!(outcome, HitOutcome::Fatal);
        assert_eq!(f.health, 0);
        assert!(matches!(f.state, FighterState::Fatality(_)));
        assert_eq!(f.facing, Facing::Right);
        assert_eq!(f.take_hit(7, Facing::Right, AttackKind::Punch), HitOutcome::Ignored);
    }

    #[test]
    fn combo_counts_once_per_chain_and_lapses() {
        let arena = arena();
        let mut f = fighter_with_health(50);
        f.register_hit();
        f.register_hit();
        f.register_hit();
        assert_eq!(f.combo.counter, 3);
        assert!(f.combo.show);
        assert_eq!(f.stats.combos_triggered, 1);
        assert_eq!(f.stats.hits_landed, 3);

        for _ in 0..COMBO_WINDOW_TICKS {
            f.update(&arena, 1.0);
        }
        assert_eq!(f.combo, Combo::default());

        f.register_hit();
        f.register_hit();
        assert_eq!(f.stats.combos_triggered, 2);
    }

    #[test]
    fn reset_keeps_identity_and_stats() {
        let arena = arena();
        let mut f = fighter_with_health(5);
        f.register_hit();
        f.take_hit(7, Facing::Right, AttackKind::Punch);
        f.reset_for_round(arena.spawn_x[1], arena.ground_y);
        assert_eq!(f.name, "Ken");
        assert_eq!(f.id, FighterId::P2);
        assert_eq!(f.health, MAX_HEALTH);
        assert_eq!(f.state, FighterState::Idle);
        assert_eq!(f.combo, Combo::default());
        assert_eq!(f.stats.hits_landed, 1);
    }

    #[test]
    fn idle_fighter_rests_on_ground() {
        let arena = arena();
        let mut f = fighter_with_health(50);
        let before = f.body;
        assert_eq!(f.update(&arena, 1.0), None);
        assert_eq!(f.body, before);
        assert_eq!(f.state, FighterState::Idle);
    }
}
