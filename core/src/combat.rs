use tracing::debug;

use crate::arena::Arena;
use crate::constants::*;
use crate::fighter::{Fighter, HitOutcome};
use crate::state::FighterState;
use crate::types::{CombatEvent, EventKind, Rect, Vec2};

/// Global emphasis requested by a resolved hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Impact {
    pub hit_stop: u32,
    pub slow_motion: u32,
}

impl Impact {
    fn merge(self, other: Impact) -> Impact {
        Impact {
            hit_stop: self.hit_stop.max(other.hit_stop),
            slow_motion: self.slow_motion.max(other.slow_motion),
        }
    }
}

/// Damage multiplier for the attacker's current combo chain.
pub fn combo_multiplier(combo_counter: u32) -> f64 {
    if combo_counter > 1 {
        1.0 + COMBO_STEP * (combo_counter - 1) as f64
    } else {
        1.0
    }
}

/// Truncated damage after combo scaling.
pub fn scaled_damage(base: i32, combo_counter: u32) -> i32 {
    (base as f64 * combo_multiplier(combo_counter)) as i32
}

/// Strike area in front of the attacker.
pub fn hitbox(attacker: &Fighter) -> Rect {
    let center = Vec2 {
        x: attacker.body.pos.x + attacker.facing.sign() * HITBOX_REACH,
        y: attacker.body.pos.y,
    };
    Rect::centered(center, HITBOX_WIDTH, HITBOX_HEIGHT)
}

/// Run the two evaluation points of `attacker`'s current attack, if any.
///
/// At `MISS_CHECK_TICK` a whiff emits `Miss` and lunges the attacker forward.
/// At `HIT_CHECK_TICK` an overlap resolves the hit exactly once and ends the
/// attack. Both checks may fire for the same attack if the target steps into
/// range in between.
pub fn resolve_attack(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    arena: &Arena,
    events: &mut Vec<CombatEvent>,
) -> Impact {
    let FighterState::Attack(mut attack) = attacker.state else {
        return Impact::default();
    };

    if attack.ticks_remaining == MISS_CHECK_TICK && !attack.miss_checked {
        attack.miss_checked = true;
        attacker.state = FighterState::Attack(attack);
        if !hitbox(attacker).overlaps(&defender.body.rect()) {
            events.push(attacker.event(EventKind::Miss));
            let lunge = attacker.body.pos.x + attacker.facing.sign() * LUNGE_STEP;
            attacker.body.pos.x = arena.clamp_x(lunge);
        }
        return Impact::default();
    }

    if attack.ticks_remaining != HIT_CHECK_TICK || attack.hit_checked {
        return Impact::default();
    }
    attack.hit_checked = true;
    attacker.state = FighterState::Attack(attack);
    if defender.state.is_finished() || !hitbox(attacker).overlaps(&defender.body.rect()) {
        return Impact::default();
    }

    let damage = scaled_damage(BASE_DAMAGE, attacker.combo.counter);
    let outcome = defender.take_hit(damage, attacker.facing, attack.kind);
    attacker.finish_attack();
    debug!(
        attacker = ?attacker.id,
        kind = ?attack.kind,
        damage,
        ?outcome,
        defender_health = defender.health,
        "attack resolved"
    );

    match outcome {
        HitOutcome::Ignored => Impact::default(),
        HitOutcome::Parried => {
            attacker.enter_stun();
            events.push(defender.event(EventKind::Parry));
            Impact {
                hit_stop: HIT_STOP_PARRY,
                slow_motion: 0,
            }
        }
        HitOutcome::Blocked => {
            attacker.register_hit();
            events.push(defender.event(EventKind::Block));
            Impact {
                hit_stop: HIT_STOP_LANDED,
                slow_motion: 0,
            }
        }
        HitOutcome::Landed => {
            attacker.register_hit();
            events.push(CombatEvent {
                position: defender.body.pos,
                ..attacker.event(EventKind::Hit)
            });
            Impact {
                hit_stop: HIT_STOP_LANDED,
                slow_motion: 0,
            }
        }
        HitOutcome::Fatal => {
            attacker.stats.hits_landed += 1;
            events.push(CombatEvent {
                position: defender.body.pos,
                ..attacker.event(EventKind::Fatal)
            });
            Impact {
                hit_stop: HIT_STOP_FATAL,
                slow_motion: SLOW_MOTION_TICKS,
            }
        }
    }
}

/// Combat pass for one tick: fighter one's attack first, then fighter two's.
pub fn resolve_tick(
    fighters: &mut [Fighter; 2],
    arena: &Arena,
    events: &mut Vec<CombatEvent>,
) -> Impact {
    let [first, second] = fighters;
    let a = resolve_attack(first, second, arena, events);
    let b = resolve_attack(second, first, arena, events);
    a.merge(b)
}
