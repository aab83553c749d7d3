use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arena::Arena;
use crate::combat::resolve_tick;
use crate::fighter::Fighter;
use crate::input::{FrameInput, Intent, NULL_INPUT};
use crate::physics::slow_factor;
use crate::record::{FighterRecord, MatchRecord};
use crate::round::{decide_by_health, decide_by_knockout, RoundPhase, RoundState};
use crate::state::Pose;
use crate::types::*;

/// Whole match: arena, both fighters, round clock and global timers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub config: MatchConfig,
    pub arena: Arena,
    pub fighters: [Fighter; 2],
    pub round: RoundState,
    pub tick: Tick,
    /// Ticks left in which nothing advances.
    pub hit_stop: u32,
    /// Ticks left in which physics runs at reduced speed.
    pub slow_motion: u32,
    prev_inputs: [FrameInput; 2],
    record: Option<MatchRecord>,
}

/// Everything one tick produced for collaborators.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutput {
    pub events: Vec<CombatEvent>,
    /// Present only on the tick the round ended.
    pub record: Option<MatchRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterSnapshot {
    pub id: FighterId,
    pub name: String,
    pub position: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    pub health: i32,
    pub max_health: i32,
    pub pose: Pose,
    pub combo_counter: u32,
    pub show_combo: bool,
}

/// Read-only per-tick view for the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub phase: RoundPhase,
    pub countdown_label: Option<String>,
    pub seconds_remaining: u32,
    pub hit_stop: u32,
    pub slow_motion: u32,
    pub fighters: [FighterSnapshot; 2],
}

impl Simulation {
    pub fn new(config: MatchConfig) -> Simulation {
        let arena = Arena::for_level(config.level);
        let fighters = spawn_fighters(&arena, &config.names);
        Simulation {
            round: RoundState::new(config.round_seconds),
            arena,
            fighters,
            config,
            tick: 0,
            hit_stop: 0,
            slow_motion: 0,
            prev_inputs: [NULL_INPUT; 2],
            record: None,
        }
    }

    /// New match under the same config: fresh fighters, fresh round.
    pub fn rematch(&mut self, started_at: i64) {
        self.fighters = spawn_fighters(&self.arena, &self.config.names);
        self.config.started_at = started_at;
        self.round = RoundState::new(self.config.round_seconds);
        self.tick = 0;
        self.hit_stop = 0;
        self.slow_motion = 0;
        self.prev_inputs = [NULL_INPUT; 2];
        self.record = None;
    }

    pub fn is_over(&self) -> bool {
        self.round.phase == RoundPhase::Result
    }

    pub fn record(&self) -> Option<&MatchRecord> {
        self.record.as_ref()
    }

    /// Advance the whole match by one tick.
    ///
    /// Order:
    ///  0. Halted once the round has a result
    ///  1. Countdown (fighters frozen)
    ///  2. Hit-stop freeze
    ///  3. Round clock, time-out verdict
    ///  4. Fighter physics + state, P1 then P2
    ///  5. Combat pass, P1's attack then P2's
    ///  6. Input intents
    ///  7. Knockout verdict
    pub fn step(&mut self, inputs: &[FrameInput; 2]) -> StepOutput {
        let mut out = StepOutput::default();

        // 0. Halted
        if self.is_over() {
            return out;
        }
        self.tick += 1;

        // 1. Countdown
        if self.round.phase == RoundPhase::Countdown {
            self.prev_inputs = *inputs;
            self.round.tick_countdown();
            return out;
        }

        // 2. Hit-stop. Inputs stay unconsumed so presses survive the freeze.
        if self.hit_stop > 0 {
            self.hit_stop -= 1;
            return out;
        }

        let intents = [
            Intent::from_frames(&self.prev_inputs[0], &inputs[0]),
            Intent::from_frames(&self.prev_inputs[1], &inputs[1]),
        ];
        self.prev_inputs = *inputs;

        // 3. Round clock
        if self.round.tick_clock() {
            let outcome = decide_by_health([self.fighters[0].health, self.fighters[1].health]);
            out.record = Some(self.finish(outcome));
            return out;
        }

        // 4. Physics + state
        let slow = slow_factor(self.slow_motion, self.config.slow_motion);
        self.slow_motion = self.slow_motion.saturating_sub(1);
        for f in &mut self.fighters {
            if let Some(event) = f.update(&self.arena, slow) {
                out.events.push(event);
            }
        }

        // 5. Combat
        let impact = resolve_tick(&mut self.fighters, &self.arena, &mut out.events);
        self.hit_stop = self.hit_stop.max(impact.hit_stop);
        if self.config.slow_motion {
            self.slow_motion = self.slow_motion.max(impact.slow_motion);
        }

        // 6. Intents
        for (f, intent) in self.fighters.iter_mut().zip(&intents) {
            if f.apply_intent(intent) {
                out.events.push(f.event(EventKind::DashStarted));
            }
        }

        for event in &out.events {
            debug!(tick = self.tick, kind = ?event.kind, actor = ?event.actor, "event");
        }

        // 7. Knockout
        let dead = [self.fighters[0].is_dead(), self.fighters[1].is_dead()];
        if let Some(outcome) = decide_by_knockout(dead) {
            out.record = Some(self.finish(outcome));
        }
        out
    }

    fn finish(&mut self, outcome: Outcome) -> MatchRecord {
        self.round.finish(outcome);
        let record = MatchRecord {
            timestamp: self.config.started_at,
            level: self.config.level,
            fighters: [
                FighterRecord::from(&self.fighters[0]),
                FighterRecord::from(&self.fighters[1]),
            ],
            winner: outcome,
            ticks: self.round.round_ticks_elapsed,
        };
        info!(winner = ?record.winner_name(), level = self.config.level.name(), "match recorded");
        self.record = Some(record.clone());
        record
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            phase: self.round.phase,
            countdown_label: self.round.countdown_label().map(str::to_string),
            seconds_remaining: self.round.seconds_remaining,
            hit_stop: self.hit_stop,
            slow_motion: self.slow_motion,
            fighters: [
                fighter_snapshot(&self.fighters[0]),
                fighter_snapshot(&self.fighters[1]),
            ],
        }
    }
}

fn spawn_fighters(arena: &Arena, names: &[String; 2]) -> [Fighter; 2] {
    FighterId::ALL.map(|id| {
        Fighter::new(
            id,
            &names[id.index()],
            arena.spawn_x[id.index()],
            arena.ground_y,
        )
    })
}

fn fighter_snapshot(f: &Fighter) -> FighterSnapshot {
    FighterSnapshot {
        id: f.id,
        name: f.name.clone(),
        position: f.body.pos,
        facing: f.facing,
        on_ground: f.body.on_ground,
        health: f.health,
        max_health: f.max_health,
        pose: f.state.pose(),
        combo_counter: f.combo.counter,
        show_combo: f.combo.show,
    }
}
