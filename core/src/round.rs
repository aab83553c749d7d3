use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{COUNTDOWN_TICKS, TICK_RATE};
use crate::types::{FighterId, Outcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Countdown,
    Fight,
    Result,
}

/// Round clock and result. Goes through Countdown → Fight → Result once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub countdown_ticks: u32,
    pub round_ticks_elapsed: u32,
    pub seconds_remaining: u32,
    pub winner: Option<Outcome>,
}

impl RoundState {
    pub fn new(round_seconds: u32) -> RoundState {
        RoundState {
            phase: RoundPhase::Countdown,
            countdown_ticks: COUNTDOWN_TICKS,
            round_ticks_elapsed: 0,
            seconds_remaining: round_seconds,
            winner: None,
        }
    }

    /// "3", "2", "1" while counting down.
    pub fn countdown_label(&self) -> Option<&'static str> {
        if self.phase != RoundPhase::Countdown {
            return None;
        }
        match self.countdown_ticks {
            t if t > 120 => Some("3"),
            t if t > 60 => Some("2"),
            t if t > 0 => Some("1"),
            _ => None,
        }
    }

    /// One countdown tick; switches to Fight when it runs out.
    pub fn tick_countdown(&mut self) {
        self.countdown_ticks = self.countdown_ticks.saturating_sub(1);
        if self.countdown_ticks == 0 {
            self.phase = RoundPhase::Fight;
            info!("fight");
        }
    }

    /// One fight tick of the round clock. Returns true when time is up.
    pub fn tick_clock(&mut self) -> bool {
        self.round_ticks_elapsed += 1;
        if self.round_ticks_elapsed % TICK_RATE == 0 {
            self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        }
        self.seconds_remaining == 0
    }

    pub fn finish(&mut self, outcome: Outcome) {
        self.phase = RoundPhase::Result;
        self.winner = Some(outcome);
        info!(?outcome, ticks = self.round_ticks_elapsed, "round over");
    }
}

/// Time-out verdict: more health wins, equal health draws.
pub fn decide_by_health(health: [i32; 2]) -> Outcome {
    match health[0].cmp(&health[1]) {
        std::cmp::Ordering::Greater => Outcome::Winner(FighterId::P1),
        std::cmp::Ordering::Less => Outcome::Winner(FighterId::P2),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

/// Knockout verdict: a dead fighter loses at once.
pub fn decide_by_knockout(dead: [bool; 2]) -> Option<Outcome> {
    match dead {
        [true, true] => Some(Outcome::Draw),
        [true, false] => Some(Outcome::Winner(FighterId::P2)),
        [false, true] => Some(Outcome::Winner(FighterId::P1)),
        [false, false] => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_labels_and_switch() {
        let mut round = RoundState::new(60);
        let mut labels = Vec::new();
        while round.phase == RoundPhase::Countdown {
            let label = round.countdown_label();
            if labels.last() != Some(&label) {
                labels.push(label);
            }
            round.tick_countdown();
        }
        assert_eq!(labels, vec![Some("3"), Some("2"), Some("1")]);
        assert_eq!(round.phase, RoundPhase::Fight);
        assert_eq!(round.countdown_label(), None);
    }

    #[test]
    fn clock_runs_one_second_per_sixty_ticks() {
        let mut round = RoundState::new(2);
        round.phase = RoundPhase::Fight;
        for _ in 0..59 {
            assert!(!round.tick_clock());
        }
        assert!(!round.tick_clock());
        assert_eq!(round.seconds_remaining, 1);
        for _ in 0..59 {
            assert!(!round.tick_clock());
        }
        assert!(round.tick_clock());
        assert_eq!(round.round_ticks_elapsed, 120);
    }

    #[test]
    fn timeout_verdicts() {
        assert_eq!(decide_by_health([40, 40]), Outcome::Draw);
        assert_eq!(decide_by_health([41, 40]), Outcome::Winner(FighterId::P1));
        assert_eq!(decide_by_health([0, 3]), Outcome::Winner(FighterId::P2));
    }

    #[test]
    fn knockout_verdicts() {
        assert_eq!(decide_by_knockout([false, false]), None);
        assert_eq!(
            decide_by_knockout([false, true]),
            Some(Outcome::Winner(FighterId::P1))
        );
        assert_eq!(decide_by_knockout([true, true]), Some(Outcome::Draw));
    }
}
