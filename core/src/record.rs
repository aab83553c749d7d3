use serde::{Deserialize, Serialize};

use crate::arena::LevelId;
use crate::fighter::Fighter;
use crate::types::{FighterId, Outcome, Tick};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterRecord {
    pub name: String,
    pub final_health: i32,
    pub hits: u32,
    pub combos: u32,
}

impl From<&Fighter> for FighterRecord {
    fn from(f: &Fighter) -> Self {
        FighterRecord {
            name: f.name.clone(),
            final_health: f.health,
            hits: f.stats.hits_landed,
            combos: f.stats.combos_triggered,
        }
    }
}

/// Immutable summary emitted once when a round ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub timestamp: i64,
    pub level: LevelId,
    pub fighters: [FighterRecord; 2],
    pub winner: Outcome,
    /// Fight ticks played (countdown excluded).
    pub ticks: Tick,
}

impl MatchRecord {
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            Outcome::Winner(id) => Some(self.fighter(id).name.as_str()),
            Outcome::Draw => None,
        }
    }

    pub fn fighter(&self, id: FighterId) -> &FighterRecord {
        &self.fighters[id.index()]
    }
}

/// Persistence seam. The core only produces records; storage is the
/// implementor's business.
pub trait MatchRecorder {
    fn record(&mut self, record: MatchRecord);

    /// Leaderboard query: number of recorded wins under `name`.
    fn wins(&self, name: &str) -> u32;
}

/// In-memory history, serializable as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistory {
    pub matches: Vec<MatchRecord>,
}

impl MatchHistory {
    /// (name, wins) for everyone who has played, most wins first, then by name.
    pub fn leaderboard(&self) -> Vec<(String, u32)> {
        let mut names: Vec<&str> = self
            .matches
            .iter()
            .flat_map(|m| m.fighters.iter().map(|f| f.name.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();

        let mut board: Vec<(String, u32)> = names
            .into_iter()
            .map(|name| (name.to_string(), self.wins(name)))
            .collect();
        board.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        board
    }
}

impl MatchRecorder for MatchHistory {
    fn record(&mut self, record: MatchRecord) {
        self.matches.push(record);
    }

    fn wins(&self, name: &str) -> u32 {
        self.matches
            .iter()
            .filter(|m| m.winner_name() == Some(name))
            .count() as u32
    }
}
