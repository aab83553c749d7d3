use sha2::{Digest, Sha256};

use crate::input::FrameInput;
use crate::record::MatchRecord;
use crate::types::Outcome;

/// SHA-256 of the full per-tick action transcript.
pub fn hash_transcript(transcript: &[[FrameInput; 2]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for tick_inputs in transcript {
        for input in tick_inputs {
            hasher.update([input.held.0]);
        }
    }
    hasher.finalize().into()
}

/// SHA-256 over a record's identifying fields.
pub fn hash_record(record: &MatchRecord) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(record.timestamp.to_le_bytes());
    hasher.update(record.level.name().as_bytes());
    for f in &record.fighters {
        hasher.update((f.name.len() as u32).to_le_bytes());
        hasher.update(f.name.as_bytes());
        hasher.update(f.final_health.to_le_bytes());
        hasher.update(f.hits.to_le_bytes());
        hasher.update(f.combos.to_le_bytes());
    }
    let winner: i32 = match record.winner {
        Outcome::Winner(id) => id.index() as i32,
        Outcome::Draw => -1,
    };
    hasher.update(winner.to_le_bytes());
    hasher.update(record.ticks.to_le_bytes());
    hasher.finalize().into()
}
