//! JSON configuration for headless matches.
//!
//! Parses the host-side match file and converts it into the core's
//! `MatchConfig` plus one binding table per player.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stickfight_core::{Action, Bindings, FrameInput, LevelId, MatchConfig, ROUND_SECONDS};

use crate::error::HostError;

/// Headless match configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Display names for P1 and P2
    #[serde(default = "default_names")]
    pub names: [String; 2],
    /// Level name (default: "dojo")
    #[serde(default = "default_level")]
    pub level: String,
    /// Round length in seconds (default: 60)
    #[serde(default = "default_round_seconds")]
    pub round_seconds: u32,
    /// Slow-motion window after a fatal blow (default: on)
    #[serde(default = "default_slow_motion")]
    pub slow_motion: bool,
    /// Per-player key → action rebinds applied on top of the default layout
    #[serde(default)]
    pub bindings: [Option<BTreeMap<String, String>>; 2],
    /// Match history file (overridden by --history)
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

fn default_names() -> [String; 2] {
    MatchConfig::default().names
}

fn default_level() -> String {
    LevelId::Dojo.name().to_string()
}

fn default_round_seconds() -> u32 {
    ROUND_SECONDS
}

fn default_slow_motion() -> bool {
    true
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            names: default_names(),
            level: default_level(),
            round_seconds: default_round_seconds(),
            slow_motion: default_slow_motion(),
            bindings: [None, None],
            history_path: None,
        }
    }
}

impl HostConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, HostError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, HostError> {
        let config: HostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), HostError> {
        for (player, name) in self.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(HostError::EmptyName { player: player + 1 });
            }
        }
        if self.round_seconds == 0 {
            return Err(HostError::ZeroRoundLength);
        }
        Self::parse_level(&self.level)?;
        self.player_bindings()?;
        Ok(())
    }

    fn parse_level(name: &str) -> Result<LevelId, HostError> {
        LevelId::from_name(name).ok_or_else(|| HostError::UnknownLevel {
            name: name.to_string(),
        })
    }

    fn apply_rebinds(
        mut bindings: Bindings,
        table: &BTreeMap<String, String>,
    ) -> Result<Bindings, HostError> {
        for (key, action) in table {
            let action =
                Action::from_name(action).ok_or_else(|| HostError::UnknownAction {
                    key: key.clone(),
                    action: action.clone(),
                })?;
            bindings.rebind(key, action);
        }
        Ok(bindings)
    }

    /// Binding tables for P1 and P2: the default layout plus any rebinds.
    pub fn player_bindings(&self) -> Result<[Bindings; 2], HostError> {
        let resolve = |slot: usize| match &self.bindings[slot] {
            Some(table) => Self::apply_rebinds(Bindings::default_for(slot), table),
            None => Ok(Bindings::default_for(slot)),
        };
        Ok([resolve(0)?, resolve(1)?])
    }

    /// Convert to the core's MatchConfig, stamped with the caller's start time.
    pub fn to_match_config(&self, started_at: i64) -> Result<MatchConfig, HostError> {
        Ok(MatchConfig {
            level: Self::parse_level(&self.level)?,
            names: self.names.clone(),
            round_seconds: self.round_seconds,
            slow_motion: self.slow_motion,
            started_at,
        })
    }
}

/// Held key names per tick, `[p1_keys, p2_keys]`.
pub type KeyTranscript = Vec<[Vec<String>; 2]>;

pub fn load_transcript(path: &Path) -> Result<KeyTranscript, HostError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Map every key through the player's bindings. Unbound keys are rejected.
pub fn resolve_transcript(
    transcript: &KeyTranscript,
    bindings: &[Bindings; 2],
) -> Result<Vec<[FrameInput; 2]>, HostError> {
    transcript
        .iter()
        .enumerate()
        .map(|(tick, keys)| {
            for (slot, held) in keys.iter().enumerate() {
                if let Some(key) = held.iter().find(|k| bindings[slot].action_for(k).is_none()) {
                    return Err(HostError::UnknownKey {
                        key: key.clone(),
                        player: slot + 1,
                        tick,
                    });
                }
            }
            Ok([
                bindings[0].translate(keys[0].as_slice()),
                bindings[1].translate(keys[1].as_slice()),
            ])
        })
        .collect()
}
