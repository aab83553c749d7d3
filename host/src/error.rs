use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown level: '{name}'. Valid levels: dojo, rooftops")]
    UnknownLevel { name: String },

    #[error("Unknown action '{action}' bound to key '{key}'")]
    UnknownAction { key: String, action: String },

    #[error("Key '{key}' is not bound for player {player} (tick {tick})")]
    UnknownKey { key: String, player: usize, tick: usize },

    #[error("Player {player} name must not be empty")]
    EmptyName { player: usize },

    #[error("round_seconds must be positive")]
    ZeroRoundLength,
}
