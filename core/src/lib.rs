pub mod arena;
pub mod combat;
pub mod constants;
pub mod fatality;
pub mod fighter;
pub mod hash;
pub mod input;
pub mod physics;
pub mod record;
pub mod round;
pub mod sim;
pub mod state;
pub mod types;

pub use arena::{Arena, Border, LevelId, Platform};
pub use combat::{combo_multiplier, resolve_attack, scaled_damage};
pub use constants::*;
pub use fatality::{Fatality, FatalityPhase};
pub use fighter::{Fighter, HitOutcome};
pub use hash::*;
pub use input::{Action, ActionSet, Bindings, FrameInput, NULL_INPUT};
pub use physics::{apply_gravity, move_and_collide, Body};
pub use record::{FighterRecord, MatchHistory, MatchRecord, MatchRecorder};
pub use round::{RoundPhase, RoundState};
pub use sim::{Simulation, Snapshot, StepOutput};
pub use state::{FighterState, Pose};
pub use types::*;
