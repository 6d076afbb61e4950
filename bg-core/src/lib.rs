//! bg-core: Backgammon board model, move engine, dice, and configuration.

pub mod board;
pub mod chance;
pub mod config;
pub mod engine;
pub mod legal;
pub mod moves;
pub mod notation;

pub use board::{
    is_occupied_by, is_open, pip_distance, point_owner, Board, Color, Dice, Status,
    CHECKERS_PER_SIDE, POINTS,
};
pub use chance::{roll_die, roll_pair, roll_turn, ChanceMode, EventKey, TurnContext};
pub use config::{ConfigError, SimConfig};
pub use engine::{apply_move, winner, Applied, MoveError, MoveOutcome};
pub use legal::{destinations_from, entry_index, movable_sources, Destination};
pub use moves::{remaining_dice, Source, To, UsedDie};

/// Ruleset identifier recorded in manifests and logs.
pub const RULESET_ID: &str = "standard_backgammon_v1";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod legal_tests;
#[cfg(test)]
mod notation_tests;
