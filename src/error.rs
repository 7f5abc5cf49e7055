//! Errors surfaced at the command boundary
//!
//! The simulation itself never fails; invalid transitions inside a tick are
//! no-ops. Only level-select commands and save decoding report errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("level {0} does not exist")]
    UnknownLevel(u32),

    #[error("level {level} is locked (max unlocked {max_unlocked})")]
    LevelLocked { level: u32, max_unlocked: u32 },

    #[error("no level is being played")]
    NoActiveLevel,

    #[error("revive is only possible after losing a level")]
    ReviveNotAllowed,

    #[error("not enough coins: need {needed}, have {have}")]
    NotEnoughCoins { needed: u32, have: u32 },

    #[error("save data is malformed: {0}")]
    Save(#[from] serde_json::Error),

    #[error("unsupported save version {0}")]
    UnsupportedSaveVersion(u32),

    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
}
