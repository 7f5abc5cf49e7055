//! Save codec for player progress
//!
//! Progress travels in a versioned JSON envelope. The codec does no I/O;
//! the caller decides where the string lives. Decoding clamps every field
//! into range so a hand-edited or stale save can never produce an
//! impossible progress state.

use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_COUNT, LEVELS_PER_WORLD, MAX_LIVES, START_LIVES};
use crate::error::GameError;
use crate::sim::Progress;

/// Current envelope version
pub const SAVE_VERSION: u32 = 3;

/// On-disk form of a save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub progress: Progress,
    /// Purchased run-speed upgrade
    #[serde(default)]
    pub speed_boost: bool,
    /// Caller-supplied wall clock (ms since epoch) for sync conflict checks
    #[serde(default)]
    pub saved_at: u64,
}

impl SaveEnvelope {
    pub fn new(progress: Progress, speed_boost: bool, saved_at: u64) -> Self {
        Self {
            version: SAVE_VERSION,
            progress,
            speed_boost,
            saved_at,
        }
    }
}

/// Serialize progress into the current envelope
pub fn encode(envelope: &SaveEnvelope) -> Result<String, GameError> {
    let mut envelope = envelope.clone();
    envelope.version = SAVE_VERSION;
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse and validate a saved envelope
pub fn decode(json: &str) -> Result<SaveEnvelope, GameError> {
    let mut envelope: SaveEnvelope = serde_json::from_str(json)?;
    if envelope.version == 0 || envelope.version > SAVE_VERSION {
        return Err(GameError::UnsupportedSaveVersion(envelope.version));
    }
    if envelope.version < SAVE_VERSION {
        log::info!("Upgrading save from version {} to {}", envelope.version, SAVE_VERSION);
        envelope.version = SAVE_VERSION;
    }
    envelope.progress = clamp_progress(envelope.progress);
    Ok(envelope)
}

fn clamp_progress(mut progress: Progress) -> Progress {
    progress.max_unlocked = progress.max_unlocked.clamp(1, LEVEL_COUNT);
    // An empty life count means a fresh start
    progress.lives = match progress.lives {
        0 => START_LIVES,
        n => n.min(MAX_LIVES),
    };
    for done in progress.world_progress.iter_mut() {
        *done = (*done).min(LEVELS_PER_WORLD);
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let progress = Progress {
            max_unlocked: 27,
            coins: 340,
            lives: 5,
            world_progress: [25, 1, 0, 0],
        };
        let json = encode(&SaveEnvelope::new(progress, true, 1_700_000_000_000)).expect("encode");
        let back = decode(&json).expect("decode");
        assert_eq!(back.progress, progress);
        assert!(back.speed_boost);
        assert_eq!(back.version, SAVE_VERSION);
    }

    #[test]
    fn test_future_version_rejected() {
        let json = r#"{"version": 9, "progress": {"max_unlocked": 2}}"#;
        assert!(matches!(decode(json), Err(GameError::UnsupportedSaveVersion(9))));
        let json = r#"{"version": 0, "progress": {}}"#;
        assert!(matches!(decode(json), Err(GameError::UnsupportedSaveVersion(0))));
    }

    #[test]
    fn test_older_version_upgrades() {
        let json = r#"{"version": 2, "progress": {"max_unlocked": 4, "coins": 10}}"#;
        let save = decode(json).expect("decode");
        assert_eq!(save.version, SAVE_VERSION);
        assert_eq!(save.progress.max_unlocked, 4);
        assert_eq!(save.progress.lives, START_LIVES);
        assert!(!save.speed_boost);
    }

    #[test]
    fn test_out_of_range_fields_clamped() {
        let json = r#"{"version": 3, "progress": {"max_unlocked": 500, "coins": 1, "lives": 0, "world_progress": [40, 3, 0, 99]}}"#;
        let save = decode(json).expect("decode");
        assert_eq!(save.progress.max_unlocked, 100);
        assert_eq!(save.progress.lives, 3);
        assert_eq!(save.progress.world_progress, [25, 3, 0, 25]);

        let json = r#"{"version": 3, "progress": {"max_unlocked": 0, "lives": 200}}"#;
        let save = decode(json).expect("decode");
        assert_eq!(save.progress.max_unlocked, 1);
        assert_eq!(save.progress.lives, 9);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(matches!(decode("not json"), Err(GameError::Save(_))));
    }
}
