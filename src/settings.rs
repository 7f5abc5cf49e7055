//! Runtime settings
//!
//! Loaded from a JSON file next to the save; every field is optional and
//! falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_DT;
use crate::error::GameError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === View ===
    /// Visible width in pixels; drives the camera clamp and snapshot culling
    pub viewport_width: f32,

    // === Gameplay ===
    /// Run 40% faster
    pub speed_boost: bool,
    /// Chance that each enemy after the first is left out of the world
    pub enemy_cull_chance: f32,

    // === Timing ===
    /// Largest frame multiplier a single tick may apply
    pub max_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            speed_boost: false,
            enemy_cull_chance: 0.25,
            max_dt: MAX_DT,
        }
    }
}

impl Settings {
    /// Parse settings JSON; out-of-range values are pulled back in
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from disk; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self, GameError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn sanitized(mut self) -> Self {
        if !self.viewport_width.is_finite() || self.viewport_width < 1.0 {
            log::warn!("Ignoring viewport width {}", self.viewport_width);
            self.viewport_width = Self::default().viewport_width;
        }
        if !self.enemy_cull_chance.is_finite() {
            self.enemy_cull_chance = Self::default().enemy_cull_chance;
        }
        self.enemy_cull_chance = self.enemy_cull_chance.clamp(0.0, 1.0);
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            self.max_dt = MAX_DT;
        }
        self
    }
}
