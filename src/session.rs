//! Level-select commands and progress ownership
//!
//! A `Session` holds the pre-generated catalog, the persistent progress and
//! at most one live world. The world carries its own copy of the progress
//! while a level runs; the session takes it back after every tick and
//! command so there is a single source of truth between levels.

use crate::consts::{LEVEL_COUNT, START_LIVES};
use crate::error::GameError;
use crate::level::LevelCatalog;
use crate::settings::Settings;
use crate::sim::{GameEvent, Progress, RenderSnapshot, TickInput, WorldState, interact, tick};

pub struct Session {
    catalog: LevelCatalog,
    progress: Progress,
    pub settings: Settings,
    world: Option<WorldState>,
}

impl Session {
    pub fn new(settings: Settings, progress: Progress) -> Self {
        Self::with_catalog(LevelCatalog::generate(), settings, progress)
    }

    pub fn with_catalog(catalog: LevelCatalog, settings: Settings, progress: Progress) -> Self {
        Self {
            catalog,
            progress,
            settings,
            world: None,
        }
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn world(&self) -> Option<&WorldState> {
        self.world.as_ref()
    }

    /// Level currently loaded, if any
    pub fn current_level(&self) -> Option<u32> {
        self.world.as_ref().map(|w| w.level.level_index)
    }

    /// Build a fresh world for level `n`
    pub fn start_level(&mut self, n: u32) -> Result<(), GameError> {
        if n == 0 || n > LEVEL_COUNT {
            return Err(GameError::UnknownLevel(n));
        }
        if n > self.progress.max_unlocked {
            return Err(GameError::LevelLocked {
                level: n,
                max_unlocked: self.progress.max_unlocked,
            });
        }
        self.sync_progress();
        if self.progress.lives == 0 {
            self.progress.lives = START_LIVES;
        }
        let level = self.catalog.get(n).ok_or(GameError::UnknownLevel(n))?;
        log::info!("Starting level {} ({}, difficulty {})", n, level.theme.as_str(), level.difficulty);
        self.world = Some(WorldState::new(level, self.progress, &self.settings));
        Ok(())
    }

    /// Restart the current level with a full set of lives
    pub fn retry(&mut self) -> Result<(), GameError> {
        let n = self.current_level().ok_or(GameError::NoActiveLevel)?;
        self.sync_progress();
        // Drop the old world so start_level cannot sync its lives back
        self.world = None;
        self.progress.lives = START_LIVES;
        self.start_level(n)
    }

    pub fn next_level(&mut self) -> Result<(), GameError> {
        let n = self.current_level().ok_or(GameError::NoActiveLevel)?;
        self.start_level(n + 1)
    }

    /// Paid continue on the lose screen
    pub fn revive(&mut self) -> Result<(), GameError> {
        let world = self.world.as_mut().ok_or(GameError::NoActiveLevel)?;
        let result = interact::revive(world);
        self.sync_progress();
        result
    }

    /// Leave the level; returns the progress to persist
    pub fn exit_level(&mut self) -> Progress {
        self.sync_progress();
        if let Some(world) = self.world.take() {
            log::debug!("Left level {} with status {:?}", world.level.level_index, world.status);
        }
        self.progress
    }

    /// Advance the live world, if there is one
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if let Some(world) = self.world.as_mut() {
            tick(world, input, dt);
        }
        self.sync_progress();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.as_mut().map(WorldState::drain_events).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.world.as_ref().map(WorldState::snapshot)
    }

    fn sync_progress(&mut self) {
        if let Some(world) = &self.world {
            self.progress = world.progress;
        }
    }
}
