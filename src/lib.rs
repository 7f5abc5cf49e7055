//! Super Pio - side-scrolling platformer core
//!
//! Core modules:
//! - `level`: Deterministic procedural level generation (chunks + composer)
//! - `sim`: Tile physics, collisions and entity interactions
//! - `session`: Level-select commands and progress ownership
//! - `persistence`: Versioned save envelope for progress
//! - `settings`: Runtime configuration

pub mod error;
pub mod level;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use level::{LevelCatalog, LevelDescriptor, generate_level};
pub use session::Session;
pub use settings::Settings;
pub use sim::{GameEvent, LevelStatus, Progress, TickInput, WorldState, tick};

/// Game configuration constants
///
/// Time values are in frames: one frame is `dt = 1.0` at the nominal 60 Hz.
pub mod consts {
    /// Tile size in pixels
    pub const TILE_SIZE: f32 = 32.0;
    /// Nominal frame duration in milliseconds
    pub const FRAME_MS: f32 = 16.67;
    /// Largest frame multiplier accepted by `tick` (tab-resume stalls)
    pub const MAX_DT: f32 = 3.0;

    /// Grid layout
    pub const GRID_ROWS: usize = 14;
    pub const GROUND_ROW: usize = 9;
    pub const CHUNK_WIDTH: usize = 30;
    /// Empty columns before the first chunk and after the last
    pub const LEVEL_MARGIN: usize = 8;

    /// Level range
    pub const LEVEL_COUNT: u32 = 100;
    pub const LEVELS_PER_WORLD: u32 = 25;
    pub const WORLD_COUNT: usize = 4;

    /// Movement
    pub const GRAVITY: f32 = 0.42;
    pub const JUMP_VELOCITY: f32 = -10.5;
    pub const WALK_SPEED: f32 = 3.2;
    pub const SPEED_BOOST: f32 = 1.4;
    pub const MAX_FALL_SPEED: f32 = 16.0;
    pub const FRICTION: f32 = 0.65;
    /// Previous-bottom tolerance for landing on one-way platforms
    pub const PLATFORM_EPSILON: f32 = 2.0;
    /// Distance below the map bottom that counts as a pit fall
    pub const PIT_DEPTH: f32 = 100.0;

    /// Player
    pub const PLAYER_WIDTH: f32 = 76.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 9;
    pub const START_AMMO: u32 = 5;
    pub const MAX_AMMO: u32 = 30;
    pub const AMMO_PER_PICKUP: u32 = 3;

    /// Timers (frames)
    pub const SPAWN_INVINCIBLE_FRAMES: f32 = 120.0;
    pub const SPAWN_GRACE_FRAMES: f32 = 90.0;
    pub const HURT_INVINCIBLE_FRAMES: f32 = 120.0;
    pub const PIT_INVINCIBLE_FRAMES: f32 = 90.0;
    pub const REVIVE_INVINCIBLE_FRAMES: f32 = 180.0;
    pub const REVIVE_GRACE_FRAMES: f32 = 60.0;
    pub const DEATH_FRAMES: f32 = 90.0;
    pub const CRUMBLE_FRAMES: f32 = 60.0;
    pub const SHOOT_COOLDOWN_FRAMES: f32 = 14.0;

    /// Bullets
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_LIFE_FRAMES: f32 = 60.0;

    /// Scoring
    pub const COIN_SCORE: u32 = 50;
    pub const ENEMY_SCORE: u32 = 100;
    pub const REVIVE_COST: u32 = 100;

    /// Overlap margins (positive shrinks both boxes)
    pub const PICKUP_MARGIN: f32 = 6.0;
    pub const ENEMY_MARGIN: f32 = 8.0;
    /// Player bottom must be above this fraction of the enemy height to stomp
    pub const STOMP_RATIO: f32 = 0.6;
}

/// Column range test shared by the composer and the world builder
#[inline]
pub fn in_span(col: i32, start: i32, len: i32) -> bool {
    col >= start && col < start + len
}
