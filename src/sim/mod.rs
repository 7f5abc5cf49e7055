//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-scaled timestep, clamped per tick
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod interact;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Contact, PlatformRule, Rect};
pub use interact::revive;
pub use snapshot::RenderSnapshot;
pub use state::{
    AnimState, BlockReward, Body, Bullet, DeathCause, Enemy, EnemyMotion, GameEvent, LevelStatus, LifeState,
    LoseReason, Particle, Pickup, PickupKind, Player, Progress, SolidKind, SolidTile, WorldState, MAX_PARTICLES,
};
pub use tick::{TickInput, tick};
