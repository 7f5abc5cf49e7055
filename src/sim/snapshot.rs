//! Read-only view of a world for the presentation layer
//!
//! Built on demand from `WorldState`; only what falls inside the camera
//! window is included for tiles and decorations.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{AnimState, CrumbleState, LevelStatus, LifeState, PickupKind, SolidKind, WorldState};
use crate::consts::TILE_SIZE;
use crate::level::{EnemyType, Theme};

/// Extra pixels drawn past each side of the viewport
const CULL_PADDING: f32 = 2.0 * TILE_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub level_index: u32,
    pub world: u32,
    pub theme: Theme,
    pub status: LevelStatus,
    pub score: u32,
    pub level_coins: u32,
    pub total_coins: u32,
    pub lives: u8,
    pub ammo: u32,
    /// Whole seconds, rounded up
    pub time_left: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: f32,
    pub anim: AnimState,
    pub frame: u32,
    /// Invincible players blink
    pub blinking: bool,
    pub dying: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileLook {
    Ground,
    Platform,
    Crumble { crumbling: bool },
    Breakable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub pos: Vec2,
    pub look: TileLook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PickupKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyType,
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: f32,
    pub frame: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationView {
    pub pos: Vec2,
    pub name: String,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub camera: Vec2,
    pub map_size: Vec2,
    pub hud: Hud,
    pub player: PlayerView,
    pub tiles: Vec<TileView>,
    pub pickups: Vec<PickupView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<SpriteView>,
    pub particles: Vec<SpriteView>,
    pub decorations: Vec<DecorationView>,
}

impl WorldState {
    /// Capture the drawable state; never mutates the world
    pub fn snapshot(&self) -> RenderSnapshot {
        let left = self.camera.x - CULL_PADDING;
        let right = self.camera.x + self.settings.viewport_width + CULL_PADDING;
        let visible = |x: f32, w: f32| x + w >= left && x <= right;

        let tiles = self
            .solids
            .iter()
            .filter(|t| visible(t.pos.x, TILE_SIZE))
            .map(|t| {
                let look = match (t.kind, t.crumble, t.breakable) {
                    (_, _, Some(_)) => TileLook::Breakable,
                    (_, Some(state), None) => TileLook::Crumble {
                        crumbling: matches!(state, CrumbleState::Crumbling { .. }),
                    },
                    (SolidKind::Ground, None, None) => TileLook::Ground,
                    (SolidKind::Platform, None, None) => TileLook::Platform,
                };
                TileView { pos: t.pos, look }
            })
            .collect();

        // Block pickups are drawn through their tile
        let pickups = self
            .pickups
            .iter()
            .filter(|p| !p.done && !matches!(p.kind, PickupKind::Breakable { .. }) && visible(p.pos.x, p.size.x))
            .map(|p| PickupView {
                pos: p.pos,
                size: p.size,
                kind: p.kind,
            })
            .collect();

        let enemies = self
            .enemies
            .iter()
            .filter(|e| !e.dead && visible(e.body.pos.x, e.body.size.x))
            .map(|e| EnemyView {
                kind: e.kind,
                pos: e.body.pos,
                size: e.body.size,
                facing: e.dir,
                frame: e.frame,
            })
            .collect();

        let bullets = self
            .bullets
            .iter()
            .map(|b| SpriteView {
                pos: b.pos,
                size: b.hitbox().size.x,
            })
            .collect();
        let particles = self
            .particles
            .iter()
            .map(|p| SpriteView {
                pos: p.pos,
                size: p.size,
            })
            .collect();

        let decorations = self
            .level
            .decorations
            .iter()
            .filter(|d| visible(d.col as f32 * TILE_SIZE, TILE_SIZE))
            .map(|d| DecorationView {
                pos: Vec2::new(d.col as f32 * TILE_SIZE, d.row as f32 * TILE_SIZE),
                name: d.name.clone(),
            })
            .collect();

        let player = &self.player;
        RenderSnapshot {
            camera: self.camera,
            map_size: self.map_size(),
            hud: Hud {
                level_index: self.level.level_index,
                world: self.level.world,
                theme: self.level.theme,
                status: self.status,
                score: self.score,
                level_coins: self.level_coins,
                total_coins: self.progress.coins,
                lives: self.progress.lives,
                ammo: self.ammo,
                time_left: self.time_left.max(0.0).ceil() as u32,
            },
            player: PlayerView {
                pos: player.body.pos,
                size: player.body.size,
                facing: player.facing,
                anim: player.anim,
                frame: player.frame,
                blinking: player.invincible,
                dying: matches!(player.life, LifeState::Dying { .. }),
            },
            tiles,
            pickups,
            enemies,
            bullets,
            particles,
            decorations,
        }
    }
}
