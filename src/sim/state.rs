//! World state and entity types
//!
//! Everything a level needs while it is being played lives in `WorldState`.
//! Entities are kept in id order; dead enemies and spent pickups stay in
//! their lists, flagged inert.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::level::{Cell, EnemyType, LevelDescriptor};
use crate::settings::Settings;

/// Position, velocity and extent of a moving box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Player animation clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    Run,
    Jump,
    Shoot,
    Dead,
}

impl AnimState {
    /// Frames between animation steps
    pub fn rate(&self) -> f32 {
        match self {
            AnimState::Idle => 10.0,
            AnimState::Run => 5.0,
            AnimState::Jump => 8.0,
            AnimState::Shoot => 4.0,
            AnimState::Dead => 6.0,
        }
    }

    pub fn frame_count(&self) -> u32 {
        match self {
            AnimState::Run => 8,
            AnimState::Shoot => 3,
            _ => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    /// Falling off-screen; collisions are off until the timer runs out
    Dying { timer: f32 },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Top edge before this tick's vertical move (one-way platform test)
    pub prev_y: f32,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    pub anim: AnimState,
    pub frame: u32,
    pub frame_timer: f32,
    pub life: LifeState,
    pub invincible: bool,
    pub invincible_timer: f32,
    pub shoot_timer: f32,
    /// Pit detection stays off until this reaches zero
    pub spawn_grace: f32,
    /// Set after the first footing following a spawn
    pub pit_armed: bool,
    /// Feet went below the ground surface while armed
    pub in_gap: bool,
    pub was_airborne: bool,
}

impl Player {
    pub fn spawn(pos: Vec2, invincible_frames: f32, grace_frames: f32) -> Self {
        let mut body = Body::new(pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT));
        body.on_ground = true;
        Self {
            body,
            prev_y: pos.y,
            facing: 1.0,
            anim: AnimState::Idle,
            frame: 0,
            frame_timer: 0.0,
            life: LifeState::Alive,
            invincible: invincible_frames > 0.0,
            invincible_timer: invincible_frames,
            shoot_timer: 0.0,
            spawn_grace: grace_frames,
            pit_armed: false,
            in_gap: false,
            was_airborne: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.life, LifeState::Alive)
    }

    pub fn grant_invincibility(&mut self, frames: f32) {
        self.invincible = true;
        self.invincible_timer = frames;
    }
}

/// How an enemy moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyMotion {
    /// Gravity-bound patroller that turns at ledges and walls
    Walker,
    /// Bobs around a fixed altitude
    Flyer { base_y: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyType,
    pub body: Body,
    pub motion: EnemyMotion,
    /// Patrol direction, -1.0 or 1.0
    pub dir: f32,
    pub dead: bool,
    /// Patrol bounds in pixels
    pub min_x: f32,
    pub max_x: f32,
    pub frame: u32,
    pub frame_timer: f32,
}

impl Enemy {
    pub fn can_fly(&self) -> bool {
        matches!(self.motion, EnemyMotion::Flyer { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    /// Center of the bullet
    pub pos: Vec2,
    pub vel_x: f32,
    pub life: f32,
}

impl Bullet {
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos - Vec2::new(8.0, 5.0), Vec2::new(16.0, 10.0))
    }
}

/// What a breakable block releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReward {
    Nothing,
    Heart,
    Coin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Coin,
    Ammo,
    Goal,
    Spike,
    Spring,
    Breakable { reward: BlockReward },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub done: bool,
    /// Upward drift of coins released from blocks; 0 at rest
    pub drift: f32,
}

impl Pickup {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidKind {
    /// Blocks from every side
    Ground,
    /// One-way: only landable from above
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CrumbleState {
    Intact,
    Crumbling { remaining: f32 },
}

/// A collidable tile, always `TILE_SIZE` square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidTile {
    pub id: u32,
    pub pos: Vec2,
    pub kind: SolidKind,
    pub crumble: Option<CrumbleState>,
    /// Pickup id of the breakable block this tile belongs to
    pub breakable: Option<u32>,
}

impl SolidTile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(TILE_SIZE))
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Frames left
    pub life: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoseReason {
    OutOfLives,
    TimeUp,
}

/// Play state of the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Playing,
    Paused,
    Win,
    Lose(LoseReason),
}

/// Persistent player progress shared across levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub max_unlocked: u32,
    pub coins: u32,
    pub lives: u8,
    /// Completed levels per world
    pub world_progress: [u32; WORLD_COUNT],
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            max_unlocked: 1,
            coins: 0,
            lives: START_LIVES,
            world_progress: [0; WORLD_COUNT],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Spike,
    Enemy,
}

/// Feedback for the presentation layer (sounds, popups, saves)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { level_coins: u32 },
    AmmoCollected { ammo: u32 },
    EnemyKilled { id: u32, kind: EnemyType, stomped: bool },
    BlockBroken { pos: Vec2, reward: BlockReward },
    HeartFound { lives: u8 },
    PlayerHurt { lives: u8 },
    PlayerDied { cause: DeathCause },
    /// Dropped below the ground line over a gap; the fall cue
    FellIntoGap { x: f32 },
    PlayerFell { lives: u8 },
    PlayerRespawned,
    CheckpointReached { pos: Vec2 },
    Spring,
    Jump,
    Shot { ammo: u32 },
    LevelWon { stars: u8, score: u32, coins: u32 },
    LevelLost(LoseReason),
    Revived,
    ProgressChanged(Progress),
}

/// Live simulation of one level
#[derive(Debug, Clone)]
pub struct WorldState {
    pub level: LevelDescriptor,
    pub settings: Settings,
    pub status: LevelStatus,
    pub progress: Progress,
    pub score: u32,
    pub level_coins: u32,
    pub ammo: u32,
    /// Seconds
    pub time_left: f32,
    /// Frames simulated while playing
    pub elapsed: f32,
    pub player: Player,
    pub checkpoint: Vec2,
    /// Where a paid revive puts the player
    pub revive_checkpoint: Vec2,
    pub solids: Vec<SolidTile>,
    pub pickups: Vec<Pickup>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub camera: Vec2,
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl WorldState {
    /// Build the live world for a level
    pub fn new(level: &LevelDescriptor, progress: Progress, settings: &Settings) -> Self {
        let spawn = Self::spawn_point(level);
        let mut world = Self {
            level: level.clone(),
            settings: settings.clone(),
            status: LevelStatus::Playing,
            progress,
            score: 0,
            level_coins: 0,
            ammo: START_AMMO,
            time_left: level.time_limit as f32,
            elapsed: 0.0,
            player: Player::spawn(spawn, SPAWN_INVINCIBLE_FRAMES, SPAWN_GRACE_FRAMES),
            checkpoint: spawn,
            revive_checkpoint: spawn,
            solids: Vec::new(),
            pickups: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            camera: Vec2::ZERO,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(level.seed as u64),
            next_id: 1,
        };
        world.build_tiles();
        world.build_breakables();
        world.build_enemies();
        log::info!(
            "Level {} ready: {} solids, {} pickups, {} of {} enemies",
            level.level_index,
            world.solids.len(),
            world.pickups.len(),
            world.enemies.len(),
            level.enemies.len()
        );
        world
    }

    /// Player spawn: standing on the ground at the start column
    pub fn spawn_point(level: &LevelDescriptor) -> Vec2 {
        Vec2::new(
            level.start.col as f32 * TILE_SIZE,
            (level.ground_row - 1) as f32 * TILE_SIZE - PLAYER_HEIGHT,
        )
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn map_size(&self) -> Vec2 {
        Vec2::new(
            self.level.cols() as f32 * TILE_SIZE,
            self.level.rows() as f32 * TILE_SIZE,
        )
    }

    /// Stars for the remaining time fraction
    pub fn stars(&self) -> u8 {
        let pct = self.time_left / self.level.time_limit.max(1) as f32;
        if pct > 0.6 {
            3
        } else if pct > 0.3 {
            2
        } else {
            1
        }
    }

    fn add_pickup(&mut self, kind: PickupKind, pos: Vec2, size: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            kind,
            pos,
            size,
            done: false,
            drift: 0.0,
        });
        id
    }

    fn add_solid(&mut self, pos: Vec2, kind: SolidKind, crumble: Option<CrumbleState>, breakable: Option<u32>) {
        let id = self.next_entity_id();
        self.solids.push(SolidTile {
            id,
            pos,
            kind,
            crumble,
            breakable,
        });
    }

    fn build_tiles(&mut self) {
        let cells: Vec<(i32, i32, Cell)> = self.level.grid.iter().collect();
        for (col, row, cell) in cells {
            let origin = Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
            match cell {
                Cell::Ground => self.add_solid(origin, SolidKind::Ground, None, None),
                Cell::Platform => self.add_solid(origin, SolidKind::Platform, None, None),
                Cell::Crumble => {
                    self.add_solid(origin, SolidKind::Ground, Some(CrumbleState::Intact), None)
                }
                Cell::Coin => {
                    let size = (TILE_SIZE * 0.7).round();
                    let inset = ((TILE_SIZE - size) / 2.0).round();
                    self.add_pickup(PickupKind::Coin, origin + Vec2::splat(inset), Vec2::splat(size));
                }
                Cell::Ammo => {
                    let size = (TILE_SIZE * 0.55).round();
                    let inset = ((TILE_SIZE - size) / 2.0).round();
                    self.add_pickup(PickupKind::Ammo, origin + Vec2::splat(inset), Vec2::splat(size));
                }
                Cell::Goal => {
                    self.add_pickup(
                        PickupKind::Goal,
                        origin - Vec2::new(0.0, TILE_SIZE),
                        Vec2::new(TILE_SIZE, TILE_SIZE * 2.0),
                    );
                }
                Cell::Spike => {
                    let top = (TILE_SIZE * 0.35).round();
                    self.add_pickup(
                        PickupKind::Spike,
                        origin + Vec2::new(2.0, top),
                        Vec2::new(TILE_SIZE - 4.0, (TILE_SIZE * 0.65).round()),
                    );
                }
                Cell::Spring => {
                    let top = (TILE_SIZE * 0.6).round();
                    self.add_pickup(
                        PickupKind::Spring,
                        origin + Vec2::new(2.0, top),
                        Vec2::new(TILE_SIZE - 4.0, (TILE_SIZE * 0.4).round()),
                    );
                }
                // Markers; entities come from the descriptor lists
                Cell::Air | Cell::Walker | Cell::Flyer | Cell::Breakable | Cell::Heart => {}
            }
        }
    }

    fn build_breakables(&mut self) {
        let specs = self.level.breakables.clone();
        for spec in specs {
            let pos = Vec2::new(spec.col as f32 * TILE_SIZE, spec.row as f32 * TILE_SIZE);
            let reward = if spec.has_heart {
                BlockReward::Heart
            } else if spec.has_coin {
                BlockReward::Coin
            } else {
                BlockReward::Nothing
            };
            let pickup_id = self.add_pickup(PickupKind::Breakable { reward }, pos, Vec2::splat(TILE_SIZE));
            self.add_solid(pos, SolidKind::Ground, None, Some(pickup_id));
        }
    }

    fn build_enemies(&mut self) {
        let cull_chance = self.settings.enemy_cull_chance as f64;
        let specs = self.level.enemies.clone();
        for (i, spec) in specs.iter().enumerate() {
            // The first enemy always survives culling
            if i > 0 && self.rng.random::<f64>() <= cull_chance {
                continue;
            }
            let profile = spec.kind.profile();
            let fly = spec.fly && profile.can_fly;
            let dir = if spec.dir < 0 { -1.0 } else { 1.0 };
            let speed = if fly { 1.6 } else { 1.2 };
            let pos = Vec2::new(spec.col as f32 * TILE_SIZE, spec.row as f32 * TILE_SIZE);
            let mut body = Body::new(pos, Vec2::new(profile.width, profile.height));
            body.vel.x = dir * speed;
            let id = self.next_entity_id();
            self.enemies.push(Enemy {
                id,
                kind: spec.kind,
                body,
                motion: if fly {
                    EnemyMotion::Flyer { base_y: pos.y }
                } else {
                    EnemyMotion::Walker
                },
                dir,
                dead: false,
                min_x: (spec.col - 6) as f32 * TILE_SIZE,
                max_x: (spec.col + 6) as f32 * TILE_SIZE,
                frame: 0,
                frame_timer: 0.0,
            });
        }
    }

    /// Spawn a burst of debris particles around a point
    pub fn spawn_burst(&mut self, center: Vec2) {
        for i in 0..8 {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = std::f32::consts::TAU * i as f32 / 8.0;
            let speed = 2.0 + self.rng.random::<f32>() * 3.0;
            let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - 3.0);
            let size = 4.0 + self.rng.random::<f32>() * 6.0;
            let life = 30.0 + self.rng.random::<f32>() * 20.0;
            self.particles.push(Particle {
                pos: center,
                vel,
                size,
                life,
            });
        }
    }
}
