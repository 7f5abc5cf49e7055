//! Movement integration for the player, enemies, crumbling tiles,
//! particles and the camera

use glam::Vec2;

use super::collision::{Contact, PlatformRule, collide_x, collide_y, first_ground_overlap, ground_probe};
use super::interact;
use super::state::{AnimState, CrumbleState, Enemy, EnemyMotion, GameEvent, LifeState, LoseReason, Player, WorldState};
use super::tick::TickInput;
use crate::consts::*;

/// Walkers feel half gravity
const WALKER_GRAVITY_SCALE: f32 = 0.5;
const PARTICLE_GRAVITY_SCALE: f32 = 0.3;
/// Flyer bob: amplitude in pixels, angular rates per ms and per pixel, easing
const FLYER_BOB_AMPLITUDE: f32 = 18.0;
const FLYER_BOB_TIME_RATE: f32 = 0.003;
const FLYER_BOB_PHASE_RATE: f32 = 0.008;
const FLYER_EASE: f32 = 0.08;
const ENEMY_FRAME_RATE: f32 = 8.0;
/// Fraction of the viewport kept left of the player
const CAMERA_LEAD: f32 = 0.35;

/// Start a jump when standing on something
pub fn jump(world: &mut WorldState) {
    let player = &mut world.player;
    if !player.is_alive() || !player.body.on_ground {
        return;
    }
    player.body.vel.y = JUMP_VELOCITY;
    player.body.on_ground = false;
    player.anim = AnimState::Jump;
    player.frame = 0;
    world.push_event(GameEvent::Jump);
}

/// Advance the player one tick
pub fn update_player(world: &mut WorldState, input: &TickInput, dt: f32) {
    if let LifeState::Dying { timer } = world.player.life {
        update_dying(world, timer, dt);
        return;
    }

    let speed = if world.settings.speed_boost {
        WALK_SPEED * SPEED_BOOST
    } else {
        WALK_SPEED
    };
    let player = &mut world.player;

    if player.invincible {
        player.invincible_timer -= dt;
        if player.invincible_timer <= 0.0 {
            player.invincible = false;
        }
    }
    if player.shoot_timer > 0.0 {
        player.shoot_timer -= dt;
    }

    let shooting = player.shoot_timer > 0.0;
    let grounded = player.body.on_ground;
    if input.move_left || input.move_right {
        player.facing = if input.move_left { -1.0 } else { 1.0 };
        player.body.vel.x = player.facing * speed;
        if grounded && !shooting {
            player.anim = AnimState::Run;
        }
    } else {
        player.body.vel.x *= FRICTION;
        if player.body.vel.x.abs() < 0.1 {
            player.body.vel.x = 0.0;
        }
        if grounded && !shooting {
            player.anim = AnimState::Idle;
        }
    }
    if shooting {
        player.anim = AnimState::Shoot;
    } else if !grounded {
        player.anim = AnimState::Jump;
    }

    player.body.vel.y = (player.body.vel.y + GRAVITY * dt).min(MAX_FALL_SPEED);

    player.body.pos.x += player.body.vel.x * dt;
    collide_x(&mut player.body, &world.solids);
    player.body.pos.x = player.body.pos.x.max(0.0);

    player.prev_y = player.body.pos.y;
    player.body.pos.y += player.body.vel.y * dt;
    player.body.on_ground = false;
    let contacts = collide_y(
        &mut player.body,
        &world.solids,
        PlatformRule::OneWay { prev_y: player.prev_y },
    );
    for contact in contacts {
        match contact {
            Contact::Landed(id) => start_crumble(world, id),
            Contact::Bumped(id) => {
                if world.solids.iter().any(|t| t.id == id && t.breakable.is_some()) {
                    interact::break_block(world, id);
                }
            }
        }
    }

    let player = &mut world.player;
    if player.body.on_ground {
        world.checkpoint = player.body.pos;
        player.pit_armed = true;
        player.in_gap = false;
        if player.was_airborne {
            player.was_airborne = false;
            world.events.push(GameEvent::CheckpointReached { pos: player.body.pos });
        }
    } else {
        player.was_airborne = true;
    }

    if player.spawn_grace > 0.0 {
        player.spawn_grace -= dt;
        player.pit_armed = false;
    }

    let ground_y = world.level.ground_row as f32 * TILE_SIZE;
    if player.pit_armed && !player.in_gap && player.body.pos.y > ground_y {
        player.in_gap = true;
        let x = player.body.pos.x;
        log::debug!("Player dropped below the ground line at x={x:.0}");
        world.events.push(GameEvent::FellIntoGap { x });
    }

    let map_bottom = world.level.rows() as f32 * TILE_SIZE;
    if player.spawn_grace <= 0.0 && player.body.pos.y > map_bottom + PIT_DEPTH {
        interact::fall_into_pit(world);
        return;
    }

    animate_player(&mut world.player, dt);
}

fn update_dying(world: &mut WorldState, timer: f32, dt: f32) {
    let player = &mut world.player;
    let timer = timer - dt;
    player.life = LifeState::Dying { timer };
    player.body.vel.y = (player.body.vel.y + GRAVITY * dt).min(MAX_FALL_SPEED);
    // The death hop only rises and falls
    player.body.pos.y += player.body.vel.y * dt;

    player.frame_timer += dt;
    if player.frame_timer >= AnimState::Dead.rate() {
        player.frame_timer = 0.0;
        player.frame = (player.frame + 1).min(AnimState::Dead.frame_count() - 1);
    }

    if timer <= 0.0 {
        if world.progress.lives == 0 {
            interact::lose(world, LoseReason::OutOfLives);
        } else {
            interact::respawn(world);
        }
    }
}

fn animate_player(player: &mut Player, dt: f32) {
    player.frame_timer += dt;
    if player.frame_timer >= player.anim.rate() {
        player.frame_timer = 0.0;
        player.frame = (player.frame + 1) % player.anim.frame_count();
    }
}

/// Begin the countdown on an intact crumble tile
fn start_crumble(world: &mut WorldState, tile_id: u32) {
    if let Some(tile) = world.solids.iter_mut().find(|t| t.id == tile_id)
        && tile.crumble == Some(CrumbleState::Intact)
    {
        tile.crumble = Some(CrumbleState::Crumbling {
            remaining: CRUMBLE_FRAMES,
        });
    }
}

/// Count down crumbling tiles and drop the expired ones for good
pub fn update_crumbles(world: &mut WorldState, dt: f32) {
    for tile in world.solids.iter_mut() {
        if let Some(CrumbleState::Crumbling { remaining }) = &mut tile.crumble {
            *remaining -= dt;
        }
    }
    world
        .solids
        .retain(|t| !matches!(t.crumble, Some(CrumbleState::Crumbling { remaining }) if remaining <= 0.0));
}

fn reverse(enemy: &mut Enemy) {
    enemy.body.vel.x = -enemy.body.vel.x;
    enemy.dir = -enemy.dir;
}

/// Patrol, fall and bob every live enemy
pub fn update_enemies(world: &mut WorldState, dt: f32) {
    let t_ms = world.elapsed * FRAME_MS;
    let solids = &world.solids;

    for enemy in world.enemies.iter_mut().filter(|e| !e.dead) {
        enemy.frame_timer += dt;
        if enemy.frame_timer >= ENEMY_FRAME_RATE {
            enemy.frame_timer = 0.0;
            enemy.frame = (enemy.frame + 1) % enemy.kind.profile().frame_count;
        }

        match enemy.motion {
            EnemyMotion::Walker => {
                // Settle vertically first so the ground underfoot never reads as a wall
                enemy.body.vel.y =
                    (enemy.body.vel.y + GRAVITY * WALKER_GRAVITY_SCALE * dt).min(MAX_FALL_SPEED);
                enemy.body.pos.y += enemy.body.vel.y * dt;
                enemy.body.on_ground = false;
                collide_y(&mut enemy.body, solids, PlatformRule::Ignore);

                enemy.body.pos.x += enemy.body.vel.x * dt;
                if let Some(wall) = first_ground_overlap(solids, &enemy.body.rect()) {
                    let wall = wall.rect();
                    if enemy.body.vel.x > 0.0 {
                        enemy.body.pos.x = wall.pos.x - enemy.body.size.x;
                    } else {
                        enemy.body.pos.x = wall.right();
                    }
                    reverse(enemy);
                }

                let probe_x = if enemy.dir > 0.0 {
                    enemy.body.pos.x + enemy.body.size.x + 2.0
                } else {
                    enemy.body.pos.x - 2.0
                };
                let probe = Vec2::new(probe_x, enemy.body.bottom() + 4.0);
                if enemy.body.on_ground && !ground_probe(solids, probe) {
                    reverse(enemy);
                }
            }
            EnemyMotion::Flyer { base_y } => {
                enemy.body.pos.x += enemy.body.vel.x * dt;
                let phase = t_ms * FLYER_BOB_TIME_RATE + enemy.body.pos.x * FLYER_BOB_PHASE_RATE;
                let target = base_y + phase.sin() * FLYER_BOB_AMPLITUDE;
                enemy.body.pos.y += (target - enemy.body.pos.y) * FLYER_EASE;
            }
        }

        let x = enemy.body.pos.x;
        let outward = (x <= enemy.min_x && enemy.body.vel.x < 0.0) || (x >= enemy.max_x && enemy.body.vel.x > 0.0);
        if outward {
            reverse(enemy);
        }
    }
}

pub fn update_particles(world: &mut WorldState, dt: f32) {
    for p in world.particles.iter_mut() {
        p.pos += p.vel * dt;
        p.vel.y += GRAVITY * PARTICLE_GRAVITY_SCALE * dt;
        p.life -= dt;
    }
    world.particles.retain(|p| p.life > 0.0);
}

/// Horizontal follow camera; the view never scrolls vertically
pub fn update_camera(world: &mut WorldState) {
    let viewport = world.settings.viewport_width;
    let map_w = world.map_size().x;
    let x = (world.player.body.pos.x - viewport * CAMERA_LEAD).min(map_w - viewport).max(0.0);
    world.camera = Vec2::new(x, 0.0);
}
