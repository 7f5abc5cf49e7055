//! Entity interactions: pickups, enemy contact, bullets, blocks, and the
//! player's death / respawn / win / lose transitions

use glam::Vec2;
use rand::Rng;

use super::state::{
    AnimState, BlockReward, Bullet, DeathCause, GameEvent, LevelStatus, LifeState, LoseReason, Particle, Pickup,
    PickupKind, Player, WorldState, MAX_PARTICLES,
};
use crate::consts::*;
use crate::error::GameError;

/// Bullet spawn height as a fraction of the player's height
const BULLET_SPAWN_HEIGHT: f32 = 0.4;
/// Shrink applied to enemy boxes for bullet hits
const BULLET_ENEMY_INSET: f32 = 4.0;
const FLOATING_COIN_DRIFT: f32 = -3.0;
const FLOATING_COIN_DRAG: f32 = 0.15;
const SPRING_FACTOR: f32 = 1.4;
const STOMP_BOUNCE_FACTOR: f32 = 0.6;
const DEATH_HOP_FACTOR: f32 = 0.4;

fn progress_changed(world: &mut WorldState) {
    let progress = world.progress;
    world.push_event(GameEvent::ProgressChanged(progress));
}

/// Fire a bullet from the facing edge if ammo and cooldown allow
pub fn shoot(world: &mut WorldState) {
    let player = &mut world.player;
    if !player.is_alive() || world.ammo == 0 || player.shoot_timer > 0.0 {
        return;
    }
    world.ammo -= 1;
    player.shoot_timer = SHOOT_COOLDOWN_FRAMES;
    player.anim = AnimState::Shoot;
    player.frame = 0;

    let body = player.body;
    let x = if player.facing > 0.0 {
        body.pos.x + body.size.x
    } else {
        body.pos.x
    };
    let pos = Vec2::new(x, body.pos.y + body.size.y * BULLET_SPAWN_HEIGHT);
    let vel_x = player.facing * BULLET_SPEED;
    let id = world.next_entity_id();
    world.bullets.push(Bullet {
        id,
        pos,
        vel_x,
        life: BULLET_LIFE_FRAMES,
    });
    let ammo = world.ammo;
    world.push_event(GameEvent::Shot { ammo });
}

/// Collect or trigger every pickup the player touches
pub fn check_pickups(world: &mut WorldState) {
    if !world.player.is_alive() {
        return;
    }
    let player_rect = world.player.body.rect();

    for i in 0..world.pickups.len() {
        let pickup = &world.pickups[i];
        if pickup.done || !player_rect.overlaps(&pickup.rect(), PICKUP_MARGIN) {
            continue;
        }
        let kind = pickup.kind;
        match kind {
            PickupKind::Coin => {
                world.pickups[i].done = true;
                world.level_coins += 1;
                world.score += COIN_SCORE;
                world.progress.coins += 1;
                let level_coins = world.level_coins;
                world.push_event(GameEvent::CoinCollected { level_coins });
            }
            PickupKind::Ammo => {
                world.pickups[i].done = true;
                world.ammo = (world.ammo + AMMO_PER_PICKUP).min(MAX_AMMO);
                let ammo = world.ammo;
                world.push_event(GameEvent::AmmoCollected { ammo });
            }
            PickupKind::Goal => {
                win(world);
                return;
            }
            PickupKind::Spike => {
                if !world.player.invincible {
                    kill(world, DeathCause::Spike);
                    return;
                }
            }
            PickupKind::Spring => {
                world.player.body.vel.y = JUMP_VELOCITY * SPRING_FACTOR;
                world.player.body.on_ground = false;
                world.push_event(GameEvent::Spring);
            }
            // Blocks are hit through their solid tile
            PickupKind::Breakable { .. } => {}
        }
    }
}

/// Stomp or get hurt by every live enemy the player touches
pub fn check_enemy_contact(world: &mut WorldState) {
    if !world.player.is_alive() || world.player.invincible {
        return;
    }
    for i in 0..world.enemies.len() {
        let enemy = &world.enemies[i];
        if enemy.dead || !world.player.body.rect().overlaps(&enemy.body.rect(), ENEMY_MARGIN) {
            continue;
        }
        let body = world.player.body;
        let stomp_line = enemy.body.pos.y + enemy.body.size.y * STOMP_RATIO;
        if body.vel.y > 0.0 && body.bottom() < stomp_line {
            let (id, kind, center) = (enemy.id, enemy.kind, enemy.body.rect().pos + enemy.body.size / 2.0);
            world.enemies[i].dead = true;
            world.score += ENEMY_SCORE;
            world.player.body.vel.y = JUMP_VELOCITY * STOMP_BOUNCE_FACTOR;
            world.spawn_burst(center);
            world.push_event(GameEvent::EnemyKilled { id, kind, stomped: true });
        } else {
            hurt(world);
        }
    }
}

/// Move bullets, then resolve at most one hit per bullet
pub fn update_bullets(world: &mut WorldState, dt: f32) {
    let mut i = 0;
    while i < world.bullets.len() {
        let bullet = &mut world.bullets[i];
        bullet.pos.x += bullet.vel_x * dt;
        bullet.life -= dt;
        if bullet.life <= 0.0 {
            world.bullets.remove(i);
            continue;
        }
        let hitbox = bullet.hitbox();

        // Later tiles first, so blocks floating above the ground win
        let tile = world
            .solids
            .iter()
            .rev()
            .find(|t| hitbox.overlaps(&t.rect(), 0.0))
            .map(|t| (t.id, t.breakable.is_some()));
        if let Some((tile_id, breakable)) = tile {
            if breakable {
                break_block(world, tile_id);
            }
            world.bullets.remove(i);
            continue;
        }

        let target = world
            .enemies
            .iter()
            .position(|e| !e.dead && hitbox.overlaps(&e.body.rect().inset(BULLET_ENEMY_INSET), 0.0));
        if let Some(e) = target {
            let enemy = &mut world.enemies[e];
            enemy.dead = true;
            let (id, kind, center) = (enemy.id, enemy.kind, enemy.body.pos + enemy.body.size / 2.0);
            world.score += ENEMY_SCORE;
            world.spawn_burst(center);
            world.push_event(GameEvent::EnemyKilled { id, kind, stomped: false });
            world.bullets.remove(i);
            continue;
        }

        // Faint exhaust trail
        if world.particles.len() < MAX_PARTICLES && world.rng.random::<f32>() > 0.5 {
            let vel = Vec2::new(
                -world.bullets[i].vel_x * 0.05 + (world.rng.random::<f32>() - 0.5),
                world.rng.random::<f32>() - 0.5,
            );
            let size = 2.0 + world.rng.random::<f32>() * 2.0;
            let pos = world.bullets[i].pos;
            world.particles.push(Particle { pos, vel, size, life: 6.0 });
        }
        i += 1;
    }
}

/// Destroy a breakable tile and release its reward
pub fn break_block(world: &mut WorldState, tile_id: u32) {
    let Some(index) = world.solids.iter().position(|t| t.id == tile_id) else {
        return;
    };
    let tile = world.solids.remove(index);
    let center = tile.pos + Vec2::splat(TILE_SIZE / 2.0);
    world.spawn_burst(center);

    let mut reward = BlockReward::Nothing;
    if let Some(pid) = tile.breakable
        && let Some(pickup) = world.pickups.iter_mut().find(|p| p.id == pid && !p.done)
    {
        pickup.done = true;
        if let PickupKind::Breakable { reward: r } = pickup.kind {
            reward = r;
        }
    }

    world.push_event(GameEvent::BlockBroken { pos: tile.pos, reward });
    match reward {
        BlockReward::Heart => {
            world.progress.lives = (world.progress.lives + 1).min(MAX_LIVES);
            let lives = world.progress.lives;
            world.push_event(GameEvent::HeartFound { lives });
            progress_changed(world);
        }
        BlockReward::Coin => {
            let size = (TILE_SIZE * 0.7).round();
            let id = world.next_entity_id();
            world.pickups.push(Pickup {
                id,
                kind: PickupKind::Coin,
                pos: Vec2::new(tile.pos.x + (TILE_SIZE - size) / 2.0, tile.pos.y - TILE_SIZE),
                size: Vec2::splat(size),
                done: false,
                drift: FLOATING_COIN_DRIFT,
            });
        }
        BlockReward::Nothing => {}
    }
}

/// Coins released from blocks rise and slow to a stop
pub fn update_floating_coins(world: &mut WorldState, dt: f32) {
    for pickup in world.pickups.iter_mut().filter(|p| p.drift < 0.0 && !p.done) {
        pickup.pos.y += pickup.drift * dt;
        pickup.drift = (pickup.drift + FLOATING_COIN_DRAG * dt).min(0.0);
    }
}

/// Lose a life and gain invincibility; the last life kills
pub fn hurt(world: &mut WorldState) {
    if world.player.invincible || !world.player.is_alive() {
        return;
    }
    world.player.grant_invincibility(HURT_INVINCIBLE_FRAMES);
    world.progress.lives = world.progress.lives.saturating_sub(1);
    let lives = world.progress.lives;
    world.push_event(GameEvent::PlayerHurt { lives });
    progress_changed(world);
    if lives == 0 {
        kill(world, DeathCause::Enemy);
    }
}

/// Enter the dying state; the revive point is where this happened
pub fn kill(world: &mut WorldState, cause: DeathCause) {
    if !world.player.is_alive() {
        return;
    }
    world.revive_checkpoint = world.player.body.pos;
    let player = &mut world.player;
    player.life = LifeState::Dying { timer: DEATH_FRAMES };
    player.anim = AnimState::Dead;
    player.frame = 0;
    player.frame_timer = 0.0;
    player.body.vel = Vec2::new(-player.facing * 2.0, JUMP_VELOCITY * DEATH_HOP_FACTOR);
    player.body.on_ground = false;
    log::debug!("Player died ({cause:?}) at {:?}", world.revive_checkpoint);
    world.push_event(GameEvent::PlayerDied { cause });
}

/// Dropped below the map: costs a life and resets to the last footing
pub fn fall_into_pit(world: &mut WorldState) {
    world.revive_checkpoint = world.checkpoint;
    world.progress.lives = world.progress.lives.saturating_sub(1);
    let lives = world.progress.lives;
    world.push_event(GameEvent::PlayerFell { lives });
    progress_changed(world);
    if lives == 0 {
        lose(world, LoseReason::OutOfLives);
        return;
    }
    let player = &mut world.player;
    player.body.pos = world.checkpoint;
    player.body.vel = Vec2::ZERO;
    player.grant_invincibility(PIT_INVINCIBLE_FRAMES);
    player.life = LifeState::Alive;
    player.anim = AnimState::Idle;
    player.in_gap = false;
    player.was_airborne = false;
}

/// Fresh player at the checkpoint after the death animation
pub fn respawn(world: &mut WorldState) {
    world.player = Player::spawn(world.checkpoint, SPAWN_INVINCIBLE_FRAMES, SPAWN_GRACE_FRAMES);
    world.push_event(GameEvent::PlayerRespawned);
}

/// Finish the level; only the first call while playing counts
pub fn win(world: &mut WorldState) {
    if world.status != LevelStatus::Playing {
        return;
    }
    world.status = LevelStatus::Win;

    let next = world.level.level_index + 1;
    if next <= LEVEL_COUNT && world.progress.max_unlocked < next {
        world.progress.max_unlocked = next;
        let w = (world.level.world as usize).clamp(1, WORLD_COUNT) - 1;
        world.progress.world_progress[w] = (world.progress.world_progress[w] + 1).min(LEVELS_PER_WORLD);
    }
    let stars = world.stars();
    log::info!(
        "Level {} won: {} stars, score {}, {} coins",
        world.level.level_index,
        stars,
        world.score,
        world.level_coins
    );
    let (score, coins) = (world.score, world.level_coins);
    world.push_event(GameEvent::LevelWon { stars, score, coins });
    progress_changed(world);
}

/// End the level as lost; later calls are ignored
pub fn lose(world: &mut WorldState, reason: LoseReason) {
    if matches!(world.status, LevelStatus::Lose(_) | LevelStatus::Win) {
        return;
    }
    world.status = LevelStatus::Lose(reason);
    log::info!("Level {} lost: {:?}", world.level.level_index, reason);
    world.push_event(GameEvent::LevelLost(reason));
    progress_changed(world);
}

/// Paid continue from the lose screen, in place, without rebuilding the level
pub fn revive(world: &mut WorldState) -> Result<(), GameError> {
    match world.status {
        LevelStatus::Lose(LoseReason::OutOfLives) => {}
        _ => return Err(GameError::ReviveNotAllowed),
    }
    if world.progress.coins < REVIVE_COST {
        return Err(GameError::NotEnoughCoins {
            needed: REVIVE_COST,
            have: world.progress.coins,
        });
    }
    world.progress.coins -= REVIVE_COST;
    world.progress.lives = world.progress.lives.max(1);
    world.player = Player::spawn(world.revive_checkpoint, REVIVE_INVINCIBLE_FRAMES, REVIVE_GRACE_FRAMES);
    world.player.body.on_ground = false;
    world.status = LevelStatus::Playing;
    log::info!("Revived at {:?}", world.revive_checkpoint);
    world.push_event(GameEvent::Revived);
    progress_changed(world);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{Cell, EnemyType, LevelDescriptor};
    use crate::settings::Settings;
    use crate::sim::state::Progress;

    fn world(level: &LevelDescriptor) -> WorldState {
        let settings = Settings {
            enemy_cull_chance: 0.0,
            ..Settings::default()
        };
        WorldState::new(level, Progress::default(), &settings)
    }

    fn vulnerable(w: &mut WorldState) {
        w.player.invincible = false;
        w.player.invincible_timer = 0.0;
    }

    #[test]
    fn test_coin_pickup() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.set_cell(2, 7, Cell::Coin);
        let mut w = world(&level);
        w.player.body.pos = Vec2::new(40.0, 150.0);
        check_pickups(&mut w);
        assert_eq!(w.level_coins, 1);
        assert_eq!(w.score, 50);
        assert_eq!(w.progress.coins, 1);
        // Spent pickups stay but are inert
        check_pickups(&mut w);
        assert_eq!(w.level_coins, 1);
        assert!(w.pickups.iter().any(|p| p.kind == PickupKind::Coin && p.done));
    }

    #[test]
    fn test_ammo_caps_at_thirty() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.set_cell(2, 7, Cell::Ammo);
        let mut w = world(&level);
        w.ammo = 29;
        w.player.body.pos = Vec2::new(40.0, 150.0);
        check_pickups(&mut w);
        assert_eq!(w.ammo, MAX_AMMO);
    }

    #[test]
    fn test_spike_respects_invincibility() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.set_cell(2, 8, Cell::Spike);
        let mut w = world(&level);
        w.player.body.pos = Vec2::new(40.0, 180.0);
        check_pickups(&mut w);
        assert!(w.player.is_alive());

        vulnerable(&mut w);
        check_pickups(&mut w);
        assert!(matches!(w.player.life, LifeState::Dying { .. }));
        assert_eq!(w.progress.lives, 3);
        assert_eq!(w.revive_checkpoint, Vec2::new(40.0, 180.0));
    }

    #[test]
    fn test_spike_death_respawns_without_losing_a_life() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.set_cell(4, 8, Cell::Spike);
        let mut w = world(&level);
        let checkpoint = w.checkpoint;
        vulnerable(&mut w);
        w.player.body.pos = Vec2::new(104.0, 180.0);
        check_pickups(&mut w);
        assert!(matches!(w.player.life, LifeState::Dying { .. }));

        let idle = crate::sim::TickInput::default();
        for _ in 0..(DEATH_FRAMES as usize + 1) {
            crate::sim::physics::update_player(&mut w, &idle, 1.0);
            if w.player.is_alive() {
                break;
            }
        }

        let events = w.drain_events();
        assert!(events.contains(&GameEvent::PlayerDied { cause: DeathCause::Spike }));
        assert!(events.contains(&GameEvent::PlayerRespawned));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ProgressChanged(_))));
        assert!(w.player.is_alive());
        assert_eq!(w.player.body.pos, checkpoint);
        assert_eq!(w.progress.lives, 3);
        assert_eq!(w.status, LevelStatus::Playing);
    }

    #[test]
    fn test_spring_launches() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.set_cell(2, 8, Cell::Spring);
        let mut w = world(&level);
        w.player.body.pos = Vec2::new(40.0, 190.0);
        check_pickups(&mut w);
        assert!((w.player.body.vel.y - JUMP_VELOCITY * 1.4).abs() < 1e-5);
        assert!(!w.player.body.on_ground);
    }

    fn enemy_world() -> WorldState {
        let mut level = LevelDescriptor::flat(1, 40);
        level.add_enemy(EnemyType::Snail1, 10, 6, false, 1);
        let mut w = world(&level);
        vulnerable(&mut w);
        w
    }

    #[test]
    fn test_stomp_kills_enemy() {
        let mut w = enemy_world();
        // Enemy box 320..380 x 192..252; feet at 212 are above the 60% line (228)
        w.player.body.pos = Vec2::new(310.0, 112.0);
        w.player.body.vel.y = 3.0;
        check_enemy_contact(&mut w);
        assert!(w.enemies[0].dead);
        assert_eq!(w.score, 100);
        assert!((w.player.body.vel.y - JUMP_VELOCITY * 0.6).abs() < 1e-5);
        assert_eq!(w.progress.lives, 3);
    }

    #[test]
    fn test_side_contact_hurts() {
        let mut w = enemy_world();
        w.player.body.pos = Vec2::new(260.0, 170.0);
        w.player.body.vel.y = 0.0;
        check_enemy_contact(&mut w);
        assert!(!w.enemies[0].dead);
        assert_eq!(w.progress.lives, 2);
        assert!(w.player.invincible);
        assert_eq!(w.player.invincible_timer, HURT_INVINCIBLE_FRAMES);

        // Invincible: a second contact does nothing
        check_enemy_contact(&mut w);
        assert_eq!(w.progress.lives, 2);
    }

    #[test]
    fn test_last_life_hurt_kills() {
        let mut w = enemy_world();
        w.progress.lives = 1;
        w.player.body.pos = Vec2::new(260.0, 170.0);
        check_enemy_contact(&mut w);
        assert_eq!(w.progress.lives, 0);
        assert!(matches!(w.player.life, LifeState::Dying { .. }));
    }

    #[test]
    fn test_shoot_needs_ammo_and_cooldown() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        w.ammo = 1;
        shoot(&mut w);
        assert_eq!(w.bullets.len(), 1);
        assert_eq!(w.ammo, 0);
        let b = &w.bullets[0];
        assert_eq!(b.pos, Vec2::new(32.0 + 76.0, 156.0 + 40.0));
        assert_eq!(b.vel_x, BULLET_SPEED);

        w.player.shoot_timer = 0.0;
        shoot(&mut w);
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_expires() {
        let level = LevelDescriptor::flat(1, 200);
        let mut w = world(&level);
        shoot(&mut w);
        for _ in 0..59 {
            update_bullets(&mut w, 1.0);
        }
        assert_eq!(w.bullets.len(), 1);
        update_bullets(&mut w, 1.0);
        assert!(w.bullets.is_empty());
    }

    #[test]
    fn test_bullet_breaks_block_once() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.add_breakable(6, 6, true, false);
        let mut w = world(&level);
        w.player.body.pos = Vec2::new(32.0, 150.0);
        w.progress.lives = 3;
        shoot(&mut w);
        for _ in 0..10 {
            update_bullets(&mut w, 1.0);
        }
        assert!(w.bullets.is_empty());
        assert!(w.solids.iter().all(|t| t.breakable.is_none()));
        assert_eq!(w.progress.lives, 4);
        let events = w.drain_events();
        assert_eq!(
            events.iter().filter(|e| matches!(e, GameEvent::BlockBroken { .. })).count(),
            1
        );
    }

    #[test]
    fn test_coin_block_releases_floating_coin() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.add_breakable(6, 4, false, true);
        let mut w = world(&level);
        let tile_id = w.solids.iter().find(|t| t.breakable.is_some()).map(|t| t.id).expect("block");
        break_block(&mut w, tile_id);
        let coin = w.pickups.last().expect("floating coin");
        assert_eq!(coin.kind, PickupKind::Coin);
        assert_eq!(coin.pos, Vec2::new(6.0 * 32.0 + 5.0, 3.0 * 32.0));
        assert_eq!(coin.drift, -3.0);

        for _ in 0..40 {
            update_floating_coins(&mut w, 1.0);
        }
        let coin = w.pickups.last().expect("floating coin");
        assert_eq!(coin.drift, 0.0);
        assert!(coin.pos.y < 3.0 * 32.0);

        // Breaking the same tile again is a no-op
        break_block(&mut w, tile_id);
        assert_eq!(w.pickups.iter().filter(|p| p.kind == PickupKind::Coin).count(), 1);
    }

    #[test]
    fn test_heart_caps_at_nine() {
        let mut level = LevelDescriptor::flat(1, 40);
        level.add_breakable(6, 4, true, false);
        let mut w = world(&level);
        w.progress.lives = 9;
        let tile_id = w.solids.iter().find(|t| t.breakable.is_some()).map(|t| t.id).expect("block");
        break_block(&mut w, tile_id);
        assert_eq!(w.progress.lives, 9);
    }

    #[test]
    fn test_pit_fall_resets_to_checkpoint() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        w.checkpoint = Vec2::new(300.0, 188.0);
        fall_into_pit(&mut w);
        assert_eq!(w.progress.lives, 2);
        assert_eq!(w.player.body.pos, Vec2::new(300.0, 188.0));
        assert_eq!(w.revive_checkpoint, w.checkpoint);
        assert!(w.player.invincible);
        assert_eq!(w.status, LevelStatus::Playing);
    }

    #[test]
    fn test_pit_fall_on_last_life_loses() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        w.progress.lives = 1;
        fall_into_pit(&mut w);
        assert_eq!(w.status, LevelStatus::Lose(LoseReason::OutOfLives));
    }

    #[test]
    fn test_win_once_unlocks_next() {
        let level = LevelDescriptor::flat(3, 40);
        let mut w = world(&level);
        w.progress.max_unlocked = 3;
        win(&mut w);
        win(&mut w);
        assert_eq!(w.status, LevelStatus::Win);
        assert_eq!(w.progress.max_unlocked, 4);
        assert_eq!(w.progress.world_progress, [1, 0, 0, 0]);
        let wins = w.drain_events().iter().filter(|e| matches!(e, GameEvent::LevelWon { .. })).count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_replaying_old_level_does_not_bump_world() {
        let level = LevelDescriptor::flat(2, 40);
        let mut w = world(&level);
        w.progress.max_unlocked = 10;
        w.progress.world_progress = [9, 0, 0, 0];
        win(&mut w);
        assert_eq!(w.progress.max_unlocked, 10);
        assert_eq!(w.progress.world_progress, [9, 0, 0, 0]);
    }

    #[test]
    fn test_revive_rules() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        assert!(matches!(revive(&mut w), Err(GameError::ReviveNotAllowed)));

        w.progress.lives = 0;
        w.revive_checkpoint = Vec2::new(500.0, 100.0);
        lose(&mut w, LoseReason::OutOfLives);
        w.progress.coins = 99;
        assert!(matches!(revive(&mut w), Err(GameError::NotEnoughCoins { needed: 100, have: 99 })));

        w.progress.coins = 150;
        revive(&mut w).expect("revive");
        assert_eq!(w.status, LevelStatus::Playing);
        assert_eq!(w.progress.coins, 50);
        assert_eq!(w.progress.lives, 1);
        assert_eq!(w.player.body.pos, Vec2::new(500.0, 100.0));
        assert_eq!(w.player.invincible_timer, REVIVE_INVINCIBLE_FRAMES);
        assert_eq!(w.player.spawn_grace, REVIVE_GRACE_FRAMES);
    }

    #[test]
    fn test_time_up_cannot_revive() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        w.progress.coins = 500;
        lose(&mut w, LoseReason::TimeUp);
        assert!(matches!(revive(&mut w), Err(GameError::ReviveNotAllowed)));
    }
}
