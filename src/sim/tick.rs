//! Fixed timestep simulation tick
//!
//! Core game loop that advances one level deterministically.

use glam::Vec2;

use super::collision::{Rect, ground_probe};
use super::interact;
use super::physics;
use super::state::{LevelStatus, LoseReason, SolidKind, WorldState};
use crate::consts::*;

/// How far ahead of the player the autopilot looks for trouble
const AUTOPILOT_LOOKAHEAD: f32 = 48.0;
const AUTOPILOT_ENEMY_RANGE: f32 = 220.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump (edge-triggered by the caller)
    pub jump: bool,
    pub shoot: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the core plays the level itself
    pub autopilot: bool,
}

/// Advance the world by one timestep; `dt` is in frames (1.0 at 60 Hz)
pub fn tick(world: &mut WorldState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match world.status {
            LevelStatus::Playing => {
                world.status = LevelStatus::Paused;
                return;
            }
            LevelStatus::Paused => world.status = LevelStatus::Playing,
            _ => {}
        }
    }

    // Don't tick if paused or finished
    if world.status != LevelStatus::Playing {
        return;
    }

    let dt = dt.max(0.0).min(world.settings.max_dt);
    world.elapsed += dt;

    let mut input = input.clone();
    if input.autopilot {
        drive_autopilot(world, &mut input);
    }
    let input = &input;

    if input.jump {
        physics::jump(world);
    }
    if input.shoot {
        interact::shoot(world);
    }

    physics::update_player(world, input, dt);
    if world.status != LevelStatus::Playing {
        return;
    }

    physics::update_enemies(world, dt);
    interact::update_bullets(world, dt);
    physics::update_crumbles(world, dt);
    interact::check_pickups(world);
    interact::check_enemy_contact(world);
    if world.status != LevelStatus::Playing {
        return;
    }

    interact::update_floating_coins(world, dt);
    physics::update_particles(world, dt);
    physics::update_camera(world);

    world.time_left -= dt / 60.0;
    if world.time_left <= 0.0 {
        world.time_left = 0.0;
        interact::lose(world, LoseReason::TimeUp);
    }
}

/// Run right, hop over pits, walls and enemies, and shoot what is ahead
fn drive_autopilot(world: &WorldState, input: &mut TickInput) {
    let player = &world.player;
    if !player.is_alive() {
        return;
    }
    input.move_right = true;
    input.move_left = false;

    let body = player.body;
    let front = body.pos.x + body.size.x + AUTOPILOT_LOOKAHEAD;
    let ground_y = world.level.ground_row as f32 * TILE_SIZE;

    let front_col = (front / TILE_SIZE).floor() as i32;
    let gap_ahead = world.level.in_gap(front_col) && !ground_probe(&world.solids, Vec2::new(front, ground_y + 4.0));

    let wall_probe = Rect::new(
        Vec2::new(body.pos.x + body.size.x, body.pos.y + body.size.y * 0.5),
        Vec2::new(AUTOPILOT_LOOKAHEAD * 0.5, body.size.y * 0.4),
    );
    let wall_ahead = world
        .solids
        .iter()
        .any(|t| t.kind == SolidKind::Ground && wall_probe.overlaps(&t.rect(), 0.0));

    let enemy_ahead = world.enemies.iter().any(|e| {
        let dx = e.body.pos.x - (body.pos.x + body.size.x);
        !e.dead
            && dx > -8.0
            && dx < AUTOPILOT_ENEMY_RANGE
            && e.body.pos.y < body.bottom()
            && e.body.bottom() > body.pos.y
    });

    if body.on_ground && (gap_ahead || wall_ahead || enemy_ahead) {
        input.jump = true;
    }
    if enemy_ahead && world.ammo > 0 {
        input.shoot = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelDescriptor, generate_level};
    use crate::settings::Settings;
    use crate::sim::state::{GameEvent, Progress};

    fn world(level: &LevelDescriptor) -> WorldState {
        let settings = Settings {
            enemy_cull_chance: 0.0,
            ..Settings::default()
        };
        WorldState::new(level, Progress::default(), &settings)
    }

    #[test]
    fn test_tick_pause() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut w, &pause, 1.0);
        assert_eq!(w.status, LevelStatus::Paused);
        let time = w.time_left;

        // Paused ticks change nothing
        let walk = TickInput {
            move_right: true,
            ..Default::default()
        };
        let x = w.player.body.pos.x;
        for _ in 0..10 {
            tick(&mut w, &walk, 1.0);
        }
        assert_eq!(w.player.body.pos.x, x);
        assert_eq!(w.time_left, time);

        tick(&mut w, &pause, 1.0);
        assert_eq!(w.status, LevelStatus::Playing);
        assert!(w.player.body.pos.x >= x);
    }

    #[test]
    fn test_dt_is_clamped() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        tick(&mut w, &TickInput::default(), 50.0);
        assert_eq!(w.elapsed, 3.0);
        tick(&mut w, &TickInput::default(), -2.0);
        assert_eq!(w.elapsed, 3.0);
    }

    #[test]
    fn test_tick_is_deterministic() {
        let level = generate_level(7);
        let settings = Settings::default();
        let mut a = WorldState::new(&level, Progress::default(), &settings);
        let mut b = WorldState::new(&level, Progress::default(), &settings);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, 1.0);
            tick(&mut b, &input, 1.0);
        }
        assert_eq!(a.player.body.pos, b.player.body.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.status, b.status);
        assert_eq!(a.drain_events(), b.drain_events());
        assert_eq!(a.particles.len(), b.particles.len());
    }

    #[test]
    fn test_timer_runs_out() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        w.time_left = 0.04;
        for _ in 0..3 {
            tick(&mut w, &TickInput::default(), 1.0);
        }
        assert_eq!(w.time_left, 0.0);
        assert_eq!(w.status, LevelStatus::Lose(LoseReason::TimeUp));
        let events = w.drain_events();
        assert!(events.contains(&GameEvent::LevelLost(LoseReason::TimeUp)));

        // Finished levels no longer advance
        let elapsed = w.elapsed;
        tick(&mut w, &TickInput::default(), 1.0);
        assert_eq!(w.elapsed, elapsed);
    }

    #[test]
    fn test_autopilot_clears_flat_level() {
        let level = LevelDescriptor::flat(1, 40);
        let mut w = world(&level);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut w, &input, 1.0);
            if w.status != LevelStatus::Playing {
                break;
            }
        }
        assert_eq!(w.status, LevelStatus::Win);
    }

    #[test]
    fn test_autopilot_jumps_pit() {
        let mut level = LevelDescriptor::flat(1, 60);
        level.add_gap(20, 3);
        let mut w = world(&level);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..1500 {
            tick(&mut w, &input, 1.0);
            if w.status != LevelStatus::Playing {
                break;
            }
        }
        assert_eq!(w.status, LevelStatus::Win);
        assert_eq!(w.progress.lives, 3);
    }
}
