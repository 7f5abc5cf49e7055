//! Super Pio headless runner
//!
//! Generates the level catalog and plays one level on autopilot with a
//! fixed-step loop, logging the feedback events a presentation layer would
//! turn into sounds and popups.
//!
//! Usage: `super-pio [level] [settings.json]` (`RUST_LOG=info` for output)

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use super_pio::consts::FRAME_MS;
    use super_pio::persistence::{self, SaveEnvelope};
    use super_pio::{GameEvent, LevelStatus, Progress, Session, Settings, TickInput};

    /// Host loop step in milliseconds
    const HOST_STEP_MS: f32 = 33.3;
    /// Safety cap on host steps
    const MAX_STEPS: u32 = 60 * 60 * 5;

    pub fn run() -> Result<(), super_pio::GameError> {
        let mut args = std::env::args().skip(1);
        let level: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
        let settings = match args.next() {
            Some(path) => Settings::load_from_path(Path::new(&path))?,
            None => Settings::default(),
        };

        let progress = Progress {
            max_unlocked: level.max(1),
            ..Progress::default()
        };
        let mut session = Session::new(settings, progress);
        log::info!("Generated {} levels", session.catalog().len());
        session.start_level(level)?;

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        // A 30 Hz host hands the sim about two frames per step
        let dt = HOST_STEP_MS / FRAME_MS;
        let mut steps = 0;
        while steps < MAX_STEPS {
            session.tick(&input, dt);
            steps += 1;

            for event in session.drain_events() {
                log_event(&event);
            }
            let status = session.world().map(|w| w.status);
            if !matches!(status, Some(LevelStatus::Playing)) {
                break;
            }
        }

        if let Some(snapshot) = session.snapshot() {
            log::info!(
                "Finished at x={:.0} status {:?}, score {}, coins {}, {}s left",
                snapshot.player.pos.x,
                snapshot.hud.status,
                snapshot.hud.score,
                snapshot.hud.level_coins,
                snapshot.hud.time_left
            );
        }

        let progress = session.exit_level();
        let save = persistence::encode(&SaveEnvelope::new(progress, session.settings.speed_boost, 0))?;
        println!("{save}");
        Ok(())
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::Jump | GameEvent::Shot { .. } | GameEvent::CheckpointReached { .. } => {
                log::trace!("{event:?}")
            }
            GameEvent::ProgressChanged(progress) => log::debug!("Progress: {progress:?}"),
            GameEvent::LevelWon { .. } | GameEvent::LevelLost(_) => log::info!("{event:?}"),
            _ => log::debug!("{event:?}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Super Pio (headless) starting...");
    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Session` directly; nothing to run here
}
