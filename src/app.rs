//! Simulation driver
//!
//! Owns the platform, the world and the loaded sprites. One iteration of the
//! loop is: poll input → tick → render → throttle. A quit request ends the
//! loop after the current iteration; teardown always runs afterwards.

use glam::IVec2;

use crate::error::{GameError, PlatformError};
use crate::graphics::Assets;
use crate::platform::Platform;
use crate::render::render_frame;
use crate::settings::{Settings, TimeSource};
use crate::sim::{GameEvent, GameState, tick};
use crate::sim_time_ms;

pub const WINDOW_TITLE: &str = "Sidescrolling shooter";

/// Counters gathered while running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
    pub shots: u64,
    pub kills: u64,
    pub waves_spawned: u64,
    pub waves_flushed: u64,
}

impl RunStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShotFired { .. } => self.shots += 1,
            GameEvent::EnemyKilled { .. } => self.kills += 1,
            GameEvent::WaveSpawned { .. } => self.waves_spawned += 1,
            GameEvent::WavesFlushed { removed, .. } => self.waves_flushed += *removed as u64,
        }
    }
}

pub struct App<P: Platform> {
    platform: P,
    settings: Settings,
    state: Option<GameState>,
    assets: Option<Assets>,
    running: bool,
    stats: RunStats,
}

impl<P: Platform> App<P> {
    pub fn new(platform: P, settings: Settings) -> Self {
        Self {
            platform,
            settings,
            state: None,
            assets: None,
            running: false,
            stats: RunStats::default(),
        }
    }

    /// Run the game to completion: init, loop until quit, cleanup.
    ///
    /// Cleanup runs even when init or the loop fails; the first error wins.
    pub fn execute(&mut self) -> Result<RunStats, GameError> {
        let result = self.on_init().and_then(|()| self.run_loop());
        let cleanup = self.on_cleanup();
        result?;
        cleanup?;
        Ok(self.stats)
    }

    fn on_init(&mut self) -> Result<(), GameError> {
        self.settings.validate()?;

        let size = IVec2::new(self.settings.width, self.settings.height);
        self.platform.init(WINDOW_TITLE, size)?;

        let assets = Assets::load(&mut self.platform, &self.settings.assets).inspect_err(|e| {
            log::error!("Asset {} failed to load", e.path().display());
        })?;
        self.state = Some(GameState::new(&self.settings, assets.ship.image.size));
        self.assets = Some(assets);

        log::info!(
            "Running at {} fps, {} clock",
            self.settings.fps,
            self.settings.time_source.as_str()
        );
        self.running = true;
        Ok(())
    }

    fn run_loop(&mut self) -> Result<(), GameError> {
        let (Some(state), Some(assets)) = (self.state.as_mut(), self.assets.as_ref()) else {
            return Ok(());
        };
        let fps = self.settings.fps;
        let started_ms = self.platform.now_millis();

        while self.running {
            let input = self.platform.poll_input()?;
            if input.quit {
                log::info!("Quit requested at tick {}", state.time_ticks);
                self.running = false;
            }

            let now_ms = match self.settings.time_source {
                TimeSource::Simulated => sim_time_ms(state.time_ticks + 1, fps),
                TimeSource::WallClock => self.platform.now_millis().saturating_sub(started_ms),
            };
            tick(state, &input.tick_input(), now_ms);
            self.stats.ticks += 1;

            for event in state.drain_events() {
                log::trace!("{:?}", event);
                self.stats.record(&event);
            }

            render_frame(&mut self.platform, state, assets)?;
            self.platform.throttle_to_fps(fps);
        }
        Ok(())
    }

    fn on_cleanup(&mut self) -> Result<(), PlatformError> {
        self.running = false;
        self.platform.teardown()?;
        log::info!(
            "Shut down after {} ticks ({} shots, {} kills, {} waves)",
            self.stats.ticks,
            self.stats.shots,
            self.stats.kills,
            self.stats.waves_spawned
        );
        Ok(())
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }
}
