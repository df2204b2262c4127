//! Game settings
//!
//! Loaded from a JSON file named by `SIDE_SCROLLER_CONFIG`; every field is
//! optional and falls back to the defaults below.

use std::path::{Path, PathBuf};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Hitbox, WaveSpec};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "SIDE_SCROLLER_CONFIG";

/// Clock that gates shot cooldown and wave spawn/flush cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    /// Milliseconds derived from the tick counter (fixed timestep)
    #[default]
    Simulated,
    /// Milliseconds from the platform clock since the loop started
    WallClock,
}

impl TimeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSource::Simulated => "simulated",
            TimeSource::WallClock => "wall_clock",
        }
    }
}

/// Ship parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Start pose (top-left corner)
    pub start: IVec2,
    pub speed: i32,
    pub shot_delay_ms: u64,
    /// Bullet spawn point as a fraction of the sprite size (numerator, denominator)
    pub nose: (IVec2, IVec2),
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            start: IVec2::ZERO,
            speed: PLAYER_SPEED,
            shot_delay_ms: SHOT_DELAY_MS,
            nose: (IVec2::new(3, 1), IVec2::new(4, 2)),
        }
    }
}

/// Bullet pool parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    pub capacity: usize,
    pub velocity: IVec2,
    /// Reaches well ahead of the 16x6 sprite so a bullet cannot step over
    /// an enemy between two ticks
    pub hitbox: Hitbox,
    pub damage: i32,
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            capacity: BULLET_CAPACITY,
            velocity: IVec2::new(BULLET_SPEED, 0),
            hitbox: Hitbox::new(IVec2::new(0, 0), IVec2::new(24, 8)),
            damage: BULLET_DAMAGE,
        }
    }
}

/// Sprite paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub ship: PathBuf,
    pub bullet: PathBuf,
    pub enemy: PathBuf,
    /// Death animation, in playback order
    pub enemy_death: Vec<PathBuf>,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            ship: PathBuf::from("graphics/ship.png"),
            bullet: PathBuf::from("graphics/bullet.png"),
            enemy: PathBuf::from("graphics/circle.png"),
            enemy_death: (1..=4)
                .map(|i| PathBuf::from(format!("graphics/circle_death_{i}.png")))
                .collect(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena size in pixels
    pub width: i32,
    pub height: i32,
    /// Target ticks per second
    pub fps: u32,
    pub time_source: TimeSource,
    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,

    pub player: PlayerSettings,
    pub bullets: BulletSettings,
    /// Template for every spawned wave
    pub wave: WaveSpec,

    pub spawn_interval_ms: u64,
    pub flush_interval_ms: u64,
    pub flush_margin: i32,

    pub assets: AssetPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fps: TARGET_FPS,
            time_source: TimeSource::Simulated,
            seed: None,

            player: PlayerSettings::default(),
            bullets: BulletSettings::default(),
            wave: WaveSpec::default(),

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            flush_interval_ms: FLUSH_INTERVAL_MS,
            flush_margin: FLUSH_MARGIN,

            assets: AssetPaths::default(),
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `SIDE_SCROLLER_CONFIG` if set, otherwise use defaults
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("{} not set, using default settings", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.width <= 0 || self.height <= 0 {
            return invalid("arena width and height must be positive");
        }
        if self.fps == 0 {
            return invalid("fps must be non-zero");
        }
        if self.bullets.capacity == 0 {
            return invalid("bullet pool capacity must be non-zero");
        }
        if self.player.speed < 0 {
            return invalid("player speed must not be negative");
        }
        if self.player.nose.1.cmple(IVec2::ZERO).any() {
            return invalid("player nose denominators must be positive");
        }
        if self.wave.count == 0 {
            return invalid("wave count must be non-zero");
        }
        if self.wave.health < 1 {
            return invalid("wave health must be at least 1");
        }
        if self.bullets.damage < 1 {
            return invalid("bullet damage must be at least 1");
        }
        if self.wave.spawn.max.cmplt(self.wave.spawn.min).any() {
            return invalid("wave spawn region max must not be below min");
        }
        if self.wave.spread.cmplt(IVec2::ZERO).any() {
            return invalid("wave velocity spread must not be negative");
        }
        if self.spawn_interval_ms == 0 || self.flush_interval_ms == 0 {
            return invalid("spawn and flush intervals must be non-zero");
        }
        if self.assets.enemy_death.is_empty() {
            return invalid("enemy death animation needs at least one frame");
        }
        Ok(())
    }
}
