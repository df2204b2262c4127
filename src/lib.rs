//! Side Scroller - a sidescrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, tick order)
//! - `graphics`: Image handles and death-animation lookup
//! - `platform`: Window/terminal, input and clock collaborators
//! - `render`: Per-frame render pass over the simulation state
//! - `app`: The simulation driver (init, loop, cleanup)
//! - `settings`: Data-driven configuration

pub mod app;
pub mod error;
pub mod graphics;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use app::App;
pub use error::{ConfigError, GameError, LoadError, PlatformError};
pub use settings::{Settings, TimeSource};

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Arena dimensions (pixels)
    pub const WINDOW_WIDTH: i32 = 1080;
    pub const WINDOW_HEIGHT: i32 = 600;

    /// Logical ticks per second
    pub const TARGET_FPS: u32 = 60;

    /// A new wave appears this often
    pub const SPAWN_INTERVAL_MS: u64 = 1000;
    /// Off-screen waves are removed this often
    pub const FLUSH_INTERVAL_MS: u64 = 10_000;
    /// Waves inside the arena grown by this margin still count as on screen
    pub const FLUSH_MARGIN: i32 = 200;

    /// Parking spot for unused bullet slots
    pub const BULLET_SENTINEL: IVec2 = IVec2::new(-10_000, -10_000);
    /// Parking spot for dead enemies. Kept apart from the bullet sentinel so
    /// parked bullets and parked enemies never overlap each other.
    pub const ENEMY_SENTINEL: IVec2 = IVec2::new(-10_000, 10_000);

    /// Player defaults
    pub const PLAYER_SPEED: i32 = 3;
    pub const SHOT_DELAY_MS: u64 = 150;

    /// Bullet defaults
    pub const BULLET_CAPACITY: usize = 20;
    pub const BULLET_SPEED: i32 = 12;
    pub const BULLET_DAMAGE: i32 = 1;
}

/// Simulated clock: milliseconds elapsed after `ticks` fixed steps at `fps`
#[inline]
pub fn sim_time_ms(ticks: u64, fps: u32) -> u64 {
    ticks * 1000 / u64::from(fps.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_time_ms() {
        assert_eq!(sim_time_ms(0, 60), 0);
        assert_eq!(sim_time_ms(60, 60), 1000);
        assert_eq!(sim_time_ms(61, 60), 1016);
        assert_eq!(sim_time_ms(600, 60), 10_000);
    }
}
