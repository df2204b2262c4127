//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick movement, time supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (waves oldest first, instances by index)
//! - No rendering or platform dependencies

pub mod bullets;
pub mod collision;
pub mod enemy;
pub mod geometry;
pub mod player;
pub mod state;
pub mod tick;

pub use bullets::BulletPool;
pub use collision::{Hits, detect};
pub use enemy::{EnemyKind, EnemyWave, WaveSpec};
pub use geometry::{Hitbox, Rect};
pub use player::Player;
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
