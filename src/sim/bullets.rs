//! Ring-allocated bullet pool
//!
//! Every slot always exists. Inactive slots sit at [`BULLET_SENTINEL`] and
//! drift with the pool velocity like any other slot; the sentinel is far
//! enough away that they never reach the collidable region before being
//! overwritten.

use glam::IVec2;

use super::geometry::Hitbox;
use crate::consts::BULLET_SENTINEL;

/// Fixed-capacity structure-of-arrays bullet storage
#[derive(Debug, Clone)]
pub struct BulletPool {
    positions: Vec<IVec2>,
    /// Slot written by the next `add`
    cursor: usize,
    /// Uniform velocity applied to every slot each tick
    pub velocity: IVec2,
    /// Hitbox shared by every bullet
    pub hitbox: Hitbox,
}

impl BulletPool {
    /// Create a pool with `capacity` inactive slots.
    ///
    /// # Panics
    /// If `capacity` is zero: a pool with no slots is a configuration bug.
    pub fn new(capacity: usize, velocity: IVec2, hitbox: Hitbox) -> Self {
        assert!(capacity > 0, "bullet pool capacity must be non-zero");
        Self {
            positions: vec![BULLET_SENTINEL; capacity],
            cursor: 0,
            velocity,
            hitbox,
        }
    }

    /// Insert a bullet, overwriting the least recently written slot
    pub fn add(&mut self, position: IVec2) {
        self.positions[self.cursor] = position;
        self.cursor = (self.cursor + 1) % self.positions.len();
    }

    /// Advance every slot, active or not, by the pool velocity
    pub fn update(&mut self) {
        for pos in &mut self.positions {
            *pos += self.velocity;
        }
    }

    /// Return consumed bullets to the sentinel position
    pub fn absorb(&mut self, indices: impl IntoIterator<Item = usize>) {
        for i in indices {
            self.positions[i] = BULLET_SENTINEL;
        }
    }

    pub fn positions(&self) -> &[IVec2] {
        &self.positions
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Index of the slot the next `add` will overwrite
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
