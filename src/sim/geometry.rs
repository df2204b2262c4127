//! Axis-aligned geometry for the arena and entity hitboxes
//!
//! Positions are integer pixels with +y pointing down (screen space).
//! A hitbox is stored as offsets relative to its owner's position, so the
//! same hitbox is shared by every entity of one type.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle spanning `(0, 0)..=size`
    pub fn from_size(size: IVec2) -> Self {
        Self {
            min: IVec2::ZERO,
            max: size,
        }
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expanded(&self, margin: i32) -> Self {
        Self {
            min: self.min - IVec2::splat(margin),
            max: self.max + IVec2::splat(margin),
        }
    }

    #[inline]
    pub fn contains(&self, point: IVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Collidable rectangle relative to an entity position
///
/// `min`/`max` are the per-axis offset ranges. They need not be centred on
/// the sprite: the bullet hitbox, for instance, reaches further forward than
/// the sprite so that fast bullets do not skip over thin enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitbox {
    pub min: IVec2,
    pub max: IVec2,
}

impl Hitbox {
    pub const fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// The hitbox placed at `position`, in world space
    pub fn at(&self, position: IVec2) -> Rect {
        Rect::new(position + self.min, position + self.max)
    }

    /// Open offset range, relative to an entity carrying `self`, inside which
    /// an entity carrying `other` overlaps it (the Minkowski difference).
    ///
    /// Returns `(low, high)`; overlap iff `low < offset < high` on both axes.
    #[inline]
    pub fn overlap_window(&self, other: &Hitbox) -> (IVec2, IVec2) {
        (self.min - other.max, self.max - other.min)
    }

    /// Whether `other` at `offset` from the owner of `self` overlaps it
    #[inline]
    pub fn overlaps_at(&self, other: &Hitbox, offset: IVec2) -> bool {
        let (low, high) = self.overlap_window(other);
        offset.cmpgt(low).all() && offset.cmplt(high).all()
    }
}
