//! The player's ship

use glam::IVec2;

use super::bullets::BulletPool;
use super::geometry::Rect;

/// The player-controlled ship
#[derive(Debug, Clone)]
pub struct Player {
    pub position: IVec2,
    /// Sprite size, used to keep the whole ship inside the arena
    pub shape: IVec2,
    /// Pixels moved per tick per held direction
    pub speed: i32,
    /// Minimum milliseconds between shots (exclusive)
    pub shot_delay_ms: u64,
    /// Bullet spawn point as a fraction of `shape` (numerator, denominator)
    pub nose: (IVec2, IVec2),
    bounds: Rect,
    last_shot_ms: Option<u64>,
}

impl Player {
    pub fn new(position: IVec2, shape: IVec2, bounds: Rect, speed: i32, shot_delay_ms: u64) -> Self {
        Self {
            position,
            shape,
            speed,
            shot_delay_ms,
            nose: (IVec2::new(3, 1), IVec2::new(4, 2)),
            bounds,
            last_shot_ms: None,
        }
    }

    /// Area the ship's top-left corner may occupy
    pub fn movement_bounds(&self) -> Rect {
        Rect::new(self.bounds.min, self.bounds.max - self.shape)
    }

    // Each move checks the bound first and skips the step if it would
    // overshoot, so the ship never snaps flush to the edge.

    pub fn move_right(&mut self) {
        if self.position.x + self.speed <= self.bounds.max.x - self.shape.x {
            self.position.x += self.speed;
        }
    }

    pub fn move_left(&mut self) {
        if self.position.x - self.speed >= self.bounds.min.x {
            self.position.x -= self.speed;
        }
    }

    pub fn move_up(&mut self) {
        if self.position.y - self.speed >= self.bounds.min.y {
            self.position.y -= self.speed;
        }
    }

    pub fn move_down(&mut self) {
        if self.position.y + self.speed <= self.bounds.max.y - self.shape.y {
            self.position.y += self.speed;
        }
    }

    /// Where a new bullet appears
    pub fn muzzle(&self) -> IVec2 {
        let (num, den) = self.nose;
        self.position + self.shape * num / den
    }

    /// Fire into `pool` if the cooldown has strictly elapsed.
    ///
    /// Returns whether a bullet was fired. The cooldown clock only restarts
    /// on an actual shot.
    pub fn shoot(&mut self, pool: &mut BulletPool, now_ms: u64) -> bool {
        let ready = match self.last_shot_ms {
            Some(last) => now_ms.saturating_sub(last) > self.shot_delay_ms,
            None => true,
        };
        if !ready {
            return false;
        }
        pool.add(self.muzzle());
        self.last_shot_ms = Some(now_ms);
        true
    }

    pub fn last_shot_ms(&self) -> Option<u64> {
        self.last_shot_ms
    }
}
