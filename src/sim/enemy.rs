//! Enemy waves
//!
//! A wave is a batch of identical enemies spawned at once and flushed as a
//! unit. Per-instance data is kept in parallel arrays indexed by instance.
//! Dead instances stay in the arrays (parked at the sentinel position) until
//! the whole wave is flushed.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Hitbox, Rect};
use crate::consts::ENEMY_SENTINEL;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Circle,
}

impl EnemyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Circle => "circle",
        }
    }

    /// Health every instance spawns with
    pub fn base_health(&self) -> i32 {
        match self {
            EnemyKind::Circle => 1,
        }
    }

    /// Hitbox for the kind's stock sprite (48x48)
    pub fn default_hitbox(&self) -> Hitbox {
        match self {
            EnemyKind::Circle => Hitbox::new(IVec2::new(6, 6), IVec2::new(42, 42)),
        }
    }
}

/// Construction parameters for a wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSpec {
    pub kind: EnemyKind,
    /// Enemies per wave
    pub count: usize,
    /// Spawn region; positions are drawn from `min..max` per axis
    pub spawn: Rect,
    /// Mean per-tick velocity
    pub average_velocity: IVec2,
    /// Velocities are drawn from `average - spread..average + spread`
    pub spread: IVec2,
    pub hitbox: Hitbox,
    pub health: i32,
}

impl WaveSpec {
    /// Stock wave for `kind`: ten enemies entering from the right edge
    pub fn for_kind(kind: EnemyKind) -> Self {
        Self {
            kind,
            count: 10,
            spawn: Rect::new(IVec2::new(1080, 200), IVec2::new(1200, 400)),
            average_velocity: IVec2::new(-2, 0),
            spread: IVec2::new(1, 1),
            hitbox: kind.default_hitbox(),
            health: kind.base_health(),
        }
    }
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self::for_kind(EnemyKind::Circle)
    }
}

/// Uniform draw from `low..high`, collapsing to `low` for an empty range
fn sample_axis(rng: &mut impl Rng, low: i32, high: i32) -> i32 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

/// A spawned batch of enemies
#[derive(Debug, Clone)]
pub struct EnemyWave {
    pub id: u32,
    pub kind: EnemyKind,
    pub hitbox: Hitbox,
    positions: Vec<IVec2>,
    velocities: Vec<IVec2>,
    health: Vec<i32>,
    /// Ticks elapsed since death; advanced for every instance
    death_frames: Vec<u32>,
    /// Where each dead instance died (drives the death animation)
    death_positions: Vec<Option<IVec2>>,
}

impl EnemyWave {
    /// Spawn a wave with randomised positions and velocities.
    ///
    /// Each instance draws its own velocity, so a wave does not move in
    /// lockstep.
    pub fn spawn(id: u32, spec: &WaveSpec, rng: &mut impl Rng) -> Self {
        let low_vel = spec.average_velocity - spec.spread;
        let high_vel = spec.average_velocity + spec.spread;

        let instances: Vec<(IVec2, IVec2)> = (0..spec.count)
            .map(|_| {
                let pos = IVec2::new(
                    sample_axis(rng, spec.spawn.min.x, spec.spawn.max.x),
                    sample_axis(rng, spec.spawn.min.y, spec.spawn.max.y),
                );
                let vel = IVec2::new(
                    sample_axis(rng, low_vel.x, high_vel.x),
                    sample_axis(rng, low_vel.y, high_vel.y),
                );
                (pos, vel)
            })
            .collect();

        Self::from_instances(id, spec.kind, spec.hitbox, spec.health, instances)
    }

    /// Build a wave from explicit `(position, velocity)` pairs.
    ///
    /// # Panics
    /// If `instances` is empty or `health` is below 1.
    pub fn from_instances(
        id: u32,
        kind: EnemyKind,
        hitbox: Hitbox,
        health: i32,
        instances: impl IntoIterator<Item = (IVec2, IVec2)>,
    ) -> Self {
        let (positions, velocities): (Vec<IVec2>, Vec<IVec2>) = instances.into_iter().unzip();
        assert!(!positions.is_empty(), "enemy wave must contain at least one enemy");
        // Below 1 counts as dead, and a dead enemy must have been parked
        assert!(health >= 1, "enemy health must start at 1 or more");

        let count = positions.len();
        Self {
            id,
            kind,
            hitbox,
            positions,
            velocities,
            health: vec![health; count],
            death_frames: vec![0; count],
            death_positions: vec![None; count],
        }
    }

    /// Advance positions and death-animation counters by one tick
    pub fn update(&mut self) {
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            *pos += *vel;
        }
        for frame in &mut self.death_frames {
            *frame = frame.saturating_add(1);
        }
    }

    /// Apply `amount` damage to every instance flagged in `hit_mask`.
    ///
    /// An instance dies at most once: the death location is captured and the
    /// animation restarted only when health drops below 1 during this call
    /// and the instance was alive before it. Returns the newly dead indices.
    pub fn take_damage(&mut self, hit_mask: &[bool], amount: i32) -> Vec<usize> {
        assert_eq!(
            hit_mask.len(),
            self.len(),
            "hit mask length must match wave size"
        );

        let was_dead: Vec<bool> = self.health.iter().map(|&h| h < 1).collect();

        for (health, &hit) in self.health.iter_mut().zip(hit_mask) {
            if hit {
                *health -= amount;
            }
        }

        let mut killed = Vec::new();
        for i in 0..self.len() {
            if self.health[i] < 1 && !was_dead[i] {
                self.death_positions[i] = Some(self.positions[i]);
                self.death_frames[i] = 0;
                self.positions[i] = ENEMY_SENTINEL;
                killed.push(i);
            }
        }
        killed
    }

    /// Whether any instance lies within `bounds`
    pub fn on_screen(&self, bounds: &Rect) -> bool {
        self.positions.iter().any(|&p| bounds.contains(p))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_dead(&self, i: usize) -> bool {
        self.health[i] < 1
    }

    pub fn alive_count(&self) -> usize {
        self.health.iter().filter(|&&h| h >= 1).count()
    }

    pub fn positions(&self) -> &[IVec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[IVec2] {
        &self.velocities
    }

    pub fn health(&self) -> &[i32] {
        &self.health
    }

    /// Live instances as `(index, position)`
    pub fn alive(&self) -> impl Iterator<Item = (usize, IVec2)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_dead(*i))
            .map(|(i, &p)| (i, p))
    }

    /// Dead instances as `(death position, ticks since death)`
    pub fn dying(&self) -> impl Iterator<Item = (IVec2, u32)> + '_ {
        self.death_positions
            .iter()
            .zip(&self.death_frames)
            .filter_map(|(pos, &frames)| pos.map(|p| (p, frames)))
    }

    pub fn death_position(&self, i: usize) -> Option<IVec2> {
        self.death_positions[i]
    }

    pub fn death_frame(&self, i: usize) -> u32 {
        self.death_frames[i]
    }
}
