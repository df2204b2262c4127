//! Bullet vs enemy collision detection
//!
//! Rectangle-vs-rectangle only: every bullet is tested against every enemy
//! of a wave with `Hitbox::overlaps_at`, O(enemies x bullets). Detection is
//! pure; the caller applies damage and absorbs bullets using the returned
//! masks.

use super::bullets::BulletPool;
use super::enemy::EnemyWave;

/// Result of resolving one wave against the bullet pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hits {
    /// One flag per enemy instance: hit by at least one bullet
    pub enemies: Vec<bool>,
    /// One flag per bullet slot: overlapped at least one enemy
    pub bullets: Vec<bool>,
}

impl Hits {
    pub fn any(&self) -> bool {
        self.enemies.iter().any(|&h| h)
    }

    /// Indices of consumed bullets, for [`BulletPool::absorb`]
    pub fn bullet_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bullets
            .iter()
            .enumerate()
            .filter_map(|(i, &hit)| hit.then_some(i))
    }
}

/// Find which enemies of `wave` are hit and which bullets are consumed.
///
/// A bullet overlapping two enemies on the same tick hits both, but is
/// consumed only once.
pub fn detect(bullets: &BulletPool, wave: &EnemyWave) -> Hits {
    let mut hits = Hits {
        enemies: vec![false; wave.len()],
        bullets: vec![false; bullets.capacity()],
    };

    for (enemy_hit, &enemy_pos) in hits.enemies.iter_mut().zip(wave.positions()) {
        for (bullet_hit, &bullet_pos) in hits.bullets.iter_mut().zip(bullets.positions()) {
            if wave.hitbox.overlaps_at(&bullets.hitbox, bullet_pos - enemy_pos) {
                *enemy_hit = true;
                *bullet_hit = true;
            }
        }
    }

    hits
}
