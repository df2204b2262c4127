//! Game state and core simulation types
//!
//! The world owns the player, the bullet pool and the active waves. Waves
//! are spawned and flushed on fixed cadences measured in milliseconds of
//! whichever clock the driver feeds into `tick`.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bullets::BulletPool;
use super::collision::detect;
use super::enemy::{EnemyWave, WaveSpec};
use super::geometry::Rect;
use super::player::Player;
use crate::settings::Settings;

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired { position: IVec2 },
    WaveSpawned { wave_id: u32, count: usize },
    WavesFlushed { removed: usize, remaining: usize },
    EnemyKilled { wave_id: u32, index: usize, position: IVec2 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Visible playfield
    pub arena: Rect,
    pub player: Player,
    pub bullets: BulletPool,
    /// Active waves, oldest first
    pub waves: Vec<EnemyWave>,
    /// Template for every spawned wave
    pub wave_spec: WaveSpec,
    pub bullet_damage: i32,
    pub spawn_interval_ms: u64,
    pub flush_interval_ms: u64,
    pub flush_margin: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last `drain_events`
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    last_spawn_ms: u64,
    last_flush_ms: u64,
    next_wave_id: u32,
}

impl GameState {
    /// Build the world from settings. `player_shape` is the ship sprite size.
    pub fn new(settings: &Settings, player_shape: IVec2) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        let arena = Rect::from_size(IVec2::new(settings.width, settings.height));

        let bounds_max = (arena.max - player_shape).max(arena.min);
        let start = settings.player.start.max(arena.min).min(bounds_max);
        let mut player = Player::new(
            start,
            player_shape,
            arena,
            settings.player.speed,
            settings.player.shot_delay_ms,
        );
        player.nose = settings.player.nose;

        let bullets = BulletPool::new(
            settings.bullets.capacity,
            settings.bullets.velocity,
            settings.bullets.hitbox,
        );

        log::info!(
            "World {}x{} seed={} pool={} wave={}x{}",
            settings.width,
            settings.height,
            seed,
            settings.bullets.capacity,
            settings.wave.count,
            settings.wave.kind.as_str()
        );

        Self {
            seed,
            arena,
            player,
            bullets,
            waves: Vec::new(),
            wave_spec: settings.wave.clone(),
            bullet_damage: settings.bullets.damage,
            spawn_interval_ms: settings.spawn_interval_ms,
            flush_interval_ms: settings.flush_interval_ms,
            flush_margin: settings.flush_margin,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_ms: 0,
            last_flush_ms: 0,
            next_wave_id: 1,
        }
    }

    /// Region a wave must have an instance inside to survive a flush
    pub fn flush_bounds(&self) -> Rect {
        self.arena.expanded(self.flush_margin)
    }

    /// Spawn one wave from the template; returns its id
    pub fn spawn_wave(&mut self) -> u32 {
        let id = self.next_wave_id;
        self.next_wave_id += 1;

        let wave = EnemyWave::spawn(id, &self.wave_spec, &mut self.rng);
        log::debug!("Spawned wave {} ({} enemies)", id, wave.len());
        self.events.push(GameEvent::WaveSpawned {
            wave_id: id,
            count: wave.len(),
        });
        self.waves.push(wave);
        id
    }

    /// Remove every wave with no instance inside `flush_bounds`
    pub fn flush_waves(&mut self) -> usize {
        let bounds = self.flush_bounds();
        let before = self.waves.len();
        self.waves.retain(|wave| wave.on_screen(&bounds));
        let removed = before - self.waves.len();

        if removed > 0 {
            log::debug!("Flushed {} waves, {} remain", removed, self.waves.len());
            self.events.push(GameEvent::WavesFlushed {
                removed,
                remaining: self.waves.len(),
            });
        }
        removed
    }

    /// Flush if a full flush interval has passed since the last one
    pub(crate) fn flush_if_due(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_flush_ms) >= self.flush_interval_ms {
            self.last_flush_ms = now_ms;
            self.flush_waves();
        }
    }

    /// Spawn if a full spawn interval has passed since the last one
    pub(crate) fn spawn_if_due(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_spawn_ms) >= self.spawn_interval_ms {
            self.last_spawn_ms = now_ms;
            self.spawn_wave();
        }
    }

    /// Resolve bullets against every wave in order, applying damage and
    /// absorbing consumed bullets before the next wave is tested.
    pub(crate) fn resolve_collisions(&mut self) {
        for wave in &mut self.waves {
            let hits = detect(&self.bullets, wave);
            if !hits.any() {
                continue;
            }

            for index in wave.take_damage(&hits.enemies, self.bullet_damage) {
                let position = wave.death_position(index).unwrap_or_default();
                log::debug!("Wave {} enemy {} destroyed at {}", wave.id, index, position);
                self.events.push(GameEvent::EnemyKilled {
                    wave_id: wave.id,
                    index,
                    position,
                });
            }
            self.bullets.absorb(hits.bullet_indices());
        }
    }

    /// Take the events raised since the previous call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Total live enemies across all waves
    pub fn enemies_alive(&self) -> usize {
        self.waves.iter().map(EnemyWave::alive_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            seed: Some(42),
            ..Settings::default()
        }
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(&settings(), IVec2::new(64, 32));
        assert_eq!(state.seed, 42);
        assert_eq!(state.arena, Rect::from_size(IVec2::new(1080, 600)));
        assert_eq!(state.player.position, IVec2::ZERO);
        assert!(state.waves.is_empty());
        assert_eq!(state.bullets.capacity(), settings().bullets.capacity);
    }

    #[test]
    fn test_start_is_clamped_into_arena() {
        let mut settings = settings();
        settings.player.start = IVec2::new(5000, -40);
        let state = GameState::new(&settings, IVec2::new(64, 32));
        assert_eq!(state.player.position, IVec2::new(1080 - 64, 0));
    }

    #[test]
    fn test_spawn_and_flush() {
        let mut state = GameState::new(&settings(), IVec2::new(64, 32));
        let first = state.spawn_wave();
        let second = state.spawn_wave();
        assert_eq!((first, second), (1, 2));
        assert_eq!(state.enemies_alive(), 20);

        // Fresh waves are inside the margin and survive
        assert_eq!(state.flush_waves(), 0);

        for _ in 0..800 {
            state.waves[0].update();
        }
        assert_eq!(state.flush_waves(), 1);
        assert_eq!(state.waves.len(), 1);
        assert_eq!(state.waves[0].id, 2);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::WavesFlushed {
            removed: 1,
            remaining: 1
        }));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_cadence_gates() {
        let mut state = GameState::new(&settings(), IVec2::new(64, 32));
        state.spawn_if_due(999);
        assert!(state.waves.is_empty());
        state.spawn_if_due(1000);
        assert_eq!(state.waves.len(), 1);
        state.spawn_if_due(1500);
        assert_eq!(state.waves.len(), 1);
        state.spawn_if_due(2000);
        assert_eq!(state.waves.len(), 2);
    }

    #[test]
    fn test_same_seed_same_waves() {
        let mut a = GameState::new(&settings(), IVec2::new(64, 32));
        let mut b = GameState::new(&settings(), IVec2::new(64, 32));
        a.spawn_wave();
        b.spawn_wave();
        assert_eq!(a.waves[0].positions(), b.waves[0].positions());
        assert_eq!(a.waves[0].velocities(), b.waves[0].velocities());
    }
}
