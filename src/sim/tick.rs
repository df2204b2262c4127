//! Fixed timestep simulation tick
//!
//! Advances the world by one step in a fixed order:
//! player → bullets → waves → flush → spawn → collisions.

use super::state::{GameEvent, GameState};

/// Input commands for a single tick (held actions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Advance the game state by one tick.
///
/// `now_ms` gates the shot cooldown and the spawn/flush cadences. Movement
/// and velocities are per tick regardless of `now_ms`.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.time_ticks += 1;

    if input.right {
        state.player.move_right();
    }
    if input.left {
        state.player.move_left();
    }
    if input.up {
        state.player.move_up();
    }
    if input.down {
        state.player.move_down();
    }
    if input.fire && state.player.shoot(&mut state.bullets, now_ms) {
        let position = state.player.muzzle();
        state.events.push(GameEvent::ShotFired { position });
    }

    state.bullets.update();
    for wave in &mut state.waves {
        wave.update();
    }

    state.flush_if_due(now_ms);
    state.spawn_if_due(now_ms);

    state.resolve_collisions();
}
