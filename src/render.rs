//! Render pass
//!
//! Reads the post-update state of the current tick and issues draw calls.
//! Draw order: background, ship, bullets, live enemies, death animations.

use crate::error::PlatformError;
use crate::graphics::Assets;
use crate::platform::{Renderer, Rgb};
use crate::sim::GameState;

pub const BACKGROUND: Rgb = [0, 0, 0];

/// Draw one complete frame and present it
pub fn render_frame<R: Renderer + ?Sized>(
    renderer: &mut R,
    state: &GameState,
    assets: &Assets,
) -> Result<(), PlatformError> {
    renderer.clear(BACKGROUND);

    renderer.blit(&assets.ship.image, state.player.position);

    // Parked slots are far outside the arena and get clipped
    for &position in state.bullets.positions() {
        renderer.blit(&assets.bullet.image, position);
    }

    for wave in &state.waves {
        let gfx = assets.enemy(wave.kind);
        for (_, position) in wave.alive() {
            renderer.blit(&gfx.image, position);
        }
        for (position, elapsed) in wave.dying() {
            renderer.blit(gfx.death_frame(elapsed), position);
        }
    }

    renderer.present()
}
