//! Platform abstraction layer
//!
//! The simulation driver talks to its window/terminal through these traits:
//! - Image loading and frame presentation (`Renderer`)
//! - Held-key polling (`InputSource`)
//! - Time and frame pacing (`Clock`)

pub mod headless;
pub mod terminal;

use std::path::Path;

use glam::IVec2;

use crate::error::{LoadError, PlatformError};
use crate::graphics::ImageHandle;
use crate::sim::TickInput;

pub use headless::{DrawCall, HeadlessPlatform};
pub use terminal::TerminalPlatform;

/// 8-bit RGB colour
pub type Rgb = [u8; 3];

/// Logical actions currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Close request or escape key
    pub quit: bool,
}

impl InputState {
    /// The gameplay part of the input, as consumed by `sim::tick`
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            fire: self.fire,
        }
    }
}

/// Image loading and drawing
pub trait Renderer {
    /// Load an image file; fails if it is missing or cannot be decoded
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, LoadError>;

    /// Fill the whole back buffer
    fn clear(&mut self, color: Rgb);

    /// Draw `image` with its top-left corner at `position` (arena pixels).
    /// Anything outside the arena is clipped.
    fn blit(&mut self, image: &ImageHandle, position: IVec2);

    /// Show the back buffer
    fn present(&mut self) -> Result<(), PlatformError>;
}

/// Keyboard/window events
pub trait InputSource {
    fn poll_input(&mut self) -> Result<InputState, PlatformError>;
}

/// Time and pacing
pub trait Clock {
    /// Milliseconds since the platform was created
    fn now_millis(&self) -> u64;

    /// Block until one frame at `fps` has elapsed since the previous call
    fn throttle_to_fps(&mut self, fps: u32);
}

/// Everything the driver needs from its host
pub trait Platform: Renderer + InputSource + Clock {
    /// Open the window/terminal for an arena of `size` pixels
    fn init(&mut self, title: &str, size: IVec2) -> Result<(), PlatformError>;

    /// Release the window/terminal. Must be safe to call after a failed
    /// `init` and more than once.
    fn teardown(&mut self) -> Result<(), PlatformError>;
}
