//! In-memory platform
//!
//! Plays back a fixed script of input frames against a simulated clock and
//! records every draw call. Once the script runs out it reports `quit`.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

use glam::IVec2;

use super::{Clock, InputSource, InputState, Platform, Renderer, Rgb};
use crate::error::{LoadError, PlatformError};
use crate::graphics::ImageHandle;
use crate::settings::AssetPaths;

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Clear(Rgb),
    Blit { image: u32, position: IVec2 },
}

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    /// Known "files" and their pixel sizes
    files: HashMap<PathBuf, IVec2>,
    /// Images loaded so far; the next id
    loaded: u32,
    script: VecDeque<InputState>,
    pending: Vec<DrawCall>,
    /// Draw calls of the most recently presented frame
    pub last_frame: Vec<DrawCall>,
    pub frames_presented: u64,
    pub polls: u64,
    now_ms: u64,
    pub arena: Option<IVec2>,
    pub torn_down: bool,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image file of `size` pixels
    pub fn with_image(mut self, path: impl Into<PathBuf>, size: IVec2) -> Self {
        self.files.insert(path.into(), size);
        self
    }

    /// Register every sprite named in `paths` with stock sizes
    pub fn with_assets(mut self, paths: &AssetPaths) -> Self {
        self.files.insert(paths.ship.clone(), IVec2::new(64, 32));
        self.files.insert(paths.bullet.clone(), IVec2::new(16, 6));
        self.files.insert(paths.enemy.clone(), IVec2::new(48, 48));
        for frame in &paths.enemy_death {
            self.files.insert(frame.clone(), IVec2::new(48, 48));
        }
        self
    }

    /// Append input frames, one per tick
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = InputState>) -> Self {
        self.script.extend(inputs);
        self
    }
}

impl Renderer for HeadlessPlatform {
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, LoadError> {
        let size = *self.files.get(path).ok_or_else(|| LoadError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })?;

        let id = self.loaded;
        self.loaded += 1;
        Ok(ImageHandle { id, size })
    }

    fn clear(&mut self, color: Rgb) {
        self.pending.clear();
        self.pending.push(DrawCall::Clear(color));
    }

    fn blit(&mut self, image: &ImageHandle, position: IVec2) {
        self.pending.push(DrawCall::Blit {
            image: image.id,
            position,
        });
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }
}

impl InputSource for HeadlessPlatform {
    fn poll_input(&mut self) -> Result<InputState, PlatformError> {
        self.polls += 1;
        Ok(self.script.pop_front().unwrap_or(InputState {
            quit: true,
            ..Default::default()
        }))
    }
}

impl Clock for HeadlessPlatform {
    fn now_millis(&self) -> u64 {
        self.now_ms
    }

    fn throttle_to_fps(&mut self, fps: u32) {
        self.now_ms += 1000 / u64::from(fps.max(1));
    }
}

impl Platform for HeadlessPlatform {
    fn init(&mut self, _title: &str, size: IVec2) -> Result<(), PlatformError> {
        self.arena = Some(size);
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), PlatformError> {
        self.torn_down = true;
        Ok(())
    }
}
