//! Loaded sprites
//!
//! Handles are immutable once loaded. The renderer owns the pixel data;
//! the game only keeps opaque ids plus the pixel size.

use glam::IVec2;

use crate::error::LoadError;
use crate::platform::Renderer;
use crate::settings::AssetPaths;
use crate::sim::EnemyKind;

/// Opaque reference to an image held by a [`Renderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub id: u32,
    /// Width and height in pixels
    pub size: IVec2,
}

/// A sprite plus its optional death animation
#[derive(Debug, Clone)]
pub struct GraphicsHandle {
    pub image: ImageHandle,
    death_frames: Vec<ImageHandle>,
}

impl GraphicsHandle {
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            death_frames: Vec::new(),
        }
    }

    pub fn with_death_frames(image: ImageHandle, death_frames: Vec<ImageHandle>) -> Self {
        Self {
            image,
            death_frames,
        }
    }

    pub fn death_frame_count(&self) -> usize {
        self.death_frames.len()
    }

    /// Frame to show `elapsed` ticks after death; holds the last frame once
    /// the animation has run out.
    ///
    /// # Panics
    /// If the handle has no death frames.
    pub fn death_frame(&self, elapsed: u32) -> &ImageHandle {
        assert!(
            !self.death_frames.is_empty(),
            "death animation requested for a sprite without death frames"
        );
        let index = (elapsed as usize).min(self.death_frames.len() - 1);
        &self.death_frames[index]
    }
}

/// Every sprite the game draws
#[derive(Debug, Clone)]
pub struct Assets {
    pub ship: GraphicsHandle,
    pub bullet: GraphicsHandle,
    pub circle: GraphicsHandle,
}

impl Assets {
    /// Load all sprites. Any missing or corrupt file aborts the load.
    pub fn load<R: Renderer + ?Sized>(
        renderer: &mut R,
        paths: &AssetPaths,
    ) -> Result<Self, LoadError> {
        let ship = GraphicsHandle::new(renderer.load_image(&paths.ship)?);
        let bullet = GraphicsHandle::new(renderer.load_image(&paths.bullet)?);

        let enemy = renderer.load_image(&paths.enemy)?;
        let death_frames = paths
            .enemy_death
            .iter()
            .map(|path| renderer.load_image(path))
            .collect::<Result<Vec<_>, _>>()?;
        let circle = GraphicsHandle::with_death_frames(enemy, death_frames);

        log::info!(
            "Loaded sprites: ship {}, bullet {}, circle {} (+{} death frames)",
            ship.image.size,
            bullet.image.size,
            circle.image.size,
            circle.death_frame_count()
        );

        Ok(Self {
            ship,
            bullet,
            circle,
        })
    }

    pub fn enemy(&self, kind: EnemyKind) -> &GraphicsHandle {
        match kind {
            EnemyKind::Circle => &self.circle,
        }
    }
}
