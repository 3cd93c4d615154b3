//! Image handles
//!
//! Entities carry an opaque [`ImageHandle`] chosen at construction. Decoding
//! and storage live behind [`ImageProvider`]; a missing image resolves to the
//! placeholder so entity creation never fails on assets.

use serde::{Deserialize, Serialize};

/// Number of art variants for asteroids and rubble
pub const ROCK_VARIANTS: u8 = 5;

/// Opaque reference to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

impl ImageHandle {
    /// Drawn as a plain filled box
    pub const PLACEHOLDER: ImageHandle = ImageHandle(u32::MAX);

    pub fn is_placeholder(self) -> bool {
        self == Self::PLACEHOLDER
    }
}

/// Logical images the simulation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Ship,
    Bullet,
    Boid,
    Asteroid(u8),
    Rubble(u8),
}

/// Platform image store
pub trait ImageProvider {
    fn image(&self, asset: Asset) -> Option<ImageHandle>;
}

/// Provider with nothing loaded
#[derive(Debug, Default)]
pub struct NoImages;

impl ImageProvider for NoImages {
    fn image(&self, _asset: Asset) -> Option<ImageHandle> {
        None
    }
}

/// Handles resolved once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub ship: ImageHandle,
    pub bullet: ImageHandle,
    pub boid: ImageHandle,
    pub asteroids: Vec<ImageHandle>,
    pub rubble: Vec<ImageHandle>,
}

impl SpriteSheet {
    /// Resolve every asset, substituting the placeholder for missing ones
    pub fn resolve(provider: &dyn ImageProvider) -> Self {
        let fetch = |asset: Asset| match provider.image(asset) {
            Some(handle) => handle,
            None => {
                log::warn!("Image {:?} unavailable, using placeholder", asset);
                ImageHandle::PLACEHOLDER
            }
        };

        Self {
            ship: fetch(Asset::Ship),
            bullet: fetch(Asset::Bullet),
            boid: fetch(Asset::Boid),
            asteroids: (0..ROCK_VARIANTS).map(|i| fetch(Asset::Asteroid(i))).collect(),
            rubble: (0..ROCK_VARIANTS).map(|i| fetch(Asset::Rubble(i))).collect(),
        }
    }

    /// Asteroid image for a variant index (wraps around)
    pub fn asteroid(&self, variant: usize) -> ImageHandle {
        pick(&self.asteroids, variant)
    }

    /// Rubble image for a variant index (wraps around)
    pub fn rubble(&self, variant: usize) -> ImageHandle {
        pick(&self.rubble, variant)
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::resolve(&NoImages)
    }
}

fn pick(handles: &[ImageHandle], variant: usize) -> ImageHandle {
    if handles.is_empty() {
        ImageHandle::PLACEHOLDER
    } else {
        handles[variant % handles.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyShip;

    impl ImageProvider for OnlyShip {
        fn image(&self, asset: Asset) -> Option<ImageHandle> {
            match asset {
                Asset::Ship => Some(ImageHandle(7)),
                Asset::Asteroid(i) => Some(ImageHandle(100 + i as u32)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_missing_assets_become_placeholders() {
        let sheet = SpriteSheet::resolve(&OnlyShip);
        assert_eq!(sheet.ship, ImageHandle(7));
        assert!(sheet.bullet.is_placeholder());
        assert!(sheet.rubble(3).is_placeholder());
        assert_eq!(sheet.asteroid(2), ImageHandle(102));
        assert_eq!(sheet.asteroid(7), ImageHandle(102));
    }

    #[test]
    fn test_default_sheet_is_all_placeholders() {
        let sheet = SpriteSheet::default();
        assert!(sheet.ship.is_placeholder());
        assert_eq!(sheet.asteroids.len(), ROCK_VARIANTS as usize);
    }
}
