//! Non-owning texture handles.
//!
//! Texture creation and loading live outside this crate. A backend registers
//! its textures however it likes and hands the batch a [`TextureRef`]: an
//! identity plus the texel dimensions needed to size quads. Two refs are the
//! same texture exactly when their ids match, which is what batching compares.

use std::hash::{Hash, Hasher};

use vellum_core::geometry::{Rect, Size};

/// Texel-space sub-rectangle of a texture.
pub type SourceRect = Rect<f32>;

/// Backend-assigned texture identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureId(u64);

impl TextureId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A non-owning reference to an externally owned texture.
#[derive(Debug, Clone, Copy)]
pub struct TextureRef {
    id: TextureId,
    width: u32,
    height: u32,
}

impl TextureRef {
    pub const fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    pub const fn id(&self) -> TextureId {
        self.id
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn size(&self) -> Size<u32> {
        Size::new(self.width, self.height)
    }

    /// The rectangle covering every texel.
    pub fn full_rect(&self) -> SourceRect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TextureRef {}

impl Hash for TextureRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_size() {
        let a = TextureRef::new(TextureId::new(7), 32, 32);
        let b = TextureRef::new(TextureId::new(7), 64, 64);
        let c = TextureRef::new(TextureId::new(8), 32, 32);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_full_rect() {
        let tex = TextureRef::new(TextureId::new(1), 64, 32);
        assert_eq!(tex.full_rect(), Rect::new(0.0, 0.0, 64.0, 32.0));
        assert_eq!(tex.size(), Size::new(64, 32));
    }
}
