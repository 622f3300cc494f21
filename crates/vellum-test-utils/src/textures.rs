use vellum_sprite::{TextureId, TextureRef};

/// Produces texture handles with unique ids, starting at 1.
#[derive(Debug)]
pub struct TextureFactory {
    next_id: u64,
}

impl Default for TextureFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn create(&mut self, width: u32, height: u32) -> TextureRef {
        let id = TextureId::new(self.next_id);
        self.next_id += 1;
        TextureRef::new(id, width, height)
    }

    /// A 1x1 texture, as used by `DebugDraw`.
    pub fn white_pixel(&mut self) -> TextureRef {
        self.create(1, 1)
    }

    /// `count` distinct square textures of side `size`.
    pub fn create_many(&mut self, count: usize, size: u32) -> Vec<TextureRef> {
        (0..count).map(|_| self.create(size, size)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct() {
        let mut factory = TextureFactory::new();
        let textures = factory.create_many(3, 16);
        assert_ne!(textures[0], textures[1]);
        assert_ne!(textures[1], textures[2]);
        assert_eq!(textures[2].id().get(), 3);
    }
}
