use vellum_core::alloc::HashSet;

use crate::batch::{Batch, BatchBreak};

/// Statistics for one completed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Sprites submitted and flushed.
    pub sprite_count: u32,
    /// Batches handed to the sink.
    pub draw_calls: u32,
    /// Batches that exist only because the previous one hit the ceiling.
    pub capacity_splits: u32,
    /// Batch boundaries caused by a texture change.
    pub texture_switches: u32,
    /// Distinct textures used by the frame.
    pub texture_count: u32,
}

impl FrameStats {
    pub fn from_batches(sprite_count: u32, batches: &[Batch]) -> Self {
        let mut stats = Self {
            sprite_count,
            draw_calls: batches.len() as u32,
            ..Default::default()
        };

        let mut textures = HashSet::new();
        for batch in batches {
            match batch.cause {
                BatchBreak::FrameStart => {}
                BatchBreak::TextureChange => stats.texture_switches += 1,
                BatchBreak::Capacity => stats.capacity_splits += 1,
            }
            textures.insert(batch.texture.id());
        }
        stats.texture_count = textures.len() as u32;

        stats
    }
}
