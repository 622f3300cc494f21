//! Partitioning of the sorted index table into draw batches.
//!
//! A batch is a maximal run of consecutive sorted entries that share a
//! texture and fit under the per-batch ceiling. Batches come out in sorted
//! order, so splitting on capacity adds draw calls but never reorders sprites.

use std::ops::Range;

use vellum_core::profiling::profile_function;

use crate::record::SpriteRecord;
use crate::texture::TextureRef;

/// Why a batch boundary was placed where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchBreak {
    /// First batch of the frame.
    FrameStart,
    /// The texture differs from the previous batch.
    TextureChange,
    /// The previous batch reached the sprite ceiling.
    Capacity,
}

/// A contiguous range of the sorted index table sharing one texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub texture: TextureRef,
    /// Offset into the sorted index table.
    pub start: u32,
    pub count: u32,
    pub cause: BatchBreak,
}

impl Batch {
    pub fn range(&self) -> Range<usize> {
        self.start as usize..(self.start + self.count) as usize
    }
}

/// Walk `indices` left to right and append batches to `out` (cleared first).
///
/// `max_per_batch` values below 1 are treated as 1. An empty table yields no
/// batches.
pub fn build_batches(
    records: &[SpriteRecord],
    indices: &[u32],
    max_per_batch: u32,
    out: &mut Vec<Batch>,
) {
    profile_function!();
    out.clear();

    let max_per_batch = max_per_batch.max(1);
    let Some(&first) = indices.first() else {
        return;
    };

    let mut current = Batch {
        texture: records[first as usize].texture(),
        start: 0,
        count: 0,
        cause: BatchBreak::FrameStart,
    };

    for (position, &index) in indices.iter().enumerate() {
        let texture = records[index as usize].texture();

        let cause = if texture != current.texture {
            Some(BatchBreak::TextureChange)
        } else if current.count == max_per_batch {
            Some(BatchBreak::Capacity)
        } else {
            None
        };

        if let Some(cause) = cause {
            out.push(current);
            current = Batch {
                texture,
                start: position as u32,
                count: 0,
                cause,
            };
        }

        current.count += 1;
    }

    out.push(current);
}
