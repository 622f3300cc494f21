//! The backend hand-off.
//!
//! At `end` the batch resolves each [`Batch`](crate::Batch) into a
//! [`FlushBatch`] and passes it to its [`SpriteSink`]. What a sink does with
//! the sprites (upload, record, discard) is invisible to the batch; it neither
//! inspects nor retries sink failures.

use glam::Mat4;
use vellum_core::geometry::Size;

use crate::batch::BatchBreak;
use crate::record::SpriteRecord;
use crate::stats::FrameStats;
use crate::texture::TextureRef;

/// An ordered view of records, resolved through a slice of the index table.
///
/// Iteration follows the sorted draw order. No record is copied.
#[derive(Debug, Clone, Copy)]
pub struct SpriteSlice<'a> {
    records: &'a [SpriteRecord],
    indices: &'a [u32],
}

impl<'a> SpriteSlice<'a> {
    pub fn new(records: &'a [SpriteRecord], indices: &'a [u32]) -> Self {
        Self { records, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&'a SpriteRecord> {
        let index = *self.indices.get(position)?;
        self.records.get(index as usize)
    }

    /// Storage slots of the sprites, in draw order.
    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a SpriteRecord> + 'a {
        let records = self.records;
        self.indices.iter().map(move |&index| &records[index as usize])
    }
}

/// One draw call's worth of sprites, as delivered to a [`SpriteSink`].
#[derive(Debug, Clone, Copy)]
pub struct FlushBatch<'a> {
    /// Position of this batch within the frame, starting at 0.
    pub ordinal: u32,
    pub texture: TextureRef,
    pub sprites: SpriteSlice<'a>,
    pub cause: BatchBreak,
    /// View-projection in effect for this flush.
    pub view_projection: Mat4,
    pub screen_size: Size<f32>,
}

/// Receives the batches of each completed frame, in draw order.
///
/// The lifecycle per frame is `begin_frame`, one `flush` per batch, then
/// `end_frame`. Empty frames still get `begin_frame` and `end_frame`.
pub trait SpriteSink: Send {
    /// Called before the first flush of a frame.
    fn begin_frame(&mut self, _sprite_count: u32) {}

    /// Render (or record) one texture-homogeneous batch.
    fn flush(&mut self, batch: &FlushBatch<'_>);

    /// Called after the last flush of a frame.
    fn end_frame(&mut self, _stats: &FrameStats) {}
}

impl<S: SpriteSink + ?Sized> SpriteSink for Box<S> {
    fn begin_frame(&mut self, sprite_count: u32) {
        (**self).begin_frame(sprite_count);
    }

    fn flush(&mut self, batch: &FlushBatch<'_>) {
        (**self).flush(batch);
    }

    fn end_frame(&mut self, stats: &FrameStats) {
        (**self).end_frame(stats);
    }
}

/// A sink that discards every batch. Useful for headless counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SpriteSink for NullSink {
    fn flush(&mut self, _batch: &FlushBatch<'_>) {}
}
