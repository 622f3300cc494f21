//! Sink that records what the sprite batch hands to the backend.

use std::sync::Arc;

use glam::{Mat4, Vec2};
use parking_lot::Mutex;
use vellum_sprite::{BatchBreak, FlushBatch, FrameStats, SpriteSink, TextureId};

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    BeginFrame { sprite_count: u32 },
    Flush(FlushCall),
    EndFrame { stats: FrameStats },
}

/// An owned copy of a [`FlushBatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlushCall {
    pub ordinal: u32,
    pub texture: TextureId,
    pub cause: BatchBreak,
    /// Record slots in draw order.
    pub slots: Vec<u32>,
    /// Record positions in draw order.
    pub positions: Vec<Vec2>,
    /// `(sort_layer, order_in_layer)` per sprite, in draw order.
    pub keys: Vec<(i32, i32)>,
    pub view_projection: Mat4,
    pub screen_size: (f32, f32),
}

impl FlushCall {
    fn capture(batch: &FlushBatch<'_>) -> Self {
        Self {
            ordinal: batch.ordinal,
            texture: batch.texture.id(),
            cause: batch.cause,
            slots: batch.sprites.indices().to_vec(),
            positions: batch.sprites.iter().map(|r| r.position()).collect(),
            keys: batch
                .sprites
                .iter()
                .map(|r| (r.sort_layer(), r.order_in_layer()))
                .collect(),
            view_projection: batch.view_projection,
            screen_size: (batch.screen_size.width, batch.screen_size.height),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A [`SpriteSink`] that records every call.
///
/// Clones share the same log, so a test keeps one clone and gives the other
/// to the batch.
#[derive(Debug, Clone, Default)]
pub struct MockSpriteSink {
    calls: Arc<Mutex<Vec<SinkCall>>>,
}

impl MockSpriteSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    /// Recorded flushes, oldest first.
    pub fn flushes(&self) -> Vec<FlushCall> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Flush(flush) => Some(flush.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, SinkCall::Flush(_)))
            .count()
    }

    pub fn frame_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, SinkCall::EndFrame { .. }))
            .count()
    }

    /// Slots of every flushed sprite, concatenated in draw order.
    pub fn draw_order(&self) -> Vec<u32> {
        self.flushes().into_iter().flat_map(|f| f.slots).collect()
    }

    /// Stats passed to the most recent `end_frame`.
    pub fn last_stats(&self) -> Option<FrameStats> {
        self.calls.lock().iter().rev().find_map(|call| match call {
            SinkCall::EndFrame { stats } => Some(*stats),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl SpriteSink for MockSpriteSink {
    fn begin_frame(&mut self, sprite_count: u32) {
        self.calls.lock().push(SinkCall::BeginFrame { sprite_count });
    }

    fn flush(&mut self, batch: &FlushBatch<'_>) {
        self.calls.lock().push(SinkCall::Flush(FlushCall::capture(batch)));
    }

    fn end_frame(&mut self, stats: &FrameStats) {
        self.calls.lock().push(SinkCall::EndFrame { stats: *stats });
    }
}
