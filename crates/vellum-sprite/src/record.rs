//! Per-frame sprite storage.
//!
//! Records are written once, in submission order, into a [`SpriteStore`] and
//! never move afterwards. Draw order lives in a parallel table of `u32`
//! indices which is the only thing the sort pass permutes.
//!
//! # Storage lifecycle
//!
//! ```text
//! begin  -> len = 0                (slots kept, contents stale)
//! draw   -> slot[len] = record     (overwrite or grow), index[len] = len, len += 1
//! end    -> sort index[..len]      (records untouched)
//! ```
//!
//! Backing buffers only ever grow, so a steady-state frame allocates nothing.

use glam::Vec2;

use crate::color::Color;
use crate::texture::{SourceRect, TextureRef};

/// Drawing parameters for one sprite, excluding the texture.
///
/// Defaults describe an untinted, unrotated, unscaled sprite at the origin on
/// layer 0 that samples the whole texture.
///
/// ```
/// use vellum_sprite::{Color, SpriteDesc};
/// use glam::Vec2;
///
/// let desc = SpriteDesc::at(Vec2::new(10.0, 20.0))
///     .with_color(Color::RED)
///     .with_layer(2, -1);
/// assert_eq!(desc.sort_layer, 2);
/// assert_eq!(desc.order_in_layer, -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDesc {
    /// Destination position of the origin point.
    pub position: Vec2,
    pub color: Color,
    /// Rotation around the origin, in radians.
    pub rotation: f32,
    /// Pivot in source-texel space.
    pub origin: Vec2,
    /// Per-axis scale applied to the source size.
    pub scale: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
    pub sort_layer: i32,
    pub order_in_layer: i32,
    /// Region of the texture to sample. `None` samples the whole texture.
    pub source: Option<SourceRect>,
}

impl Default for SpriteDesc {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            color: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            flip_x: false,
            flip_y: false,
            sort_layer: 0,
            order_in_layer: 0,
            source: None,
        }
    }
}

impl SpriteDesc {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }

    pub fn with_layer(mut self, sort_layer: i32, order_in_layer: i32) -> Self {
        self.sort_layer = sort_layer;
        self.order_in_layer = order_in_layer;
        self
    }

    pub fn with_source(mut self, source: SourceRect) -> Self {
        self.source = Some(source);
        self
    }
}

/// Composite draw-order key.
///
/// Field order gives the lexicographic ordering: layer, then order in layer,
/// then submission sequence. The sequence is unique within a frame, so no two
/// keys compare equal and the ordering is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub layer: i32,
    pub order: i32,
    pub sequence: u32,
}

/// One submitted sprite, immutable once stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRecord {
    texture: TextureRef,
    position: Vec2,
    color: Color,
    rotation: f32,
    origin: Vec2,
    scale: Vec2,
    flip_x: bool,
    flip_y: bool,
    sort_layer: i32,
    order_in_layer: i32,
    source: SourceRect,
    sequence: u32,
}

impl SpriteRecord {
    pub(crate) fn new(texture: TextureRef, desc: &SpriteDesc, sequence: u32) -> Self {
        Self {
            texture,
            position: desc.position,
            color: desc.color,
            rotation: desc.rotation,
            origin: desc.origin,
            scale: desc.scale,
            flip_x: desc.flip_x,
            flip_y: desc.flip_y,
            sort_layer: desc.sort_layer,
            order_in_layer: desc.order_in_layer,
            source: desc.source.unwrap_or_else(|| texture.full_rect()),
            sequence,
        }
    }

    pub fn texture(&self) -> TextureRef {
        self.texture
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn sort_layer(&self) -> i32 {
        self.sort_layer
    }

    pub fn order_in_layer(&self) -> i32 {
        self.order_in_layer
    }

    pub fn source(&self) -> SourceRect {
        self.source
    }

    #[inline]
    pub fn sort_key(&self) -> SortKey {
        SortKey {
            layer: self.sort_layer,
            order: self.order_in_layer,
            sequence: self.sequence,
        }
    }
}

/// Growable record arena plus its index table.
///
/// `len` is the logical size of the current frame. Slots at or beyond `len`
/// hold records from earlier frames and are never read.
#[derive(Debug, Default)]
pub struct SpriteStore {
    records: Vec<SpriteRecord>,
    indices: Vec<u32>,
    len: usize,
}

impl SpriteStore {
    /// Largest number of sprites a single frame can hold.
    pub const MAX_SPRITES: usize = u32::MAX as usize;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            indices: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Logically discard every record. Storage is kept for reuse.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a record and its index entry.
    ///
    /// Returns the record's slot, or `None` once [`Self::MAX_SPRITES`] is reached.
    pub fn push(&mut self, texture: TextureRef, desc: &SpriteDesc) -> Option<u32> {
        if self.len >= Self::MAX_SPRITES {
            return None;
        }

        let slot = self.len as u32;
        let record = SpriteRecord::new(texture, desc, slot);

        if self.len < self.records.len() {
            self.records[self.len] = record;
            self.indices[self.len] = slot;
        } else {
            self.ensure_capacity(self.len + 1);
            self.records.push(record);
            self.indices.push(slot);
        }

        self.len += 1;
        Some(slot)
    }

    /// Ensure the buffers can hold `required` records without reallocating.
    fn ensure_capacity(&mut self, required: usize) {
        if required > self.records.capacity() {
            let new_capacity = required.next_power_of_two();
            self.records.reserve_exact(new_capacity - self.records.len());
            self.indices.reserve_exact(new_capacity - self.indices.len());
            tracing::debug!("Sprite store grown to {new_capacity} slots");
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots available before the next reallocation.
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Records of the current frame in submission order.
    pub fn records(&self) -> &[SpriteRecord] {
        &self.records[..self.len]
    }

    /// Index table of the current frame.
    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.len]
    }

    /// Borrow the records immutably and the index table mutably, for sorting.
    pub fn split_mut(&mut self) -> (&[SpriteRecord], &mut [u32]) {
        (&self.records[..self.len], &mut self.indices[..self.len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureId;

    fn texture() -> TextureRef {
        TextureRef::new(TextureId::new(1), 16, 16)
    }

    #[test]
    fn test_push_assigns_sequential_slots() {
        let mut store = SpriteStore::default();
        for expected in 0..5 {
            assert_eq!(store.push(texture(), &SpriteDesc::default()), Some(expected));
        }
        assert_eq!(store.indices(), &[0, 1, 2, 3, 4]);
        assert_eq!(store.records()[3].sort_key().sequence, 3);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut store = SpriteStore::with_capacity(4);
        for _ in 0..100 {
            store.push(texture(), &SpriteDesc::default());
        }
        let capacity = store.capacity();
        assert!(capacity >= 100);

        store.clear();
        assert!(store.is_empty());
        assert!(store.records().is_empty());
        assert_eq!(store.capacity(), capacity);
    }

    #[test]
    fn test_reused_slots_are_overwritten() {
        let mut store = SpriteStore::default();
        store.push(texture(), &SpriteDesc::at(Vec2::new(1.0, 1.0)));
        store.push(texture(), &SpriteDesc::at(Vec2::new(2.0, 2.0)));
        store.clear();

        store.push(texture(), &SpriteDesc::at(Vec2::new(9.0, 9.0)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].position(), Vec2::new(9.0, 9.0));
        assert_eq!(store.indices(), &[0]);
    }

    #[test]
    fn test_default_source_is_full_texture() {
        let mut store = SpriteStore::default();
        store.push(texture(), &SpriteDesc::default());
        assert_eq!(store.records()[0].source(), texture().full_rect());
    }

    fn key(layer: i32, order: i32, sequence: u32) -> SortKey {
        SortKey {
            layer,
            order,
            sequence,
        }
    }

    #[test]
    fn test_sort_key_ordering() {
        assert!(key(-1, 100, 9) < key(0, -100, 0));
        assert!(key(0, -100, 0) < key(0, -100, 1));
        assert!(key(i32::MIN, i32::MAX, u32::MAX) < key(i32::MAX, i32::MIN, 0));
    }
}
