//! The frame lifecycle: `begin`, any number of `draw`s, then `end`.
//!
//! ```text
//!            begin                     end
//!   Closed ---------> Open ------------------------> Closed
//!                      |  ^   sort -> batch -> flush
//!                draw  +--+
//! ```
//!
//! Misuse never panics and never returns an error to the caller. Each misuse
//! is logged with `tracing::warn!`, recorded as the batch's last diagnostic,
//! and the call becomes a no-op (or, for a repeated `begin`, a reset).

use glam::{Mat4, Vec2};
use vellum_core::geometry::Size;
use vellum_core::profiling::{profile_function, profile_scope};

use crate::batch::{Batch, build_batches};
use crate::config::SpriteBatchConfig;
use crate::error::{SessionState, SpriteBatchError};
use crate::record::{SpriteDesc, SpriteRecord, SpriteStore};
use crate::sink::{FlushBatch, NullSink, SpriteSink, SpriteSlice};
use crate::sort::sort_indices;
use crate::sprite::{Sprite, SpriteAnimation, SpriteSheet, Transform2D};
use crate::stats::FrameStats;
use crate::texture::TextureRef;

/// Collects a frame's sprites and flushes them to a [`SpriteSink`] in
/// sorted, texture-batched order.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use vellum_sprite::{
///     NullSink, SpriteBatch, SpriteBatchConfig, SpriteDesc, TextureId, TextureRef,
/// };
///
/// let mut batch = SpriteBatch::new(SpriteBatchConfig::default(), NullSink);
/// let texture = TextureRef::new(TextureId::new(1), 64, 64);
///
/// batch.begin();
/// batch.draw(Some(texture), SpriteDesc::at(Vec2::new(0.0, 0.0)).with_layer(1, 0));
/// batch.draw(Some(texture), SpriteDesc::at(Vec2::new(10.0, 0.0)));
/// batch.end();
///
/// assert_eq!(batch.sprite_count(), 2);
/// assert_eq!(batch.draw_call_count(), 1);
/// assert_eq!(batch.draw_order(), &[1, 0]);
/// ```
pub struct SpriteBatch {
    config: SpriteBatchConfig,
    sink: Box<dyn SpriteSink>,
    store: SpriteStore,
    batches: Vec<Batch>,
    state: SessionState,
    sprite_count: u32,
    draw_call_count: u32,
    stats: FrameStats,
    screen_size: Size<f32>,
    view_projection: Option<Mat4>,
    last_diagnostic: Option<SpriteBatchError>,
    frames_completed: u64,
}

impl SpriteBatch {
    /// Ceiling on sprites per draw call when the config does not override it.
    pub const DEFAULT_MAX_SPRITES_PER_BATCH: u32 = SpriteBatchConfig::DEFAULT_MAX_SPRITES_PER_BATCH;

    pub fn new(config: SpriteBatchConfig, sink: impl SpriteSink + 'static) -> Self {
        let config = config.validated();
        tracing::debug!(
            "Creating sprite batch: max {} sprites per batch, {} slots reserved",
            config.max_sprites_per_batch,
            config.initial_capacity
        );

        Self {
            config,
            sink: Box::new(sink),
            store: SpriteStore::with_capacity(config.initial_capacity),
            batches: Vec::new(),
            state: SessionState::Closed,
            sprite_count: 0,
            draw_call_count: 0,
            stats: FrameStats::default(),
            screen_size: config.screen_size,
            view_projection: None,
            last_diagnostic: None,
            frames_completed: 0,
        }
    }

    /// A batch that counts and sorts but discards its output.
    pub fn headless(config: SpriteBatchConfig) -> Self {
        Self::new(config, NullSink)
    }

    /// Open a frame session.
    ///
    /// Calling this while a session is already open discards the open
    /// session's sprites and starts over.
    pub fn begin(&mut self) {
        if self.state == SessionState::Open {
            self.report(SpriteBatchError::InvalidState {
                operation: "begin",
                expected: SessionState::Closed,
                actual: SessionState::Open,
            });
            tracing::warn!("Discarding {} unflushed sprites", self.store.len());
        }

        self.store.clear();
        self.batches.clear();
        self.sprite_count = 0;
        self.draw_call_count = 0;
        self.state = SessionState::Open;
    }

    /// Queue one sprite.
    ///
    /// Ignored when no session is open. A `None` texture is dropped silently.
    pub fn draw(&mut self, texture: Option<TextureRef>, desc: SpriteDesc) {
        if self.state != SessionState::Open {
            self.report(SpriteBatchError::InvalidState {
                operation: "draw",
                expected: SessionState::Open,
                actual: self.state,
            });
            return;
        }

        let Some(texture) = texture else {
            tracing::trace!("Skipping sprite without a texture");
            return;
        };

        match self.store.push(texture, &desc) {
            Some(_) => self.sprite_count = self.store.len() as u32,
            None => self.report(SpriteBatchError::FrameFull {
                limit: SpriteStore::MAX_SPRITES,
            }),
        }
    }

    /// Queue a game object's sprite component at its transform.
    pub fn draw_sprite(&mut self, sprite: &Sprite, transform: &Transform2D) {
        self.draw(sprite.texture, sprite.to_desc(transform));
    }

    /// Queue the current frame of an animation from a sprite sheet.
    ///
    /// The sheet's texture and cell replace the component's texture and source.
    pub fn draw_animated(
        &mut self,
        sprite: &Sprite,
        transform: &Transform2D,
        sheet: &SpriteSheet,
        animation: &SpriteAnimation,
    ) {
        let desc = sprite
            .to_desc(transform)
            .with_source(sheet.cell(animation.current_frame()));
        self.draw(Some(sheet.texture()), desc);
    }

    /// Sort, batch and flush the open session, then close it.
    pub fn end(&mut self) {
        profile_function!();
        if self.state != SessionState::Open {
            self.report(SpriteBatchError::InvalidState {
                operation: "end",
                expected: SessionState::Open,
                actual: self.state,
            });
            return;
        }

        {
            profile_scope!("sort");
            let (records, indices) = self.store.split_mut();
            sort_indices(records, indices);
        }

        build_batches(
            self.store.records(),
            self.store.indices(),
            self.config.max_sprites_per_batch,
            &mut self.batches,
        );

        let stats = FrameStats::from_batches(self.sprite_count, &self.batches);
        self.flush();

        self.stats = stats;
        self.draw_call_count = stats.draw_calls;
        self.sink.end_frame(&stats);
        self.state = SessionState::Closed;
        self.frames_completed += 1;

        tracing::debug!(
            "Frame {} flushed: {} sprites in {} draw calls ({} capacity splits)",
            self.frames_completed,
            stats.sprite_count,
            stats.draw_calls,
            stats.capacity_splits
        );
    }

    fn flush(&mut self) {
        profile_scope!("flush");
        let view_projection = self.view_projection();
        let records: &[SpriteRecord] = self.store.records();
        let indices = self.store.indices();

        self.sink.begin_frame(self.sprite_count);
        for (ordinal, batch) in self.batches.iter().enumerate() {
            self.sink.flush(&FlushBatch {
                ordinal: ordinal as u32,
                texture: batch.texture,
                sprites: SpriteSlice::new(records, &indices[batch.range()]),
                cause: batch.cause,
                view_projection,
                screen_size: self.screen_size,
            });
        }
    }

    fn report(&mut self, error: SpriteBatchError) {
        tracing::warn!("{error}");
        self.last_diagnostic = Some(error);
    }

    /// Sprites accepted in the current (or most recently completed) frame.
    pub fn sprite_count(&self) -> u32 {
        self.sprite_count
    }

    /// Draw calls issued by the most recently completed frame.
    ///
    /// Reset to 0 by [`begin`](Self::begin).
    pub fn draw_call_count(&self) -> u32 {
        self.draw_call_count
    }

    /// Statistics of the most recently completed frame.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Records of the current frame in submission order.
    pub fn records(&self) -> &[SpriteRecord] {
        self.store.records()
    }

    /// Index table of the current frame; in draw order once `end` has run.
    pub fn draw_order(&self) -> &[u32] {
        self.store.indices()
    }

    /// Record slots available before the store grows again.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn config(&self) -> &SpriteBatchConfig {
        &self.config
    }

    /// The most recent misuse, if any.
    pub fn last_diagnostic(&self) -> Option<&SpriteBatchError> {
        self.last_diagnostic.as_ref()
    }

    pub fn clear_diagnostic(&mut self) {
        self.last_diagnostic = None;
    }

    pub fn sink(&self) -> &dyn SpriteSink {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> &mut dyn SpriteSink {
        self.sink.as_mut()
    }

    /// Set the target size in pixels. Takes effect at the next flush.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        if width < 0.0 || height < 0.0 {
            tracing::warn!("Negative screen size {width}x{height}");
        }
        self.screen_size = Size::new(width, height);
    }

    pub fn screen_size(&self) -> Size<f32> {
        self.screen_size
    }

    /// Override the view-projection. Takes effect at the next flush.
    pub fn set_view_projection(&mut self, view_projection: Mat4) {
        self.view_projection = Some(view_projection);
    }

    /// Return to the default screen-space projection.
    pub fn reset_view_projection(&mut self) {
        self.view_projection = None;
    }

    /// The view-projection the next flush will use.
    ///
    /// Without an override this is a top-left-origin orthographic projection
    /// over the screen size, or identity while the screen size is degenerate.
    pub fn view_projection(&self) -> Mat4 {
        if let Some(view_projection) = self.view_projection {
            return view_projection;
        }

        let Size { width, height } = self.screen_size;
        if width <= 0.0 || height <= 0.0 {
            return Mat4::IDENTITY;
        }
        Mat4::orthographic_rh(0.0, width, height, 0.0, 0.0, 1.0)
    }

    /// Map a screen-space point through the default projection into clip space.
    pub fn screen_to_clip(&self, point: Vec2) -> Vec2 {
        self.view_projection()
            .transform_point3(point.extend(0.0))
            .truncate()
    }
}

impl std::fmt::Debug for SpriteBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteBatch")
            .field("state", &self.state)
            .field("sprite_count", &self.sprite_count)
            .field("draw_call_count", &self.draw_call_count)
            .field("capacity", &self.store.capacity())
            .field("screen_size", &self.screen_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureId;

    fn texture(id: u64) -> TextureRef {
        TextureRef::new(TextureId::new(id), 64, 64)
    }

    fn batch() -> SpriteBatch {
        SpriteBatch::headless(SpriteBatchConfig::default())
    }

    #[test]
    fn test_empty_frame() {
        let mut batch = batch();
        batch.begin();
        batch.end();
        assert_eq!(batch.sprite_count(), 0);
        assert_eq!(batch.draw_call_count(), 0);
        assert!(batch.last_diagnostic().is_none());
    }

    #[test]
    fn test_sprite_count_during_session() {
        let mut batch = batch();
        batch.begin();
        batch.draw(Some(texture(1)), SpriteDesc::default());
        batch.draw(Some(texture(1)), SpriteDesc::default());
        assert_eq!(batch.sprite_count(), 2);
        assert!(batch.is_open());
    }

    #[test]
    fn test_end_without_begin_keeps_counters() {
        let mut batch = batch();
        batch.begin();
        batch.draw(Some(texture(1)), SpriteDesc::default());
        batch.draw(Some(texture(2)), SpriteDesc::default());
        batch.end();

        batch.end();
        assert_eq!(batch.sprite_count(), 2);
        assert_eq!(batch.draw_call_count(), 2);
        assert!(matches!(
            batch.last_diagnostic(),
            Some(SpriteBatchError::InvalidState { operation: "end", .. })
        ));
    }

    #[test]
    fn test_draw_without_begin_is_ignored() {
        let mut batch = batch();
        batch.draw(Some(texture(1)), SpriteDesc::default());
        assert_eq!(batch.sprite_count(), 0);
        assert!(batch.records().is_empty());
        assert!(batch.last_diagnostic().is_some());
    }

    #[test]
    fn test_null_texture_is_silent() {
        let mut batch = batch();
        batch.begin();
        batch.draw(None, SpriteDesc::default());
        batch.end();
        assert_eq!(batch.sprite_count(), 0);
        assert!(batch.last_diagnostic().is_none());
    }

    #[test]
    fn test_double_begin_resets_session() {
        let mut batch = batch();
        batch.begin();
        batch.draw(Some(texture(1)), SpriteDesc::default());
        batch.begin();
        assert_eq!(batch.sprite_count(), 0);
        assert!(batch.is_open());

        batch.draw(Some(texture(1)), SpriteDesc::default());
        batch.end();
        assert_eq!(batch.sprite_count(), 1);
        assert!(matches!(
            batch.last_diagnostic(),
            Some(SpriteBatchError::InvalidState { operation: "begin", .. })
        ));
    }

    #[test]
    fn test_default_view_projection_follows_screen_size() {
        let mut batch = batch();
        batch.set_screen_size(200.0, 100.0);
        let clip = batch.screen_to_clip(Vec2::new(200.0, 100.0));
        assert!((clip - Vec2::new(1.0, -1.0)).length() < 1e-5);

        batch.set_view_projection(Mat4::IDENTITY);
        assert_eq!(batch.view_projection(), Mat4::IDENTITY);
        batch.reset_view_projection();
        assert_ne!(batch.view_projection(), Mat4::IDENTITY);
    }

    #[test]
    fn test_degenerate_screen_size_uses_identity() {
        let mut batch = batch();
        batch.set_screen_size(0.0, 0.0);
        assert_eq!(batch.view_projection(), Mat4::IDENTITY);
    }

    #[test]
    fn test_zero_ceiling_is_clamped() {
        let batch =
            SpriteBatch::headless(SpriteBatchConfig::default().with_max_sprites_per_batch(0));
        assert_eq!(batch.config().max_sprites_per_batch, 1);
    }
}
