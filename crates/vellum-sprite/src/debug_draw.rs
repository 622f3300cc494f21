//! Debug primitives drawn through a [`SpriteBatch`] with a 1x1 white texture.

use glam::Vec2;

use crate::color::Color;
use crate::record::SpriteDesc;
use crate::sprite_batch::SpriteBatch;
use crate::texture::TextureRef;

const MIN_LINE_LENGTH: f32 = 0.001;

/// Rectangles and lines for debugging overlays.
///
/// Everything is queued on [`DebugDraw::SORT_LAYER`] so it lands on top of
/// regular game sprites.
#[derive(Debug, Clone, Copy)]
pub struct DebugDraw {
    white: TextureRef,
}

impl DebugDraw {
    pub const SORT_LAYER: i32 = 100;

    /// `white` must be a 1x1 opaque white texture.
    pub fn new(white: TextureRef) -> Self {
        if white.width() != 1 || white.height() != 1 {
            tracing::warn!(
                "DebugDraw texture is {}x{}, primitives will be scaled incorrectly",
                white.width(),
                white.height()
            );
        }
        Self { white }
    }

    pub fn texture(&self) -> TextureRef {
        self.white
    }

    fn quad(&self, batch: &mut SpriteBatch, desc: SpriteDesc) {
        batch.draw(Some(self.white), desc.with_layer(Self::SORT_LAYER, 0));
    }

    /// Outline of an axis-aligned rectangle given by its center.
    pub fn rect_outline(
        &self,
        batch: &mut SpriteBatch,
        center: Vec2,
        size: Vec2,
        color: Color,
        width: f32,
    ) {
        self.rect_outline_top_left(batch, center - size * 0.5, size, color, width);
    }

    /// Outline of an axis-aligned rectangle given by its top-left corner.
    ///
    /// The border is drawn inside the rectangle.
    pub fn rect_outline_top_left(
        &self,
        batch: &mut SpriteBatch,
        top_left: Vec2,
        size: Vec2,
        color: Color,
        width: f32,
    ) {
        let horizontal = Vec2::new(size.x, width);
        let vertical = Vec2::new(width, size.y);
        let edges = [
            (top_left, horizontal),
            (top_left + Vec2::new(0.0, size.y - width), horizontal),
            (top_left, vertical),
            (top_left + Vec2::new(size.x - width, 0.0), vertical),
        ];

        for (position, scale) in edges {
            self.quad(
                batch,
                SpriteDesc::at(position).with_scale(scale).with_color(color),
            );
        }
    }

    pub fn rect_filled(&self, batch: &mut SpriteBatch, center: Vec2, size: Vec2, color: Color) {
        self.quad(
            batch,
            SpriteDesc::at(center)
                .with_origin(Vec2::splat(0.5))
                .with_scale(size)
                .with_color(color),
        );
    }

    /// A line segment as a rotated quad centred between `start` and `end`.
    pub fn line(&self, batch: &mut SpriteBatch, start: Vec2, end: Vec2, color: Color, width: f32) {
        let delta = end - start;
        let length = delta.length();
        if length < MIN_LINE_LENGTH {
            return;
        }

        self.quad(
            batch,
            SpriteDesc::at((start + end) * 0.5)
                .with_rotation(delta.y.atan2(delta.x))
                .with_origin(Vec2::splat(0.5))
                .with_scale(Vec2::new(length, width))
                .with_color(color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpriteBatchConfig;
    use crate::texture::TextureId;

    fn setup() -> (DebugDraw, SpriteBatch) {
        let debug = DebugDraw::new(TextureRef::new(TextureId::new(7), 1, 1));
        let mut batch = SpriteBatch::headless(SpriteBatchConfig::default());
        batch.begin();
        (debug, batch)
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn test_outline_emits_four_edges_on_debug_layer() {
        let (debug, mut batch) = setup();
        debug.rect_outline(
            &mut batch,
            Vec2::new(50.0, 50.0),
            Vec2::new(20.0, 10.0),
            Color::RED,
            2.0,
        );
        assert_eq!(batch.sprite_count(), 4);
        assert!(batch.records().iter().all(|r| r.sort_layer() == DebugDraw::SORT_LAYER));

        let bottom = batch.records()[1].corners();
        assert_close(bottom[0], Vec2::new(40.0, 53.0));
        assert_close(bottom[2], Vec2::new(60.0, 55.0));
    }

    #[test]
    fn test_rect_filled_is_centred() {
        let (debug, mut batch) = setup();
        debug.rect_filled(&mut batch, Vec2::new(10.0, 10.0), Vec2::new(4.0, 6.0), Color::WHITE);
        let corners = batch.records()[0].corners();
        assert_close(corners[0], Vec2::new(8.0, 7.0));
        assert_close(corners[2], Vec2::new(12.0, 13.0));
    }

    #[test]
    fn test_line_spans_endpoints() {
        let (debug, mut batch) = setup();
        debug.line(&mut batch, Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0), Color::GREEN, 2.0);
        let corners = batch.records()[0].corners();
        // Rotated a quarter turn: the quad's length runs along +y.
        assert_close(corners[0], Vec2::new(1.0, 0.0));
        assert_close(corners[2], Vec2::new(-1.0, 10.0));
    }

    #[test]
    fn test_degenerate_line_is_skipped() {
        let (debug, mut batch) = setup();
        debug.line(&mut batch, Vec2::ONE, Vec2::ONE, Color::GREEN, 2.0);
        assert_eq!(batch.sprite_count(), 0);
    }
}
