//! Sprite components, sprite sheets and frame animation.
//!
//! Game objects usually carry a [`Sprite`] and a [`Transform2D`] rather than
//! building a [`SpriteDesc`] by hand. A sprite sheet is a texture divided into
//! a uniform grid of cells, commonly used for:
//! - Character animations
//! - Tile sets
//! - Effects such as explosions or hit sparks
//!
//! # Example
//!
//! ```
//! use vellum_sprite::{SpriteAnimation, SpriteSheet, SpriteSheetDescriptor, TextureId, TextureRef};
//!
//! let texture = TextureRef::new(TextureId::new(1), 128, 128);
//! let sheet = SpriteSheet::new(texture, SpriteSheetDescriptor {
//!     cell_width: 32,
//!     cell_height: 32,
//!     columns: 4,
//!     rows: 4,
//!     ..Default::default()
//! });
//!
//! let mut walk = SpriteAnimation::with_range(4, 7, 10.0);
//! walk.update(0.1);
//! assert_eq!(walk.current_frame(), 5);
//! assert_eq!(sheet.cell(walk.current_frame()).x, 32.0);
//! ```

use glam::Vec2;

use crate::color::Color;
use crate::record::SpriteDesc;
use crate::texture::{SourceRect, TextureRef};

/// Position, rotation and scale of a game object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    /// Radians.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform2D {
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

/// Rendering component of a game object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// `None` while the texture is unavailable; such sprites are not drawn.
    pub texture: Option<TextureRef>,
    pub color: Color,
    /// Pivot in source-texel space.
    pub pivot: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
    pub sort_layer: i32,
    pub order_in_layer: i32,
    /// Region of the texture to sample, `None` for the whole texture.
    pub source: Option<SourceRect>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            texture: None,
            color: Color::WHITE,
            pivot: Vec2::ZERO,
            flip_x: false,
            flip_y: false,
            sort_layer: 0,
            order_in_layer: 0,
            source: None,
        }
    }
}

impl Sprite {
    pub fn new(texture: TextureRef) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    /// Place the pivot at the center of the sampled region.
    pub fn centered(mut self) -> Self {
        let source = self
            .source
            .or_else(|| self.texture.map(|t| t.full_rect()))
            .unwrap_or_default();
        self.pivot = Vec2::new(source.width * 0.5, source.height * 0.5);
        self
    }

    /// Combine with a transform into draw parameters.
    pub fn to_desc(&self, transform: &Transform2D) -> SpriteDesc {
        SpriteDesc {
            position: transform.position,
            color: self.color,
            rotation: transform.rotation,
            origin: self.pivot,
            scale: transform.scale,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            sort_layer: self.sort_layer,
            order_in_layer: self.order_in_layer,
            source: self.source,
        }
    }
}

/// Grid layout of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheetDescriptor {
    /// Width of each cell in texels
    pub cell_width: u32,
    /// Height of each cell in texels
    pub cell_height: u32,
    pub columns: u32,
    pub rows: u32,
    /// Gap between neighbouring cells (default: 0)
    pub padding: u32,
    /// Border around the whole grid (default: 0)
    pub margin: u32,
}

impl Default for SpriteSheetDescriptor {
    fn default() -> Self {
        Self {
            cell_width: 32,
            cell_height: 32,
            columns: 1,
            rows: 1,
            padding: 0,
            margin: 0,
        }
    }
}

/// A texture divided into uniformly sized cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    texture: TextureRef,
    layout: SpriteSheetDescriptor,
}

impl SpriteSheet {
    pub fn new(texture: TextureRef, layout: SpriteSheetDescriptor) -> Self {
        Self { texture, layout }
    }

    pub fn texture(&self) -> TextureRef {
        self.texture
    }

    /// Texel rectangle of a cell by linear index (left-to-right, top-to-bottom).
    ///
    /// Indices past the last cell wrap around.
    pub fn cell(&self, index: u32) -> SourceRect {
        let count = self.cell_count().max(1);
        let index = index % count;
        let columns = self.layout.columns.max(1);
        self.cell_at(index / columns, index % columns)
    }

    /// Texel rectangle of the cell at `row`, `col`.
    pub fn cell_at(&self, row: u32, col: u32) -> SourceRect {
        let layout = &self.layout;
        let stride_x = u64::from(layout.cell_width) + u64::from(layout.padding);
        let stride_y = u64::from(layout.cell_height) + u64::from(layout.padding);
        let x = u64::from(col)
            .saturating_mul(stride_x)
            .saturating_add(u64::from(layout.margin));
        let y = u64::from(row)
            .saturating_mul(stride_y)
            .saturating_add(u64::from(layout.margin));

        SourceRect::new(
            x as f32,
            y as f32,
            layout.cell_width as f32,
            layout.cell_height as f32,
        )
    }

    pub fn cell_count(&self) -> u32 {
        self.layout.columns.saturating_mul(self.layout.rows)
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.layout.cell_width, self.layout.cell_height)
    }

    pub fn grid_size(&self) -> (u32, u32) {
        (self.layout.columns, self.layout.rows)
    }
}

/// Playback state for cycling through sprite sheet cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAnimation {
    first: u32,
    last: u32,
    current: u32,
    frame_duration: f32,
    elapsed: f32,
    looping: bool,
    playing: bool,
    reversed: bool,
}

impl SpriteAnimation {
    /// Animate every frame in `0..frame_count`.
    pub fn new(frame_count: u32, fps: f32) -> Self {
        Self::with_range(0, frame_count.saturating_sub(1), fps)
    }

    /// Animate frames `first..=last`.
    pub fn with_range(first: u32, last: u32, fps: f32) -> Self {
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        Self {
            first,
            last,
            current: first,
            frame_duration: Self::duration_for(fps),
            elapsed: 0.0,
            looping: true,
            playing: true,
            reversed: false,
        }
    }

    fn duration_for(fps: f32) -> f32 {
        if fps > 0.0 { 1.0 / fps } else { f32::INFINITY }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Advance by `dt` seconds. Returns true if the frame changed.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed < self.frame_duration {
            return false;
        }

        let before = self.current;
        let steps = (self.elapsed / self.frame_duration) as u64;
        self.elapsed = self.elapsed.rem_euclid(self.frame_duration);

        // A looping animation returns to the same frame every `span` steps,
        // and a one-shot one stops after at most `span`.
        let span = u64::from(self.last - self.first) + 1;
        let steps = if self.looping { steps % span } else { steps.min(span) };

        for _ in 0..steps {
            self.step();
            if !self.playing {
                break;
            }
        }

        self.current != before
    }

    fn step(&mut self) {
        let (at_end, wrap_to) = if self.reversed {
            (self.current == self.first, self.last)
        } else {
            (self.current == self.last, self.first)
        };

        if !at_end {
            if self.reversed {
                self.current -= 1;
            } else {
                self.current += 1;
            }
        } else if self.looping {
            self.current = wrap_to;
        } else {
            self.playing = false;
            self.elapsed = 0.0;
        }
    }

    pub fn current_frame(&self) -> u32 {
        self.current
    }

    /// Jump to a frame, clamped to the animation's range.
    pub fn set_frame(&mut self, frame: u32) {
        self.current = frame.clamp(self.first, self.last);
        self.elapsed = 0.0;
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop and rewind to the first frame of the current direction.
    pub fn stop(&mut self) {
        self.playing = false;
        self.current = if self.reversed { self.last } else { self.first };
        self.elapsed = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once a non-looping animation has played to its final frame.
    pub fn is_finished(&self) -> bool {
        let end = if self.reversed { self.first } else { self.last };
        !self.looping && !self.playing && self.current == end
    }

    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    pub fn set_fps(&mut self, fps: f32) {
        self.frame_duration = Self::duration_for(fps);
    }

    /// Position within the range, from 0.0 at the first frame to 1.0 at the last.
    pub fn progress(&self) -> f32 {
        let span = self.last - self.first;
        if span == 0 {
            return 1.0;
        }
        (self.current - self.first) as f32 / span as f32
    }
}
