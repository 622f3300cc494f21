//! Vellum Sprite
//!
//! Collects 2D sprites submitted in any order during a frame, sorts them by
//! `(sort layer, order in layer, submission order)` and hands them to a
//! backend as the fewest texture-homogeneous batches that order allows.
//!
//! # Overview
//!
//! - [`SpriteBatch`]: the `begin` / `draw` / `end` lifecycle.
//! - [`SpriteStore`]: records plus the index table that sorting permutes.
//! - [`sort_indices`]: stable draw-order sort over the index table.
//! - [`build_batches`]: splits the sorted run on texture change and on the
//!   per-batch ceiling.
//! - [`SpriteSink`]: where flushed batches go.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use vellum_sprite::{SpriteBatch, SpriteBatchConfig, SpriteDesc, TextureId, TextureRef};
//!
//! let atlas = TextureRef::new(TextureId::new(1), 256, 256);
//! let ui = TextureRef::new(TextureId::new(2), 64, 64);
//!
//! let mut batch = SpriteBatch::headless(SpriteBatchConfig::default());
//! batch.begin();
//! batch.draw(Some(ui), SpriteDesc::at(Vec2::ZERO).with_layer(10, 0));
//! batch.draw(Some(atlas), SpriteDesc::at(Vec2::new(32.0, 0.0)));
//! batch.draw(Some(atlas), SpriteDesc::at(Vec2::new(64.0, 0.0)));
//! batch.end();
//!
//! assert_eq!(batch.draw_call_count(), 2);
//! ```

mod batch;
mod camera;
mod color;
mod config;
mod debug_draw;
mod error;
mod record;
mod sink;
mod sort;
mod sprite;
mod sprite_batch;
mod stats;
mod texture;
mod vertex;

pub use batch::{Batch, BatchBreak, build_batches};
pub use camera::{Camera2D, MIN_ZOOM};
pub use color::Color;
pub use config::SpriteBatchConfig;
pub use debug_draw::DebugDraw;
pub use error::{SessionState, SpriteBatchError};
pub use record::{SortKey, SpriteDesc, SpriteRecord, SpriteStore};
pub use sink::{FlushBatch, NullSink, SpriteSink, SpriteSlice};
pub use sort::sort_indices;
pub use sprite::{Sprite, SpriteAnimation, SpriteSheet, SpriteSheetDescriptor, Transform2D};
pub use sprite_batch::SpriteBatch;
pub use stats::FrameStats;
pub use texture::{SourceRect, TextureId, TextureRef};
pub use vertex::SpriteVertex;
