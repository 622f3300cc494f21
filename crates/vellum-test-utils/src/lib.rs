//! Test utilities for Vellum.
//!
//! - [`MockSpriteSink`] records every call a [`SpriteBatch`](vellum_sprite::SpriteBatch)
//!   makes on its sink.
//! - [`TextureFactory`] hands out distinct texture handles.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec2;
//! use vellum_sprite::{SpriteBatch, SpriteBatchConfig, SpriteDesc};
//! use vellum_test_utils::{MockSpriteSink, TextureFactory};
//!
//! let sink = MockSpriteSink::new();
//! let mut textures = TextureFactory::new();
//! let texture = textures.create(32, 32);
//!
//! let mut batch = SpriteBatch::new(SpriteBatchConfig::default(), sink.clone());
//! batch.begin();
//! batch.draw(Some(texture), SpriteDesc::at(Vec2::ZERO));
//! batch.end();
//!
//! assert_eq!(sink.flush_count(), 1);
//! ```

mod mock_sink;
mod textures;

pub use mock_sink::*;
pub use textures::*;
