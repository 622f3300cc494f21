//! `#[repr(C)]` vector types for building GPU buffer contents with [`bytemuck`].
//!
//! CPU-side math stays on [`glam`]; convert with `From` when writing vertices.
//!
//! ```
//! use vellum_core::math::PackedVec2;
//!
//! let packed: PackedVec2 = glam::Vec2::new(1.0, 0.5).into();
//! let bytes: &[u8] = bytemuck::bytes_of(&packed);
//! assert_eq!(bytes.len(), 8);
//! ```
//!
//! [`glam`]: https://docs.rs/glam
//! [`bytemuck`]: https://docs.rs/bytemuck

use bytemuck::{Pod, Zeroable};

/// A 2D vector with guaranteed `#[repr(C)]` layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVec2 {
    pub x: f32,
    pub y: f32,
}

/// A 4D vector with guaranteed `#[repr(C)]` layout.
///
/// Natural 16-byte size, used for colors in vertex data.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<glam::Vec2> for PackedVec2 {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<PackedVec2> for glam::Vec2 {
    fn from(v: PackedVec2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

impl From<[f32; 4]> for PackedVec4 {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self { x, y, z, w }
    }
}

static_assertions::assert_eq_size!(PackedVec2, [f32; 2]);
static_assertions::assert_eq_size!(PackedVec4, [f32; 4]);
