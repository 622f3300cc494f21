//! Quad expansion for GPU upload.
//!
//! Records keep their transform inputs (position, origin, scale, rotation)
//! untouched; corners and UVs are computed here, at flush time, by whichever
//! backend needs them. The view-projection is not applied on the CPU: it
//! travels with the [`FlushBatch`] and is meant to be bound as a uniform.
//!
//! Corner order is top-left, top-right, bottom-right, bottom-left in source
//! texel space. Each sprite expands to two triangles `(0, 1, 2)` and `(0, 2, 3)`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat2, Vec2};
use vellum_core::math::{PackedVec2, PackedVec4};

use crate::record::SpriteRecord;
use crate::sink::FlushBatch;

/// Vertex layout consumed by sprite shaders.
///
/// 32 bytes: world position, normalised UV, straight-alpha RGBA tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: PackedVec2,
    pub uv: PackedVec2,
    pub color: PackedVec4,
}

static_assertions::assert_eq_size!(SpriteVertex, [u8; 32]);

impl SpriteVertex {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Vertices emitted per sprite.
    pub const PER_SPRITE: usize = 6;
}

const QUAD_TRIANGLES: [usize; SpriteVertex::PER_SPRITE] = [0, 1, 2, 0, 2, 3];

impl SpriteRecord {
    /// World-space corners of the sprite's quad.
    pub fn corners(&self) -> [Vec2; 4] {
        let source = self.source();
        let local = [
            Vec2::new(0.0, 0.0),
            Vec2::new(source.width, 0.0),
            Vec2::new(source.width, source.height),
            Vec2::new(0.0, source.height),
        ];

        let rotation = Mat2::from_angle(self.rotation());
        local.map(|corner| self.position() + rotation * ((corner - self.origin()) * self.scale()))
    }

    /// Normalised texture coordinates matching [`corners`](Self::corners), flips applied.
    pub fn uvs(&self) -> [Vec2; 4] {
        let texture = self.texture();
        if texture.width() == 0 || texture.height() == 0 {
            return [Vec2::ZERO; 4];
        }

        let size = Vec2::new(texture.width() as f32, texture.height() as f32);
        let source = self.source();
        let mut min = Vec2::new(source.x, source.y) / size;
        let mut max = Vec2::new(source.right(), source.bottom()) / size;

        if self.flip_x() {
            std::mem::swap(&mut min.x, &mut max.x);
        }
        if self.flip_y() {
            std::mem::swap(&mut min.y, &mut max.y);
        }

        [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ]
    }

    /// Append this sprite's six vertices to `out`.
    pub fn write_vertices(&self, out: &mut Vec<SpriteVertex>) {
        let corners = self.corners();
        let uvs = self.uvs();
        let color = PackedVec4::from(self.color().to_array());

        out.extend(QUAD_TRIANGLES.iter().map(|&i| SpriteVertex {
            position: corners[i].into(),
            uv: uvs[i].into(),
            color,
        }));
    }
}

impl FlushBatch<'_> {
    /// Append the vertices of every sprite in the batch, in draw order.
    pub fn write_vertices(&self, out: &mut Vec<SpriteVertex>) {
        out.reserve(self.sprites.len() * SpriteVertex::PER_SPRITE);
        for sprite in self.sprites.iter() {
            sprite.write_vertices(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::record::{SpriteDesc, SpriteStore};
    use crate::texture::{TextureId, TextureRef};
    use vellum_core::geometry::Rect;

    fn record(desc: SpriteDesc) -> SpriteRecord {
        let mut store = SpriteStore::default();
        store.push(TextureRef::new(TextureId::new(1), 32, 16), &desc);
        store.records()[0]
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_unrotated_corners() {
        let r = record(SpriteDesc::at(Vec2::new(100.0, 50.0)));
        let corners = r.corners();
        assert_close(corners[0], Vec2::new(100.0, 50.0));
        assert_close(corners[2], Vec2::new(132.0, 66.0));
    }

    #[test]
    fn test_origin_and_scale() {
        let r = record(
            SpriteDesc::at(Vec2::new(10.0, 10.0))
                .with_origin(Vec2::new(16.0, 8.0))
                .with_scale(Vec2::new(2.0, 0.5)),
        );
        let corners = r.corners();
        assert_close(corners[0], Vec2::new(-22.0, 6.0));
        assert_close(corners[2], Vec2::new(42.0, 14.0));
    }

    #[test]
    fn test_rotation_about_origin() {
        let r = record(SpriteDesc::default().with_rotation(FRAC_PI_2));
        // (32, 0) rotated a quarter turn lands on (0, 32).
        assert_close(r.corners()[1], Vec2::new(0.0, 32.0));
    }

    #[test]
    fn test_uvs_with_source_and_flip() {
        let r = record(
            SpriteDesc::default()
                .with_source(Rect::new(16.0, 0.0, 16.0, 16.0))
                .with_flip(true, false),
        );
        let uvs = r.uvs();
        assert_close(uvs[0], Vec2::new(1.0, 0.0));
        assert_close(uvs[2], Vec2::new(0.5, 1.0));
    }

    #[test]
    fn test_write_vertices_emits_two_triangles() {
        let r = record(SpriteDesc::default());
        let mut out = Vec::new();
        r.write_vertices(&mut out);
        assert_eq!(out.len(), SpriteVertex::PER_SPRITE);
        assert_eq!(out[0], out[3]);
        assert_eq!(out[2], out[4]);
        assert_close(out[2].position.into(), r.corners()[2]);
        assert_close(out[1].uv.into(), Vec2::new(1.0, 0.0));
        assert_eq!(bytemuck::cast_slice::<_, u8>(out.as_slice()).len(), 6 * 32);
    }
}
