//! Vertex data shared by the demos.
//!
//! Lit meshes use position, normal and uv per vertex
//! ([`crate::mesh::VERTEX_LAYOUT`]).

/// Unit cube centred on the origin, 36 vertices.
#[rustfmt::skip]
pub const CUBE: [f32; 288] = [
    -0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   0.0,  0.0,
     0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   1.0,  0.0,
     0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   1.0,  1.0,
     0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   1.0,  1.0,
    -0.5,  0.5, -0.5,   0.0,  0.0, -1.0,   0.0,  1.0,
    -0.5, -0.5, -0.5,   0.0,  0.0, -1.0,   0.0,  0.0,
    -0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   0.0,  0.0,
     0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   1.0,  0.0,
     0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   1.0,  1.0,
     0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   1.0,  1.0,
    -0.5,  0.5,  0.5,   0.0,  0.0,  1.0,   0.0,  1.0,
    -0.5, -0.5,  0.5,   0.0,  0.0,  1.0,   0.0,  0.0,
    -0.5,  0.5,  0.5,  -1.0,  0.0,  0.0,   1.0,  0.0,
    -0.5,  0.5, -0.5,  -1.0,  0.0,  0.0,   1.0,  1.0,
    -0.5, -0.5, -0.5,  -1.0,  0.0,  0.0,   0.0,  1.0,
    -0.5, -0.5, -0.5,  -1.0,  0.0,  0.0,   0.0,  1.0,
    -0.5, -0.5,  0.5,  -1.0,  0.0,  0.0,   0.0,  0.0,
    -0.5,  0.5,  0.5,  -1.0,  0.0,  0.0,   1.0,  0.0,
     0.5,  0.5,  0.5,   1.0,  0.0,  0.0,   1.0,  0.0,
     0.5,  0.5, -0.5,   1.0,  0.0,  0.0,   1.0,  1.0,
     0.5, -0.5, -0.5,   1.0,  0.0,  0.0,   0.0,  1.0,
     0.5, -0.5, -0.5,   1.0,  0.0,  0.0,   0.0,  1.0,
     0.5, -0.5,  0.5,   1.0,  0.0,  0.0,   0.0,  0.0,
     0.5,  0.5,  0.5,   1.0,  0.0,  0.0,   1.0,  0.0,
    -0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   0.0,  1.0,
     0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   1.0,  1.0,
     0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   1.0,  0.0,
     0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   1.0,  0.0,
    -0.5, -0.5,  0.5,   0.0, -1.0,  0.0,   0.0,  0.0,
    -0.5, -0.5, -0.5,   0.0, -1.0,  0.0,   0.0,  1.0,
    -0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   0.0,  1.0,
     0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   1.0,  1.0,
     0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   1.0,  0.0,
     0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   1.0,  0.0,
    -0.5,  0.5,  0.5,   0.0,  1.0,  0.0,   0.0,  0.0,
    -0.5,  0.5, -0.5,   0.0,  1.0,  0.0,   0.0,  1.0,
];

/// Positions only, the skybox is sampled by direction.
#[rustfmt::skip]
pub const SKYBOX: [f32; 108] = [
    -1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0,  1.0, -1.0,
     1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
    -1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,
    -1.0,  1.0,  1.0,
    -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,
    -1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
    -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,
    -1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,
    -1.0, -1.0,  1.0,
    -1.0, -1.0, -1.0,
    -1.0,  1.0, -1.0,
     1.0,  1.0, -1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
    -1.0,  1.0,  1.0,
    -1.0,  1.0, -1.0,
];

/// Floor at y = -0.5, the texture repeats twice.
#[rustfmt::skip]
pub const PLANE: [f32; 48] = [
     5.0, -0.5,  5.0,   0.0,  1.0,  0.0,   2.0,  0.0,
    -5.0, -0.5,  5.0,   0.0,  1.0,  0.0,   0.0,  0.0,
    -5.0, -0.5, -5.0,   0.0,  1.0,  0.0,   0.0,  2.0,
     5.0, -0.5,  5.0,   0.0,  1.0,  0.0,   2.0,  0.0,
    -5.0, -0.5, -5.0,   0.0,  1.0,  0.0,   0.0,  2.0,
     5.0, -0.5, -5.0,   0.0,  1.0,  0.0,   2.0,  2.0,
];

#[rustfmt::skip]
pub const WINDOW: [f32; 48] = [
     0.0,  0.5,  0.0,   0.0,  0.0,  1.0,   0.0,  1.0,
     0.0, -0.5,  0.0,   0.0,  0.0,  1.0,   0.0,  0.0,
     1.0, -0.5,  0.0,   0.0,  0.0,  1.0,   1.0,  0.0,
     0.0,  0.5,  0.0,   0.0,  0.0,  1.0,   0.0,  1.0,
     1.0, -0.5,  0.0,   0.0,  0.0,  1.0,   1.0,  0.0,
     1.0,  0.5,  0.0,   0.0,  0.0,  1.0,   1.0,  1.0,
];

/// Position only, drawn through [`QUAD_INDICES`].
#[rustfmt::skip]
pub const QUAD_POSITIONS: [f32; 12] = [
     0.5,  0.5, 0.0,
     0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
    -0.5,  0.5, 0.0,
];

/// Position, colour and uv.
#[rustfmt::skip]
pub const TEXTURED_QUAD: [f32; 32] = [
     0.5,  0.5, 0.0,  1.0, 0.0, 0.0,  1.0, 1.0,
     0.5, -0.5, 0.0,  0.0, 1.0, 0.0,  1.0, 0.0,
    -0.5, -0.5, 0.0,  0.0, 0.0, 1.0,  0.0, 0.0,
    -0.5,  0.5, 0.0,  1.0, 1.0, 0.0,  0.0, 1.0,
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;
    use gl_wrapper::geometry::{GeometryBuilder, VertexAttribute};

    use crate::mesh::VERTEX_LAYOUT;

    #[test]
    fn lit_meshes_match_the_vertex_layout() {
        for (data, vertices) in [(&CUBE[..], 36), (&PLANE[..], 6), (&WINDOW[..], 6)] {
            let layout = GeometryBuilder::new(data)
                .with_attributes(&VERTEX_LAYOUT)
                .layout();
            assert_eq!(layout, Ok((8, vertices)));
        }
    }

    #[test]
    fn cube_normals_are_axis_aligned_and_outward() {
        for v in CUBE.chunks(8) {
            let (pos, normal) = (&v[0..3], &v[3..6]);
            let axis = normal.iter().position(|n| *n != 0.0).unwrap();

            assert_eq!(normal.iter().filter(|n| **n != 0.0).count(), 1);
            assert_eq!(pos[axis] * 2.0, normal[axis]);
        }
    }

    #[test]
    fn quads_are_indexed() {
        let layout = GeometryBuilder::new(&QUAD_POSITIONS)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&QUAD_INDICES)
            .layout();
        assert_eq!(layout, Ok((3, 4)));

        let layout = GeometryBuilder::new(&TEXTURED_QUAD)
            .with_attributes(&[VertexAttribute::Vec3, VertexAttribute::Vec3, VertexAttribute::Vec2])
            .with_indices(&QUAD_INDICES)
            .layout();
        assert_eq!(layout, Ok((8, 4)));
    }

    #[test]
    fn skybox_surrounds_the_unit_cube() {
        assert!(SKYBOX.iter().all(|c| c.abs() == 1.0));
    }
}
