/// Full-screen quad, position and uv per vertex.
#[rustfmt::skip]
pub const QUAD: [f32; 24] = [
    -1.0,  1.0,  0.0, 1.0,
    -1.0, -1.0,  0.0, 0.0,
     1.0, -1.0,  1.0, 0.0,
    -1.0,  1.0,  0.0, 1.0,
     1.0, -1.0,  1.0, 0.0,
     1.0,  1.0,  1.0, 1.0,
];

pub mod debug;
pub mod framebuffer;
pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;
