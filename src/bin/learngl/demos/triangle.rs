use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;

use learngl::primitives::{QUAD_INDICES, QUAD_POSITIONS};
use learngl::scene::cycle_color;

use super::{program, Demo, DemoError, Frame};

const VERT: &str = include_str!("../gl_shaders/triangle.vert.glsl");
const FRAG: &str = include_str!("../gl_shaders/triangle.frag.glsl");

/// Indexed quad whose flat colour cycles with time.
pub struct TriangleDemo {
    program: Program,
    quad: Geometry,
}

impl TriangleDemo {
    pub fn new() -> Result<Self, DemoError> {
        let quad = GeometryBuilder::new(&QUAD_POSITIONS)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&QUAD_INDICES)
            .build()?;

        Ok(Self {
            program: program(VERT, FRAG)?,
            quad,
        })
    }
}

impl Demo for TriangleDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        frame.renderer.clear_color(0.2, 0.3, 0.3);

        frame.renderer.use_program(&self.program);
        self.program
            .set_uniform("ourColor", cycle_color(frame.time))?;
        frame.renderer.draw(&self.quad, &self.program);

        Ok(())
    }

    fn uses_camera(&self) -> bool {
        false
    }
}
