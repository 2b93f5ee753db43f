use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::texture::{Texture2D, TextureParams};

use cgmath::{Matrix4, SquareMatrix};

use learngl::assets::load_texture_or_checker;
use learngl::config::Settings;
use learngl::primitives::{QUAD_INDICES, TEXTURED_QUAD};

use super::{program, Demo, DemoError, Frame};

pub(super) const VERT: &str = include_str!("../gl_shaders/textured_quad.vert.glsl");
pub(super) const FRAG: &str = include_str!("../gl_shaders/textured_quad.frag.glsl");

/// Quad with per-vertex colour and two textures, shared with the
/// transformations demo.
pub(super) struct TexturedQuad {
    program: Program,
    quad: Geometry,
    container: Texture2D,
    face: Texture2D,
}

impl TexturedQuad {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        let quad = GeometryBuilder::new(&TEXTURED_QUAD)
            .with_attributes(&[
                VertexAttribute::Vec3,
                VertexAttribute::Vec3,
                VertexAttribute::Vec2,
            ])
            .with_indices(&QUAD_INDICES)
            .build()?;

        let params = TextureParams::default();
        let container = load_texture_or_checker(settings.asset("textures/container.jpg"), &params)?;
        let face = load_texture_or_checker(settings.asset("textures/awesomeface.png"), &params)?;

        let program = program(VERT, FRAG)?;
        program.bind();
        program.set_uniform("texture1", 0i32)?;
        program.set_uniform("texture2", 1i32)?;
        program.set_uniform("mixValue", 0.2f32)?;

        Ok(Self {
            program,
            quad,
            container,
            face,
        })
    }

    pub fn draw(&self, frame: &mut Frame<'_>, transform: Matrix4<f32>) -> Result<(), DemoError> {
        frame.renderer.use_program(&self.program);
        self.program.set_uniform("transform", transform)?;

        self.container.bind(0);
        self.face.bind(1);
        frame.renderer.draw(&self.quad, &self.program);

        Ok(())
    }
}

pub struct TexturesDemo {
    quad: TexturedQuad,
}

impl TexturesDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        Ok(Self {
            quad: TexturedQuad::new(settings)?,
        })
    }
}

impl Demo for TexturesDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        frame.renderer.clear_color(0.2, 0.3, 0.3);
        self.quad.draw(frame, Matrix4::identity())
    }

    fn uses_camera(&self) -> bool {
        false
    }
}
