use cgmath::{Deg, InnerSpace, Matrix4, Vector3};

use gl_wrapper::geometry::Geometry;
use gl_wrapper::program::Program;
use gl_wrapper::texture::{Texture2D, TextureParams};

use learngl::assets::load_texture_or_checker;
use learngl::config::Settings;
use learngl::primitives::CUBE;
use learngl::scene::CUBE_POSITIONS;

use super::{lit_geometry, program, set_transforms, Demo, DemoError, Frame, LIT_VERT, TEXTURE_FRAG};

/// Ten textured cubes seen through the fly camera.
pub struct CoordinatesDemo {
    program: Program,
    cube: Geometry,
    container: Texture2D,
}

impl CoordinatesDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        let program = program(LIT_VERT, TEXTURE_FRAG)?;
        program.bind();
        program.set_uniform("texture1", 0i32)?;

        Ok(Self {
            program,
            cube: lit_geometry(&CUBE)?,
            container: load_texture_or_checker(
                settings.asset("textures/container.jpg"),
                &TextureParams::default(),
            )?,
        })
    }
}

/// Every cube tumbles around its own axis, each one 20 degrees further on.
pub fn cube_model(index: usize, position: Vector3<f32>, time: f32) -> Matrix4<f32> {
    let axis = Vector3::new(1.0, 0.3, 0.5).normalize();
    let angle = 20.0 * index as f32 + 25.0 * time;

    Matrix4::from_translation(position) * Matrix4::from_axis_angle(axis, Deg(angle))
}

impl Demo for CoordinatesDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        frame.renderer.set_depth_test(true);
        frame.renderer.clear_all(0.2, 0.3, 0.3);

        let (view, projection) = (frame.view(), frame.projection());

        frame.renderer.use_program(&self.program);
        self.container.bind(0);

        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let model = cube_model(i, Vector3::from(*position), frame.time);
            set_transforms(&self.program, model, view, projection)?;
            frame.renderer.draw(&self.cube, &self.program);
        }

        Ok(())
    }
}
