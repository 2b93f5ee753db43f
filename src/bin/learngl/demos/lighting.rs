use cgmath::{Matrix4, Vector3};

use gl_wrapper::geometry::Geometry;
use gl_wrapper::program::Program;

use learngl::primitives::CUBE;

use super::{
    lit_geometry, program, set_transforms, Demo, DemoError, Frame, LAMP_FRAG, LAMP_VERT, LIT_VERT,
};

const PHONG_FRAG: &str = include_str!("../gl_shaders/phong.frag.glsl");

const OBJECT_COLOR: Vector3<f32> = Vector3::new(1.0, 0.5, 0.31);
const LIGHT_COLOR: Vector3<f32> = Vector3::new(1.0, 1.0, 1.0);

/// A Phong shaded cube lit by a lamp circling it.
pub struct LightingDemo {
    phong: Program,
    lamp: Program,
    cube: Geometry,
}

impl LightingDemo {
    pub fn new() -> Result<Self, DemoError> {
        Ok(Self {
            phong: program(LIT_VERT, PHONG_FRAG)?,
            lamp: program(LAMP_VERT, LAMP_FRAG)?,
            cube: lit_geometry(&CUBE)?,
        })
    }
}

pub fn lamp_position(time: f32) -> Vector3<f32> {
    Vector3::new(1.2 * time.cos(), 1.0, 2.0 * time.sin())
}

impl Demo for LightingDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        frame.renderer.set_depth_test(true);
        frame.clear();

        let (view, projection) = (frame.view(), frame.projection());
        let light_pos = lamp_position(frame.time);

        frame.renderer.use_program(&self.phong);
        self.phong.set_uniform("objectColor", OBJECT_COLOR)?;
        self.phong.set_uniform("lightColor", LIGHT_COLOR)?;
        self.phong.set_uniform("lightPos", light_pos)?;
        self.phong.set_uniform("viewPos", frame.camera.position)?;
        set_transforms(&self.phong, Matrix4::from_scale(1.0), view, projection)?;
        frame.renderer.draw(&self.cube, &self.phong);

        frame.renderer.use_program(&self.lamp);
        self.lamp.set_uniform("lampColor", LIGHT_COLOR)?;
        let model = Matrix4::from_translation(light_pos) * Matrix4::from_scale(0.2);
        set_transforms(&self.lamp, model, view, projection)?;
        frame.renderer.draw(&self.cube, &self.lamp);

        Ok(())
    }
}
