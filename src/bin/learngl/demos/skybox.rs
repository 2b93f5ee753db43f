use cgmath::{Matrix4, Vector3, Vector4};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::renderer::CompareFunc;
use gl_wrapper::texture::Cubemap;

use learngl::assets::load_cubemap;
use learngl::config::Settings;
use learngl::primitives::{CUBE, SKYBOX};

use super::{lit_geometry, program, set_transforms, Demo, DemoError, Frame, LIT_VERT};

const SKYBOX_VERT: &str = include_str!("../gl_shaders/skybox.vert.glsl");
const SKYBOX_FRAG: &str = include_str!("../gl_shaders/skybox.frag.glsl");
const REFLECT_FRAG: &str = include_str!("../gl_shaders/reflect.frag.glsl");

/// Mirror cubes inside a cubemap skybox.
pub struct SkyboxDemo {
    reflect: Program,
    sky: Program,
    cube: Geometry,
    skybox: Geometry,
    cubemap: Cubemap,
}

impl SkyboxDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        let reflect = program(LIT_VERT, REFLECT_FRAG)?;
        reflect.bind();
        reflect.set_uniform("skybox", 0i32)?;

        let sky = program(SKYBOX_VERT, SKYBOX_FRAG)?;
        sky.bind();
        sky.set_uniform("skybox", 0i32)?;

        let skybox = GeometryBuilder::new(&SKYBOX)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        Ok(Self {
            reflect,
            sky,
            cube: lit_geometry(&CUBE)?,
            skybox,
            cubemap: load_cubemap(&settings.asset("skybox"))?,
        })
    }
}

/// Keeps only the rotation, so the sky never moves with the camera.
pub fn strip_translation(view: Matrix4<f32>) -> Matrix4<f32> {
    let mut rotation = view;
    rotation.w = Vector4::unit_w();
    rotation
}

impl Demo for SkyboxDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        let (view, projection) = (frame.view(), frame.projection());

        frame.renderer.set_depth_test(true);
        frame.renderer.set_depth_func(CompareFunc::Less);
        frame.clear();

        self.cubemap.bind(0);

        frame.renderer.use_program(&self.reflect);
        self.reflect.set_uniform("cameraPos", frame.camera.position)?;
        for offset in [Vector3::new(-1.0, 0.0, -1.0), Vector3::new(2.0, 0.0, 0.0)] {
            set_transforms(&self.reflect, Matrix4::from_translation(offset), view, projection)?;
            frame.renderer.draw(&self.cube, &self.reflect);
        }

        // the sky is written at depth 1.0, which only passes with LEQUAL
        frame.renderer.set_depth_func(CompareFunc::LessEqual);
        frame.renderer.use_program(&self.sky);
        self.sky.set_uniform("view", strip_translation(view))?;
        self.sky.set_uniform("projection", projection)?;
        frame.renderer.draw(&self.skybox, &self.sky);
        frame.renderer.set_depth_func(CompareFunc::Less);

        Ok(())
    }
}
