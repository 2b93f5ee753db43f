use cgmath::{Angle, Deg, Matrix4, Vector3};

use gl_wrapper::geometry::Geometry;
use gl_wrapper::program::{Program, ProgramError};
use gl_wrapper::texture::{Texture2D, TextureParams};

use learngl::assets::load_texture_or_checker;
use learngl::camera::Camera;
use learngl::config::Settings;
use learngl::primitives::CUBE;
use learngl::scene::{CUBE_POSITIONS, POINT_LIGHT_POSITIONS};

use super::coordinates::cube_model;
use super::{
    lit_geometry, program, set_transforms, Demo, DemoError, Frame, LAMP_FRAG, LAMP_VERT, LIT_VERT,
};

const LIGHTS_FRAG: &str = include_str!("../gl_shaders/multiple_lights.frag.glsl");

/// Distance attenuation reaching roughly 50 units.
const ATTENUATION: (f32, f32, f32) = (1.0, 0.09, 0.032);

/// Diffuse and specular maps lit by a sun, four lamps and a flashlight
/// held by the camera.
pub struct LightingMapsDemo {
    lights: Program,
    lamp: Program,
    cube: Geometry,
    diffuse: Texture2D,
    specular: Texture2D,
}

impl LightingMapsDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        let params = TextureParams::default();
        let diffuse = load_texture_or_checker(settings.asset("textures/container2.png"), &params)?;
        let specular = load_texture_or_checker(
            settings.asset("textures/container2_specular.png"),
            &params,
        )?;

        let lights = program(LIT_VERT, LIGHTS_FRAG)?;
        lights.bind();
        lights.set_uniform("material.diffuse", 0i32)?;
        lights.set_uniform("material.specular", 1i32)?;
        lights.set_uniform("material.shininess", 32.0f32)?;
        set_static_lights(&lights)?;

        Ok(Self {
            lights,
            lamp: program(LAMP_VERT, LAMP_FRAG)?,
            cube: lit_geometry(&CUBE)?,
            diffuse,
            specular,
        })
    }
}

fn gray(v: f32) -> Vector3<f32> {
    Vector3::new(v, v, v)
}

fn set_static_lights(p: &Program) -> Result<(), ProgramError> {
    p.set_uniform("dirLight.direction", Vector3::new(-0.2f32, -1.0, -0.3))?;
    p.set_uniform("dirLight.ambient", gray(0.05))?;
    p.set_uniform("dirLight.diffuse", gray(0.4))?;
    p.set_uniform("dirLight.specular", gray(0.5))?;

    let (constant, linear, quadratic) = ATTENUATION;

    for (i, position) in POINT_LIGHT_POSITIONS.iter().enumerate() {
        let light = format!("pointLights[{i}]");

        p.set_uniform(&format!("{light}.position"), Vector3::from(*position))?;
        p.set_uniform(&format!("{light}.ambient"), gray(0.05))?;
        p.set_uniform(&format!("{light}.diffuse"), gray(0.8))?;
        p.set_uniform(&format!("{light}.specular"), gray(1.0))?;
        p.set_uniform(&format!("{light}.constant"), constant)?;
        p.set_uniform(&format!("{light}.linear"), linear)?;
        p.set_uniform(&format!("{light}.quadratic"), quadratic)?;
    }

    p.set_uniform("spotLight.ambient", gray(0.0))?;
    p.set_uniform("spotLight.diffuse", gray(1.0))?;
    p.set_uniform("spotLight.specular", gray(1.0))?;
    p.set_uniform("spotLight.constant", constant)?;
    p.set_uniform("spotLight.linear", linear)?;
    p.set_uniform("spotLight.quadratic", quadratic)?;
    p.set_uniform("spotLight.cutOff", Deg(12.5f32).cos())?;
    p.set_uniform("spotLight.outerCutOff", Deg(15.0f32).cos())
}

fn set_flashlight(p: &Program, camera: &Camera) -> Result<(), ProgramError> {
    p.set_uniform("viewPos", camera.position)?;
    p.set_uniform("spotLight.position", camera.position)?;
    p.set_uniform("spotLight.direction", camera.front())
}

impl Demo for LightingMapsDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        frame.renderer.set_depth_test(true);
        frame.clear();

        let (view, projection) = (frame.view(), frame.projection());

        frame.renderer.use_program(&self.lights);
        set_flashlight(&self.lights, frame.camera)?;
        self.diffuse.bind(0);
        self.specular.bind(1);

        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let model = cube_model(i, Vector3::from(*position), 0.0);
            set_transforms(&self.lights, model, view, projection)?;
            frame.renderer.draw(&self.cube, &self.lights);
        }

        frame.renderer.use_program(&self.lamp);
        self.lamp.set_uniform("lampColor", gray(1.0))?;

        for position in POINT_LIGHT_POSITIONS {
            let model =
                Matrix4::from_translation(Vector3::from(position)) * Matrix4::from_scale(0.2);
            set_transforms(&self.lamp, model, view, projection)?;
            frame.renderer.draw(&self.cube, &self.lamp);
        }

        Ok(())
    }
}
