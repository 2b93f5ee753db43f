use cgmath::{Matrix4, Vector3};

use gl_wrapper::geometry::Geometry;
use gl_wrapper::program::Program;
use gl_wrapper::texture::{Texture2D, TextureParams, TextureWrap};

use learngl::assets::load_texture_or_checker;
use learngl::config::Settings;
use learngl::primitives::{CUBE, PLANE, WINDOW};
use learngl::scene::{sort_back_to_front, WINDOW_POSITIONS};

use super::{
    lit_geometry, program, set_transforms, Demo, DemoError, Frame, LIT_VERT, TEXTURE_FRAG,
};

/// Semi-transparent windows in front of and between two cubes.
pub struct BlendingDemo {
    textured: Program,
    cube: Geometry,
    plane: Geometry,
    window: Geometry,
    marble: Texture2D,
    floor: Texture2D,
    glass: Texture2D,
    windows: Vec<Vector3<f32>>,
}

impl BlendingDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        let params = TextureParams::default();
        // repeating would bleed the opaque bottom row into the top edge
        let clamped = TextureParams {
            wrap: TextureWrap::ClampToEdge,
            ..params
        };

        let textured = program(LIT_VERT, TEXTURE_FRAG)?;
        textured.bind();
        textured.set_uniform("texture1", 0i32)?;

        Ok(Self {
            textured,
            cube: lit_geometry(&CUBE)?,
            plane: lit_geometry(&PLANE)?,
            window: lit_geometry(&WINDOW)?,
            marble: load_texture_or_checker(settings.asset("textures/marble.jpg"), &params)?,
            floor: load_texture_or_checker(settings.asset("textures/metal.png"), &params)?,
            glass: load_texture_or_checker(settings.asset("textures/window.png"), &clamped)?,
            windows: WINDOW_POSITIONS.iter().copied().map(Vector3::from).collect(),
        })
    }
}

impl Demo for BlendingDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        let (view, projection) = (frame.view(), frame.projection());

        frame.renderer.set_depth_test(true);
        frame.renderer.set_alpha_blending(true);
        frame.clear();

        frame.renderer.use_program(&self.textured);

        self.floor.bind(0);
        set_transforms(&self.textured, Matrix4::from_scale(1.0), view, projection)?;
        frame.renderer.draw(&self.plane, &self.textured);

        self.marble.bind(0);
        for offset in [Vector3::new(-1.0, 0.0, -1.0), Vector3::new(2.0, 0.0, 0.0)] {
            set_transforms(&self.textured, Matrix4::from_translation(offset), view, projection)?;
            frame.renderer.draw(&self.cube, &self.textured);
        }

        // transparent surfaces last, farthest first
        self.glass.bind(0);
        for position in sort_back_to_front(frame.camera.position, &self.windows) {
            set_transforms(&self.textured, Matrix4::from_translation(position), view, projection)?;
            frame.renderer.draw(&self.window, &self.textured);
        }

        Ok(())
    }
}
