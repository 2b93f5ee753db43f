use cgmath::{Matrix4, Rad, Vector3};

use learngl::config::Settings;

use super::textures::TexturedQuad;
use super::{Demo, DemoError, Frame};

/// The textured quad spun around z in the bottom right corner, and a
/// second one pulsing in the top left.
pub struct TransformationsDemo {
    quad: TexturedQuad,
}

impl TransformationsDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        Ok(Self {
            quad: TexturedQuad::new(settings)?,
        })
    }
}

pub fn spinning(time: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.5, -0.5, 0.0)) * Matrix4::from_angle_z(Rad(time))
}

pub fn pulsing(time: f32) -> Matrix4<f32> {
    let scale = time.sin().abs();

    Matrix4::from_translation(Vector3::new(-0.5, 0.5, 0.0)) * Matrix4::from_scale(scale)
}

impl Demo for TransformationsDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        frame.renderer.clear_color(0.2, 0.3, 0.3);

        self.quad.draw(frame, spinning(frame.time))?;
        self.quad.draw(frame, pulsing(frame.time))
    }

    fn uses_camera(&self) -> bool {
        false
    }
}
