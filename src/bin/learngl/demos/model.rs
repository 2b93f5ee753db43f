use std::path::PathBuf;

use cgmath::{Matrix4, Vector3};

use gl_wrapper::program::Program;

use learngl::config::Settings;
use learngl::model::{Model, TextureCache};

use super::{program, set_transforms, Demo, DemoError, Frame, LIT_VERT};

const MODEL_FRAG: &str = include_str!("../gl_shaders/model.frag.glsl");

const DEFAULT_MODEL: &str = "objects/backpack/backpack.obj";

pub fn model_path(settings: &Settings) -> PathBuf {
    settings
        .model
        .clone()
        .unwrap_or_else(|| settings.asset(DEFAULT_MODEL))
}

/// An imported model lit by a fixed sun.
pub struct ModelDemo {
    program: Program,
    model: Model,
}

impl ModelDemo {
    pub fn new(settings: &Settings) -> Result<Self, DemoError> {
        let path = model_path(settings);

        let mut cache = TextureCache::new();
        let model = Model::load(&path, &mut cache)?;
        log::info!(
            "{} ready: {} meshes, {} textures",
            path.display(),
            model.meshes(),
            cache.len()
        );

        let program = program(LIT_VERT, MODEL_FRAG)?;
        program.bind();
        program.set_uniform("lightDir", Vector3::new(-0.2f32, -1.0, -0.3))?;

        Ok(Self { program, model })
    }
}

impl Demo for ModelDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        let (view, projection) = (frame.view(), frame.projection());

        frame.renderer.set_depth_test(true);
        frame.clear();

        frame.renderer.use_program(&self.program);
        self.program.set_uniform("viewPos", frame.camera.position)?;
        set_transforms(&self.program, Matrix4::from_scale(1.0), view, projection)?;

        self.model.draw(frame.renderer, &self.program);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_model_wins_over_the_default() {
        let mut settings = Settings::default();
        assert_eq!(
            model_path(&settings),
            PathBuf::from("assets/objects/backpack/backpack.obj")
        );

        settings.model = Some(PathBuf::from("/tmp/teapot.obj"));
        assert_eq!(model_path(&settings), PathBuf::from("/tmp/teapot.obj"));
    }
}
