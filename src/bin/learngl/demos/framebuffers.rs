use cgmath::{Matrix4, Vector3};
use clap::ValueEnum;

use gl_wrapper::framebuffer::FrameBuffer;
use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::texture::{Texture2D, TextureFormats, TextureParams};
use gl_wrapper::QUAD;

use learngl::assets::load_texture_or_checker;
use learngl::config::Settings;
use learngl::primitives::{CUBE, PLANE};

use super::{
    lit_geometry, program, set_transforms, Demo, DemoError, Frame, LIT_VERT, TEXTURE_FRAG,
};

const SCREEN_VERT: &str = include_str!("../gl_shaders/screen.vert.glsl");
const POST_FRAG: &str = include_str!("../gl_shaders/post.frag.glsl");

/// Post-processing applied to the off-screen image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PostEffect {
    #[default]
    None,
    Inversion,
    Grayscale,
    Sharpen,
    Blur,
    Edge,
}

impl PostEffect {
    /// Value of the `effect` uniform in the post shader.
    pub fn shader_index(&self) -> i32 {
        match self {
            PostEffect::None => 0,
            PostEffect::Inversion => 1,
            PostEffect::Grayscale => 2,
            PostEffect::Sharpen => 3,
            PostEffect::Blur => 4,
            PostEffect::Edge => 5,
        }
    }
}

/// Colour target and its framebuffer, rebuilt on resize.
struct Target {
    fbo: FrameBuffer,
    color: Texture2D,
}

impl Target {
    fn new(width: u32, height: u32) -> Result<Self, DemoError> {
        let color = Texture2D::empty(width.max(1), height.max(1), TextureFormats::Rgb8);
        let fbo = FrameBuffer::with_color_texture(&color)?;

        Ok(Self { fbo, color })
    }
}

/// Two cubes on a floor rendered off-screen, then drawn through a
/// full-screen quad with the selected effect.
pub struct FramebuffersDemo {
    scene: Program,
    post: Program,
    cube: Geometry,
    plane: Geometry,
    screen: Geometry,
    container: Texture2D,
    floor: Texture2D,
    target: Target,
}

impl FramebuffersDemo {
    pub fn new(
        settings: &Settings,
        effect: PostEffect,
        width: u32,
        height: u32,
    ) -> Result<Self, DemoError> {
        let params = TextureParams::default();

        let scene = program(LIT_VERT, TEXTURE_FRAG)?;
        scene.bind();
        scene.set_uniform("texture1", 0i32)?;

        let post = program(SCREEN_VERT, POST_FRAG)?;
        post.bind();
        post.set_uniform("screenTexture", 0i32)?;
        post.set_uniform("effect", effect.shader_index())?;

        let screen = GeometryBuilder::new(&QUAD)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec2)
            .build()?;

        log::debug!("post effect {effect:?}");

        Ok(Self {
            scene,
            post,
            cube: lit_geometry(&CUBE)?,
            plane: lit_geometry(&PLANE)?,
            screen,
            container: load_texture_or_checker(settings.asset("textures/container.jpg"), &params)?,
            floor: load_texture_or_checker(settings.asset("textures/metal.png"), &params)?,
            target: Target::new(width, height)?,
        })
    }
}

impl Demo for FramebuffersDemo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError> {
        let (view, projection) = (frame.view(), frame.projection());

        self.target.fbo.bind();
        frame.renderer.set_depth_test(true);
        frame.clear();

        frame.renderer.use_program(&self.scene);

        self.container.bind(0);
        for offset in [Vector3::new(-1.0, 0.0, -1.0), Vector3::new(2.0, 0.0, 0.0)] {
            set_transforms(&self.scene, Matrix4::from_translation(offset), view, projection)?;
            frame.renderer.draw(&self.cube, &self.scene);
        }

        self.floor.bind(0);
        set_transforms(&self.scene, Matrix4::from_scale(1.0), view, projection)?;
        frame.renderer.draw(&self.plane, &self.scene);

        FrameBuffer::bind_default();
        frame.renderer.set_depth_test(false);
        frame.renderer.clear_color(1.0, 1.0, 1.0);

        self.target.color.bind(0);
        frame.renderer.draw(&self.screen, &self.post);

        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), DemoError> {
        self.target = Target::new(width, height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_map_to_distinct_shader_branches() {
        let all = PostEffect::value_variants();
        let mut indices: Vec<i32> = all.iter().map(PostEffect::shader_index).collect();
        indices.dedup();

        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(PostEffect::default(), PostEffect::None);
    }

    #[test]
    fn effects_parse_from_the_command_line() {
        assert_eq!(
            PostEffect::from_str("grayscale", true),
            Ok(PostEffect::Grayscale)
        );
        assert!(PostEffect::from_str("sepia", true).is_err());
    }
}
