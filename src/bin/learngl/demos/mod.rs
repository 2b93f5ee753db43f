use cgmath::Matrix4;
use clap::ValueEnum;
use thiserror::Error;

use gl_wrapper::framebuffer::FramebufferError;
use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder};
use gl_wrapper::program::{Program, ProgramBuilder, ProgramError};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::TextureError;

use learngl::camera::Camera;
use learngl::config::Settings;
use learngl::mesh::VERTEX_LAYOUT;
use learngl::model::ModelError;

mod blending;
mod coordinates;
mod framebuffers;
mod lighting;
mod lighting_maps;
mod model;
mod skybox;
mod stencil;
mod textures;
mod transformations;
mod triangle;

pub use framebuffers::PostEffect;

pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    Triangle,
    Textures,
    Transformations,
    Coordinates,
    Lighting,
    LightingMaps,
    Framebuffers,
    Stencil,
    Skybox,
    Blending,
    Model,
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Geometry(#[from] GBError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Framebuffer(#[from] FramebufferError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Per-frame state handed to a demo.
pub struct Frame<'a> {
    pub renderer: &'a mut GlRenderer,
    pub camera: &'a Camera,
    /// Seconds since the window opened.
    pub time: f32,
    pub width: u32,
    pub height: u32,
    /// Background of the lit scenes.
    pub clear_color: [f32; 3],
}

impl Frame<'_> {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn view(&self) -> Matrix4<f32> {
        self.camera.view_matrix()
    }

    pub fn projection(&self) -> Matrix4<f32> {
        self.camera.projection_matrix(self.aspect(), NEAR, FAR)
    }

    /// Clears colour, depth and stencil to the configured background.
    pub fn clear(&self) {
        let [r, g, b] = self.clear_color;
        self.renderer.clear_all(r, g, b);
    }
}

pub trait Demo {
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), DemoError>;

    /// Called after the window surface and viewport were resized.
    fn resize(&mut self, _width: u32, _height: u32) -> Result<(), DemoError> {
        Ok(())
    }

    /// Whether mouse and keyboard should drive the fly camera.
    fn uses_camera(&self) -> bool {
        true
    }
}

/// `width` and `height` are the window's actual inner size, which may differ
/// from the configured one.
pub fn build(
    kind: DemoKind,
    settings: &Settings,
    effect: PostEffect,
    (width, height): (u32, u32),
) -> Result<Box<dyn Demo>, DemoError> {
    log::info!("starting {kind:?} demo");

    let demo: Box<dyn Demo> = match kind {
        DemoKind::Triangle => Box::new(triangle::TriangleDemo::new()?),
        DemoKind::Textures => Box::new(textures::TexturesDemo::new(settings)?),
        DemoKind::Transformations => {
            Box::new(transformations::TransformationsDemo::new(settings)?)
        }
        DemoKind::Coordinates => Box::new(coordinates::CoordinatesDemo::new(settings)?),
        DemoKind::Lighting => Box::new(lighting::LightingDemo::new()?),
        DemoKind::LightingMaps => Box::new(lighting_maps::LightingMapsDemo::new(settings)?),
        DemoKind::Framebuffers => Box::new(framebuffers::FramebuffersDemo::new(
            settings,
            effect,
            width,
            height,
        )?),
        DemoKind::Stencil => Box::new(stencil::StencilDemo::new(settings)?),
        DemoKind::Skybox => Box::new(skybox::SkyboxDemo::new(settings)?),
        DemoKind::Blending => Box::new(blending::BlendingDemo::new(settings)?),
        DemoKind::Model => Box::new(model::ModelDemo::new(settings)?),
    };

    Ok(demo)
}

pub(crate) fn program(vert: &str, frag: &str) -> Result<Program, ProgramError> {
    ProgramBuilder::new(vert, frag).build()
}

/// Geometry in the shared position / normal / uv layout.
pub(crate) fn lit_geometry(data: &[f32]) -> Result<Geometry, GBError> {
    GeometryBuilder::new(data)
        .with_attributes(&VERTEX_LAYOUT)
        .build()
}

pub(crate) fn set_transforms(
    program: &Program,
    model: Matrix4<f32>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
) -> Result<(), ProgramError> {
    program.set_uniform("model", model)?;
    program.set_uniform("view", view)?;
    program.set_uniform("projection", projection)
}

pub(crate) const LIT_VERT: &str = include_str!("../gl_shaders/lit.vert.glsl");
pub(crate) const TEXTURE_FRAG: &str = include_str!("../gl_shaders/texture.frag.glsl");
pub(crate) const LAMP_VERT: &str = include_str!("../gl_shaders/lamp.vert.glsl");
pub(crate) const LAMP_FRAG: &str = include_str!("../gl_shaders/lamp.frag.glsl");
