use std::cell::Cell;
use std::rc::Rc;

use cgmath::{Vector2, Vector3};

use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::Texture2D;

/// Position, normal and uv, in that order in the vertex buffer.
pub const VERTEX_LAYOUT: [VertexAttribute; 3] = [
    VertexAttribute::Vec3,
    VertexAttribute::Vec3,
    VertexAttribute::Vec2,
];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub tex_coords: Vector2<f32>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    pub fn sampler_prefix(&self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
        }
    }
}

/// Sampler uniform names, numbered per kind from 1 in slice order.
pub fn sampler_names(kinds: &[TextureKind]) -> Vec<String> {
    let mut diffuse = 0;
    let mut specular = 0;

    kinds
        .iter()
        .map(|kind| {
            let n = match kind {
                TextureKind::Diffuse => {
                    diffuse += 1;
                    diffuse
                }
                TextureKind::Specular => {
                    specular += 1;
                    specular
                }
            };
            format!("{}{n}", kind.sampler_prefix())
        })
        .collect()
}

pub fn flatten_vertices(vertices: &[Vertex]) -> Vec<f32> {
    let mut data = Vec::with_capacity(vertices.len() * 8);

    for v in vertices {
        data.extend_from_slice(&[
            v.position.x,
            v.position.y,
            v.position.z,
            v.normal.x,
            v.normal.y,
            v.normal.z,
            v.tex_coords.x,
            v.tex_coords.y,
        ]);
    }

    data
}

pub struct Mesh {
    geometry: Geometry,
    textures: Vec<(String, Rc<Texture2D>)>,
    warned: Cell<bool>,
}

impl Mesh {
    pub fn new(
        vertices: &[Vertex],
        indices: &[u32],
        textures: Vec<(TextureKind, Rc<Texture2D>)>,
    ) -> Result<Self, GBError> {
        let data = flatten_vertices(vertices);
        let geometry = GeometryBuilder::new(&data)
            .with_attributes(&VERTEX_LAYOUT)
            .with_indices(indices)
            .build()?;

        let kinds: Vec<TextureKind> = textures.iter().map(|(kind, _)| *kind).collect();
        let textures = sampler_names(&kinds)
            .into_iter()
            .zip(textures.into_iter().map(|(_, texture)| texture))
            .collect();

        Ok(Self {
            geometry,
            textures,
            warned: Cell::new(false),
        })
    }

    pub fn draw(&self, renderer: &mut GlRenderer, program: &Program) {
        renderer.use_program(program);

        for (unit, (name, texture)) in self.textures.iter().enumerate() {
            if let Err(e) = program.set_uniform(name, unit as i32) {
                if !self.warned.replace(true) {
                    log::warn!("{e}");
                }
            }
            texture.bind(unit as u8);
        }

        renderer.draw(&self.geometry, program);

        unsafe { gl::ActiveTexture(gl::TEXTURE0) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samplers_are_numbered_per_kind() {
        use TextureKind::*;

        assert_eq!(
            sampler_names(&[Diffuse, Diffuse, Specular, Diffuse]),
            vec![
                "texture_diffuse1",
                "texture_diffuse2",
                "texture_specular1",
                "texture_diffuse3"
            ]
        );
        assert!(sampler_names(&[]).is_empty());
    }

    #[test]
    fn vertices_flatten_in_layout_order() {
        let v = Vertex {
            position: Vector3::new(1.0, 2.0, 3.0),
            normal: Vector3::new(0.0, 1.0, 0.0),
            tex_coords: Vector2::new(0.25, 0.75),
        };

        let data = flatten_vertices(&[v, v]);
        let stride: usize = VERTEX_LAYOUT.iter().map(|a| a.size()).sum();

        assert_eq!(stride, 8);
        assert_eq!(data.len(), 16);
        assert_eq!(&data[..8], &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.25, 0.75]);
    }
}
