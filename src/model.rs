//! Model import through assimp (`russimp`).
//!
//! Importing is split in two: [`ModelData`] walks the imported node tree on
//! the CPU, [`Model`] uploads it. Only the second step needs a GL context.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cgmath::{Vector2, Vector3, Zero};
use russimp::material::{Material, PropertyTypeInfo, TextureType};
use russimp::node::Node;
use russimp::scene::{PostProcess, Scene};
use thiserror::Error;

use gl_wrapper::geometry::GBError;
use gl_wrapper::program::Program;
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureParams};

use crate::assets::{load_texture, AssetError};
use crate::mesh::{Mesh, TextureKind, Vertex};

// AI_SCENE_FLAGS_INCOMPLETE
const SCENE_INCOMPLETE: u32 = 0x1;

const TEXTURE_FILE_KEY: &str = "$tex.file";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model path {0} is not valid unicode")]
    InvalidPath(PathBuf),
    #[error("import failed: {0}")]
    Import(String),
    #[error("imported scene is incomplete")]
    Incomplete,
    #[error("mesh {0}: {1}")]
    Geometry(usize, #[source] GBError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub kind: TextureKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub textures: Vec<TextureRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub directory: PathBuf,
    pub meshes: Vec<MeshData>,
}

fn post_process() -> Vec<PostProcess> {
    vec![PostProcess::Triangulate, PostProcess::FlipUVs]
}

impl ModelData {
    pub fn import<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| ModelError::InvalidPath(path.to_owned()))?;

        let scene = Scene::from_file(path_str, post_process())
            .map_err(|e| ModelError::Import(format!("{e:?}")))?;

        let directory = path.parent().map(Path::to_owned).unwrap_or_default();

        Self::from_scene(&scene, directory)
    }

    /// `hint` is the file extension assimp should assume, e.g. `"obj"`.
    pub fn import_from_memory(
        bytes: &[u8],
        hint: &str,
        directory: PathBuf,
    ) -> Result<Self, ModelError> {
        let scene = Scene::from_buffer(bytes, post_process(), hint)
            .map_err(|e| ModelError::Import(format!("{e:?}")))?;

        Self::from_scene(&scene, directory)
    }

    fn from_scene(scene: &Scene, directory: PathBuf) -> Result<Self, ModelError> {
        if scene.flags & SCENE_INCOMPLETE != 0 {
            return Err(ModelError::Incomplete);
        }

        let root = scene.root.as_ref().ok_or(ModelError::Incomplete)?;

        let mut mesh_ids = Vec::new();
        collect_meshes::<Node>(root, &mut mesh_ids);

        let meshes = mesh_ids
            .into_iter()
            .filter_map(|id| scene.meshes.get(id as usize))
            .map(|mesh| process_mesh(mesh, scene, &directory))
            .collect();

        Ok(Self { directory, meshes })
    }

    /// Every texture path once, in first use order.
    pub fn texture_paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = Vec::new();

        for tex in self.meshes.iter().flat_map(|m| m.textures.iter()) {
            if !paths.contains(&tex.path.as_path()) {
                paths.push(&tex.path);
            }
        }

        paths
    }
}

trait SceneNode: Sized {
    fn meshes(&self) -> &[u32];
    fn children(&self) -> Vec<Rc<Self>>;
}

impl SceneNode for Node {
    fn meshes(&self) -> &[u32] {
        &self.meshes
    }

    fn children(&self) -> Vec<Rc<Self>> {
        self.children.borrow().clone()
    }
}

/// A node's own meshes come before those of its children.
fn collect_meshes<N: SceneNode>(node: &N, out: &mut Vec<u32>) {
    out.extend_from_slice(node.meshes());

    for child in node.children() {
        collect_meshes(&*child, out);
    }
}

fn process_mesh(mesh: &russimp::mesh::Mesh, scene: &Scene, directory: &Path) -> MeshData {
    let uvs = mesh.texture_coords.first().and_then(|c| c.as_ref());

    let vertices = mesh
        .vertices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let normal = mesh
                .normals
                .get(i)
                .map_or(Vector3::zero(), |n| Vector3::new(n.x, n.y, n.z));

            let tex_coords = uvs
                .and_then(|uv| uv.get(i))
                .map_or(Vector2::zero(), |t| Vector2::new(t.x, t.y));

            Vertex {
                position: Vector3::new(p.x, p.y, p.z),
                normal,
                tex_coords,
            }
        })
        .collect();

    let indices = mesh.faces.iter().flat_map(|f| f.0.iter().copied()).collect();

    let textures = match scene.materials.get(mesh.material_index as usize) {
        Some(material) => {
            let mut textures = material_textures(material, TextureKind::Diffuse, directory);
            textures.extend(material_textures(
                material,
                TextureKind::Specular,
                directory,
            ));
            textures
        }
        None => Vec::new(),
    };

    MeshData {
        vertices,
        indices,
        textures,
    }
}

fn material_textures(material: &Material, kind: TextureKind, directory: &Path) -> Vec<TextureRef> {
    let semantic = match kind {
        TextureKind::Diffuse => TextureType::Diffuse,
        TextureKind::Specular => TextureType::Specular,
    };

    let mut files: Vec<(usize, &str)> = material
        .properties
        .iter()
        .filter(|p| p.key == TEXTURE_FILE_KEY && p.semantic == semantic)
        .filter_map(|p| match &p.data {
            PropertyTypeInfo::String(file) => Some((p.index as usize, file.as_str())),
            _ => None,
        })
        .collect();
    files.sort_by_key(|(index, _)| *index);

    files
        .into_iter()
        .map(|(_, file)| TextureRef {
            kind,
            path: directory.join(file.replace('\\', "/")),
        })
        .collect()
}

/// Textures shared between meshes are uploaded once.
#[derive(Default)]
pub struct TextureCache {
    loaded: HashMap<PathBuf, Rc<Texture2D>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Rc<Texture2D>, AssetError> {
        if let Some(texture) = self.loaded.get(path) {
            return Ok(Rc::clone(texture));
        }

        let texture = Rc::new(load_texture(path, &TextureParams::default())?);
        self.loaded.insert(path.to_owned(), Rc::clone(&texture));

        Ok(texture)
    }
}

pub struct Model {
    meshes: Vec<Mesh>,
}

impl Model {
    pub fn load<P: AsRef<Path>>(path: P, cache: &mut TextureCache) -> Result<Self, ModelError> {
        let data = ModelData::import(path.as_ref())?;

        log::info!(
            "imported {} ({} meshes, {} textures)",
            path.as_ref().display(),
            data.meshes.len(),
            data.texture_paths().len()
        );

        Self::upload(&data, cache)
    }

    pub fn upload(data: &ModelData, cache: &mut TextureCache) -> Result<Self, ModelError> {
        let mut meshes = Vec::with_capacity(data.meshes.len());

        for (i, mesh) in data.meshes.iter().enumerate() {
            let mut textures = Vec::with_capacity(mesh.textures.len());
            for tex in &mesh.textures {
                textures.push((tex.kind, cache.get_or_load(&tex.path)?));
            }

            meshes.push(
                Mesh::new(&mesh.vertices, &mesh.indices, textures)
                    .map_err(|e| ModelError::Geometry(i, e))?,
            );
        }

        Ok(Self { meshes })
    }

    pub fn meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn draw(&self, renderer: &mut GlRenderer, program: &Program) {
        for mesh in &self.meshes {
            mesh.draw(renderer, program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUADS: &str = "\
o first
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
o second
v 0.0 0.0 2.0
v 1.0 0.0 2.0
v 0.0 1.0 2.0
f 5/1/1 6/2/1 7/4/1
";

    struct TreeNode {
        meshes: Vec<u32>,
        children: Vec<Rc<TreeNode>>,
    }

    impl SceneNode for TreeNode {
        fn meshes(&self) -> &[u32] {
            &self.meshes
        }

        fn children(&self) -> Vec<Rc<Self>> {
            self.children.clone()
        }
    }

    fn tree(meshes: &[u32], children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            meshes: meshes.to_vec(),
            children: children.into_iter().map(Rc::new).collect(),
        }
    }

    #[test]
    fn nested_nodes_are_walked_depth_first() {
        let root = tree(
            &[0],
            vec![
                tree(&[1], vec![tree(&[2], vec![])]),
                tree(&[], vec![]),
                tree(&[3, 4], vec![]),
            ],
        );

        let mut ids = Vec::new();
        collect_meshes(&root, &mut ids);

        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    fn import(src: &str) -> ModelData {
        ModelData::import_from_memory(src.as_bytes(), "obj", PathBuf::from("assets/quads"))
            .unwrap()
    }

    #[test]
    fn quads_are_triangulated() {
        let model = import(TWO_QUADS);

        assert_eq!(model.meshes.len(), 2);
        assert_eq!(model.directory, PathBuf::from("assets/quads"));

        let quad = &model.meshes[0];
        assert_eq!(quad.indices.len(), 6);
        assert!(quad
            .indices
            .iter()
            .all(|&i| (i as usize) < quad.vertices.len()));

        let tri = &model.meshes[1];
        assert_eq!(tri.indices.len(), 3);
        assert!(tri.vertices.iter().all(|v| v.position.z == 2.0));
    }

    #[test]
    fn normals_and_flipped_uvs_are_kept() {
        let model = import(TWO_QUADS);

        for v in &model.meshes[0].vertices {
            assert_eq!(v.normal, Vector3::new(0.0, 0.0, 1.0));
            assert!(v.tex_coords.x == 0.0 || v.tex_coords.x == 1.0);
        }

        // FlipUVs maps v to 1 - v, so the bottom row now has v = 1
        let bottom_left = model.meshes[0]
            .vertices
            .iter()
            .find(|v| v.position.x == -1.0 && v.position.y == -1.0)
            .unwrap();
        assert_eq!(bottom_left.tex_coords, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn meshes_without_material_files_have_no_textures() {
        let model = import(TWO_QUADS);

        assert!(model.meshes.iter().all(|m| m.textures.is_empty()));
        assert!(model.texture_paths().is_empty());
    }

    #[test]
    fn texture_paths_are_deduplicated() {
        let tex = |kind, path: &str| TextureRef {
            kind,
            path: PathBuf::from(path),
        };
        let mesh = |textures| MeshData {
            vertices: Vec::new(),
            indices: Vec::new(),
            textures,
        };

        let model = ModelData {
            directory: PathBuf::new(),
            meshes: vec![
                mesh(vec![
                    tex(TextureKind::Diffuse, "a.png"),
                    tex(TextureKind::Specular, "b.png"),
                ]),
                mesh(vec![tex(TextureKind::Diffuse, "a.png")]),
                mesh(vec![tex(TextureKind::Diffuse, "c.png")]),
            ],
        };

        assert_eq!(
            model.texture_paths(),
            vec![Path::new("a.png"), Path::new("b.png"), Path::new("c.png")]
        );
    }

    #[test]
    fn missing_file_fails_to_import() {
        let res = ModelData::import("/nonexistent/learngl/backpack.obj");

        assert!(matches!(res, Err(ModelError::Import(_))));
    }
}
