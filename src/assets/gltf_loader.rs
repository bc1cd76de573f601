//! glTF 2.0 model loader
//!
//! Parses a `.glb`/`.gltf` file into plain geometry, material, and
//! transform data with no GPU types involved, so loading can run on a
//! background thread. The node hierarchy is flattened on the way out:
//! every mesh-carrying node becomes one [`LoadedObject`] holding its own
//! decomposed transform plus the accumulated matrix of its ancestors.

use std::fs;
use std::path::Path;

use cgmath::{Matrix4, Quaternion, SquareMatrix, Vector3};
use gltf::Gltf;

use super::AssetError;

/// Everything extracted from one model file
#[derive(Debug)]
pub struct LoadedModel {
    pub objects: Vec<LoadedObject>,
    pub materials: Vec<LoadedMaterial>,
}

/// One mesh-carrying node, flattened out of the glTF hierarchy
#[derive(Debug)]
pub struct LoadedObject {
    /// Node name, or empty for unnamed nodes.
    pub name: String,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
    /// Accumulated transform of every ancestor node.
    pub parent_transform: Matrix4<f32>,
    /// Material ID of the node's first primitive, if it has one.
    pub material: Option<String>,
    pub meshes: Vec<MeshData>,
}

/// Raw geometry of one primitive
///
/// `normals` may be empty when the file ships without them; the scene
/// derives smooth normals in that case.
#[derive(Debug)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// PBR factors of one material
#[derive(Debug)]
pub struct LoadedMaterial {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
}

/// Loads a glTF model with all of its buffers
pub fn load_model(path: &Path) -> Result<LoadedModel, AssetError> {
    let gltf = Gltf::open(path).map_err(|source| AssetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let buffers = load_buffers(&gltf, path)?;

    let materials: Vec<LoadedMaterial> = gltf
        .materials()
        .enumerate()
        .map(|(index, material)| convert_material(index, &material))
        .collect();

    let mut objects = Vec::new();
    if let Some(scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) {
        for node in scene.nodes() {
            flatten_node(
                &node,
                Matrix4::identity(),
                &buffers,
                &materials,
                &mut objects,
                path,
            )?;
        }
    }

    log::info!(
        "loaded {} ({} objects, {} materials)",
        path.display(),
        objects.len(),
        materials.len()
    );

    Ok(LoadedModel { objects, materials })
}

/// Resolves buffer data for both embedded (.glb) and external (.gltf) layouts
fn load_buffers(gltf: &Gltf, path: &Path) -> Result<Vec<Vec<u8>>, AssetError> {
    let mut buffers = Vec::new();

    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                Some(blob) => buffers.push(blob.to_vec()),
                None => {
                    return Err(AssetError::MissingBlob {
                        path: path.to_path_buf(),
                    })
                }
            },
            gltf::buffer::Source::Uri(uri) => {
                let buffer_path = path.parent().unwrap_or(Path::new(".")).join(uri);
                let data = fs::read(&buffer_path).map_err(|source| AssetError::BufferRead {
                    path: path.to_path_buf(),
                    uri: uri.to_string(),
                    source,
                })?;
                buffers.push(data);
            }
        }
    }

    Ok(buffers)
}

fn convert_material(index: usize, material: &gltf::Material) -> LoadedMaterial {
    let pbr = material.pbr_metallic_roughness();

    let name = material
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("material_{}", index));

    LoadedMaterial {
        name,
        base_color: pbr.base_color_factor(),
        metallic: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        emissive: material.emissive_factor(),
    }
}

/// Walks a node subtree, emitting an object for every node with a mesh
fn flatten_node(
    node: &gltf::Node,
    parent_transform: Matrix4<f32>,
    buffers: &[Vec<u8>],
    materials: &[LoadedMaterial],
    objects: &mut Vec<LoadedObject>,
    path: &Path,
) -> Result<(), AssetError> {
    let local_transform = Matrix4::from(node.transform().matrix());
    let world_transform = parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        let (translation, rotation, scale) = node.transform().decomposed();

        let mut meshes = Vec::new();
        let mut material_id = None;
        for primitive in mesh.primitives() {
            if material_id.is_none() {
                material_id = primitive
                    .material()
                    .index()
                    .and_then(|index| materials.get(index))
                    .map(|material| material.name.clone());
            }
            meshes.push(read_primitive(&primitive, buffers, path)?);
        }

        objects.push(LoadedObject {
            name: node.name().unwrap_or("").to_string(),
            position: Vector3::from(translation),
            // glTF quaternions are stored xyzw
            rotation: Quaternion::new(rotation[3], rotation[0], rotation[1], rotation[2]),
            scale: Vector3::from(scale),
            parent_transform,
            material: material_id,
            meshes,
        });
    }

    for child in node.children() {
        flatten_node(&child, world_transform, buffers, materials, objects, path)?;
    }

    Ok(())
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[Vec<u8>],
    path: &Path,
) -> Result<MeshData, AssetError> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.as_slice()));

    let positions: Vec<f32> = match reader.read_positions() {
        Some(iter) => iter.flatten().collect(),
        None => {
            return Err(AssetError::MissingPositions {
                path: path.to_path_buf(),
            })
        }
    };

    let normals: Vec<f32> = reader
        .read_normals()
        .map(|iter| iter.flatten().collect())
        .unwrap_or_default();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        // Non-indexed geometry draws vertices in order
        None => (0..(positions.len() / 3) as u32).collect(),
    };

    Ok(MeshData {
        positions,
        normals,
        indices,
    })
}
