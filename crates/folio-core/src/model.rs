//! Ship model import (glTF / GLB).
//!
//! The importer flattens the default scene into world-space triangle lists,
//! one per primitive, and recentres everything on the bounding box so the
//! driver can animate the model around its own middle.

use crate::camera::Aabb;
use crate::error::AssetError;
use glam::{Mat3, Mat4, Vec3};
use gltf::mesh::Mode;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMaterial {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.82, 0.86, 1.0],
            emissive: [0.0; 3],
        }
    }
}

#[derive(Clone, Debug)]
pub struct ModelPrimitive {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    /// Index into [`ModelData::materials`].
    pub material: usize,
}

#[derive(Clone, Debug)]
pub struct ModelData {
    pub primitives: Vec<ModelPrimitive>,
    pub materials: Vec<SurfaceMaterial>,
    /// Bounds after recentring (centred on the origin).
    pub bounds: Aabb,
    /// Bounds as authored, before recentring.
    pub source_bounds: Aabb,
}

impl ModelData {
    /// Import a GLB or a glTF with embedded buffers.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AssetError> {
        let (document, buffers, _images) =
            gltf::import_slice(bytes).map_err(|e| AssetError::Parse(e.to_string()))?;

        let mut materials: Vec<SurfaceMaterial> = document
            .materials()
            .map(|m| SurfaceMaterial {
                base_color: m.pbr_metallic_roughness().base_color_factor(),
                emissive: m.emissive_factor(),
            })
            .collect();
        let default_material = materials.len();
        materials.push(SurfaceMaterial::default());

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or(AssetError::NoGeometry)?;

        let mut primitives = Vec::new();
        let mut stack: Vec<(gltf::Node, Mat4)> =
            scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
        while let Some((node, parent)) = stack.pop() {
            let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
            if let Some(mesh) = node.mesh() {
                for primitive in mesh.primitives() {
                    if primitive.mode() != Mode::Triangles {
                        continue;
                    }
                    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
                    let Some(positions) = reader.read_positions() else {
                        continue;
                    };
                    let positions: Vec<Vec3> = positions
                        .map(|p| world.transform_point3(Vec3::from_array(p)))
                        .collect();
                    if positions.is_empty() {
                        continue;
                    }
                    let indices: Vec<u32> = reader
                        .read_indices()
                        .map(|read| read.into_u32().collect())
                        .unwrap_or_else(|| (0..positions.len() as u32).collect());
                    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
                    let normals: Vec<Vec3> = match reader.read_normals() {
                        Some(it) => it
                            .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                            .collect(),
                        None => compute_normals(&positions, &indices),
                    };
                    let vertices = positions
                        .iter()
                        .enumerate()
                        .map(|(i, p)| ModelVertex {
                            position: p.to_array(),
                            normal: normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                        })
                        .collect();
                    let material = primitive
                        .material()
                        .index()
                        .filter(|&i| i < default_material)
                        .unwrap_or(default_material);
                    primitives.push(ModelPrimitive {
                        vertices,
                        indices,
                        material,
                    });
                }
            }
            stack.extend(node.children().map(|c| (c, world)));
        }

        Self::from_primitives(primitives, materials)
    }

    /// Compute bounds over `primitives` and recentre them on the origin.
    pub fn from_primitives(
        mut primitives: Vec<ModelPrimitive>,
        materials: Vec<SurfaceMaterial>,
    ) -> Result<Self, AssetError> {
        let source_bounds = Aabb::from_points(
            primitives
                .iter()
                .flat_map(|p| p.vertices.iter().map(|v| Vec3::from_array(v.position))),
        )
        .ok_or(AssetError::NoGeometry)?;
        let center = source_bounds.center();
        for primitive in &mut primitives {
            for v in &mut primitive.vertices {
                v.position = (Vec3::from_array(v.position) - center).to_array();
            }
        }
        log::info!(
            "[asset] model primitives={} extent={:.2}",
            primitives.len(),
            source_bounds.max_extent()
        );
        Ok(Self {
            primitives,
            materials,
            bounds: source_bounds.translated(-center),
            source_bounds,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.indices.len() / 3).sum()
    }
}

fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }
        let n = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        normals[i0] += n;
        normals[i1] += n;
        normals[i2] += n;
    }
    normals
        .into_iter()
        .map(|n| if n.length_squared() > 0.0 { n.normalize() } else { Vec3::Y })
        .collect()
}
