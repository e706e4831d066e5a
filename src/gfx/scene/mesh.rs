use wgpu::util::DeviceExt;

use crate::gfx::geometry::{self, GeometryData};

/// Segment count used for the round shapes
const ROUND_SEGMENTS: u32 = 36;

/// The primitive shapes the scene is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Box,
    Cylinder,
    Cone,
    Sphere,
    TaperedCylinder,
    Torus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Plane,
        ShapeKind::Box,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Sphere,
        ShapeKind::TaperedCylinder,
        ShapeKind::Torus,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit-sized geometry for this shape
    pub fn geometry(self) -> GeometryData {
        match self {
            ShapeKind::Plane => geometry::generate_plane(1.0, 1.0, 1, 1),
            ShapeKind::Box => geometry::generate_box(),
            ShapeKind::Cylinder => geometry::generate_cylinder(ROUND_SEGMENTS),
            ShapeKind::Cone => geometry::generate_cone(ROUND_SEGMENTS),
            ShapeKind::Sphere => geometry::generate_sphere(ROUND_SEGMENTS, ROUND_SEGMENTS / 2),
            ShapeKind::TaperedCylinder => {
                geometry::generate_tapered_cylinder(1.0, 0.5, ROUND_SEGMENTS)
            }
            ShapeKind::Torus => geometry::generate_torus(ROUND_SEGMENTS, ROUND_SEGMENTS / 2),
        }
    }
}

/// Vertex and index buffers of one uploaded shape
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn from_geometry(device: &wgpu::Device, label: &str, data: &GeometryData) -> Self {
        let (vertices, indices) = data.to_scene_format();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// One GPU mesh per [`ShapeKind`], uploaded once and drawn many times
pub struct ShapeMeshes {
    meshes: Vec<GpuMesh>,
}

impl ShapeMeshes {
    pub fn load(device: &wgpu::Device) -> Self {
        let meshes = ShapeKind::ALL
            .iter()
            .map(|kind| {
                let data = kind.geometry();
                log::debug!(
                    "Loaded {:?} mesh: {} vertices, {} triangles",
                    kind,
                    data.vertex_count(),
                    data.triangle_count()
                );
                GpuMesh::from_geometry(device, &format!("{:?}", kind), &data)
            })
            .collect();

        Self { meshes }
    }

    pub fn get(&self, kind: ShapeKind) -> &GpuMesh {
        &self.meshes[kind.index()]
    }
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a GpuMesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_catalog_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn every_shape_has_geometry() {
        for kind in ShapeKind::ALL {
            let data = kind.geometry();
            assert!(data.triangle_count() > 0, "{kind:?}");
            assert_eq!(data.vertices.len(), data.tex_coords.len(), "{kind:?}");
        }
    }
}
