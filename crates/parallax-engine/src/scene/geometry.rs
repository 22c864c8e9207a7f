use bytemuck::{Pod, Zeroable};

use glam::{Mat4, Vec3};

use crate::assets::ImageAsset;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    /// Bottom-left origin, +V up.
    pub uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit plane centred on the origin in the XY plane, facing +Z.
pub const PLANE_VERTICES: [PlaneVertex; 4] = [
    PlaneVertex { position: [-0.5, 0.5, 0.0], uv: [0.0, 1.0] },
    PlaneVertex { position: [0.5, 0.5, 0.0], uv: [1.0, 1.0] },
    PlaneVertex { position: [-0.5, -0.5, 0.0], uv: [0.0, 0.0] },
    PlaneVertex { position: [0.5, -0.5, 0.0], uv: [1.0, 0.0] },
];

/// Two counter-clockwise triangles.
pub const PLANE_INDICES: [u16; 6] = [0, 2, 1, 2, 3, 1];

/// The displayed rectangle: the unit plane scaled to the color image's
/// aspect ratio.
///
/// Computed once from the color image; the depth map's size plays no part.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceGeometry {
    scale: [f32; 3],
}

impl SurfaceGeometry {
    pub fn for_image(color: &ImageAsset) -> Self {
        Self {
            scale: [color.aspect(), 1.0, 1.0],
        }
    }

    pub fn scale(&self) -> [f32; 3] {
        self.scale
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_scale(Vec3::from_array(self.scale))
    }
}
