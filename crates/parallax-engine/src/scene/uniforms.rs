use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::pointer::PointerState;

/// Uniform block shared by both shader stages.
///
/// Layout matches `Uniforms` in `parallax.wgsl`: a column-major
/// `mat4x4<f32>` followed by the two angles, padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParallaxUniforms {
    pub mvp: [[f32; 4]; 4],
    pub x_angle: f32,
    pub y_angle: f32,
    pub _pad: [f32; 2],
}

impl ParallaxUniforms {
    pub fn new(mvp: Mat4, pointer: PointerState) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            x_angle: pointer.x_angle,
            y_angle: pointer.y_angle,
            _pad: [0.0; 2],
        }
    }

    pub fn pointer(&self) -> PointerState {
        PointerState {
            x_angle: self.x_angle,
            y_angle: self.y_angle,
        }
    }

    pub fn min_binding_size() -> std::num::NonZeroU64 {
        const SIZE: u64 = std::mem::size_of::<ParallaxUniforms>() as u64;
        const { assert!(SIZE > 0 && SIZE % 16 == 0) };
        match std::num::NonZeroU64::new(SIZE) {
            Some(n) => n,
            None => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_eighty_bytes() {
        assert_eq!(std::mem::size_of::<ParallaxUniforms>(), 80);
        assert_eq!(ParallaxUniforms::min_binding_size().get(), 80);
    }

    #[test]
    fn angles_follow_mvp_in_memory() {
        let u = ParallaxUniforms::new(Mat4::IDENTITY, PointerState { x_angle: 0.25, y_angle: -0.5 });
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&u));
        assert_eq!(floats[16], 0.25);
        assert_eq!(floats[17], -0.5);
    }
}
