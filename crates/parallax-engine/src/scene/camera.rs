use glam::{Mat4, Vec3};

/// Perspective camera on the +Z axis looking toward the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    /// One unit in front of the plane with a 75° vertical fov, which frames a
    /// unit-height plane with a margin above and below.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    /// Right-handed, depth mapped to `[0, 1]` as wgpu clip space expects.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}
