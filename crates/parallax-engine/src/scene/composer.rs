use crate::assets::ImagePair;
use crate::coords::Viewport;
use crate::pointer::PointerState;

use super::{Camera, ParallaxUniforms, SurfaceGeometry};

/// The composed scene: images, camera, geometry and current uniforms.
///
/// Construction needs a fully loaded [`ImagePair`], so a scene with a
/// missing texture cannot exist.
pub struct ParallaxScene {
    images: ImagePair,
    camera: Camera,
    geometry: SurfaceGeometry,
    uniforms: ParallaxUniforms,
    viewport: Viewport,
}

impl ParallaxScene {
    pub fn new(images: ImagePair) -> Self {
        let camera = Camera::default();
        let geometry = SurfaceGeometry::for_image(&images.color);
        let viewport = Viewport::new(1.0, 1.0);
        let mvp = camera.view_projection(viewport.aspect()) * geometry.model();

        log::debug!("scene surface scale {:?}", geometry.scale());

        Self {
            images,
            camera,
            geometry,
            uniforms: ParallaxUniforms::new(mvp, PointerState::CENTER),
            viewport,
        }
    }

    pub fn images(&self) -> &ImagePair {
        &self.images
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    pub fn uniforms(&self) -> &ParallaxUniforms {
        &self.uniforms
    }

    /// Re-derives the uniform block from the current pointer state and
    /// viewport. Geometry and images are left untouched.
    ///
    /// Returns whether anything changed.
    pub fn sync(&mut self, pointer: PointerState, viewport: Viewport) -> bool {
        let mut changed = false;

        if viewport.is_valid() && viewport != self.viewport {
            self.viewport = viewport;
            let mvp = self.camera.view_projection(viewport.aspect()) * self.geometry.model();
            self.uniforms.mvp = mvp.to_cols_array_2d();
            changed = true;
        }

        if self.uniforms.pointer() != pointer {
            self.uniforms.x_angle = pointer.x_angle;
            self.uniforms.y_angle = pointer.y_angle;
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::assets::ImageAsset;
    use crate::input::{PointerListeners, PointerMoveEvent};
    use crate::pointer::PointerTracker;

    fn image(width: u32, height: u32) -> ImageAsset {
        ImageAsset::from_rgba8("img", width, height, vec![0; (width * height * 4) as usize])
            .unwrap()
    }

    fn scene(color: (u32, u32), depth: (u32, u32)) -> ParallaxScene {
        ParallaxScene::new(ImagePair {
            color: image(color.0, color.1),
            depth: image(depth.0, depth.1),
        })
    }

    #[test]
    fn surface_scale_comes_from_color_image() {
        let s = scene((800, 400), (17, 91));
        assert_eq!(s.geometry().scale(), [2.0, 1.0, 1.0]);
    }

    #[test]
    fn initial_uniforms_are_centered() {
        let s = scene((4, 4), (4, 4));
        assert_eq!(s.uniforms().pointer(), PointerState::CENTER);
    }

    #[test]
    fn pointer_at_origin_reaches_uniforms() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        let vp = Viewport::new(800.0, 600.0);
        let mut s = scene((800, 400), (800, 400));

        listeners.dispatch(&PointerMoveEvent { x: 0.0, y: 0.0 }, vp);
        s.sync(tracker.state(), vp);

        assert_eq!(s.uniforms().x_angle, -1.0);
        assert_eq!(s.uniforms().y_angle, -1.0);
    }

    #[test]
    fn pointer_at_centre_reaches_uniforms() {
        let listeners = PointerListeners::new();
        let tracker = PointerTracker::mount(&listeners);
        let vp = Viewport::new(800.0, 600.0);
        let mut s = scene((800, 400), (800, 400));

        listeners.dispatch(&PointerMoveEvent { x: 100.0, y: 50.0 }, vp);
        s.sync(tracker.state(), vp);
        listeners.dispatch(&PointerMoveEvent { x: 400.0, y: 300.0 }, vp);
        s.sync(tracker.state(), vp);

        assert_eq!(s.uniforms().x_angle, 0.0);
        assert_eq!(s.uniforms().y_angle, 0.0);
    }

    #[test]
    fn sync_leaves_geometry_alone() {
        let mut s = scene((800, 400), (800, 400));
        let before = *s.geometry();
        s.sync(PointerState { x_angle: 0.3, y_angle: -0.7 }, Viewport::new(1024.0, 768.0));
        assert_eq!(*s.geometry(), before);
    }

    #[test]
    fn sync_reports_changes_only() {
        let mut s = scene((2, 2), (2, 2));
        let vp = Viewport::new(640.0, 480.0);
        assert!(s.sync(PointerState::CENTER, vp));
        assert!(!s.sync(PointerState::CENTER, vp));
        assert!(s.sync(PointerState { x_angle: 0.5, y_angle: 0.0 }, vp));
    }

    #[test]
    fn degenerate_viewport_keeps_previous_projection() {
        let mut s = scene((2, 2), (2, 2));
        s.sync(PointerState::CENTER, Viewport::new(640.0, 480.0));
        let mvp = s.uniforms().mvp;
        assert!(!s.sync(PointerState::CENTER, Viewport::new(0.0, 0.0)));
        assert_eq!(s.uniforms().mvp, mvp);
    }

    #[test]
    fn plane_fits_inside_view() {
        let mut s = scene((800, 400), (800, 400));
        s.sync(PointerState::CENTER, Viewport::new(1600.0, 800.0));
        let mvp = Mat4::from_cols_array_2d(&s.uniforms().mvp);
        let corner = mvp.project_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!(corner.x > 0.0 && corner.x < 1.0);
        assert!(corner.y > 0.0 && corner.y < 1.0);
    }
}
