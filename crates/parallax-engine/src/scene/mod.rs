//! Scene composition.
//!
//! One camera looking at one flat rectangle sized to the color image. The
//! scene owns the loaded images and the uniform block; it is rebuilt never,
//! only re-synced from pointer state each frame.

mod camera;
mod composer;
mod geometry;
mod uniforms;

pub use camera::Camera;
pub use composer::ParallaxScene;
pub use geometry::{PlaneVertex, SurfaceGeometry, PLANE_INDICES, PLANE_VERTICES};
pub use uniforms::ParallaxUniforms;
