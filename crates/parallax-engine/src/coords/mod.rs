//! Coordinate spaces shared by the pointer, scene and render modules.
//!
//! Pointer space is logical pixels, origin top-left, +Y down. Scene space is
//! right-handed with the camera looking down -Z. Texture uv space has its
//! origin at the bottom-left, +V up. Vector and matrix math uses `glam`.

mod viewport;

pub use viewport::Viewport;
