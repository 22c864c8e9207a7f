//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, textures) and
//! create them lazily on first use, rebuilding the pipeline only when the
//! surface format changes.

mod ctx;
pub mod parallax;

pub use ctx::{RenderCtx, RenderTarget};
pub use parallax::{displaced_uv, displacement, ParallaxRenderer, DISPLACEMENT_DIVISOR};
