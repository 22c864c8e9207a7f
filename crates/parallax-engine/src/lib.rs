//! Parallax engine crate.
//!
//! Owns the platform + GPU runtime pieces and the depth-parallax pipeline:
//! asset loading, pointer tracking, scene composition and the shader pass.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod assets;
pub mod pointer;
pub mod scene;
pub mod render;
