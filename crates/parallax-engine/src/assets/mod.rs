//! Asset loading.
//!
//! Fetches the color photo and its depth map, decodes both, and hands them
//! over as an [`ImagePair`]. Either image failing fails the whole load; no
//! partially loaded pair is ever produced.

mod error;
mod asset;
mod loader;
mod source;

pub use error::LoadError;
pub use asset::{decode, ImageAsset};
pub use loader::{load_pair, ImagePair};
pub use source::{AssetSource, DirSource};
