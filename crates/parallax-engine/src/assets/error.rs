use std::fmt;
use std::io;

/// Failure to produce one of the two images.
#[derive(Debug)]
pub enum LoadError {
    /// The asset bytes could not be read.
    Fetch { name: String, source: io::Error },
    /// The bytes were read but are not a decodable image.
    Decode { name: String, source: image::ImageError },
    /// The image decoded to zero width or height.
    Empty { name: String },
    /// The worker loading this asset panicked.
    Worker { name: String },
}

impl LoadError {
    /// Name of the asset that failed.
    pub fn asset_name(&self) -> &str {
        match self {
            LoadError::Fetch { name, .. }
            | LoadError::Decode { name, .. }
            | LoadError::Empty { name }
            | LoadError::Worker { name } => name,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch { name, source } => write!(f, "failed to fetch '{name}': {source}"),
            LoadError::Decode { name, source } => write!(f, "failed to decode '{name}': {source}"),
            LoadError::Empty { name } => write!(f, "image '{name}' has zero width or height"),
            LoadError::Worker { name } => write!(f, "loader for '{name}' panicked"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Fetch { source, .. } => Some(source),
            LoadError::Decode { source, .. } => Some(source),
            LoadError::Empty { .. } | LoadError::Worker { .. } => None,
        }
    }
}
