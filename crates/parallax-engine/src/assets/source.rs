use std::path::{Path, PathBuf};

use super::LoadError;

/// Where asset bytes come from.
///
/// `Sync` because the loader fetches both images from worker threads.
pub trait AssetSource: Sync {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError>;
}

/// Reads assets as files relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(name);
        log::debug!("reading {}", path.display());
        std::fs::read(&path).map_err(|source| LoadError::Fetch {
            name: name.to_string(),
            source,
        })
    }
}
