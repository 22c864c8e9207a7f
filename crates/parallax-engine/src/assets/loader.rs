use std::thread;

use super::{decode, AssetSource, ImageAsset, LoadError};

/// The color photo and its aligned depth map.
///
/// Only constructed when both images loaded; the depth map's size is not
/// checked against the color image.
#[derive(Debug, Clone)]
pub struct ImagePair {
    pub color: ImageAsset,
    pub depth: ImageAsset,
}

/// Fetches and decodes both images concurrently and waits for both.
///
/// Each image is loaded on its own scoped worker thread; there is no
/// ordering between them. If either fails, the error is returned and the
/// other result is discarded. When both fail, the color error wins.
pub fn load_pair<S>(source: &S, color: &str, depth: &str) -> Result<ImagePair, LoadError>
where
    S: AssetSource + ?Sized,
{
    let (color, depth) = thread::scope(|scope| {
        let color_task = scope.spawn(|| load_one(source, color));
        let depth_task = scope.spawn(|| load_one(source, depth));

        (
            join(color_task, color),
            join(depth_task, depth),
        )
    });

    let color = color?;
    let depth = depth?;

    log::info!(
        "loaded '{}' ({}x{}) and '{}' ({}x{})",
        color.name(),
        color.width(),
        color.height(),
        depth.name(),
        depth.width(),
        depth.height()
    );
    if color.aspect() != depth.aspect() {
        log::warn!(
            "depth map aspect {:.4} differs from color aspect {:.4}",
            depth.aspect(),
            color.aspect()
        );
    }

    Ok(ImagePair { color, depth })
}

fn load_one<S>(source: &S, name: &str) -> Result<ImageAsset, LoadError>
where
    S: AssetSource + ?Sized,
{
    let bytes = source.fetch(name)?;
    decode(name, &bytes)
}

fn join(
    task: thread::ScopedJoinHandle<'_, Result<ImageAsset, LoadError>>,
    name: &str,
) -> Result<ImageAsset, LoadError> {
    task.join().unwrap_or_else(|_| {
        Err(LoadError::Worker {
            name: name.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    use super::*;
    use crate::assets::asset::tests::png;
    use crate::assets::DirSource;

    /// In-memory source; names without an entry fail to fetch.
    #[derive(Default)]
    struct MemorySource {
        files: HashMap<String, Vec<u8>>,
        fetched: Mutex<Vec<String>>,
    }

    impl MemorySource {
        fn with(mut self, name: &str, bytes: Vec<u8>) -> Self {
            self.files.insert(name.to_string(), bytes);
            self
        }
    }

    impl AssetSource for MemorySource {
        fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
            self.fetched.lock().unwrap().push(name.to_string());
            self.files.get(name).cloned().ok_or_else(|| LoadError::Fetch {
                name: name.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such asset"),
            })
        }
    }

    struct PanickingSource;

    impl AssetSource for PanickingSource {
        fn fetch(&self, name: &str) -> Result<Vec<u8>, LoadError> {
            if name == "depth.png" {
                panic!("backend exploded");
            }
            Ok(png(1, 1, [0, 0, 0, 255]))
        }
    }

    #[test]
    fn loads_both_images() {
        let source = MemorySource::default()
            .with("color.jpg", png(800, 400, [200, 100, 50, 255]))
            .with("depth.png", png(400, 200, [128, 128, 128, 255]));

        let pair = load_pair(&source, "color.jpg", "depth.png").unwrap();
        assert_eq!((pair.color.width(), pair.color.height()), (800, 400));
        assert_eq!((pair.depth.width(), pair.depth.height()), (400, 200));

        let mut fetched = source.fetched.lock().unwrap().clone();
        fetched.sort();
        assert_eq!(fetched, vec!["color.jpg", "depth.png"]);
    }

    #[test]
    fn missing_depth_fails_the_pair() {
        let source = MemorySource::default().with("color.jpg", png(8, 4, [0, 0, 0, 255]));
        let err = load_pair(&source, "color.jpg", "depth.png").unwrap_err();
        assert!(matches!(err, LoadError::Fetch { ref name, .. } if name == "depth.png"));
    }

    #[test]
    fn undecodable_color_fails_the_pair() {
        let source = MemorySource::default()
            .with("color.jpg", b"\xff\xd8 truncated".to_vec())
            .with("depth.png", png(8, 4, [0, 0, 0, 255]));
        let err = load_pair(&source, "color.jpg", "depth.png").unwrap_err();
        assert!(matches!(err, LoadError::Decode { ref name, .. } if name == "color.jpg"));
    }

    #[test]
    fn color_error_wins_when_both_fail() {
        let source = MemorySource::default();
        let err = load_pair(&source, "color.jpg", "depth.png").unwrap_err();
        assert_eq!(err.asset_name(), "color.jpg");
    }

    #[test]
    fn panicking_worker_becomes_load_error() {
        let err = load_pair(&PanickingSource, "color.png", "depth.png").unwrap_err();
        assert!(matches!(err, LoadError::Worker { ref name } if name == "depth.png"));
    }

    #[test]
    fn dir_source_reports_missing_file() {
        let dir = std::env::temp_dir().join("parallax-engine-missing-assets");
        let err = DirSource::new(&dir).fetch("nope.png").unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }

    #[test]
    fn dir_source_reads_files() {
        let dir = std::env::temp_dir().join(format!("parallax-engine-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("color.png"), png(6, 3, [1, 1, 1, 255])).unwrap();
        std::fs::write(dir.join("depth.png"), png(6, 3, [9, 9, 9, 255])).unwrap();

        let pair = load_pair(&DirSource::new(&dir), "color.png", "depth.png").unwrap();
        assert_eq!(pair.color.aspect(), 2.0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
