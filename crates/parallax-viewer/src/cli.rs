use std::path::PathBuf;

use clap::Parser;

/// Mouse-reactive depth parallax viewer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory the images are read from
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Color photo, relative to the asset directory
    #[arg(long, default_value = "color.jpg")]
    pub color: String,

    /// Depth map aligned with the color photo (brighter is nearer)
    #[arg(long, default_value = "depth.png")]
    pub depth: String,

    /// Window title
    #[arg(long, default_value = "parallax")]
    pub title: String,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,

    /// Log filter, overrides RUST_LOG (e.g. "debug" or "parallax_engine=trace")
    #[arg(long)]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_name_the_bundled_assets() {
        let args = Args::try_parse_from(["parallax-viewer"]).unwrap();
        assert_eq!(args.assets, PathBuf::from("assets"));
        assert_eq!(args.color, "color.jpg");
        assert_eq!(args.depth, "depth.png");
        assert_eq!(args.log, None);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "parallax-viewer",
            "--assets",
            "/tmp/shots",
            "--color",
            "a.png",
            "--depth",
            "a_depth.png",
            "--width",
            "640",
            "--log",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.assets, PathBuf::from("/tmp/shots"));
        assert_eq!(args.color, "a.png");
        assert_eq!(args.depth, "a_depth.png");
        assert_eq!(args.width, 640.0);
        assert_eq!(args.height, 720.0);
        assert_eq!(args.log.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_non_numeric_size() {
        assert!(Args::try_parse_from(["parallax-viewer", "--width", "wide"]).is_err());
    }
}
