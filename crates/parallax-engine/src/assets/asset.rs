use std::sync::Arc;

use super::LoadError;

/// A decoded raster image, RGBA8, rows top to bottom.
///
/// Immutable once decoded; clones share the pixel buffer.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    name: Arc<str>,
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl ImageAsset {
    /// Wraps already-decoded RGBA8 pixels.
    ///
    /// Fails with [`LoadError::Empty`] for a zero-sized image; a buffer whose
    /// length is not `width * height * 4` is rejected as a decode error.
    pub fn from_rgba8(
        name: impl Into<Arc<str>>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        if width == 0 || height == 0 {
            return Err(LoadError::Empty { name: name.to_string() });
        }

        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(LoadError::Decode {
                name: name.to_string(),
                source: image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                )),
            });
        }

        Ok(Self {
            name,
            width,
            height,
            pixels: pixels.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA8 rows, `width * 4` bytes each.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Width over height. Never divides by zero: construction rejects empty
    /// images.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Decodes `bytes` (any format enabled on the `image` crate) into RGBA8.
pub fn decode(name: &str, bytes: &[u8]) -> Result<ImageAsset, LoadError> {
    let decoded = image::load_from_memory(bytes).map_err(|source| LoadError::Decode {
        name: name.to_string(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    ImageAsset::from_rgba8(name, width, height, rgba.into_raw())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use super::*;

    /// Encodes a solid-color PNG in memory.
    pub(crate) fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decode_reports_dimensions_and_aspect() {
        let asset = decode("color.png", &png(800, 400, [10, 20, 30, 255])).unwrap();
        assert_eq!((asset.width(), asset.height()), (800, 400));
        assert_eq!(asset.aspect(), 2.0);
        assert_eq!(asset.name(), "color.png");
    }

    #[test]
    fn decode_expands_to_rgba8() {
        let asset = decode("px.png", &png(2, 3, [1, 2, 3, 4])).unwrap();
        assert_eq!(asset.pixels().len(), 2 * 3 * 4);
        assert_eq!(&asset.pixels()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode("depth.png", b"not an image").unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert_eq!(err.asset_name(), "depth.png");
    }

    #[test]
    fn zero_sized_pixels_are_rejected() {
        let err = ImageAsset::from_rgba8("e", 0, 4, Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn short_pixel_buffer_is_rejected() {
        let err = ImageAsset::from_rgba8("s", 2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }
}
