//! Preview decoding and the per-item texture table of a loaded session.

use crate::error::Result;
use crate::host::{Texture, TextureLoader};
use bswl_core::{PreviewSource, WorkshopId, WorkshopLibrary};
use camino::Utf8Path;
use std::collections::HashMap;

/// RGBA8 pixels of a preview image, ready for upload by a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode a `.jpg`/`.png` preview from disk.
pub fn decode_preview(path: &Utf8Path) -> Result<DecodedImage> {
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();

    Ok(DecodedImage {
        width,
        height,
        rgba: img.into_raw(),
    })
}

/// Textures shown by the grid, one per map plus the shared placeholder.
#[derive(Debug, Default)]
pub struct PreviewTextures {
    placeholder: Option<Texture>,
    items: HashMap<WorkshopId, Texture>,
}

impl PreviewTextures {
    /// Load the placeholder and every map preview through the host.
    ///
    /// A preview that fails to load falls back to the placeholder. A missing
    /// placeholder leaves those cards without an image.
    pub fn load<L: TextureLoader + ?Sized>(
        loader: &mut L,
        library: &WorkshopLibrary,
        placeholder_path: &Utf8Path,
    ) -> Self {
        let placeholder = match loader.load_texture(placeholder_path) {
            Ok(texture) => Some(texture),
            Err(e) => {
                tracing::warn!("Placeholder preview unavailable: {}", e);
                None
            }
        };

        let mut items = HashMap::new();
        for item in library.ordered_items() {
            if item.preview_source == PreviewSource::Placeholder {
                continue;
            }
            match loader.load_texture(&item.preview) {
                Ok(texture) => {
                    items.insert(item.id.clone(), texture);
                }
                Err(e) => {
                    tracing::warn!("Preview of {} unavailable: {}", item.id, e);
                }
            }
        }

        Self { placeholder, items }
    }

    pub fn get(&self, id: &WorkshopId) -> Option<&Texture> {
        self.items.get(id).or(self.placeholder.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        (temp, dir)
    }

    #[test]
    fn test_decode_png() {
        let (_temp, dir) = temp_dir();
        let path = dir.join("preview.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode_preview(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.rgba.len(), 4 * 2 * 4);
        assert_eq!(&decoded.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_jpg() {
        let (_temp, dir) = temp_dir();
        let path = dir.join("preview.jpg");
        image::RgbImage::from_pixel(16, 9, image::Rgb([0, 0, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode_preview(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 9));
        assert_eq!(decoded.rgba.len(), 16 * 9 * 4);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let (_temp, dir) = temp_dir();
        let path = dir.join("preview.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(decode_preview(&path).is_err());
    }

    #[test]
    fn test_decode_missing_file_fails() {
        assert!(decode_preview(Utf8Path::new("/nonexistent/preview.png")).is_err());
    }
}
