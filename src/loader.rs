use image::GenericImageView;
use std::path::Path;

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Decoded image data (CPU side, before upload to the canvas)
// ---------------------------------------------------------------------------

pub struct DecodedImage {
    pub rgba_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    pub fn mem_size(&self) -> u64 {
        self.rgba_bytes.len() as u64
    }
}

/// Turns a file path into raw RGBA pixels.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage, LoadError>;
}

/// Decoder backed by the `image` crate; the format is sniffed from the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRsLoader;

impl ImageLoader for ImageRsLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage, LoadError> {
        let img = image::open(path).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
                width,
                height,
            });
        }

        let rgba = img.to_rgba8();
        log::debug!("decoded {} ({}x{})", path.display(), width, height);
        Ok(DecodedImage {
            rgba_bytes: rgba.into_raw(),
            width,
            height,
        })
    }
}
