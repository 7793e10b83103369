//! Adapter from compressed image files to `RawImage`, backed by the `image` crate.
use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::core::image::RawImage;
use crate::error::Result;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// True when the file extension names a format this adapter decodes.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn decode_path(path: &Path) -> Result<RawImage> {
    debug!("Decoding {:?}", path);
    let img = image::open(path)?;
    from_dynamic(img)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<RawImage> {
    let img = image::load_from_memory(bytes)?;
    from_dynamic(img)
}

/// Flatten any decoded colour type to interleaved 8-bit RGB.
pub fn from_dynamic(img: DynamicImage) -> Result<RawImage> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    RawImage::from_raw(width as usize, height as usize, 3, rgb.into_raw())
}
