//! Pixel containers shared by the pipeline stages.
use ndarray::{Array2, Array3, ArrayView3};

use crate::error::{Error, Result};

/// Luminance grid, `(rows, cols)`, one `f32` per pixel.
pub type Grid = Array2<f32>;

/// Decoded photograph: `height x width x channels` interleaved 8-bit samples.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    pixels: Array3<u8>,
}

impl RawImage {
    /// Wrap an interleaved buffer as produced by an image decoder.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| {
                Error::Decode(format!(
                    "{}x{}x{} samples overflow the address space",
                    height, width, channels
                ))
            })?;
        if data.len() != expected {
            return Err(Error::Decode(format!(
                "buffer holds {} samples, {}x{}x{} needs {}",
                data.len(),
                height,
                width,
                channels,
                expected
            )));
        }
        let pixels = Array3::from_shape_vec((height, width, channels), data)
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(Self { pixels })
    }

    pub fn from_array(pixels: Array3<u8>) -> Self {
        Self { pixels }
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_buffer_length() {
        let img = RawImage::from_raw(2, 3, 3, vec![0; 18]).unwrap();
        assert_eq!((img.height(), img.width(), img.channels()), (3, 2, 3));

        let err = RawImage::from_raw(2, 3, 3, vec![0; 17]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn overflowing_dimensions_are_a_decode_error() {
        let err = RawImage::from_raw(usize::MAX, 2, 3, vec![]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn from_raw_is_row_major_interleaved() {
        // 1 row, 2 px: (1,2,3) (4,5,6)
        let img = RawImage::from_raw(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.view()[[0, 1, 0]], 4);
        assert_eq!(img.view()[[0, 0, 2]], 3);
    }

    #[test]
    fn zero_area_images_are_representable() {
        let img = RawImage::from_raw(0, 5, 3, vec![]).unwrap();
        assert_eq!(img.width(), 0);
        assert_eq!(img.height(), 5);
    }
}
