use ndarray::{Array2, Axis, Zip};
use tracing::debug;

use crate::core::image::{Grid, RawImage};
use crate::error::{Error, Result};
use crate::types::GrayscaleMethod;

const LUMA_R: f32 = 0.2989;
const LUMA_G: f32 = 0.5870;
const LUMA_B: f32 = 0.1140;

/// Reduce an RGB(A) image to one luminance value per pixel, range 0..=255.
/// Channels after the third are ignored.
pub fn to_grayscale(image: &RawImage, method: GrayscaleMethod) -> Result<Grid> {
    if image.channels() < 3 {
        return Err(Error::Decode(format!(
            "expected at least 3 channels, got {}",
            image.channels()
        )));
    }

    let (rows, cols) = (image.height(), image.width());
    debug!("Grayscale {:?} over {}x{}", method, rows, cols);

    let mut gray = Array2::<f32>::zeros((rows, cols));
    let pixels = image.view();
    Zip::from(&mut gray)
        .and(pixels.lanes(Axis(2)))
        .par_for_each(|g, px| {
            let (r, gr, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
            *g = match method {
                GrayscaleMethod::Weighted => LUMA_R * r + LUMA_G * gr + LUMA_B * b,
                GrayscaleMethod::Average => (r + gr + b) / 3.0,
            };
        });

    Ok(gray)
}
