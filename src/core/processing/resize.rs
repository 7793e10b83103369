use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use ndarray::Array2;
use tracing::{debug, info};

use crate::core::image::Grid;
use crate::error::{Error, Result};
use crate::types::ResampleFilter;

/// Scale `(rows, cols)` so the longer side becomes `target_extent`.
/// Both sides are floored; the longer one lands exactly on the extent.
pub fn calculate_resize_dimensions(
    original_rows: usize,
    original_cols: usize,
    target_extent: usize,
) -> Result<(usize, usize)> {
    let long_side = original_rows.max(original_cols);
    if original_rows == 0 || original_cols == 0 || target_extent == 0 {
        return Err(Error::DegenerateImage {
            height: original_rows,
            width: original_cols,
        });
    }

    let scale_factor = target_extent as f64 / long_side as f64;
    let mut new_rows = (original_rows as f64 * scale_factor).floor() as usize;
    let mut new_cols = (original_cols as f64 * scale_factor).floor() as usize;
    // Guard the long side against floating error, e.g. 3 * (7 / 3) = 6.999...
    if original_rows == long_side {
        new_rows = target_extent;
    }
    if original_cols == long_side {
        new_cols = target_extent;
    }

    if new_rows == 0 || new_cols == 0 {
        return Err(Error::DegenerateImage {
            height: original_rows,
            width: original_cols,
        });
    }
    Ok((new_rows, new_cols))
}

/// Point-sampled bilinear resampling without corner alignment or half-pixel offset:
/// output pixel `d` reads source coordinate `d * in / out`.
pub fn resize_bilinear(src: &Grid, target_rows: usize, target_cols: usize) -> Grid {
    let (rows, cols) = src.dim();
    let scale_y = rows as f32 / target_rows as f32;
    let scale_x = cols as f32 / target_cols as f32;

    // Per-column neighbours and weights are shared by every output row
    let x_taps: Vec<(usize, usize, f32)> = (0..target_cols)
        .map(|x| {
            let sx = x as f32 * scale_x;
            let left = (sx.floor() as usize).min(cols - 1);
            let right = (left + 1).min(cols - 1);
            (left, right, sx - left as f32)
        })
        .collect();

    Array2::from_shape_fn((target_rows, target_cols), |(y, x)| {
        let sy = y as f32 * scale_y;
        let top = (sy.floor() as usize).min(rows - 1);
        let bottom = (top + 1).min(rows - 1);
        let dy = sy - top as f32;
        let (left, right, dx) = x_taps[x];

        let top_val = src[[top, left]] + (src[[top, right]] - src[[top, left]]) * dx;
        let bottom_val = src[[bottom, left]] + (src[[bottom, right]] - src[[bottom, left]]) * dx;
        top_val + (bottom_val - top_val) * dy
    })
}

/// Antialiased Lanczos3 resampling on `f32` pixels.
pub fn resize_lanczos3(src: &Grid, target_rows: usize, target_cols: usize) -> Result<Grid> {
    let (rows, cols) = src.dim();
    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    // fast_image_resize works on raw bytes; F32 pixels are native-endian
    let mut src_bytes = Vec::with_capacity(rows * cols * 4);
    for &v in src.iter() {
        src_bytes.extend_from_slice(&v.to_ne_bytes());
    }

    let src_image = Image::from_vec_u8(cols as u32, rows as u32, src_bytes, PixelType::F32)
        .map_err(Error::external)?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, PixelType::F32);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    let dst_bytes = dst_image.into_vec();
    let out: Vec<f32> = dst_bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    // Lanczos rings past the input range
    let out = out.into_iter().map(|v| v.clamp(0.0, 255.0)).collect();

    Array2::from_shape_vec((target_rows, target_cols), out).map_err(Error::external)
}

/// Aspect-preserving resize of a luminance grid to `target_extent` on its long side.
pub fn resize_to_extent(src: &Grid, target_extent: usize, filter: ResampleFilter) -> Result<Grid> {
    let (rows, cols) = src.dim();
    let (new_rows, new_cols) = calculate_resize_dimensions(rows, cols, target_extent)?;

    info!(
        "Original size: {}x{}, New size: {}x{}",
        rows, cols, new_rows, new_cols
    );

    if (new_rows, new_cols) == (rows, cols) {
        debug!("Already at target extent, skipping resample");
        return Ok(src.clone());
    }

    match filter {
        ResampleFilter::Bilinear => Ok(resize_bilinear(src, new_rows, new_cols)),
        ResampleFilter::Lanczos3 => resize_lanczos3(src, new_rows, new_cols),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn long_side_lands_on_extent() {
        assert_eq!(calculate_resize_dimensions(100, 50, 20).unwrap(), (20, 10));
        assert_eq!(calculate_resize_dimensions(50, 100, 20).unwrap(), (10, 20));
        assert_eq!(calculate_resize_dimensions(3, 1, 7).unwrap(), (7, 2));
        // Upscaling small sources is allowed
        assert_eq!(calculate_resize_dimensions(4, 4, 28).unwrap(), (28, 28));
    }

    #[test]
    fn short_side_is_floored() {
        // 28 * 99 / 200 = 13.86
        assert_eq!(calculate_resize_dimensions(200, 99, 28).unwrap(), (28, 13));
    }

    #[test]
    fn zero_sized_sources_are_degenerate() {
        assert!(matches!(
            calculate_resize_dimensions(0, 10, 20),
            Err(Error::DegenerateImage { height: 0, width: 10 })
        ));
        assert!(matches!(
            calculate_resize_dimensions(10, 0, 20),
            Err(Error::DegenerateImage { .. })
        ));
    }

    #[test]
    fn thin_sources_collapse_to_degenerate() {
        // 1 * 20 / 100 = 0.2 -> 0
        assert!(matches!(
            calculate_resize_dimensions(100, 1, 20),
            Err(Error::DegenerateImage { .. })
        ));
    }

    #[test]
    fn bilinear_samples_at_integer_strides() {
        let src = Array2::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f32);
        let out = resize_bilinear(&src, 2, 2);
        // scale 2: reads source (0,0) (0,2) (2,0) (2,2)
        assert_eq!(out, array![[0.0, 2.0], [8.0, 10.0]]);
    }

    #[test]
    fn bilinear_interpolates_and_clamps_edges() {
        let src = array![[0.0, 10.0]];
        let out = resize_bilinear(&src, 1, 4);
        // scale 0.5: x = 0, 0.5, 1.0, 1.5 (right neighbour clamps to col 1)
        assert_eq!(out, array![[0.0, 5.0, 10.0, 10.0]]);
    }

    #[test]
    fn resize_to_extent_keeps_aspect() {
        let src = Array2::<f32>::from_elem((100, 50), 128.0);
        let out = resize_to_extent(&src, 20, ResampleFilter::Bilinear).unwrap();
        assert_eq!(out.dim(), (20, 10));
        assert!(out.iter().all(|&v| (v - 128.0).abs() < 1e-4));
    }

    #[test]
    fn lanczos_preserves_flat_fields() {
        let src = Array2::<f32>::from_elem((60, 30), 200.0);
        let out = resize_to_extent(&src, 20, ResampleFilter::Lanczos3).unwrap();
        assert_eq!(out.dim(), (20, 10));
        assert!(out.iter().all(|&v| (v - 200.0).abs() < 0.5));
    }
}
