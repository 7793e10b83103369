use tracing::debug;

use crate::core::image::Grid;
use crate::types::ThresholdMode;

/// Lower median: element `(n - 1) / 2` of the sorted values, no interpolation.
/// Odd counts give the middle element; even counts the smaller of the two middles.
pub fn lower_median(grid: &Grid) -> Option<f32> {
    let mut values: Vec<f32> = grid.iter().copied().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    Some(values[(values.len() - 1) / 2])
}

/// Cells strictly greater than the threshold become 1.0, the rest 0.0.
/// Returns the two-tone grid and the cutoff that was applied.
pub fn binarize(grid: &Grid, mode: ThresholdMode) -> (Grid, f32) {
    let cutoff = match mode {
        ThresholdMode::Median => lower_median(grid).unwrap_or(0.0),
        ThresholdMode::Fixed(c) => c,
    };
    debug!("Binarize {} cutoff={:.4}", mode, cutoff);

    let out = grid.mapv(|v| if v > cutoff { 1.0 } else { 0.0 });
    (out, cutoff)
}
