use tracing::debug;

use crate::core::image::Grid;

/// Outcome of the brightness test.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PolarityDecision {
    pub mean: f32,
    pub inverted: bool,
}

/// Mean of all cells; 0.0 for an empty grid.
pub fn mean_brightness(grid: &Grid) -> f32 {
    grid.mean().unwrap_or(0.0)
}

/// Complement a normalized grid when its mean exceeds `threshold`, so the digit
/// ends up bright on a dark background.
pub fn correct_polarity(grid: &Grid, threshold: f32) -> (Grid, PolarityDecision) {
    let mean = mean_brightness(grid);
    let inverted = mean > threshold;
    debug!("Polarity mean={:.4} threshold={} inverted={}", mean, threshold, inverted);

    let out = if inverted {
        grid.mapv(|v| 1.0 - v)
    } else {
        grid.clone()
    };
    (out, PolarityDecision { mean, inverted })
}
