use crate::core::image::Grid;

pub const MAX_INTENSITY: f32 = 255.0;

/// Rescale 0..=255 intensities into [0, 1].
pub fn normalize_intensity(grid: &Grid) -> Grid {
    grid.mapv(|v| v / MAX_INTENSITY)
}
