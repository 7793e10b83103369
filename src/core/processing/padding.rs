use ndarray::{Array2, s};
use tracing::debug;

use crate::core::image::Grid;
use crate::error::{Error, Result};

/// Border sizes around content embedded in a square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Padding {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

/// Split the leftover space so odd remainders go to the bottom/right.
pub fn calculate_padding(rows: usize, cols: usize, side: usize) -> Result<Padding> {
    if rows > side || cols > side {
        return Err(Error::Oversize { rows, cols, side });
    }
    let pad_rows = side - rows;
    let pad_cols = side - cols;
    Ok(Padding {
        top: pad_rows / 2,
        bottom: pad_rows.div_ceil(2),
        left: pad_cols / 2,
        right: pad_cols.div_ceil(2),
    })
}

/// Embed `content` centered in a zero-filled `side x side` canvas.
pub fn add_padding_to_square(content: &Grid, side: usize) -> Result<(Grid, Padding)> {
    let (rows, cols) = content.dim();
    let padding = calculate_padding(rows, cols, side)?;

    debug!(
        "Adding padding: rows={}, cols={}, top={}, bottom={}, left={}, right={}",
        rows, cols, padding.top, padding.bottom, padding.left, padding.right
    );

    let mut canvas = Array2::<f32>::zeros((side, side));
    canvas
        .slice_mut(s![
            padding.top..padding.top + rows,
            padding.left..padding.left + cols
        ])
        .assign(content);
    Ok((canvas, padding))
}
