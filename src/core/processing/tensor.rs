use ndarray::{ArrayD, IxDyn};
use serde::Serialize;

use crate::core::image::Grid;
use crate::error::{Error, Result};
use crate::types::InputLayout;

/// Single-sample batch handed to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputTensor {
    layout: InputLayout,
    side: usize,
    #[serde(serialize_with = "serialize_flat")]
    data: ArrayD<f32>,
}

fn serialize_flat<S: serde::Serializer>(
    data: &ArrayD<f32>,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.collect_seq(data.iter())
}

impl InputTensor {
    pub fn layout(&self) -> InputLayout {
        self.layout
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values in row-major order.
    pub fn values(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    pub fn array(&self) -> &ArrayD<f32> {
        &self.data
    }

    /// Back to `side x side`, e.g. for display.
    pub fn to_grid(&self) -> Result<Grid> {
        Grid::from_shape_vec((self.side, self.side), self.values()).map_err(Error::external)
    }
}

/// Flatten an `S x S` canvas row-major into the layout the model declares.
pub fn assemble_tensor(canvas: &Grid, side: usize, layout: InputLayout) -> Result<InputTensor> {
    if canvas.dim() != (side, side) {
        return Err(Error::shape(format!("{}x{}", side, side), canvas.shape()));
    }

    let flat: Vec<f32> = canvas.iter().copied().collect();
    let dims = layout.dims(side);
    let data = ArrayD::from_shape_vec(IxDyn(&dims), flat)
        .map_err(|e| Error::shape(format!("{:?}", dims), e))?;
    Ok(InputTensor { layout, side, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn flattens_row_major_into_single_batch() {
        let canvas = Array2::from_shape_fn((3, 3), |(r, c)| (r * 3 + c) as f32);
        let tensor = assemble_tensor(&canvas, 3, InputLayout::Flat).unwrap();
        assert_eq!(tensor.shape(), &[1, 9]);
        assert_eq!(tensor.values(), (0..9).map(|v| v as f32).collect::<Vec<_>>());
        assert_eq!(tensor.to_grid().unwrap(), canvas);
    }

    #[test]
    fn image_layout_keeps_values() {
        let canvas = Array2::from_shape_fn((2, 2), |(r, c)| (r * 2 + c) as f32);
        let tensor = assemble_tensor(&canvas, 2, InputLayout::Image).unwrap();
        assert_eq!(tensor.shape(), &[1, 2, 2, 1]);
        assert_eq!(tensor.array()[&[0usize, 1, 0, 0][..]], 2.0);
    }

    #[test]
    fn non_square_or_wrong_side_is_a_shape_error() {
        let canvas = Array2::<f32>::zeros((28, 27));
        assert!(matches!(
            assemble_tensor(&canvas, 28, InputLayout::Flat),
            Err(Error::Shape { .. })
        ));
        let canvas = Array2::<f32>::zeros((20, 20));
        assert!(matches!(
            assemble_tensor(&canvas, 28, InputLayout::Flat),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    fn serializes_as_flat_sequence() {
        let canvas = Array2::from_elem((2, 2), 1.0f32);
        let tensor = assemble_tensor(&canvas, 2, InputLayout::Image).unwrap();
        let json = serde_json::to_value(&tensor).unwrap();
        assert_eq!(json["data"], serde_json::json!([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(json["layout"], "image");
    }
}
