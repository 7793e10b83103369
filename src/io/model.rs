//! JSON-described feed-forward classifier usable as an `InferenceEngine`.
//!
//! The file lists the declared input dims and a stack of dense layers, each with
//! a row-per-output weight matrix, a bias vector and an activation:
//!
//! ```json
//! {
//!   "input_dims": [1, 784],
//!   "layers": [
//!     { "weights": [[0.1, ...], ...], "biases": [0.0, ...], "activation": "relu" },
//!     { "weights": [[...], ...], "biases": [...], "activation": "softmax" }
//!   ]
//! }
//! ```
use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::inference::{InferenceEngine, NUM_CLASSES, ScoreVector};
use crate::core::processing::tensor::InputTensor;

/// Errors encountered when loading a network description
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Network has no layers")]
    Empty,
    #[error("Layer {0}: weight rows have different lengths")]
    Ragged(usize),
    #[error("Layer {layer}: {rows} weight rows but {biases} biases")]
    BiasMismatch {
        layer: usize,
        rows: usize,
        biases: usize,
    },
    #[error("Layer {layer} expects {expected} inputs, got {got}")]
    InputMismatch {
        layer: usize,
        expected: usize,
        got: usize,
    },
    #[error("Network yields {0} outputs, expected 10")]
    Outputs(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Identity,
    Relu,
    Sigmoid,
    Tanh,
    /// Vector-valued; applied over the whole layer output.
    Softmax,
}

impl Activation {
    fn apply(&self, mut z: Array1<f32>) -> Array1<f32> {
        match self {
            Activation::Identity => z,
            Activation::Relu => {
                z.mapv_inplace(|x| x.max(0.0));
                z
            }
            Activation::Sigmoid => {
                z.mapv_inplace(|x| 1.0 / (1.0 + (-x).exp()));
                z
            }
            Activation::Tanh => {
                z.mapv_inplace(f32::tanh);
                z
            }
            Activation::Softmax => {
                // Shift by the max for numerical stability
                let max = z.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                z.mapv_inplace(|x| (x - max).exp());
                let sum = z.sum();
                if sum > 0.0 {
                    z.mapv_inplace(|x| x / sum);
                }
                z
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub weights: Vec<Vec<f32>>,
    pub biases: Vec<f32>,
    pub activation: Activation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_dims: Vec<usize>,
    pub layers: Vec<LayerSpec>,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Array2<f32>,
    biases: Array1<f32>,
    activation: Activation,
}

/// Loaded network; immutable, so one handle can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    input_dims: Vec<usize>,
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn from_spec(spec: NetworkSpec) -> Result<Self, ModelError> {
        if spec.layers.is_empty() {
            return Err(ModelError::Empty);
        }

        // An unspecified (0) batch dimension counts as 1
        let mut expected_inputs = spec.input_dims.iter().map(|&d| d.max(1)).product::<usize>();
        let mut layers = Vec::with_capacity(spec.layers.len());
        for (idx, layer) in spec.layers.into_iter().enumerate() {
            let rows = layer.weights.len();
            let cols = layer.weights.first().map(|r| r.len()).unwrap_or(0);
            if layer.weights.iter().any(|r| r.len() != cols) {
                return Err(ModelError::Ragged(idx));
            }
            if layer.biases.len() != rows {
                return Err(ModelError::BiasMismatch {
                    layer: idx,
                    rows,
                    biases: layer.biases.len(),
                });
            }
            if cols != expected_inputs {
                return Err(ModelError::InputMismatch {
                    layer: idx,
                    expected: cols,
                    got: expected_inputs,
                });
            }

            let flat: Vec<f32> = layer.weights.into_iter().flatten().collect();
            let weights =
                Array2::from_shape_vec((rows, cols), flat).map_err(|_| ModelError::Ragged(idx))?;
            layers.push(DenseLayer {
                weights,
                biases: Array1::from(layer.biases),
                activation: layer.activation,
            });
            expected_inputs = rows;
        }

        if expected_inputs != NUM_CLASSES {
            return Err(ModelError::Outputs(expected_inputs));
        }

        Ok(Self {
            input_dims: spec.input_dims,
            layers,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Self::from_spec(serde_json::from_str(json)?)
    }

    pub fn load_json(path: &Path) -> Result<Self, ModelError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let network = Self::from_spec(serde_json::from_reader(reader)?)?;
        info!(
            "Loaded network from {:?}: input {:?}, {} layers",
            path,
            network.input_dims,
            network.layers.len()
        );
        Ok(network)
    }

    pub fn input_len(&self) -> usize {
        self.layers.first().map(|l| l.weights.ncols()).unwrap_or(0)
    }

    pub fn forward(&self, input: ArrayView1<f32>) -> Array1<f32> {
        let mut current = input.to_owned();
        for layer in &self.layers {
            let z = layer.weights.dot(&current) + &layer.biases;
            current = layer.activation.apply(z);
        }
        current
    }
}

impl InferenceEngine for DenseNetwork {
    fn input_dims(&self) -> Vec<usize> {
        self.input_dims.clone()
    }

    fn execute(&self, input: &InputTensor) -> crate::error::Result<ScoreVector> {
        if input.len() != self.input_len() {
            return Err(crate::error::Error::shape(
                format!("{} inputs", self.input_len()),
                input.shape(),
            ));
        }
        let flat = Array1::from(input.values());
        let out = self.forward(flat.view());
        ScoreVector::new(out.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::tensor::assemble_tensor;
    use crate::error::Error;
    use crate::types::InputLayout;

    // 2x2 canvas -> 10 classes; class k reads pixel k % 4
    fn tiny_spec(activation: Activation) -> NetworkSpec {
        let weights = (0..10)
            .map(|k| {
                (0..4)
                    .map(|i| if i == k % 4 { 1.0 } else { 0.0 })
                    .collect::<Vec<f32>>()
            })
            .collect();
        NetworkSpec {
            input_dims: vec![1, 4],
            layers: vec![LayerSpec {
                weights,
                biases: vec![0.0; 10],
                activation,
            }],
        }
    }

    #[test]
    fn forward_pass_and_engine_contract() {
        let net = DenseNetwork::from_spec(tiny_spec(Activation::Identity)).unwrap();
        let canvas = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 1.0, 0.0]).unwrap();
        let tensor = assemble_tensor(&canvas, 2, InputLayout::Flat).unwrap();

        let scores = net.execute(&tensor).unwrap();
        let s = scores.as_slice();
        assert_eq!(s.len(), 10);
        assert_eq!(s[2], 1.0);
        assert_eq!(s[6], 1.0);
        assert_eq!(s[0], 0.0);
        assert_eq!(net.input_dims(), vec![1, 4]);
    }

    #[test]
    fn softmax_sums_to_one() {
        let net = DenseNetwork::from_spec(tiny_spec(Activation::Softmax)).unwrap();
        let out = net.forward(Array1::from(vec![3.0, 1.0, 0.0, 0.0]).view());
        assert!((out.sum() - 1.0).abs() < 1e-5);
        assert!(out[0] > out[1]);
    }

    #[test]
    fn json_round_trip_loads() {
        let json = serde_json::to_string(&tiny_spec(Activation::Relu)).unwrap();
        assert!(json.contains(r#""activation":"relu""#));
        let net = DenseNetwork::from_json_str(&json).unwrap();
        assert_eq!(net.input_len(), 4);
    }

    #[test]
    fn rejects_inconsistent_layers() {
        let mut spec = tiny_spec(Activation::Identity);
        spec.layers[0].biases.pop();
        assert!(matches!(
            DenseNetwork::from_spec(spec),
            Err(ModelError::BiasMismatch { .. })
        ));

        let mut spec = tiny_spec(Activation::Identity);
        spec.input_dims = vec![1, 784];
        assert!(matches!(
            DenseNetwork::from_spec(spec),
            Err(ModelError::InputMismatch { .. })
        ));

        let mut spec = tiny_spec(Activation::Identity);
        spec.layers[0].weights[3].push(0.0);
        assert!(matches!(
            DenseNetwork::from_spec(spec),
            Err(ModelError::Ragged(0))
        ));

        let mut spec = tiny_spec(Activation::Identity);
        spec.layers[0].weights.pop();
        spec.layers[0].biases.pop();
        assert!(matches!(
            DenseNetwork::from_spec(spec),
            Err(ModelError::Outputs(9))
        ));
    }

    #[test]
    fn wrong_tensor_length_is_a_shape_error() {
        let net = DenseNetwork::from_spec(tiny_spec(Activation::Identity)).unwrap();
        let canvas = Array2::<f32>::zeros((3, 3));
        let tensor = assemble_tensor(&canvas, 3, InputLayout::Flat).unwrap();
        assert!(matches!(net.execute(&tensor), Err(Error::Shape { .. })));
    }
}
