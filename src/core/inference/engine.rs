use crate::core::processing::tensor::InputTensor;
use crate::error::{Error, Result};

/// Digit classes 0-9.
pub const NUM_CLASSES: usize = 10;

/// Raw per-class scores, index = digit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreVector(Vec<f32>);

impl ScoreVector {
    pub fn new(scores: Vec<f32>) -> Result<Self> {
        if scores.len() != NUM_CLASSES {
            return Err(Error::Scores {
                expected: NUM_CLASSES,
                got: scores.len(),
            });
        }
        Ok(Self(scores))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

/// A loaded classifier. Implementations are passed explicitly to the pipeline
/// so tests can substitute doubles.
pub trait InferenceEngine {
    /// Input dims as declared by the model signature, e.g. `[1, 784]` or `[1, 28, 28, 1]`.
    fn input_dims(&self) -> Vec<usize>;

    /// Forward pass over a single-sample batch.
    fn execute(&self, input: &InputTensor) -> Result<ScoreVector>;
}

impl<T: InferenceEngine + ?Sized> InferenceEngine for &T {
    fn input_dims(&self) -> Vec<usize> {
        (**self).input_dims()
    }

    fn execute(&self, input: &InputTensor) -> Result<ScoreVector> {
        (**self).execute(input)
    }
}

impl<T: InferenceEngine + ?Sized> InferenceEngine for Box<T> {
    fn input_dims(&self) -> Vec<usize> {
        (**self).input_dims()
    }

    fn execute(&self, input: &InputTensor) -> Result<ScoreVector> {
        (**self).execute(input)
    }
}
