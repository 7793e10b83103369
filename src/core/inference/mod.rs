//! Classifier boundary: the injected `InferenceEngine` handle and the reduction
//! of its raw scores to a `Prediction`.
pub mod engine;
pub mod reduce;

pub use engine::{InferenceEngine, NUM_CLASSES, ScoreVector};
pub use reduce::{Prediction, argmax, reduce_scores};
