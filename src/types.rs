//! Shared configuration enums used across digitprep.
//! Includes `GrayscaleMethod`, `ResampleFilter`, `PolarityScope`, `ThresholdMode`
//! and the classifier `InputLayout`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrayscaleMethod {
    /// 0.2989 R + 0.5870 G + 0.1140 B
    #[default]
    Weighted,
    /// (R + G + B) / 3
    Average,
}

impl std::fmt::Display for GrayscaleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrayscaleMethod::Weighted => write!(f, "Weighted"),
            GrayscaleMethod::Average => write!(f, "Average"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Point-sampled bilinear, corners not aligned, no half-pixel offset.
    #[default]
    Bilinear,
    /// Antialiased Lanczos3 convolution.
    Lanczos3,
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleFilter::Bilinear => write!(f, "Bilinear"),
            ResampleFilter::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// Which cells feed the brightness mean that decides inversion.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarityScope {
    /// Mean over the scaled digit region before padding; only the region is complemented.
    #[default]
    Region,
    /// Mean over the full padded canvas; the whole canvas is complemented.
    Canvas,
}

impl std::fmt::Display for PolarityScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolarityScope::Region => write!(f, "Region"),
            PolarityScope::Canvas => write!(f, "Canvas"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// Lower median of the canvas, recomputed per call.
    #[default]
    Median,
    /// Constant cutoff in [0, 1].
    Fixed(f32),
}

impl std::fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdMode::Median => write!(f, "Median"),
            ThresholdMode::Fixed(c) => write!(f, "Fixed({})", c),
        }
    }
}

/// Tensor layout declared by the classifier's input signature.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputLayout {
    /// `[1, S*S]`
    #[default]
    Flat,
    /// `[1, S, S, 1]`
    Image,
}

impl InputLayout {
    pub fn dims(&self, side: usize) -> Vec<usize> {
        match self {
            InputLayout::Flat => vec![1, side * side],
            InputLayout::Image => vec![1, side, side, 1],
        }
    }

    /// Resolve a model's declared input dims against a canvas side.
    /// A batch dimension of 0 stands for "unspecified" and is accepted.
    pub fn from_dims(dims: &[usize], side: usize) -> Result<Self> {
        let batch_ok = |b: usize| b == 0 || b == 1;
        match dims {
            [b, n] if batch_ok(*b) && *n == side * side => Ok(InputLayout::Flat),
            [b, h, w, 1] if batch_ok(*b) && *h == side && *w == side => Ok(InputLayout::Image),
            _ => Err(Error::shape(
                format!("[1, {}] or [1, {}, {}, 1]", side * side, side, side),
                dims,
            )),
        }
    }
}

impl std::fmt::Display for InputLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputLayout::Flat => write!(f, "Flat"),
            InputLayout::Image => write!(f, "Image"),
        }
    }
}
