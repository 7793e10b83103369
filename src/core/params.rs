use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{GrayscaleMethod, InputLayout, PolarityScope, ResampleFilter, ThresholdMode};

/// Normalization parameters, fixed at initialization and shared by every request.
/// Suitable for config files; unknown keys are rejected, missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Side `S` of the square canvas the classifier expects
    pub canvas_side: usize,
    /// Long-side extent of the digit after resizing, before padding
    pub digit_extent: usize,
    /// Brightness mean above which the grid is complemented, in (0, 1)
    pub polarity_threshold: f32,
    pub polarity_scope: PolarityScope,
    /// If true, threshold the canvas into {0, 1}
    pub binarize: bool,
    pub threshold: ThresholdMode,
    pub grayscale: GrayscaleMethod,
    pub filter: ResampleFilter,
    pub input_layout: InputLayout,
    /// Decimal digits kept when scores are rounded for display
    pub display_precision: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas_side: 28,
            digit_extent: 28,
            polarity_threshold: 0.5,
            polarity_scope: PolarityScope::Region,
            binarize: true,
            threshold: ThresholdMode::Median,
            grayscale: GrayscaleMethod::Weighted,
            filter: ResampleFilter::Bilinear,
            input_layout: InputLayout::Flat,
            display_precision: 2,
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_side == 0 {
            return Err(Error::InvalidArgument {
                arg: "canvas_side",
                value: self.canvas_side.to_string(),
            });
        }
        if self.digit_extent == 0 || self.digit_extent > self.canvas_side {
            return Err(Error::InvalidArgument {
                arg: "digit_extent",
                value: format!("{} (canvas_side={})", self.digit_extent, self.canvas_side),
            });
        }
        if !(self.polarity_threshold > 0.0 && self.polarity_threshold < 1.0) {
            return Err(Error::InvalidArgument {
                arg: "polarity_threshold",
                value: self.polarity_threshold.to_string(),
            });
        }
        if let ThresholdMode::Fixed(c) = self.threshold {
            if !(0.0..=1.0).contains(&c) {
                return Err(Error::InvalidArgument {
                    arg: "threshold",
                    value: c.to_string(),
                });
            }
        }
        if self.display_precision > 6 {
            return Err(Error::InvalidArgument {
                arg: "display_precision",
                value: self.display_precision.to_string(),
            });
        }
        Ok(())
    }

    /// Dims of the tensor handed to the classifier.
    pub fn tensor_dims(&self) -> Vec<usize> {
        self.input_layout.dims(self.canvas_side)
    }
}
