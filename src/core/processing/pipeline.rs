use serde::Serialize;
use tracing::{info, instrument};

use crate::core::image::{Grid, RawImage};
use crate::core::inference::{InferenceEngine, Prediction, reduce_scores};
use crate::core::params::PipelineConfig;
use crate::core::processing::binarize::binarize;
use crate::core::processing::grayscale::to_grayscale;
use crate::core::processing::normalize::normalize_intensity;
use crate::core::processing::padding::{Padding, add_padding_to_square};
use crate::core::processing::polarity::{PolarityDecision, correct_polarity};
use crate::core::processing::resize::resize_to_extent;
use crate::core::processing::tensor::{InputTensor, assemble_tensor};
use crate::error::Result;
use crate::types::{InputLayout, PolarityScope};

/// What each stage decided for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationTrace {
    pub source_height: usize,
    pub source_width: usize,
    pub scaled_rows: usize,
    pub scaled_cols: usize,
    pub padding: Padding,
    pub polarity_scope: PolarityScope,
    pub polarity: PolarityDecision,
    /// Cutoff applied by the binarizer, `None` when it did not run
    pub binarize_cutoff: Option<f32>,
}

/// Classifier-ready tensor together with the decisions that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDigit {
    pub tensor: InputTensor,
    pub trace: NormalizationTrace,
}

impl NormalizedDigit {
    pub fn grid(&self) -> Result<Grid> {
        self.tensor.to_grid()
    }

    pub fn render(&self, decimals: usize) -> Result<String> {
        Ok(render_grid(&self.grid()?, decimals))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub digit: NormalizedDigit,
    pub prediction: Prediction,
}

/// One text line per row, cells separated by a space.
pub fn render_grid(grid: &Grid, decimals: usize) -> String {
    grid.rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{:.*}", decimals, v))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run grayscale, resize, normalize, polarity, compositing, optional binarization
/// and assembly over one decoded photo. Every intermediate is owned by this call.
///
/// With `PolarityScope::Region` the brightness mean and the complement apply to the
/// scaled digit before it is padded, so the border stays zero. With
/// `PolarityScope::Canvas` they apply to the full padded canvas.
pub fn normalize_image(image: &RawImage, config: &PipelineConfig) -> Result<NormalizedDigit> {
    normalize_with_layout(image, config, config.input_layout)
}

#[instrument(skip_all, fields(height = image.height(), width = image.width()))]
fn normalize_with_layout(
    image: &RawImage,
    config: &PipelineConfig,
    layout: InputLayout,
) -> Result<NormalizedDigit> {
    let side = config.canvas_side;

    let gray = to_grayscale(image, config.grayscale)?;
    let scaled = resize_to_extent(&gray, config.digit_extent, config.filter)?;
    let (scaled_rows, scaled_cols) = scaled.dim();
    let normalized = normalize_intensity(&scaled);

    let (canvas, padding, polarity) = match config.polarity_scope {
        PolarityScope::Region => {
            let (corrected, polarity) = correct_polarity(&normalized, config.polarity_threshold);
            let (canvas, padding) = add_padding_to_square(&corrected, side)?;
            (canvas, padding, polarity)
        }
        PolarityScope::Canvas => {
            let (padded, padding) = add_padding_to_square(&normalized, side)?;
            let (canvas, polarity) = correct_polarity(&padded, config.polarity_threshold);
            (canvas, padding, polarity)
        }
    };

    let (canvas, binarize_cutoff) = if config.binarize {
        let (binary, cutoff) = binarize(&canvas, config.threshold);
        (binary, Some(cutoff))
    } else {
        (canvas, None)
    };

    let tensor = assemble_tensor(&canvas, side, layout)?;

    info!(
        "Normalized {}x{} -> {}x{} on {}x{} canvas (mean={:.3}, inverted={})",
        image.height(),
        image.width(),
        scaled_rows,
        scaled_cols,
        side,
        side,
        polarity.mean,
        polarity.inverted
    );

    Ok(NormalizedDigit {
        tensor,
        trace: NormalizationTrace {
            source_height: image.height(),
            source_width: image.width(),
            scaled_rows,
            scaled_cols,
            padding,
            polarity_scope: config.polarity_scope,
            polarity,
            binarize_cutoff,
        },
    })
}

/// Normalize a photo in the layout the engine declares, run it and reduce the scores.
pub fn classify_image<E: InferenceEngine + ?Sized>(
    image: &RawImage,
    config: &PipelineConfig,
    engine: &E,
) -> Result<Classification> {
    let layout = InputLayout::from_dims(&engine.input_dims(), config.canvas_side)?;
    let digit = normalize_with_layout(image, config, layout)?;
    let scores = engine.execute(&digit.tensor)?;
    let prediction = reduce_scores(scores);

    info!(
        "Predicted {} scores={}",
        prediction.class,
        prediction.format_scores(config.display_precision)
    );

    Ok(Classification { digit, prediction })
}
