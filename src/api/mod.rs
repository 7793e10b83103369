//! High-level, ergonomic library API: normalize or classify decoded photos,
//! image files, and whole directories. Prefer these entrypoints over the
//! low-level processing modules when integrating digitprep.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::image::RawImage;
use crate::core::inference::InferenceEngine;
use crate::core::params::PipelineConfig;
use crate::core::processing::pipeline::{self, Classification, NormalizedDigit};
use crate::error::{Error, Result};

/// Validate `config`, then normalize an already decoded photo.
pub fn normalize_image(image: &RawImage, config: &PipelineConfig) -> Result<NormalizedDigit> {
    config.validate()?;
    pipeline::normalize_image(image, config)
}

/// Validate `config`, then normalize and classify an already decoded photo.
pub fn classify_image<E: InferenceEngine + ?Sized>(
    image: &RawImage,
    config: &PipelineConfig,
    engine: &E,
) -> Result<Classification> {
    config.validate()?;
    pipeline::classify_image(image, config, engine)
}

#[cfg(feature = "decode")]
pub fn normalize_path(input: &Path, config: &PipelineConfig) -> Result<NormalizedDigit> {
    let image = crate::io::decode::decode_path(input)?;
    normalize_image(&image, config)
}

#[cfg(feature = "decode")]
pub fn classify_path<E: InferenceEngine + ?Sized>(
    input: &Path,
    config: &PipelineConfig,
    engine: &E,
) -> Result<Classification> {
    let image = crate::io::decode::decode_path(input)?;
    classify_image(&image, config, engine)
}

/// Outcome for one file of a directory run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    /// Predicted digit when an engine was supplied
    pub class: Option<usize>,
    pub error: Option<String>,
}

/// Summary of a directory run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub entries: Vec<BatchEntry>,
}

/// Supported image files directly under `dir`, sorted by path.
#[cfg(feature = "decode")]
pub fn iterate_images(dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut images = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && crate::io::decode::is_supported_image(&path) {
            images.push(path);
        } else {
            info!("Skipping non-image: {:?}", path);
            skipped += 1;
        }
    }
    images.sort();
    Ok((images, skipped))
}

/// Normalize (and classify when `engine` is given) every image in a directory.
/// With `continue_on_error` a failing file is counted and the run continues;
/// otherwise the first failure is returned.
#[cfg(feature = "decode")]
pub fn process_directory(
    input_dir: &Path,
    config: &PipelineConfig,
    engine: Option<&dyn InferenceEngine>,
    continue_on_error: bool,
) -> Result<BatchReport> {
    config.validate()?;
    if !input_dir.is_dir() {
        return Err(Error::InvalidArgument {
            arg: "input_dir",
            value: input_dir.display().to_string(),
        });
    }

    let (images, skipped) = iterate_images(input_dir)?;
    let mut report = BatchReport {
        skipped,
        ..Default::default()
    };

    for path in images {
        info!("Processing: {:?}", path);
        let outcome = match engine {
            Some(engine) => classify_path(&path, config, engine).map(|c| Some(c.prediction.class)),
            None => normalize_path(&path, config).map(|_| None),
        };
        match outcome {
            Ok(class) => {
                report.processed += 1;
                report.entries.push(BatchEntry {
                    path,
                    class,
                    error: None,
                });
            }
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                report.entries.push(BatchEntry {
                    path,
                    class: None,
                    error: Some(e.to_string()),
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inference::ScoreVector;
    use crate::core::processing::tensor::InputTensor;

    struct ConstantEngine;

    impl InferenceEngine for ConstantEngine {
        fn input_dims(&self) -> Vec<usize> {
            vec![1, 784]
        }

        fn execute(&self, _input: &InputTensor) -> Result<ScoreVector> {
            ScoreVector::new(vec![0.0, 0.0, 0.0, 0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0])
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_processing() {
        let image = RawImage::from_raw(4, 4, 3, vec![0; 48]).unwrap();
        let config = PipelineConfig {
            polarity_threshold: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            normalize_image(&image, &config),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn classify_image_reduces_engine_scores() {
        let image = RawImage::from_raw(4, 4, 3, vec![0; 48]).unwrap();
        let result = classify_image(&image, &PipelineConfig::default(), &ConstantEngine).unwrap();
        assert_eq!(result.prediction.class, 3);
        assert_eq!(result.digit.tensor.shape(), &[1, 784]);
    }

    #[cfg(feature = "decode")]
    #[test]
    fn directory_run_counts_outcomes() {
        use image::{Rgb, RgbImage};

        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(30, 60, Rgb([250, 250, 250]))
            .save(dir.path().join("a.png"))
            .unwrap();
        RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]))
            .save(dir.path().join("b.png"))
            .unwrap();
        std::fs::write(dir.path().join("broken.jpg"), b"nope").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"hi").unwrap();

        let report =
            process_directory(dir.path(), &PipelineConfig::default(), Some(&ConstantEngine), true)
                .unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.entries[0].class, Some(3));
        assert!(report.entries[1].error.is_none());
        assert!(report.entries[2].error.is_some());

        let err = process_directory(dir.path(), &PipelineConfig::default(), None, false);
        assert!(err.is_err());
    }
}
