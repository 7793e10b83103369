use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use digitprep::{
    Classification, DenseNetwork, InferenceEngine, NormalizedDigit, PipelineConfig, ThresholdMode,
};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (or defaults) with command-line overrides applied, validated.
pub fn build_config(args: &CliArgs) -> Result<PipelineConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(side) = args.canvas_side {
        config.canvas_side = side;
    }
    if let Some(extent) = args.digit_extent {
        config.digit_extent = extent;
    }
    if let Some(t) = args.polarity_threshold {
        config.polarity_threshold = t;
    }
    if let Some(scope) = args.polarity_scope {
        config.polarity_scope = scope;
    }
    if args.no_binarize {
        config.binarize = false;
    }
    if let Some(c) = args.fixed_threshold {
        config.threshold = ThresholdMode::Fixed(c);
    }
    if let Some(method) = args.grayscale {
        config.grayscale = method;
    }
    if let Some(filter) = args.filter {
        config.filter = filter;
    }
    if let Some(layout) = args.layout {
        config.input_layout = layout;
    }
    if let Some(precision) = args.precision {
        config.display_precision = precision;
    }

    config.validate()?;
    Ok(config)
}

/// Grid cells print as integers once binarized, otherwise with two decimals.
fn grid_decimals(config: &PipelineConfig) -> usize {
    if config.binarize { 0 } else { 2 }
}

pub fn format_normalized(digit: &NormalizedDigit, config: &PipelineConfig) -> Result<String, AppError> {
    let trace = &digit.trace;
    let mut out = format!(
        "Input shape: {} x {}\nScaled: {} x {}, padding t/b/l/r = {}/{}/{}/{}\nPolarity: mean={:.3} inverted={}\n",
        trace.source_height,
        trace.source_width,
        trace.scaled_rows,
        trace.scaled_cols,
        trace.padding.top,
        trace.padding.bottom,
        trace.padding.left,
        trace.padding.right,
        trace.polarity.mean,
        trace.polarity.inverted,
    );
    if let Some(cutoff) = trace.binarize_cutoff {
        out.push_str(&format!("Binarize cutoff: {:.4}\n", cutoff));
    }
    out.push_str(&digit.render(grid_decimals(config))?);
    out.push('\n');
    Ok(out)
}

pub fn format_classification(
    result: &Classification,
    config: &PipelineConfig,
) -> Result<String, AppError> {
    let mut out = format_normalized(&result.digit, config)?;
    out.push_str(&format!(
        "Probabilities: {}\nPrediction: {} (score {:.*})\n",
        result.prediction.format_scores(config.display_precision),
        result.prediction.class,
        config.display_precision,
        result.prediction.confidence()
    ));
    Ok(out)
}

fn process_single_file(
    input: &Path,
    config: &PipelineConfig,
    engine: Option<&dyn InferenceEngine>,
    json: bool,
) -> Result<(), AppError> {
    match engine {
        Some(engine) => {
            let result = digitprep::classify_path(input, config, engine)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_classification(&result, config)?);
            }
        }
        None => {
            let digit = digitprep::normalize_path(input, config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&digit)?);
            } else {
                print!("{}", format_normalized(&digit, config)?);
            }
        }
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let config = build_config(&args)?;

    let model = match &args.model {
        Some(path) => Some(DenseNetwork::load_json(path).map_err(AppError::from)?),
        None => None,
    };
    let engine = model.as_ref().map(|m| m as &dyn InferenceEngine);

    match (&args.input, &args.input_dir) {
        (Some(_), Some(_)) => Err(AppError::Conflict {
            first: "--input".to_string(),
            second: "--input-dir".to_string(),
        }
        .into()),
        (None, None) => Err(AppError::MissingArgument {
            arg: "--input or --input-dir".to_string(),
        }
        .into()),
        (Some(input), None) => {
            process_single_file(input, &config, engine, args.json)?;
            info!("Successfully processed: {:?}", input);
            Ok(())
        }
        (None, Some(input_dir)) => {
            info!("Starting batch processing from directory: {:?}", input_dir);
            let report =
                digitprep::process_directory(input_dir, &config, engine, args.continue_on_error)
                    .map_err(AppError::from)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for entry in &report.entries {
                    match (&entry.class, &entry.error) {
                        (_, Some(err)) => println!("{}: error: {}", entry.path.display(), err),
                        (Some(class), None) => println!("{}: {}", entry.path.display(), class),
                        (None, None) => println!("{}: ok", entry.path.display()),
                    }
                }
                println!(
                    "Processed: {}, Skipped: {}, Errors: {}",
                    report.processed, report.skipped, report.errors
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use digitprep::{PolarityScope, Prediction, RawImage};

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::parse_from([
            "digitprep",
            "--input",
            "x.png",
            "--digit-extent",
            "20",
            "--polarity-threshold",
            "0.3",
            "--polarity-scope",
            "canvas",
            "--no-binarize",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.digit_extent, 20);
        assert_eq!(config.polarity_threshold, 0.3);
        assert_eq!(config.polarity_scope, PolarityScope::Canvas);
        assert!(!config.binarize);
        assert_eq!(config.canvas_side, 28);
    }

    #[test]
    fn invalid_overrides_fail_validation() {
        let args = CliArgs::parse_from(["digitprep", "--digit-extent", "40"]);
        assert!(matches!(
            build_config(&args),
            Err(AppError::Pipeline(digitprep::Error::InvalidArgument { .. }))
        ));
    }

    #[test]
    fn config_file_is_overlaid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        std::fs::write(&path, r#"{"digit_extent": 20, "display_precision": 3}"#).unwrap();
        let args = CliArgs::parse_from([
            "digitprep",
            "--config",
            path.to_str().unwrap(),
            "--fixed-threshold",
            "0.4",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.digit_extent, 20);
        assert_eq!(config.display_precision, 3);
        assert_eq!(config.threshold, ThresholdMode::Fixed(0.4));
    }

    #[test]
    fn text_report_shows_shape_and_grid() {
        let config = PipelineConfig {
            canvas_side: 4,
            digit_extent: 4,
            ..Default::default()
        };
        let photo = RawImage::from_raw(2, 4, 3, vec![0; 24]).unwrap();
        let digit = digitprep::normalize_image(&photo, &config).unwrap();
        let text = format_normalized(&digit, &config).unwrap();
        assert!(text.starts_with("Input shape: 4 x 2\n"));
        assert!(text.contains("Binarize cutoff: 0.0000"));
        assert!(text.ends_with("0 0 0 0\n0 0 0 0\n0 0 0 0\n0 0 0 0\n"));
    }

    #[test]
    fn classification_report_ends_with_winning_score() {
        let config = PipelineConfig {
            canvas_side: 4,
            digit_extent: 4,
            ..Default::default()
        };
        let photo = RawImage::from_raw(2, 4, 3, vec![0; 24]).unwrap();
        let result = Classification {
            digit: digitprep::normalize_image(&photo, &config).unwrap(),
            prediction: Prediction {
                class: 7,
                scores: vec![0.0, 0.016, 0.0, 0.0, 0.0, 0.0, 0.0, 0.98, 0.0, 0.004],
            },
        };
        let text = format_classification(&result, &config).unwrap();
        assert!(text.contains(
            "Probabilities: [0.00, 0.02, 0.00, 0.00, 0.00, 0.00, 0.00, 0.98, 0.00, 0.00]\n"
        ));
        assert!(text.ends_with("Prediction: 7 (score 0.98)\n"));
    }
}
