use clap::Parser;
use std::path::PathBuf;

use digitprep::{GrayscaleMethod, InputLayout, PolarityScope, ResampleFilter};

#[derive(Parser, Debug)]
#[command(name = "digitprep", version, about = "Handwritten digit photo normalizer and classifier")]
pub struct CliArgs {
    /// Input photo (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory of photos (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// JSON network description; without it only normalization runs
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// JSON pipeline configuration; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Side of the square canvas the model expects
    #[arg(long)]
    pub canvas_side: Option<usize>,

    /// Long-side extent of the digit before padding
    #[arg(long)]
    pub digit_extent: Option<usize>,

    /// Mean brightness above which the image is inverted, in (0, 1)
    #[arg(long)]
    pub polarity_threshold: Option<f32>,

    /// Cells that feed the polarity mean (region or canvas)
    #[arg(long, value_enum)]
    pub polarity_scope: Option<PolarityScope>,

    /// Skip binarization and keep continuous intensities
    #[arg(long, default_value_t = false)]
    pub no_binarize: bool,

    /// Binarize at a constant cutoff instead of the median
    #[arg(long)]
    pub fixed_threshold: Option<f32>,

    /// Grayscale conversion (weighted or average)
    #[arg(long, value_enum)]
    pub grayscale: Option<GrayscaleMethod>,

    /// Resampling filter (bilinear or lanczos3)
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Tensor layout when no model is given (flat or image)
    #[arg(long, value_enum)]
    pub layout: Option<InputLayout>,

    /// Decimal places for displayed scores
    #[arg(long)]
    pub precision: Option<usize>,

    /// Print a JSON report instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable logging (RUST_LOG overrides the level)
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: keep going when a photo fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,
}
