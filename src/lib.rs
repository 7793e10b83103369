#![doc = r#"
digitprep — normalization of handwritten-digit photos for MNIST-style classifiers.

This crate turns an arbitrary photograph of a single handwritten digit into the exact
tensor a pre-trained digit classifier expects (28x28, one channel, bright digit on a dark
background, values in [0, 1]) and reduces the classifier's ten scores to a predicted digit.
It powers the `digitprep` CLI and can be embedded in your own Rust applications.

Pipeline
--------
Every request runs the same linear sequence of pure stages:

1. grayscale (weighted luminance `0.2989 R + 0.5870 G + 0.1140 B`)
2. aspect-preserving bilinear resize of the long side to `digit_extent`
3. intensity normalization to [0, 1]
4. polarity correction (complement when the mean exceeds `polarity_threshold`)
5. centered zero padding into a `canvas_side` square
6. optional binarization at the lower median (or a fixed cutoff)
7. row-major assembly into `[1, S*S]` or `[1, S, S, 1]`

With the default `PolarityScope::Region`, step 4 runs on the resized digit before
padding. `PolarityScope::Canvas` runs it after padding, over the whole canvas.

Add dependency
--------------
```toml
[dependencies]
digitprep = { version = "0.1", features = ["full"] }
```

Quick start: normalize a decoded photo
--------------------------------------
```rust
use digitprep::{normalize_image, PipelineConfig, RawImage};

fn main() -> digitprep::Result<()> {
    // 1 px wide, 2 px tall, white, interleaved RGB
    let photo = RawImage::from_raw(1, 2, 3, vec![255; 6])?;
    let digit = normalize_image(&photo, &PipelineConfig::default())?;

    assert_eq!(digit.tensor.shape(), &[1, 784]);
    println!("{}", digit.render(0)?);
    Ok(())
}
```

Classify with an injected engine
--------------------------------
Any type implementing [`InferenceEngine`] can be passed in; the bundled
[`DenseNetwork`] loads a JSON-described feed-forward network.

```rust,no_run
use std::path::Path;
use digitprep::{classify_path, DenseNetwork, PipelineConfig};

fn main() -> digitprep::Result<()> {
    let model = DenseNetwork::load_json(Path::new("models/mnist_dense.json"))?;
    let config = PipelineConfig {
        digit_extent: 20,
        ..Default::default()
    };

    let result = classify_path(Path::new("photos/seven.jpg"), &config, &model)?;
    println!(
        "digit={} scores={}",
        result.prediction.class,
        result.prediction.format_scores(config.display_precision)
    );
    Ok(())
}
```

Error handling
--------------
All public functions return `digitprep::Result<T>`; match on `digitprep::Error` to
handle specific cases.

```rust
use digitprep::{normalize_image, Error, PipelineConfig, RawImage};

let empty = RawImage::from_raw(0, 10, 3, vec![]).unwrap();
match normalize_image(&empty, &PipelineConfig::default()) {
    Err(Error::DegenerateImage { height, width }) => assert_eq!((height, width), (10, 0)),
    other => panic!("unexpected: {other:?}"),
}
```

Feature flags
-------------
- `decode`: image file decoding via the `image` crate (enabled by default).
- `full`: enables a complete feature set for typical end-to-end workflows.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — pipeline stages, parameters and the inference boundary.
- [`types`] — configuration enums (e.g. `PolarityScope`, `ThresholdMode`, `InputLayout`).
- [`io`] — image decoding and the JSON network loader.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::image::{Grid, RawImage};
pub use crate::core::params::PipelineConfig;
pub use error::{Error, Result};
pub use types::{GrayscaleMethod, InputLayout, PolarityScope, ResampleFilter, ThresholdMode};

// Pipeline results
pub use crate::core::inference::{InferenceEngine, Prediction, ScoreVector};
pub use crate::core::processing::pipeline::{
    Classification, NormalizationTrace, NormalizedDigit, render_grid,
};
pub use crate::core::processing::tensor::InputTensor;

// Engines
pub use io::model::{DenseNetwork, ModelError};

// High-level API re-exports
pub use api::{BatchEntry, BatchReport, classify_image, normalize_image};
#[cfg(feature = "decode")]
pub use api::{classify_path, iterate_images, normalize_path, process_directory};
