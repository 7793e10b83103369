//! I/O adapters around the pipeline: decoding image files into `RawImage`
//! (feature `decode`) and loading a JSON-described classifier.
#[cfg(feature = "decode")]
pub mod decode;
#[cfg(feature = "decode")]
pub use decode::{decode_bytes, decode_path, is_supported_image};

pub mod model;
pub use model::{Activation, DenseNetwork, ModelError, NetworkSpec};
