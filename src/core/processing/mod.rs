//! Normalization stages, in pipeline order: grayscale, resize, padding,
//! normalize, polarity, binarize and tensor assembly, plus the `pipeline`
//! that runs them for one photo.
pub mod binarize;
pub mod grayscale;
pub mod normalize;
pub mod padding;
pub mod pipeline;
pub mod polarity;
pub mod resize;
pub mod tensor;
