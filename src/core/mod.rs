//! Core building blocks: pixel containers, pipeline parameters, the
//! normalization stages and the classifier boundary. These are the primitives
//! consumed by the high-level `api` module.
pub mod image;
pub mod inference;
pub mod params;
pub mod processing;
