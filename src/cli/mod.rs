//! Command Line Interface (CLI) layer for digitprep.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-photo and directory
//! flows. It wires user-provided options to the library functionality
//! exposed via `digitprep::api`.
//!
//! If you are embedding digitprep into another application, prefer using
//! the high-level `digitprep::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
