//! Results file parsing.
//!
//! Provides functionality for:
//! - Splitting a results file into `# Tempo = ...` sections
//! - Extracting (position, displacement) rows per section

pub mod block_parser;
pub mod loader;
pub mod types;

pub use loader::process_data;
pub use types::{DataPoint, TimeBlock};
