//! Read a results file from disk and turn it into time blocks.

use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::block_parser::parse_results;
use super::types::{LoadError, TimeBlock};

/// Load and parse a results file.
///
/// # Parameters
///
/// * `path` - Path to the results file
///
/// # Returns
///
/// `Ok(blocks)` in file order, or a `LoadError` when the file cannot be read
/// or contains no time sections.
pub fn load_time_blocks(path: &Path) -> Result<Vec<TimeBlock>, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound(path.display().to_string()),
        _ => LoadError::FileRead(format!("{}: {}", path.display(), e)),
    })?;

    parse_results(&content)
}

/// Load a results file, reporting failures instead of returning them.
///
/// Returns an empty list when the file is missing, unreadable or has no
/// time sections.
pub fn process_data(path: &Path) -> Vec<TimeBlock> {
    match load_time_blocks(path) {
        Ok(blocks) => {
            info!("Loaded {} time blocks from {}", blocks.len(), path.display());
            blocks
        }
        Err(e @ LoadError::NoTimeSections) => {
            warn!("{}", e);
            Vec::new()
        }
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}
