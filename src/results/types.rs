//! Type definitions for parsed simulation results.

/// One row of a results table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    /// Position along the bar.
    pub position: f64,
    /// Displacement at that position.
    pub displacement: f64,
}

impl DataPoint {
    pub fn new(position: f64, displacement: f64) -> Self {
        Self { position, displacement }
    }
}

/// Snapshot of the bar at a single simulation time.
///
/// Points are kept in the order they appear in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBlock {
    /// Simulation time taken from the `# Tempo = ...` header.
    pub time: f64,
    pub points: Vec<DataPoint>,
}

impl TimeBlock {
    pub fn new(time: f64, points: Vec<DataPoint>) -> Self {
        Self { time, points }
    }

    /// Smallest and largest position in the block, `None` when the block is empty.
    pub fn position_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.position;
        Some(self.points.iter().fold((first, first), |(min, max), p| (min.min(p.position), max.max(p.position))))
    }

    /// Largest absolute displacement in the block (0.0 for an empty block).
    pub fn max_abs_displacement(&self) -> f64 {
        self.points.iter().map(|p| p.displacement.abs()).fold(0.0, f64::max)
    }
}

/// Error type for results loading failures.
#[derive(Debug)]
pub enum LoadError {
    FileNotFound(String),
    FileRead(String),
    NoTimeSections,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "File '{}' not found", path),
            LoadError::FileRead(msg) => write!(f, "Failed to read file: {}", msg),
            LoadError::NoTimeSections => write!(f, "No '# Tempo = ...' markers found, check the file format"),
        }
    }
}

impl std::error::Error for LoadError {}
