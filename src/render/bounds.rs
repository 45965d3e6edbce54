//! Global axis limits shared by every frame of an animation.

use crate::results::TimeBlock;

/// Axis limits in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisBounds {
    /// Compute limits that keep the axes fixed across all blocks.
    ///
    /// The x range spans every position of every block. The y range is
    /// symmetric around zero: `amplification` times the largest absolute
    /// displacement. Returns `None` if no block has any point.
    pub fn from_blocks(blocks: &[TimeBlock], amplification: f64) -> Option<Self> {
        let (x_min, x_max) = blocks
            .iter()
            .filter_map(TimeBlock::position_range)
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))?;

        let y_max = blocks.iter().map(TimeBlock::max_abs_displacement).fold(0.0, f64::max) * amplification;

        Some(Self {
            x_min,
            x_max,
            y_min: -y_max,
            y_max,
        })
    }

    /// Whether every limit is a finite number. Huge displacements can
    /// overflow to infinity once amplified.
    pub fn is_finite(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max].iter().all(|v| v.is_finite())
    }

    /// Same limits with zero-width ranges opened up by 1.0 on each side,
    /// so a chart can be built from them.
    pub fn widened(self) -> Self {
        let (x_min, x_max) = widen(self.x_min, self.x_max);
        let (y_min, y_max) = widen(self.y_min, self.y_max);
        Self { x_min, x_max, y_min, y_max }
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min { (min, max) } else { (min - 1.0, max + 1.0) }
}
