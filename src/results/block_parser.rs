//! Split a results file into time sections and extract their data rows.
//!
//! Expected layout:
//!
//! ```text
//! # Tempo = 0.000000
//! 0.00   0.0000
//! 0.01   0.0012
//! # Tempo = 0.000500
//! 0.00   0.0000
//! ...
//! ```
//!
//! Each `# Tempo = <float>` header opens a section that runs until the next
//! `# Tempo =` line or end of file. Anything after `#` inside a section is a comment.

use log::debug;

use super::types::{DataPoint, LoadError, TimeBlock};

/// Marker that opens a new time section.
pub const TIME_MARKER: &str = "# Tempo =";

/// Unparsed section: the header label and the lines that follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection<'a> {
    pub label: &'a str,
    pub lines: Vec<&'a str>,
}

/// Lazy iterator over the time sections of a results file.
///
/// Text before the first header is skipped.
pub struct TimeSections<'a> {
    lines: std::iter::Peekable<std::str::Lines<'a>>,
}

impl<'a> TimeSections<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines().peekable(),
        }
    }
}

impl<'a> Iterator for TimeSections<'a> {
    type Item = RawSection<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let label = loop {
            let line = self.lines.next()?;
            if let Some(label) = parse_time_header(line) {
                break label;
            }
        };

        let mut lines = Vec::new();
        while let Some(line) = self.lines.next_if(|line| parse_time_header(line).is_none()) {
            lines.push(line);
        }

        Some(RawSection { label, lines })
    }
}

/// Extract the label text following `TIME_MARKER` on a header line.
///
/// Any marker line counts as a header and ends the current section, even when
/// its label is malformed; `parse_time_label` decides whether the label is usable.
pub fn parse_time_header(line: &str) -> Option<&str> {
    Some(line.trim_start().strip_prefix(TIME_MARKER)?.trim())
}

/// Parse a header label as a simulation time.
///
/// Only a single finite float literal (digits, `.`, exponent, sign) is accepted.
pub fn parse_time_label(label: &str) -> Option<f64> {
    let is_literal = !label.is_empty() && label.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_literal {
        return None;
    }
    label.parse::<f64>().ok().filter(|time| time.is_finite())
}

/// Parse a data row into a `DataPoint`.
///
/// Columns are whitespace separated and only the first two are used. Rows
/// with fewer than two columns, non-numeric values, NaN or infinities yield
/// `None`. Each row is judged on its own, so extra columns never drop a block.
pub fn parse_row(line: &str) -> Option<DataPoint> {
    let data = line.find('#').map_or(line, |pos| &line[..pos]);
    let mut columns = data.split_whitespace();

    let position = parse_value(columns.next()?)?;
    let displacement = parse_value(columns.next()?)?;

    Some(DataPoint::new(position, displacement))
}

fn parse_value(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Turn a raw section into a `TimeBlock`.
///
/// Sections with an unreadable label or without any valid row are dropped.
pub fn parse_section(section: RawSection<'_>) -> Option<TimeBlock> {
    let Some(time) = parse_time_label(section.label) else {
        debug!("Skipping section with invalid time label '{}'", section.label);
        return None;
    };

    let points: Vec<DataPoint> = section.lines.iter().filter_map(|line| parse_row(line)).collect();
    if points.is_empty() {
        debug!("Skipping section at time {} without numeric rows", time);
        return None;
    }

    Some(TimeBlock::new(time, points))
}

/// Parse the full contents of a results file.
///
/// # Returns
///
/// The time blocks in file order, or `LoadError::NoTimeSections` if the text
/// contains no header at all.
pub fn parse_results(content: &str) -> Result<Vec<TimeBlock>, LoadError> {
    let mut sections = TimeSections::new(content).peekable();
    if sections.peek().is_none() {
        return Err(LoadError::NoTimeSections);
    }

    Ok(sections.filter_map(parse_section).collect())
}
