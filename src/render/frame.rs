//! Draw a single time block as a line plot.

use anyhow::{Context, Result};
use image::{DynamicImage, RgbImage, RgbaImage};
use plotters::prelude::*;

use super::bounds::AxisBounds;
use crate::config::AnimationConfig;
use crate::results::TimeBlock;

const ZERO_LINE_COLOR: RGBColor = RGBColor(128, 128, 128);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);
const AXIS_GRID_COLOR: RGBColor = RGBColor(190, 190, 190);

/// Render `block` into an RGBA image of the configured size.
///
/// `area` must have non-zero width on both axes (see `AxisBounds::widened`).
pub fn draw_frame(block: &TimeBlock, area: &AxisBounds, config: &AnimationConfig) -> Result<RgbaImage> {
    let (width, height) = (config.width, config.height);
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(area.x_min..area.x_max, area.y_min..area.y_max)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .bold_line_style(AXIS_GRID_COLOR.stroke_width(1))
            .light_line_style(GRID_COLOR.stroke_width(1))
            .draw()?;

        chart.draw_series(LineSeries::new(
            [(area.x_min, 0.0), (area.x_max, 0.0)],
            ZERO_LINE_COLOR.stroke_width(1),
        ))?;

        chart.draw_series(LineSeries::new(
            block.points.iter().map(|p| (p.position, p.displacement)),
            BLUE.stroke_width(2),
        ))?;

        // Upper-left corner of the plot area
        let label_x = area.x_min + 0.05 * (area.x_max - area.x_min);
        let label_y = area.y_max - 0.05 * (area.y_max - area.y_min);
        chart.draw_series(std::iter::once(Text::new(
            time_label(block.time),
            (label_x, label_y),
            ("sans-serif", 18).into_font(),
        )))?;

        root.present()?;
    }

    let frame = RgbImage::from_raw(width, height, pixels).context("Frame buffer does not match frame size")?;
    Ok(DynamicImage::ImageRgb8(frame).into_rgba8())
}

/// Text shown in each frame for the block's simulation time.
pub fn time_label(time: f64) -> String {
    format!("Time = {:.6} s", time)
}
