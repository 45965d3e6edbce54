//! GIF animation output.
//!
//! An `AnimationRenderer` owns the encoder and plot settings for one
//! animation. It is created once, fed one frame per time block, and
//! finalised with `finish`, which writes the GIF trailer.

use anyhow::{Context, Result, ensure};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};

use super::bounds::AxisBounds;
use super::frame::draw_frame;
use crate::config::AnimationConfig;
use crate::results::TimeBlock;

/// Quantizer speed passed to the GIF encoder (1 = best quality, 30 = fastest).
const ENCODER_SPEED: i32 = 10;

/// Renders time blocks into a looping GIF written to `W`.
pub struct AnimationRenderer<'a, W: Write> {
    encoder: GifEncoder<W>,
    config: &'a AnimationConfig,
    plot_area: AxisBounds,
    delay: Delay,
    frame_count: usize,
}

impl<'a, W: Write> AnimationRenderer<'a, W> {
    /// Create a renderer writing to `writer`.
    ///
    /// # Parameters
    ///
    /// * `writer` - Destination of the GIF stream
    /// * `config` - Frame size, delay and labels
    /// * `bounds` - Axis limits used for every frame
    pub fn new(writer: W, config: &'a AnimationConfig, bounds: AxisBounds) -> Result<Self> {
        let mut encoder = GifEncoder::new_with_speed(writer, ENCODER_SPEED);
        encoder.set_repeat(Repeat::Infinite).context("Failed to enable GIF looping")?;

        Ok(Self {
            encoder,
            config,
            plot_area: bounds.widened(),
            delay: Delay::from_numer_denom_ms(config.frame_delay_ms, 1),
            frame_count: 0,
        })
    }

    /// Draw `block` and append it as the next frame.
    pub fn render_frame(&mut self, block: &TimeBlock) -> Result<()> {
        let image = draw_frame(block, &self.plot_area, self.config)?;
        self.push_frame(image)
    }

    /// Append an already rendered image as the next frame.
    pub fn push_frame(&mut self, image: RgbaImage) -> Result<()> {
        ensure!(
            image.dimensions() == (self.config.width, self.config.height),
            "Frame is {}x{}, expected {}x{}",
            image.width(),
            image.height(),
            self.config.width,
            self.config.height
        );

        self.encoder
            .encode_frame(Frame::from_parts(image, 0, 0, self.delay))
            .context("GIF encoder rejected frame")?;
        self.frame_count += 1;
        Ok(())
    }

    /// Finalise the GIF stream and return the number of frames written.
    pub fn finish(self) -> usize {
        // Dropping the encoder writes the trailer.
        drop(self.encoder);
        self.frame_count
    }
}

/// Render every block into the configured output file.
///
/// Does nothing if `blocks` contains no data points. Fails without touching
/// the output file if the axis limits overflow.
pub fn create_animation(blocks: &[TimeBlock], config: &AnimationConfig) -> Result<()> {
    let Some(bounds) = AxisBounds::from_blocks(blocks, config.amplification) else {
        return Ok(());
    };
    ensure!(
        bounds.is_finite(),
        "Axis limits are not finite (x: {}..{}, y: {}..{}); lower the amplification or check the displacement values",
        bounds.x_min,
        bounds.x_max,
        bounds.y_min,
        bounds.y_max
    );

    info!(
        "Saving GIF with {} frames ({} ms per frame), please wait...",
        blocks.len(),
        config.frame_delay_ms
    );

    let output = &config.output_path;
    let file = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let mut renderer = AnimationRenderer::new(&mut writer, config, bounds)?;
    for block in blocks {
        renderer
            .render_frame(block)
            .with_context(|| format!("Failed to render frame for time {:.6}", block.time))?;
    }
    let frame_count = renderer.finish();

    writer.flush().with_context(|| format!("Failed to write {}", output.display()))?;
    info!("GIF saved as: {} ({} frames)", output.display(), frame_count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::DataPoint;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgba};
    use std::io::Cursor;

    fn small_config() -> AnimationConfig {
        AnimationConfig {
            width: 8,
            height: 4,
            frame_delay_ms: 50,
            ..AnimationConfig::default()
        }
    }

    fn bounds() -> AxisBounds {
        AxisBounds {
            x_min: 0.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
        }
    }

    #[test]
    fn test_frames_are_encoded_in_order_with_delay() {
        let config = small_config();
        let mut bytes = Vec::new();

        let mut renderer = AnimationRenderer::new(&mut bytes, &config, bounds()).unwrap();
        for shade in [0u8, 128, 255] {
            renderer.push_frame(RgbaImage::from_pixel(8, 4, Rgba([shade, shade, shade, 255]))).unwrap();
        }
        assert_eq!(renderer.finish(), 3);

        // NETSCAPE2.0 application extension carries the loop count
        assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

        let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 3);

        for frame in &frames {
            let (numer, denom) = frame.delay().numer_denom_ms();
            assert_eq!(numer as f64 / denom as f64, 50.0);
            assert_eq!(frame.buffer().dimensions(), (8, 4));
        }

        let first = frames[0].buffer().get_pixel(0, 0);
        let last = frames[2].buffer().get_pixel(0, 0);
        assert!(first[0] < 20);
        assert!(last[0] > 235);
    }

    #[test]
    fn test_renders_blocks_to_looping_gif() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnimationConfig {
            output_path: dir.path().join("wave.gif"),
            width: 200,
            height: 100,
            frame_delay_ms: 50,
            ..AnimationConfig::default()
        };
        let blocks: Vec<TimeBlock> = [0.0, 0.1, 0.2]
            .iter()
            .map(|&time| {
                let points = (0..=10).map(|i| DataPoint::new(i as f64, 0.01 * (i as f64 - time * 10.0).sin())).collect();
                TimeBlock::new(time, points)
            })
            .collect();

        create_animation(&blocks, &config).unwrap();

        let bytes = std::fs::read(&config.output_path).unwrap();
        assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

        let frames = GifDecoder::new(Cursor::new(bytes)).unwrap().into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), blocks.len());
        for frame in &frames {
            let (numer, denom) = frame.delay().numer_denom_ms();
            assert_eq!(numer as f64 / denom as f64, 50.0);
            assert_eq!(frame.buffer().dimensions(), (200, 100));
        }
    }

    #[test]
    fn test_render_frame_counts_frames() {
        let config = AnimationConfig {
            width: 120,
            height: 80,
            ..small_config()
        };
        let block = TimeBlock::new(0.5, vec![DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 0.3)]);
        let mut bytes = Vec::new();

        let mut renderer = AnimationRenderer::new(&mut bytes, &config, bounds()).unwrap();
        renderer.render_frame(&block).unwrap();
        renderer.render_frame(&block).unwrap();
        assert_eq!(renderer.finish(), 2);
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_overflowing_bounds_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnimationConfig {
            output_path: dir.path().join("out.gif"),
            ..small_config()
        };
        let blocks = vec![TimeBlock::new(0.0, vec![DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 1e308)])];

        let err = create_animation(&blocks, &config).unwrap_err();
        assert!(err.to_string().contains("not finite"));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_wrong_frame_size_is_rejected() {
        let config = small_config();
        let mut bytes = Vec::new();

        let mut renderer = AnimationRenderer::new(&mut bytes, &config, bounds()).unwrap();
        assert!(renderer.push_frame(RgbaImage::new(4, 4)).is_err());
        assert_eq!(renderer.finish(), 0);
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnimationConfig {
            output_path: dir.path().join("out.gif"),
            ..small_config()
        };

        create_animation(&[], &config).unwrap();
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_unwritable_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnimationConfig {
            output_path: dir.path().join("missing_dir").join("out.gif"),
            ..small_config()
        };
        let blocks = vec![TimeBlock::new(0.0, vec![DataPoint::new(0.0, 0.1)])];

        let err = create_animation(&blocks, &config).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to create"));
    }
}
