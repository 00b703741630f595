use crate::PlotBytes;
use crate::options::PlotOptions;
use crate::plots::Plot;
use crate::render::RenderConfig;
use anyhow::{Result, anyhow, bail};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use plotters::prelude::*;
use std::path::Path;
use strum_macros::{Display, EnumString};
use tracing::debug;

/// Encoded output produced by [`render_plot`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Png,
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,
    Svg,
}

impl OutputFormat {
    /// Guess the format from a file extension (`.png`, `.jpg`, `.jpeg`, `.svg`)
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Preferred file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Draw a plot onto a fresh canvas and encode it
///
/// Raster formats are drawn into an RGB buffer with the Plotters bitmap
/// backend and then encoded with `image`. SVG is drawn directly with the
/// Plotters SVG backend.
pub fn render_plot<P: Plot + ?Sized>(
    plot: &P,
    data: &P::Data,
    options: &P::Options,
    format: OutputFormat,
    render_config: &mut RenderConfig,
) -> Result<PlotBytes> {
    let base = options.base();
    let width = base.width;
    let height = base.height;
    if width == 0 || height == 0 {
        bail!("plot size must be non-zero, got {width}x{height}");
    }

    let draw_start = std::time::Instant::now();
    let bytes = match format {
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                root.fill(&WHITE)
                    .map_err(|e| anyhow!("failed to fill plot background: {e}"))?;
                plot.draw(&root, data, options, render_config)?;
                root.present()
                    .map_err(|e| anyhow!("failed to finish SVG document: {e}"))?;
            }
            svg.into_bytes()
        }
        OutputFormat::Png | OutputFormat::Jpeg => {
            // RGB buffer (3 bytes per pixel); JPEG has no alpha channel
            let mut pixel_buffer = vec![255; width as usize * height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut pixel_buffer, (width, height))
                    .into_drawing_area();
                root.fill(&WHITE)
                    .map_err(|e| anyhow!("failed to fill plot background: {e}"))?;
                plot.draw(&root, data, options, render_config)?;
                root.present()
                    .map_err(|e| anyhow!("failed to present plotters buffer: {e}"))?;
            } // pixel_buffer is released by Plotters here
            debug!("Drawing took {:?}", draw_start.elapsed());
            encode_rgb(pixel_buffer, width, height, format)?
        }
    };

    debug!(
        "Rendered {}x{} {} ({} bytes) in {:?}",
        width,
        height,
        format,
        bytes.len(),
        draw_start.elapsed()
    );
    Ok(bytes)
}

/// Encode a raw RGB buffer as PNG or JPEG
pub fn encode_rgb(
    pixel_buffer: Vec<u8>,
    width: u32,
    height: u32,
    format: OutputFormat,
) -> Result<PlotBytes> {
    let img: RgbImage = image::ImageBuffer::from_vec(width, height, pixel_buffer)
        .ok_or_else(|| anyhow!("plot image buffer had unexpected size"))?;

    // Charts are mostly flat white; compressed output is a small fraction of raw
    let mut encoded_data = Vec::with_capacity(img.as_raw().len() / 8);
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut encoded_data)
                .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| anyhow!("failed to PNG encode plot: {e}"))?;
        }
        OutputFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut encoded_data, 90);
            encoder
                .encode(img.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| anyhow!("failed to JPEG encode plot: {e}"))?;
        }
        OutputFormat::Svg => bail!("SVG output is drawn as vectors, not encoded from pixels"),
    }

    Ok(encoded_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("out.png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path("out.JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_path("out.jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_path("dir/out.svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_path("out.gif"), None);
        assert_eq!(OutputFormat::from_path("out"), None);
    }

    #[test]
    fn test_format_display_round_trips_extension() {
        assert_eq!(OutputFormat::Jpeg.to_string(), "jpeg");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.to_string(), "png");
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_rgb(vec![255; 4 * 3 * 3], 4, 3, OutputFormat::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_jpeg_signature() {
        let bytes = encode_rgb(vec![128; 8 * 8 * 3], 8, 8, OutputFormat::Jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_rejects_wrong_buffer_size() {
        assert!(encode_rgb(vec![0; 5], 4, 3, OutputFormat::Png).is_err());
        assert!(encode_rgb(vec![0; 36], 4, 3, OutputFormat::Svg).is_err());
    }
}
