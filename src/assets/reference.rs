use std::path::Path;

use anyhow::Context;

use crate::canvas::surface::Canvas;
use crate::foundation::error::{PolyfitError, PolyfitResult};

/// The target image every candidate is scored against.
///
/// Holds the reference normalized to the canvas format, plus the size of the decoded source.
#[derive(Clone, Debug)]
pub struct ReferenceImage {
    canvas: Canvas,
    source_width: u32,
    source_height: u32,
}

impl ReferenceImage {
    /// Decode the image at `path` and normalize it to a `width x height` canvas.
    ///
    /// The decoded image must already be exactly `width x height`; no resampling happens.
    #[tracing::instrument(skip_all, fields(width = width, height = height))]
    pub fn load(path: impl AsRef<Path>, width: u32, height: u32) -> PolyfitResult<Self> {
        let path = path.as_ref();
        let img = decode_path(path)
            .map_err(|e| PolyfitError::decode(format!("'{}': {e:#}", path.display())))?;
        let reference = Self::from_dynamic(&img, width, height)?;
        tracing::debug!(
            path = %path.display(),
            color = ?img.color(),
            "reference image normalized"
        );
        Ok(reference)
    }

    /// Decode encoded image bytes and normalize them.
    pub fn from_bytes(bytes: &[u8], width: u32, height: u32) -> PolyfitResult<Self> {
        let img = image::load_from_memory(bytes)
            .context("decode image from memory")
            .map_err(|e| PolyfitError::decode(format!("{e:#}")))?;
        Self::from_dynamic(&img, width, height)
    }

    /// Normalize an already decoded image.
    ///
    /// RGBA8 pixels with zero alpha become black; all other RGBA8 pixels keep their RGB bytes
    /// verbatim with alpha dropped. RGB8 is copied. Every other layout is rejected.
    pub fn from_dynamic(img: &image::DynamicImage, width: u32, height: u32) -> PolyfitResult<Self> {
        let (source_width, source_height) = (img.width(), img.height());
        if (source_width, source_height) != (width, height) {
            return Err(PolyfitError::validation(format!(
                "reference image is {source_width}x{source_height}, evaluator expects {width}x{height}"
            )));
        }

        let canvas = match img {
            image::DynamicImage::ImageRgba8(buf) => {
                let mut canvas = Canvas::new(width, height)?;
                for (y, row) in buf.as_raw().chunks_exact(width as usize * 4).enumerate() {
                    let dst = canvas.row_mut(y as u32);
                    for (d, s) in dst.chunks_exact_mut(4).zip(row.chunks_exact(4)) {
                        if s[3] == 0 {
                            d[..3].fill(0);
                        } else {
                            d[..3].copy_from_slice(&s[..3]);
                        }
                    }
                }
                canvas
            }
            image::DynamicImage::ImageRgb8(buf) => Canvas::from_rgb8(width, height, buf.as_raw())?,
            other => {
                return Err(PolyfitError::unsupported_format(format!(
                    "reference decodes to {:?}; only 8-bit RGB and RGBA are supported",
                    other.color()
                )));
            }
        };

        Ok(Self {
            canvas,
            source_width,
            source_height,
        })
    }

    /// Wrap an existing canvas as a reference.
    pub fn from_canvas(canvas: Canvas) -> Self {
        let (source_width, source_height) = (canvas.width(), canvas.height());
        Self {
            canvas,
            source_width,
            source_height,
        }
    }

    /// The normalized reference canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Size of the decoded source image before normalization.
    pub fn source_dimensions(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    /// Consume into the normalized canvas.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

fn decode_path(path: &Path) -> anyhow::Result<image::DynamicImage> {
    let reader = image::ImageReader::open(path).context("open image file")?;
    let reader = reader
        .with_guessed_format()
        .context("sniff image format")?;
    reader.decode().context("decode image")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/reference.rs"]
mod tests;
