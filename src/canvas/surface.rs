use crate::foundation::core::{PixelFormat, Rgb8};
use crate::foundation::error::{PolyfitError, PolyfitResult};

/// Fixed-size raster with a fixed pixel format and row stride.
///
/// The buffer holds `height * stride` bytes. Each pixel occupies four bytes laid out as
/// `r, g, b, x`; the `x` padding byte is always zero and never compared. A fresh canvas is black.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Canvas {
    /// Allocate a black canvas with the minimal stride for `width`.
    pub fn new(width: u32, height: u32) -> PolyfitResult<Self> {
        let stride = min_stride(width, PixelFormat::Rgb24)?;
        Self::with_stride(width, height, stride)
    }

    /// Allocate a black canvas with an explicit row stride in bytes.
    ///
    /// `stride` must cover a full row of pixels and be a multiple of four.
    pub fn with_stride(width: u32, height: u32, stride: usize) -> PolyfitResult<Self> {
        if width == 0 || height == 0 {
            return Err(PolyfitError::validation(format!(
                "canvas dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let format = PixelFormat::Rgb24;
        let min = min_stride(width, format)?;
        if stride < min {
            return Err(PolyfitError::validation(format!(
                "canvas stride {stride} is smaller than one row ({min} bytes)"
            )));
        }
        if !stride.is_multiple_of(4) {
            return Err(PolyfitError::validation(format!(
                "canvas stride {stride} is not 4-byte aligned"
            )));
        }
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| PolyfitError::validation("canvas byte size overflows usize"))?;

        Ok(Self {
            width,
            height,
            stride,
            format,
            data: vec![0; len],
        })
    }

    /// Build a canvas from tightly packed RGB8 bytes (`width * height * 3`).
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> PolyfitResult<Self> {
        let mut canvas = Self::new(width, height)?;
        let expected = (width as usize) * (height as usize) * 3;
        if rgb.len() != expected {
            return Err(PolyfitError::validation(format!(
                "rgb8 buffer has {} bytes, expected {expected}",
                rgb.len()
            )));
        }
        let row_len = width as usize * 3;
        for (y, src) in rgb.chunks_exact(row_len).enumerate() {
            let dst = canvas.row_mut(y as u32);
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(3)) {
                d[..3].copy_from_slice(s);
            }
        }
        Ok(canvas)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including any trailing padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format of the buffer.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw buffer, `height * stride` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The `width * 4` meaningful bytes of row `y` (row padding excluded).
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let len = self.row_bytes();
        &mut self.data[start..start + len]
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = y as usize * self.stride + x as usize * 4;
        let px = &self.data[off..off + 3];
        Some(Rgb8::new(px[0], px[1], px[2]))
    }

    /// Overwrite the color at `(x, y)`; writes outside the canvas are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgb8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let off = y as usize * self.stride + x as usize * 4;
        self.data[off..off + 3].copy_from_slice(&[color.r, color.g, color.b]);
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb8) {
        for y in 0..self.height {
            for px in self.row_mut(y).chunks_exact_mut(4) {
                px[0] = color.r;
                px[1] = color.g;
                px[2] = color.b;
            }
        }
    }

    /// Reset every byte, padding included, to zero (black).
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copy the color bytes out as a tightly packed RGB8 buffer (`width * height * 3`).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for y in 0..self.height {
            for px in self.row(y).chunks_exact(4) {
                out.extend_from_slice(&px[..3]);
            }
        }
        out
    }

    /// Whether `other` shares this canvas' format, size and stride.
    pub fn same_geometry(&self, other: &Canvas) -> bool {
        self.format == other.format
            && self.width == other.width
            && self.height == other.height
            && self.stride == other.stride
    }

    fn row_bytes(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }
}

fn min_stride(width: u32, format: PixelFormat) -> PolyfitResult<usize> {
    (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or_else(|| PolyfitError::validation("canvas row size overflows usize"))
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/surface.rs"]
mod tests;
