use rayon::prelude::*;

use crate::canvas::surface::Canvas;
use crate::foundation::core::PixelFormat;
use crate::foundation::error::{PolyfitError, PolyfitResult};

/// Canvases with at least this many pixels are summed row-parallel.
const PARALLEL_MIN_PIXELS: u64 = 1 << 16;

/// Sum of absolute per-channel differences over R, G and B for every pixel.
///
/// Lower is better; `0.0` means the canvases agree on all three color channels. Padding bytes
/// are never read. Fails with [`PolyfitError::Incomparable`] when the canvases differ in
/// format, width, height or stride.
pub fn diff_canvases(reference: &Canvas, candidate: &Canvas) -> PolyfitResult<f64> {
    check_comparable(reference, candidate)?;

    let width = reference.width();
    let height = reference.height();
    let format = reference.format();
    let sum_row = |y: u32| row_abs_diff(reference.row(y), candidate.row(y), format);

    let total: u64 = if u64::from(width) * u64::from(height) >= PARALLEL_MIN_PIXELS {
        (0..height).into_par_iter().map(sum_row).sum()
    } else {
        (0..height).map(sum_row).sum()
    };
    Ok(total as f64)
}

fn check_comparable(a: &Canvas, b: &Canvas) -> PolyfitResult<()> {
    if a.same_geometry(b) {
        return Ok(());
    }
    if a.format() != b.format() {
        return Err(PolyfitError::incomparable(format!(
            "pixel format {:?} vs {:?}",
            a.format(),
            b.format()
        )));
    }
    if a.width() != b.width() {
        return Err(PolyfitError::incomparable(format!(
            "width {} vs {}",
            a.width(),
            b.width()
        )));
    }
    if a.height() != b.height() {
        return Err(PolyfitError::incomparable(format!(
            "height {} vs {}",
            a.height(),
            b.height()
        )));
    }
    if a.stride() != b.stride() {
        return Err(PolyfitError::incomparable(format!(
            "stride {} vs {}",
            a.stride(),
            b.stride()
        )));
    }
    Ok(())
}

fn row_abs_diff(a: &[u8], b: &[u8], format: PixelFormat) -> u64 {
    let bpp = format.bytes_per_pixel();
    let channels = format.color_channels();
    a.chunks_exact(bpp)
        .zip(b.chunks_exact(bpp))
        .map(|(pa, pb)| {
            pa[..channels]
                .iter()
                .zip(&pb[..channels])
                .map(|(&x, &y)| u64::from(x.abs_diff(y)))
                .sum::<u64>()
        })
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/diff.rs"]
mod tests;
