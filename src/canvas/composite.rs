use crate::canvas::surface::Canvas;
use crate::foundation::core::Rgba8;

/// Source-over blend of one straight color channel: `src * a + dst * (1 - a)`, rounded.
pub fn over_channel(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(src) * a + u32::from(dst) * (255 - a) + 127) / 255) as u8
}

/// Source-over blend of `src` onto an opaque pixel, ignoring the padding byte.
pub fn over_pixel(dst: &mut [u8], src: Rgba8) {
    dst[0] = over_channel(dst[0], src.r, src.a);
    dst[1] = over_channel(dst[1], src.g, src.a);
    dst[2] = over_channel(dst[2], src.b, src.a);
}

/// Composite `color` over the half-open pixel span `[x0, x1)` of row `y`.
///
/// The span is clipped to the canvas; rows outside the canvas are ignored.
pub fn blend_span(canvas: &mut Canvas, y: i64, x0: i64, x1: i64, color: Rgba8) {
    if color.a == 0 || y < 0 || y >= i64::from(canvas.height()) {
        return;
    }
    let x0 = x0.max(0);
    let x1 = x1.min(i64::from(canvas.width()));
    if x0 >= x1 {
        return;
    }

    let row = canvas.row_mut(y as u32);
    let span = &mut row[(x0 as usize) * 4..(x1 as usize) * 4];
    if color.a == 255 {
        for px in span.chunks_exact_mut(4) {
            px[..3].copy_from_slice(&[color.r, color.g, color.b]);
        }
        return;
    }
    for px in span.chunks_exact_mut(4) {
        over_pixel(px, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/composite.rs"]
mod tests;
