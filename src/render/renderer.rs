use crate::canvas::surface::Canvas;
use crate::foundation::error::PolyfitResult;
use crate::genome::model::Genome;
use crate::render::raster::ScanlineFiller;

/// Render `genome` into a new black `width x height` canvas.
///
/// The target size is the evaluation size, not the genome's declared size. Polygons are
/// composited in order, so later polygons land on top. Degenerate polygons are skipped.
#[tracing::instrument(level = "trace", skip(genome), fields(polygons = genome.polygons.len()))]
pub fn render_genome(genome: &Genome, width: u32, height: u32) -> PolyfitResult<Canvas> {
    let mut canvas = Canvas::new(width, height)?;
    paint_genome(&mut canvas, genome);
    Ok(canvas)
}

/// Composite every polygon of `genome` onto `canvas` in paint order.
pub fn paint_genome(canvas: &mut Canvas, genome: &Genome) {
    let mut filler = ScanlineFiller::new();
    for poly in &genome.polygons {
        if poly.is_degenerate() {
            continue;
        }
        filler.fill(canvas, &poly.points, poly.color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
