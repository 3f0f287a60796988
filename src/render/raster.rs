use std::cmp::Ordering;

use crate::canvas::composite::blend_span;
use crate::canvas::surface::Canvas;
use crate::foundation::core::{Point, Rgba8};

/// Non-horizontal polygon edge, oriented top to bottom.
#[derive(Clone, Copy, Debug)]
struct Edge {
    x_top: f64,
    y_top: f64,
    y_bottom: f64,
    dxdy: f64,
    /// +1 when the path runs downwards along this edge, -1 when it runs upwards.
    winding: i32,
}

impl Edge {
    fn from_segment(p0: Point, p1: Point) -> Option<Self> {
        if p0.y == p1.y {
            return None;
        }
        let (top, bottom, winding) = if p0.y < p1.y {
            (p0, p1, 1)
        } else {
            (p1, p0, -1)
        };
        let dx = i64::from(bottom.x) - i64::from(top.x);
        let dy = i64::from(bottom.y) - i64::from(top.y);
        Some(Self {
            x_top: f64::from(top.x),
            y_top: f64::from(top.y),
            y_bottom: f64::from(bottom.y),
            dxdy: dx as f64 / dy as f64,
            winding,
        })
    }

    fn x_at(&self, y: f64) -> f64 {
        self.x_top + (y - self.y_top) * self.dxdy
    }
}

/// Scanline polygon filler using an active edge table and the non-zero winding rule.
///
/// A pixel is covered when the winding number at its centre is non-zero. Edges are half-open in
/// y so a vertex shared by two edges is crossed once. Spans are half-open in x as well: a pixel
/// centre lying exactly on an edge is covered at a span's left crossing and excluded at its
/// right crossing, so two polygons sharing an edge never both paint those pixels. Covered
/// pixels of one polygon are composited exactly once, even where the outline overlaps itself.
///
/// Scratch buffers are kept between calls so one filler can paint a whole genome without
/// reallocating.
#[derive(Debug, Default)]
pub struct ScanlineFiller {
    edges: Vec<Edge>,
    active: Vec<usize>,
    crossings: Vec<(f64, i32)>,
}

impl ScanlineFiller {
    /// Create a filler with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the closed outline through `points` with `color`, source-over.
    ///
    /// Coordinates outside the canvas are clipped. Outlines with fewer than three vertices, or
    /// a fully transparent color, leave the canvas untouched.
    pub fn fill(&mut self, canvas: &mut Canvas, points: &[Point], color: Rgba8) {
        if points.len() < 3 || color.a == 0 {
            return;
        }

        self.build_edges(points);
        if self.edges.is_empty() {
            return;
        }

        let y_min = self.edges[0].y_top;
        let y_max = self
            .edges
            .iter()
            .map(|e| e.y_bottom)
            .fold(f64::NEG_INFINITY, f64::max);

        // First and one-past-last pixel rows whose centres fall inside [y_min, y_max).
        let row_start = pixel_index_at_or_after(y_min).max(0);
        let row_end = pixel_index_at_or_after(y_max).min(i64::from(canvas.height()));

        self.active.clear();
        let mut next_edge = 0usize;

        for py in row_start..row_end {
            let yc = py as f64 + 0.5;

            while next_edge < self.edges.len() && self.edges[next_edge].y_top <= yc {
                self.active.push(next_edge);
                next_edge += 1;
            }
            let edges = &self.edges;
            self.active.retain(|&i| yc < edges[i].y_bottom);
            if self.active.is_empty() {
                continue;
            }

            self.crossings.clear();
            for &i in &self.active {
                let e = &self.edges[i];
                self.crossings.push((e.x_at(yc), e.winding));
            }
            self.crossings
                .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let mut winding = 0i32;
            let mut span_start = 0.0f64;
            for &(x, dir) in &self.crossings {
                let before = winding;
                winding += dir;
                if before == 0 && winding != 0 {
                    span_start = x;
                } else if before != 0 && winding == 0 {
                    blend_span(
                        canvas,
                        py,
                        pixel_index_at_or_after(span_start),
                        pixel_index_at_or_after(x),
                        color,
                    );
                }
            }
        }
    }

    fn build_edges(&mut self, points: &[Point]) {
        self.edges.clear();
        let n = points.len();
        for i in 0..n {
            let p0 = points[i];
            let p1 = points[(i + 1) % n];
            if let Some(e) = Edge::from_segment(p0, p1) {
                self.edges.push(e);
            }
        }
        self.edges
            .sort_by(|a, b| a.y_top.partial_cmp(&b.y_top).unwrap_or(Ordering::Equal));
    }
}

/// Index of the first pixel whose centre (`i + 0.5`) is at or after `v`.
fn pixel_index_at_or_after(v: f64) -> i64 {
    // `as` saturates, so far out-of-range coordinates clamp instead of wrapping.
    (v - 0.5).ceil() as i64
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
