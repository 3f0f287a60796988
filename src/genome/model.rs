use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{PolyfitError, PolyfitResult};

/// One translucent filled polygon.
///
/// The outline runs through `points` in order and closes from the last point back to the first.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    /// Fill color; alpha controls source-over blending.
    pub color: Rgba8,
    /// Outline vertices in path order.
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from a color and its outline.
    pub fn new(color: Rgba8, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            color,
            points: points.into_iter().collect(),
        }
    }

    /// Axis-aligned rectangle `[x0, x1) x [y0, y1)` as a four-point polygon.
    pub fn rect(color: Rgba8, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(
            color,
            [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
        )
    }

    /// Whether the outline has fewer than three distinct vertices and so covers no area.
    pub fn is_degenerate(&self) -> bool {
        let mut distinct: [Option<Point>; 3] = [None; 3];
        let mut n = 0;
        for p in &self.points {
            if distinct[..n].iter().any(|d| *d == Some(*p)) {
                continue;
            }
            distinct[n] = Some(*p);
            n += 1;
            if n == 3 {
                return false;
            }
        }
        true
    }
}

/// Candidate image: an ordered stack of polygons authored for a given canvas size.
///
/// Later polygons are composited on top of earlier ones.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Genome {
    /// Width the genome was authored for.
    pub width: u32,
    /// Height the genome was authored for.
    pub height: u32,
    /// Polygons in paint order.
    #[serde(default)]
    pub polygons: Vec<Polygon>,
}

impl Genome {
    /// Empty genome (renders to an all-black canvas).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            polygons: Vec::new(),
        }
    }

    /// Genome with a single `color` rectangle covering the whole `width x height` canvas.
    pub fn monochrome(width: u32, height: u32, color: Rgba8) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            width,
            height,
            polygons: vec![Polygon::rect(color, 0, 0, w, h)],
        }
    }

    /// Append a polygon on top of the stack.
    pub fn with_polygon(mut self, polygon: Polygon) -> Self {
        self.polygons.push(polygon);
        self
    }

    /// Total vertex count across all polygons.
    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(|p| p.points.len()).sum()
    }

    /// Parse a genome from a JSON reader.
    pub fn from_reader<R: Read>(r: R) -> PolyfitResult<Self> {
        serde_json::from_reader(r).map_err(|e| PolyfitError::serde(format!("parse genome JSON: {e}")))
    }

    /// Parse a genome from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PolyfitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PolyfitError::validation(format!("open genome JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty JSON.
    pub fn to_writer<W: Write>(&self, w: W) -> PolyfitResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| PolyfitError::serde(format!("write genome JSON: {e}")))
    }

    /// Serialize as pretty JSON into a file, replacing it if present.
    pub fn to_path(&self, path: impl AsRef<Path>) -> PolyfitResult<()> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| {
            PolyfitError::validation(format!("create genome JSON '{}': {e}", path.display()))
        })?;
        let mut w = BufWriter::new(f);
        self.to_writer(&mut w)?;
        w.flush()
            .map_err(|e| PolyfitError::serde(format!("flush genome JSON: {e}")))
    }
}

/// Parse a JSON array of genomes (the population format used by the CLI `batch` command).
pub fn population_from_path(path: impl AsRef<Path>) -> PolyfitResult<Vec<Genome>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| {
        PolyfitError::validation(format!("open population JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| PolyfitError::serde(format!("parse population JSON: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/genome/model.rs"]
mod tests;
