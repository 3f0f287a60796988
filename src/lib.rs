//! Polyfit scores polygon genomes against a reference image.
//!
//! A genome is an ordered list of translucent polygons. Scoring renders it onto a black canvas
//! the size of the reference and sums the per-channel absolute difference:
//!
//! - Load a reference with [`Evaluator::new`]
//! - Score candidates with [`Evaluator::evaluate`] or a whole population with
//!   [`evaluate_population`]
//! - Optionally persist renders as PNG via [`EvaluatorOpts::snapshot_dir`]
//!
//! Lower scores are better; `0.0` is a perfect match.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod canvas;
mod config;
mod encode;
mod eval;
mod foundation;
mod genome;
mod render;

pub use crate::assets::reference::ReferenceImage;
pub use crate::canvas::composite::over_channel;
pub use crate::canvas::surface::Canvas;
pub use crate::config::{BatchOpts, DEFAULT_EVAL_SIZE, EvaluatorOpts};
pub use crate::encode::png::{snapshot_path, write_canvas_png};
pub use crate::eval::batch::evaluate_population;
pub use crate::eval::diff::diff_canvases;
pub use crate::eval::evaluator::{Evaluation, Evaluator, SnapshotOutcome};
pub use crate::foundation::core::{PixelFormat, Point, Rgb8, Rgba8};
pub use crate::foundation::error::{PolyfitError, PolyfitResult};
pub use crate::genome::model::{Genome, Polygon, population_from_path};
pub use crate::render::raster::ScanlineFiller;
pub use crate::render::renderer::{paint_genome, render_genome};
