use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::reference::ReferenceImage;
use crate::canvas::surface::Canvas;
use crate::config::EvaluatorOpts;
use crate::encode::png::{snapshot_path, write_canvas_png};
use crate::eval::diff::diff_canvases;
use crate::foundation::error::{PolyfitError, PolyfitResult};
use crate::genome::model::Genome;
use crate::render::renderer::paint_genome;

/// Scores genomes against one loaded reference image.
///
/// Construction loads and normalizes the reference once; dropping the evaluator releases it.
/// The reference is immutable and shared, so `&Evaluator` can be used from many threads at once.
#[derive(Debug)]
pub struct Evaluator {
    reference: Arc<Canvas>,
    blank: Canvas,
    source_width: u32,
    source_height: u32,
    opts: EvaluatorOpts,
}

/// Result of [`Evaluator::evaluate_with_snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Fitness score, lower is better.
    pub score: f64,
    /// What happened to the diagnostic snapshot.
    pub snapshot: SnapshotOutcome,
}

/// Fate of a diagnostic snapshot write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// No snapshot directory is configured.
    Disabled,
    /// The rendered canvas was written to this path.
    Written(PathBuf),
    /// Writing failed; the score is unaffected.
    Failed(String),
}

impl Evaluator {
    /// Load the reference at `path` and prepare to score against it.
    #[tracing::instrument(skip_all, fields(width = opts.width, height = opts.height))]
    pub fn new(path: impl AsRef<Path>, opts: EvaluatorOpts) -> PolyfitResult<Self> {
        opts.validate()?;
        let reference = ReferenceImage::load(path, opts.width, opts.height)?;
        Self::from_reference(reference, opts)
    }

    /// Build an evaluator around an already normalized reference.
    pub fn from_reference(reference: ReferenceImage, opts: EvaluatorOpts) -> PolyfitResult<Self> {
        opts.validate()?;
        let (source_width, source_height) = reference.source_dimensions();
        let canvas = reference.into_canvas();
        if (canvas.width(), canvas.height()) != (opts.width, opts.height) {
            return Err(PolyfitError::validation(format!(
                "reference canvas is {}x{}, evaluator expects {}x{}",
                canvas.width(),
                canvas.height(),
                opts.width,
                opts.height
            )));
        }

        if let Some(path) = &opts.reference_snapshot
            && let Err(e) = write_canvas_png(&canvas, path)
        {
            tracing::warn!(error = %e, "reference snapshot not written");
        }

        let mut blank = canvas.clone();
        blank.clear();
        tracing::debug!(
            width = opts.width,
            height = opts.height,
            snapshots = opts.snapshot_dir.is_some(),
            "evaluator ready"
        );
        Ok(Self {
            reference: Arc::new(canvas),
            blank,
            source_width,
            source_height,
            opts,
        })
    }

    /// The normalized reference canvas.
    pub fn reference(&self) -> &Canvas {
        &self.reference
    }

    /// A shared handle to the reference canvas.
    pub fn shared_reference(&self) -> Arc<Canvas> {
        Arc::clone(&self.reference)
    }

    /// Evaluation width.
    pub fn width(&self) -> u32 {
        self.reference.width()
    }

    /// Evaluation height.
    pub fn height(&self) -> u32 {
        self.reference.height()
    }

    /// Size of the reference image as decoded.
    pub fn source_dimensions(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    /// Options this evaluator was built with.
    pub fn opts(&self) -> &EvaluatorOpts {
        &self.opts
    }

    /// Render `genome` at the evaluation size, ignoring its declared size.
    pub fn render(&self, genome: &Genome) -> Canvas {
        let mut canvas = self.blank.clone();
        paint_genome(&mut canvas, genome);
        canvas
    }

    /// Diff `candidate` against the reference.
    pub fn score(&self, candidate: &Canvas) -> PolyfitResult<f64> {
        diff_canvases(&self.reference, candidate)
    }

    /// Render and score `genome`.
    pub fn evaluate(&self, genome: &Genome) -> PolyfitResult<f64> {
        self.score(&self.render(genome))
    }

    /// Score `genome` by rendering into `scratch`, a canvas from [`Self::blank_canvas`].
    pub(crate) fn evaluate_in(&self, scratch: &mut Canvas, genome: &Genome) -> PolyfitResult<f64> {
        scratch.clear();
        paint_genome(scratch, genome);
        self.score(scratch)
    }

    /// A black canvas at the evaluation size.
    pub(crate) fn blank_canvas(&self) -> Canvas {
        self.blank.clone()
    }

    /// Render and score `genome`, persisting the rendered canvas as `render{index}.png` when a
    /// snapshot directory is configured.
    ///
    /// A failed snapshot write is logged and reported in the outcome; it never fails the call.
    pub fn evaluate_with_snapshot(&self, genome: &Genome, index: u64) -> PolyfitResult<Evaluation> {
        let canvas = self.render(genome);
        let score = self.score(&canvas)?;
        let snapshot = self.snapshot(&canvas, index);
        Ok(Evaluation { score, snapshot })
    }

    /// Persist an already rendered `canvas` as `render{index}.png` in the snapshot directory.
    ///
    /// Failures are logged and returned as [`SnapshotOutcome::Failed`].
    pub fn snapshot(&self, canvas: &Canvas, index: u64) -> SnapshotOutcome {
        let Some(dir) = &self.opts.snapshot_dir else {
            return SnapshotOutcome::Disabled;
        };
        let path = snapshot_path(dir, index);
        match write_canvas_png(canvas, &path) {
            Ok(()) => SnapshotOutcome::Written(path),
            Err(e) => {
                tracing::warn!(index, error = %e, "snapshot not written");
                SnapshotOutcome::Failed(e.to_string())
            }
        }
    }

    /// The largest score any comparable candidate can get: `255 * 3 * width * height`.
    pub fn worst_score(&self) -> f64 {
        (255 * 3 * u64::from(self.width()) * u64::from(self.height())) as f64
    }

    /// Collapse a failed evaluation to [`worst_score`](Self::worst_score).
    pub fn score_or_worst(&self, result: PolyfitResult<f64>) -> f64 {
        match result {
            Ok(score) => score,
            Err(e) if e.is_per_evaluation() => {
                tracing::warn!(error = %e, "evaluation failed, scoring as worst");
                self.worst_score()
            }
            Err(e) => {
                tracing::error!(error = %e, "unexpected evaluation error, scoring as worst");
                self.worst_score()
            }
        }
    }

    /// Whether larger scores are better. They are not: `0.0` is a perfect match.
    pub fn is_natural(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
