use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::foundation::error::{PolyfitError, PolyfitResult};

/// Evaluation target size used when nothing else is configured.
pub const DEFAULT_EVAL_SIZE: u32 = 128;

/// Options for constructing an [`Evaluator`](crate::Evaluator).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvaluatorOpts {
    /// Evaluation width in pixels; the reference must match it exactly.
    pub width: u32,
    /// Evaluation height in pixels; the reference must match it exactly.
    pub height: u32,
    /// Directory for `render{index}.png` snapshots. `None` disables them.
    pub snapshot_dir: Option<PathBuf>,
    /// Where to write the normalized reference at construction, if anywhere.
    pub reference_snapshot: Option<PathBuf>,
}

impl Default for EvaluatorOpts {
    fn default() -> Self {
        Self {
            width: DEFAULT_EVAL_SIZE,
            height: DEFAULT_EVAL_SIZE,
            snapshot_dir: None,
            reference_snapshot: None,
        }
    }
}

impl EvaluatorOpts {
    /// Opts for a `width x height` target with snapshots disabled.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject settings no evaluator can run with.
    pub fn validate(&self) -> PolyfitResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PolyfitError::validation(format!(
                "evaluation size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Parse opts from JSON. Missing fields take their defaults.
    pub fn from_reader<R: Read>(r: R) -> PolyfitResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| PolyfitError::serde(format!("parse evaluator config JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse opts from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PolyfitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PolyfitError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Population scoring configuration for [`evaluate_population`](crate::evaluate_population).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BatchOpts {
    /// Score on a dedicated rayon pool. `false` scores on the calling thread.
    pub parallel: bool,
    /// Worker count for the pool; `None` lets rayon decide. `Some(0)` is rejected.
    pub threads: Option<usize>,
    /// Genomes handed to the pool per round. `0` is treated as `1`.
    pub chunk_size: usize,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            chunk_size: 64,
        }
    }
}

impl BatchOpts {
    /// Single-threaded scoring.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
