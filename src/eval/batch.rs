use rayon::prelude::*;

use crate::config::BatchOpts;
use crate::eval::evaluator::Evaluator;
use crate::foundation::error::{PolyfitError, PolyfitResult};
use crate::genome::model::Genome;

/// Score every genome in `population` against `evaluator`.
///
/// The outer result only fails on setup (an invalid thread count or pool construction). Each
/// slot carries its own genome's result, in input order, so one bad candidate never hides the
/// others. Parallel and sequential runs produce identical scores.
#[tracing::instrument(skip_all, fields(genomes = population.len(), parallel = opts.parallel))]
pub fn evaluate_population(
    evaluator: &Evaluator,
    population: &[Genome],
    opts: &BatchOpts,
) -> PolyfitResult<Vec<PolyfitResult<f64>>> {
    if !opts.parallel {
        let mut scratch = evaluator.blank_canvas();
        return Ok(population
            .iter()
            .map(|g| evaluator.evaluate_in(&mut scratch, g))
            .collect());
    }

    let pool = build_thread_pool(opts.threads)?;
    let chunk_size = opts.chunk_size.max(1);
    let mut out = Vec::with_capacity(population.len());
    for chunk in population.chunks(chunk_size) {
        let scored = pool.install(|| {
            chunk
                .par_iter()
                .map_init(
                    || evaluator.blank_canvas(),
                    |scratch, g| evaluator.evaluate_in(scratch, g),
                )
                .collect::<Vec<_>>()
        });
        out.extend(scored);
    }

    let failed = out.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::debug!(failed, "population had failing genomes");
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> PolyfitResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PolyfitError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PolyfitError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/batch.rs"]
mod tests;
