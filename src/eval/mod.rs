//! Fitness scoring: canvas diff, the reference-holding evaluator and population batches.

pub(crate) mod batch;
pub(crate) mod diff;
pub(crate) mod evaluator;
