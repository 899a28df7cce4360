//! Parallel batch reduction and inference.
//!
//! Terms are independent, so each one is handled on its own rayon task with
//! its own `Reducer` or `Inferencer`. Results come back in input order.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::ReductionConfig;
use crate::env::TypeEnv;
use crate::error::TypeError;
use crate::generator::{GeneratorConfig, SimpleRng, TermGenerator};
use crate::infer::{infer, Inference};
use crate::normal::{Reducer, Reduction};
use crate::term::Term;

/// Aggregate numbers for a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total_terms: usize,
    pub total_steps: usize,
    pub converged: usize,
    pub typed: usize,
    pub total_time_ms: f64,
    pub avg_steps_per_term: f64,
    pub convergence_rate: f64,
    pub throughput_terms_per_sec: f64,
}

impl BatchSummary {
    pub fn new(
        reductions: &[Reduction],
        inferences: &[Result<Inference, TypeError>],
        total_time_ms: f64,
    ) -> Self {
        let total_terms = reductions.len();
        let total_steps = reductions.iter().map(|r| r.steps).sum();
        let converged = reductions.iter().filter(|r| r.terminated).count();
        let typed = inferences.iter().filter(|r| r.is_ok()).count();
        let per_term = |n: f64| if total_terms == 0 { 0.0 } else { n / total_terms as f64 };

        BatchSummary {
            total_terms,
            total_steps,
            converged,
            typed,
            total_time_ms,
            avg_steps_per_term: per_term(total_steps as f64),
            convergence_rate: per_term(converged as f64),
            throughput_terms_per_sec: if total_time_ms > 0.0 {
                total_terms as f64 / (total_time_ms / 1000.0)
            } else {
                0.0
            },
        }
    }
}

/// Normalize every term under `config`.
pub fn normalize_all(terms: &[Term], config: &ReductionConfig) -> Vec<Reduction> {
    terms
        .par_iter()
        .map(|term| Reducer::new(config.clone()).reduce(term))
        .collect()
}

/// Infer the type of every term under `env`.
pub fn infer_all(terms: &[Term], env: &TypeEnv) -> Vec<Result<Inference, TypeError>> {
    terms.par_iter().map(|term| infer(env, term)).collect()
}

/// Draw `count` closed terms from a seeded generator.
///
/// Each draw gets its own RNG derived from `seed`, so the output does not
/// depend on how many threads run it.
pub fn generate_terms(count: usize, seed: u64, config: &GeneratorConfig) -> Vec<Term> {
    (0..count)
        .into_par_iter()
        .filter_map(|draw_index| {
            let draw_seed = seed
                .wrapping_add(draw_index as u64)
                .wrapping_mul(0x9e3779b97f4a7c15);
            let mut rng = SimpleRng::seed_from_u64(draw_seed);
            TermGenerator::new(config.clone()).generate(&mut rng)
        })
        .collect()
}

/// Normalize and type-check every term, returning the per-term results and
/// a summary.
pub fn run(
    terms: &[Term],
    config: &ReductionConfig,
    env: &TypeEnv,
) -> (Vec<Reduction>, Vec<Result<Inference, TypeError>>, BatchSummary) {
    let start = Instant::now();
    let reductions = normalize_all(terms, config);
    let inferences = infer_all(terms, env);
    let total_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let summary = BatchSummary::new(&reductions, &inferences, total_time_ms);
    info!(
        terms = summary.total_terms,
        steps = summary.total_steps,
        converged = summary.converged,
        typed = summary.typed,
        "batch complete"
    );
    (reductions, inferences, summary)
}
