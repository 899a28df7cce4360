//! Normal-form driver.
//!
//! Repeats single β-steps under the configured strategy until no redex is
//! left or the step bound runs out. The bound is the only guard against
//! divergence; the driver never loops without it.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::beta::{reduce_at_path, Strategy};
use crate::config::ReductionConfig;
use crate::error::Divergence;
use crate::eta::eta_reduce_shared;
use crate::fresh::NameSupply;
use crate::term::{RedexPath, Term};

/// Step in a reduction trace: the term before contraction and the redex
/// that was fired in it.
#[derive(Debug, Clone)]
pub struct ReductionStep {
    pub term: Term,
    pub redex_path: RedexPath,
}

/// Reduction result with metrics
#[derive(Debug, Clone)]
pub struct Reduction {
    /// Normal form, or the partial result when `terminated` is false
    pub term: Term,
    pub steps: usize,
    pub terminated: bool,
    pub trace: Vec<ReductionStep>,
    pub total_time_ms: f64,
}

impl Reduction {
    /// The normal form, or `Divergence` carrying the partial result.
    pub fn normal_form(self) -> Result<Term, Divergence> {
        if self.terminated {
            Ok(self.term)
        } else {
            Err(Divergence {
                steps: self.steps,
                partial: self.term,
            })
        }
    }
}

pub struct Reducer {
    config: ReductionConfig,
}

impl Reducer {
    pub fn new(config: ReductionConfig) -> Self {
        Reducer { config }
    }

    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Reduce term to normal form
    pub fn reduce(&self, term: &Term) -> Reduction {
        let start = Instant::now();
        let strategy = self.config.strategy;
        let mut names = NameSupply::new();
        let mut current = Arc::new(term.clone());
        let mut trace = Vec::new();
        let mut steps = 0;

        let terminated = loop {
            let Some(path) = strategy.find_redex(&current) else {
                break true;
            };
            if steps == self.config.max_steps {
                break false;
            }

            trace!(step = steps, term = %current, ?path, "contracting");
            let next = reduce_at_path(&current, &path, &mut names);
            if self.config.trace {
                trace.push(ReductionStep {
                    term: current.as_ref().clone(),
                    redex_path: path,
                });
            }
            current = next;
            steps += 1;
        };

        if terminated && self.config.eta {
            current = eta_reduce_shared(&current);
        }

        if terminated {
            debug!(steps, %strategy, "reached normal form");
        } else {
            warn!(steps, %strategy, "step bound reached before normal form");
        }

        Reduction {
            term: Arc::unwrap_or_clone(current),
            steps,
            terminated,
            trace,
            total_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Reduce with a bounded number of steps under `strategy`.
pub fn normalize(term: &Term, max_steps: usize, strategy: Strategy) -> Reduction {
    Reducer::new(ReductionConfig::new(strategy, max_steps)).reduce(term)
}

/// Same as [`normalize`] with the argument order of the library interface.
pub fn reduce(term: &Term, strategy: Strategy, max_steps: usize) -> Reduction {
    normalize(term, max_steps, strategy)
}
