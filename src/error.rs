//! Error types.
//!
//! Reduction has no error path of its own: running out of steps is reported
//! in the `Reduction` value, and `Divergence` exists for callers that want to
//! turn that into an `Err`. Inference stops at the first `TypeError`.

use thiserror::Error;

use crate::term::Term;
use crate::types::{Type, TypeVar};
use crate::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("unbound variable `{name}`")]
    UnboundVariable { name: String },

    /// The application `term` would need the infinite type `var = ty`.
    #[error("cannot construct infinite type {var} = {ty} in `{term}`")]
    OccursCheckFailure { var: TypeVar, ty: Type, term: Term },

    #[error("type mismatch: expected {expected}, found {found} in `{term}`")]
    UnificationMismatch {
        expected: Type,
        found: Type,
        term: Term,
    },
}

impl TypeError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        TypeError::UnboundVariable { name: name.into() }
    }

    /// Attach the offending term to a unification failure.
    pub fn from_unify(err: UnifyError, term: &Term) -> Self {
        match err {
            UnifyError::Mismatch { expected, found } => TypeError::UnificationMismatch {
                expected,
                found,
                term: term.clone(),
            },
            UnifyError::OccursCheck { var, ty } => TypeError::OccursCheckFailure {
                var,
                ty,
                term: term.clone(),
            },
        }
    }
}

/// The step bound ran out before a normal form was reached.
#[derive(Debug, Clone, Error)]
#[error("no normal form within {steps} steps")]
pub struct Divergence {
    pub steps: usize,
    /// Best-effort partially reduced term
    pub partial: Term,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
