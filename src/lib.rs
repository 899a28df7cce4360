//! Untyped lambda calculus with Hindley-Milner type inference.
//!
//! This library provides:
//! - Immutable, structurally shared terms compared up to α-equivalence
//! - Capture-avoiding substitution and α-renaming
//! - Single-step β-reduction under normal or applicative order
//! - η-reduction and η-expansion
//! - A step-bounded normal-form driver with optional tracing
//! - Algorithm W: principal types, unification and let-polymorphism
//! - Parallel batch reduction and inference over rayon
//!
//! ```rust
//! use lambda_calc_rs::{infer, normalize, prelude, Strategy, Term, TypeEnv};
//!
//! let term = Term::apply(prelude::plus(), [prelude::church(2), prelude::church(3)]);
//! let result = normalize(&term, 1_000, Strategy::NormalOrder);
//! assert_eq!(result.term, prelude::church(5));
//!
//! let found = infer(&TypeEnv::empty(), &prelude::k()).unwrap();
//! assert_eq!(found.principal().to_string(), "a -> b -> a");
//! ```

pub mod term;
pub mod fresh;
pub mod alpha;
pub mod beta;
pub mod eta;
pub mod normal;
pub mod render;
pub mod types;
pub mod subst;
pub mod env;
pub mod unify;
pub mod infer;
pub mod error;
pub mod config;
pub mod logger;
pub mod prelude;
pub mod generator;
pub mod batch;
pub mod schema;

pub use term::{Name, RedexPath, Term, TermType};
pub use fresh::NameSupply;
pub use alpha::{alpha_equivalent, rename};
pub use beta::{contract, reduce_step, substitute, Contraction, Strategy};
pub use eta::{eta_equivalent, eta_expand, eta_reduce, eta_step};
pub use normal::{normalize, reduce, Reducer, Reduction, ReductionStep};
pub use render::{render, render_debruijn, Notation, RenderResult};
pub use types::{Scheme, Type, TypeVar};
pub use subst::{Substitutable, Substitution};
pub use env::TypeEnv;
pub use unify::{unify, UnifyError};
pub use infer::{define, infer, infer_let, Inference, Inferencer};
pub use error::{ConfigError, Divergence, TypeError};
pub use config::ReductionConfig;
pub use generator::{GeneratorConfig, SimpleRng, TermGenerator};
pub use batch::BatchSummary;
