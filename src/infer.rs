//! Hindley-Milner type inference (Algorithm W).
//!
//! ```text
//! W(Γ, x)     = instantiate(Γ(x)), id
//! W(Γ, λx.e)  = let t, S = W(Γ[x : α], e)        in  S(α) -> t, S
//! W(Γ, f a)   = let t1, S1 = W(Γ, f)
//!                   t2, S2 = W(S1 Γ, a)
//!                   S3     = unify(S2 t1, t2 -> β)  in  S3 β, S3 ∘ S2 ∘ S1
//! ```
//!
//! Fresh type variables come from a counter owned by the `Inferencer`, so
//! independent calls never share state. The first failure ends inference.

use tracing::{debug, trace};

use crate::env::TypeEnv;
use crate::error::TypeError;
use crate::subst::{Substitutable, Substitution};
use crate::term::Term;
use crate::types::{Scheme, Type, TypeVar};
use crate::unify::unify;

/// A successful inference: the type of the term and the substitution that
/// was accumulated while finding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    pub ty: Type,
    pub subst: Substitution,
}

impl Inference {
    /// The inferred type with variables renamed `a`, `b`, ... by first use.
    pub fn principal(&self) -> Type {
        self.ty.canonical()
    }
}

/// Infer the principal type of `term` under `env`.
pub fn infer(env: &TypeEnv, term: &Term) -> Result<Inference, TypeError> {
    let result = Inferencer::for_env(env).infer(env, term);
    match &result {
        Ok(found) => debug!(%term, ty = %found.ty, "inferred type"),
        Err(err) => debug!(%term, error = %err, "inference failed"),
    }
    result
}

/// Infer `let name = bound in body` under `env`.
pub fn infer_let(env: &TypeEnv, name: &str, bound: &Term, body: &Term) -> Result<Inference, TypeError> {
    let result = Inferencer::for_env(env).infer_let(env, name, bound, body);
    if let Ok(found) = &result {
        debug!(name, %body, ty = %found.ty, "inferred let");
    }
    result
}

/// Infer `term` and add it to `env` under `name` with a generalized scheme.
pub fn define(env: &TypeEnv, name: &str, term: &Term) -> Result<TypeEnv, TypeError> {
    let Inference { ty, subst } = infer(env, term)?;
    let env = env.apply(&subst);
    let scheme = env.generalize(&ty);
    debug!(name, %scheme, "defined");
    Ok(env.extend(name, scheme))
}

#[derive(Debug, Clone, Default)]
pub struct Inferencer {
    next_var: u32,
}

impl Inferencer {
    pub fn new() -> Self {
        Inferencer { next_var: 0 }
    }

    /// Start numbering above every type variable `env` mentions.
    pub fn for_env(env: &TypeEnv) -> Self {
        let mut inferencer = Inferencer::new();
        inferencer.reserve(env);
        inferencer
    }

    /// Move the counter past every type variable `env` mentions. The
    /// counter saturates at `u32::MAX`.
    fn reserve(&mut self, env: &TypeEnv) {
        if let Some(max) = env.max_var() {
            self.next_var = self.next_var.max(max.id().saturating_add(1));
        }
    }

    pub fn fresh(&mut self) -> Type {
        let var = TypeVar(self.next_var);
        self.next_var = self.next_var.saturating_add(1);
        Type::Var(var)
    }

    pub fn instantiate(&mut self, scheme: &Scheme) -> Type {
        let subst: Substitution = scheme
            .vars
            .iter()
            .map(|var| (*var, self.fresh()))
            .collect();
        scheme.ty.apply(&subst)
    }

    /// Algorithm W. Fresh variables never collide with those free in `env`.
    pub fn infer(&mut self, env: &TypeEnv, term: &Term) -> Result<Inference, TypeError> {
        self.reserve(env);
        self.infer_term(env, term)
    }

    fn infer_term(&mut self, env: &TypeEnv, term: &Term) -> Result<Inference, TypeError> {
        match term {
            Term::Var(name) => {
                let scheme = env
                    .lookup(name)
                    .ok_or_else(|| TypeError::unbound_variable(name.as_str()))?;
                let ty = self.instantiate(scheme);
                trace!(%name, %ty, "instantiated");
                Ok(Inference {
                    ty,
                    subst: Substitution::identity(),
                })
            }
            Term::Abs(param, body) => {
                let param_ty = self.fresh();
                let inner = env.extend(param.as_str(), Scheme::monomorphic(param_ty.clone()));
                let Inference { ty: body_ty, subst } = self.infer_term(&inner, body)?;
                Ok(Inference {
                    ty: Type::fun(param_ty.apply(&subst), body_ty),
                    subst,
                })
            }
            Term::App(func, arg) => {
                let Inference { ty: func_ty, subst: s1 } = self.infer_term(env, func)?;
                let Inference { ty: arg_ty, subst: s2 } = self.infer_term(&env.apply(&s1), arg)?;
                let result = self.fresh();
                let s3 = unify(&func_ty.apply(&s2), &Type::fun(arg_ty, result.clone()))
                    .map_err(|err| TypeError::from_unify(err, term))?;
                trace!(%term, subst = %s3, "unified application");
                Ok(Inference {
                    ty: result.apply(&s3),
                    subst: s3.compose(&s2).compose(&s1),
                })
            }
        }
    }

    /// Type `bound`, generalize it, and type `body` with `name` bound to the
    /// resulting scheme. This is `let name = bound in body`.
    pub fn infer_let(
        &mut self,
        env: &TypeEnv,
        name: &str,
        bound: &Term,
        body: &Term,
    ) -> Result<Inference, TypeError> {
        self.reserve(env);
        let Inference { ty: bound_ty, subst: s1 } = self.infer_term(env, bound)?;
        let env = env.apply(&s1);
        let scheme = env.generalize(&bound_ty);
        trace!(name, %scheme, "generalized");
        let Inference { ty, subst: s2 } = self.infer_term(&env.extend(name, scheme), body)?;
        Ok(Inference {
            ty,
            subst: s2.compose(&s1),
        })
    }
}
