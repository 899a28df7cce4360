//! η-conversion: `λx. f x ⇄ f` when `x` is not free in `f`.

use std::sync::Arc;

use crate::alpha::alpha_equivalent;
use crate::fresh::NameSupply;
use crate::term::Term;

/// Top-level η-contraction only.
pub fn eta_step(term: &Term) -> Option<Term> {
    contractible(term).map(|func| func.as_ref().clone())
}

fn contractible(term: &Term) -> Option<&Arc<Term>> {
    match term {
        Term::Abs(param, body) => match body.as_ref() {
            Term::App(func, arg) => match arg.as_ref() {
                Term::Var(name) if name == param && !func.occurs_free(param) => Some(func),
                _ => None,
            },
            _ => None,
        },
        _ => None,
    }
}

/// η-normal form: contract every η-redex, innermost first.
pub fn eta_reduce(term: &Term) -> Term {
    let root = Arc::new(term.clone());
    Arc::unwrap_or_clone(eta_reduce_shared(&root))
}

pub(crate) fn eta_reduce_shared(term: &Arc<Term>) -> Arc<Term> {
    match term.as_ref() {
        Term::Var(_) => term.clone(),
        Term::App(func, arg) => {
            let new_func = eta_reduce_shared(func);
            let new_arg = eta_reduce_shared(arg);
            if Arc::ptr_eq(&new_func, func) && Arc::ptr_eq(&new_arg, arg) {
                term.clone()
            } else {
                Arc::new(Term::App(new_func, new_arg))
            }
        }
        Term::Abs(param, body) => {
            let new_body = eta_reduce_shared(body);
            let rebuilt = if Arc::ptr_eq(&new_body, body) {
                term.clone()
            } else {
                Arc::new(Term::Abs(param.clone(), new_body))
            };
            // func is a subterm of an already η-normal body
            match contractible(&rebuilt) {
                Some(func) => func.clone(),
                None => rebuilt,
            }
        }
    }
}

/// `λx. term x` for a name `x` not free in `term`.
pub fn eta_expand(term: &Term, names: &mut NameSupply) -> Term {
    let param = names.fresh("x", &term.free_vars());
    Term::abs(param.clone(), Term::app(term.clone(), Term::var(param)))
}

/// Extensional comparison: alpha-equivalence of the η-normal forms.
pub fn eta_equivalent(t1: &Term, t2: &Term) -> bool {
    alpha_equivalent(&eta_reduce(t1), &eta_reduce(t2))
}
