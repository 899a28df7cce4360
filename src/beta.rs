//! β-reduction: capture-avoiding substitution and single-step contraction.
//!
//! Redex selection is a policy (`Strategy`); both policies share the same
//! substitution primitive. A redex is located as a path from the root and the
//! term is rebuilt along that path only.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::alpha::freshen_binder;
use crate::fresh::NameSupply;
use crate::term::{Name, RedexPath, Term};

/// Redex selection policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Leftmost-outermost. Finds a normal form whenever one exists.
    #[default]
    NormalOrder,
    /// Leftmost-innermost: function first, then argument, then the
    /// enclosing redex.
    Applicative,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::NormalOrder => "normal-order",
            Strategy::Applicative => "applicative",
        }
    }

    /// Locate the next redex under this policy.
    pub fn find_redex(self, term: &Term) -> Option<RedexPath> {
        let mut path = Vec::new();
        let found = match self {
            Strategy::NormalOrder => outermost(term, &mut path),
            Strategy::Applicative => innermost(term, &mut path),
        };
        found.then_some(path)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal-order" | "normal" => Ok(Strategy::NormalOrder),
            "applicative" | "call-by-value" | "cbv" => Ok(Strategy::Applicative),
            other => Err(format!("unknown strategy `{}`", other)),
        }
    }
}

// Both searches leave `path` pointing at the redex when they return true.
fn outermost(term: &Term, path: &mut Vec<usize>) -> bool {
    match term {
        Term::App(func, arg) => {
            if matches!(**func, Term::Abs(..)) {
                return true;
            }
            descend(func, arg, path, outermost)
        }
        Term::Abs(_, body) => {
            path.push(0);
            if outermost(body, path) {
                return true;
            }
            path.pop();
            false
        }
        Term::Var(_) => false,
    }
}

fn innermost(term: &Term, path: &mut Vec<usize>) -> bool {
    match term {
        Term::App(func, arg) => {
            descend(func, arg, path, innermost) || matches!(**func, Term::Abs(..))
        }
        Term::Abs(_, body) => {
            path.push(0);
            if innermost(body, path) {
                return true;
            }
            path.pop();
            false
        }
        Term::Var(_) => false,
    }
}

fn descend(
    func: &Term,
    arg: &Term,
    path: &mut Vec<usize>,
    search: fn(&Term, &mut Vec<usize>) -> bool,
) -> bool {
    path.push(0);
    if search(func, path) {
        return true;
    }
    path.pop();

    path.push(1);
    if search(arg, path) {
        return true;
    }
    path.pop();

    false
}

/// Result of firing one redex
#[derive(Debug, Clone)]
pub struct Contraction {
    pub term: Term,
    pub redex_path: RedexPath,
}

/// Fire the redex chosen by `strategy`, or `None` if the term is already in
/// normal form.
pub fn contract(term: &Term, strategy: Strategy, names: &mut NameSupply) -> Option<Contraction> {
    let path = strategy.find_redex(term)?;
    let root = Arc::new(term.clone());
    let reduced = reduce_at_path(&root, &path, names);
    Some(Contraction {
        term: Arc::unwrap_or_clone(reduced),
        redex_path: path,
    })
}

/// One reduction step; `None` signals that no redex remains.
pub fn reduce_step(term: &Term, strategy: Strategy, names: &mut NameSupply) -> Option<Term> {
    contract(term, strategy, names).map(|c| c.term)
}

/// Apply β-reduction at a specific path, sharing everything off the path.
pub(crate) fn reduce_at_path(term: &Arc<Term>, path: &[usize], names: &mut NameSupply) -> Arc<Term> {
    let Some((&direction, rest)) = path.split_first() else {
        return beta_reduce(term, names);
    };

    match (term.as_ref(), direction) {
        (Term::Abs(param, body), 0) => {
            Arc::new(Term::Abs(param.clone(), reduce_at_path(body, rest, names)))
        }
        (Term::App(func, arg), 0) => {
            Arc::new(Term::App(reduce_at_path(func, rest, names), arg.clone()))
        }
        (Term::App(func, arg), _) => {
            Arc::new(Term::App(func.clone(), reduce_at_path(arg, rest, names)))
        }
        _ => term.clone(),
    }
}

/// (λp. body) arg → body[p := arg]
fn beta_reduce(term: &Arc<Term>, names: &mut NameSupply) -> Arc<Term> {
    match term.as_ref() {
        Term::App(func, arg) => match func.as_ref() {
            Term::Abs(param, body) => {
                let arg_free = arg.free_vars();
                substitute_shared(body, param, arg, &arg_free, names)
            }
            _ => term.clone(),
        },
        _ => term.clone(),
    }
}

/// Capture-avoiding substitution `body[var := replacement]`.
pub fn substitute(body: &Term, var: &str, replacement: &Term, names: &mut NameSupply) -> Term {
    let body = Arc::new(body.clone());
    let replacement = Arc::new(replacement.clone());
    let replacement_free = replacement.free_vars();
    Arc::unwrap_or_clone(substitute_shared(
        &body,
        var,
        &replacement,
        &replacement_free,
        names,
    ))
}

/// Substitution over shared trees. `replacement_free` caches the free
/// variables of `replacement`; subterms without a free `var` come back as the
/// same `Arc`.
pub(crate) fn substitute_shared(
    term: &Arc<Term>,
    var: &str,
    replacement: &Arc<Term>,
    replacement_free: &BTreeSet<Name>,
    names: &mut NameSupply,
) -> Arc<Term> {
    match term.as_ref() {
        Term::Var(name) => {
            if name == var {
                replacement.clone()
            } else {
                term.clone()
            }
        }
        Term::App(func, arg) => {
            let new_func = substitute_shared(func, var, replacement, replacement_free, names);
            let new_arg = substitute_shared(arg, var, replacement, replacement_free, names);
            if Arc::ptr_eq(&new_func, func) && Arc::ptr_eq(&new_arg, arg) {
                term.clone()
            } else {
                Arc::new(Term::App(new_func, new_arg))
            }
        }
        Term::Abs(param, body) => {
            // shadowed, or nothing to replace below
            if param == var || !body.occurs_free(var) {
                return term.clone();
            }

            if replacement_free.contains(param) {
                let mut avoid = replacement_free.clone();
                avoid.insert(var.to_string());
                let (fresh, renamed) = freshen_binder(param, body, &avoid, names);
                let new_body =
                    substitute_shared(&renamed, var, replacement, replacement_free, names);
                Arc::new(Term::Abs(fresh, new_body))
            } else {
                let new_body = substitute_shared(body, var, replacement, replacement_free, names);
                Arc::new(Term::Abs(param.clone(), new_body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude;

    fn v(name: &str) -> Term {
        Term::var(name)
    }

    #[test]
    fn test_substitute_variable() {
        let mut names = NameSupply::new();
        assert!(substitute(&v("x"), "x", &v("z"), &mut names).identical(&v("z")));
        assert!(substitute(&v("y"), "x", &v("z"), &mut names).identical(&v("y")));
    }

    #[test]
    fn test_substitute_application() {
        let term = Term::app(v("x"), Term::app(v("y"), v("x")));
        let result = substitute(&term, "x", &v("z"), &mut NameSupply::new());
        assert!(result.identical(&Term::app(v("z"), Term::app(v("y"), v("z")))));
    }

    #[test]
    fn test_substitute_stops_at_shadowing_binder() {
        let term = Term::abs("x", v("x"));
        let result = substitute(&term, "x", &v("z"), &mut NameSupply::new());
        assert!(result.identical(&term));
    }

    #[test]
    fn test_substitute_avoids_capture() {
        // (λy. x)[x := y]  must not become λy. y
        let term = Term::abs("y", v("x"));
        let result = substitute(&term, "x", &v("y"), &mut NameSupply::new());

        assert_ne!(result, Term::abs("y", v("y")));
        assert_eq!(result, Term::abs("y1", v("y")));
        match &result {
            Term::Abs(param, _) => assert_ne!(param, "y"),
            other => panic!("expected abstraction, got {}", other),
        }
    }

    #[test]
    fn test_substitute_fresh_name_avoids_body_names() {
        // (λy. x y1)[x := y]: the fresh binder may not be y1
        let term = Term::abs("y", Term::app(v("x"), v("y1")));
        let result = substitute(&term, "x", &v("y"), &mut NameSupply::new());
        assert_eq!(result, Term::abs("w", Term::app(v("y"), v("y1"))));
    }

    #[test]
    fn test_substitute_shares_untouched_subtrees() {
        let untouched = Arc::new(Term::abs("q", v("q")));
        let term = Arc::new(Term::App(untouched.clone(), Arc::new(v("x"))));
        let replacement = Arc::new(v("z"));
        let free = replacement.free_vars();
        let result = substitute_shared(&term, "x", &replacement, &free, &mut NameSupply::new());
        match result.as_ref() {
            Term::App(func, _) => assert!(Arc::ptr_eq(func, &untouched)),
            other => panic!("expected application, got {}", other),
        }
    }

    #[test]
    fn test_normal_order_finds_outermost() {
        // (λx. x) ((λy. y) z)
        let inner = Term::app(prelude::identity(), v("z"));
        let term = Term::app(Term::abs("x", v("x")), inner);
        assert_eq!(Strategy::NormalOrder.find_redex(&term), Some(vec![]));
        assert_eq!(Strategy::Applicative.find_redex(&term), Some(vec![1]));
    }

    #[test]
    fn test_redex_under_abstraction() {
        // λa. (λx. x) a
        let term = Term::abs("a", Term::app(prelude::identity(), v("a")));
        assert_eq!(Strategy::NormalOrder.find_redex(&term), Some(vec![0]));
        let reduced = reduce_step(&term, Strategy::NormalOrder, &mut NameSupply::new());
        assert_eq!(reduced, Some(Term::abs("a", v("a"))));
    }

    #[test]
    fn test_reduce_step_signals_normal_form() {
        let term = Term::abs("x", Term::app(v("x"), v("y")));
        for strategy in [Strategy::NormalOrder, Strategy::Applicative] {
            assert!(reduce_step(&term, strategy, &mut NameSupply::new()).is_none());
        }
    }

    #[test]
    fn test_contract_reports_path() {
        // f ((λx. x) y)
        let term = Term::app(v("f"), Term::app(prelude::identity(), v("y")));
        let step = contract(&term, Strategy::NormalOrder, &mut NameSupply::new())
            .expect("term has a redex");
        assert_eq!(step.redex_path, vec![1]);
        assert_eq!(step.term, Term::app(v("f"), v("y")));
    }

    #[test]
    fn test_strategy_parse_and_display() {
        assert_eq!("normal-order".parse::<Strategy>(), Ok(Strategy::NormalOrder));
        assert_eq!("cbv".parse::<Strategy>(), Ok(Strategy::Applicative));
        assert!("lazy".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Applicative.to_string(), "applicative");
        assert_eq!(Strategy::default(), Strategy::NormalOrder);
    }
}
