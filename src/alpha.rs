//! Alpha conversion: capture-avoiding renaming of bound variables and
//! alpha-equivalence.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::beta::substitute_shared;
use crate::fresh::NameSupply;
use crate::term::{Name, Term};

/// Rename every abstraction binding `old` to bind `new` instead.
///
/// If `new` is free in the body of such an abstraction the binder gets a
/// fresh name derived from `new`, since using `new` itself would capture.
pub fn rename(term: &Term, old: &str, new: &str, names: &mut NameSupply) -> Term {
    let root = Arc::new(term.clone());
    Arc::unwrap_or_clone(rename_shared(&root, old, new, names))
}

fn rename_shared(term: &Arc<Term>, old: &str, new: &str, names: &mut NameSupply) -> Arc<Term> {
    if old == new {
        return term.clone();
    }

    match term.as_ref() {
        Term::Var(_) => term.clone(),
        Term::App(func, arg) => {
            let new_func = rename_shared(func, old, new, names);
            let new_arg = rename_shared(arg, old, new, names);
            if Arc::ptr_eq(&new_func, func) && Arc::ptr_eq(&new_arg, arg) {
                term.clone()
            } else {
                Arc::new(Term::App(new_func, new_arg))
            }
        }
        Term::Abs(param, body) => {
            let new_body = rename_shared(body, old, new, names);
            if param != old {
                return if Arc::ptr_eq(&new_body, body) {
                    term.clone()
                } else {
                    Arc::new(Term::Abs(param.clone(), new_body))
                };
            }

            let target = if new_body.occurs_free(new) {
                let mut avoid = new_body.free_vars();
                avoid.insert(old.to_string());
                names.fresh(new, &avoid)
            } else {
                new.to_string()
            };
            let (param, body) = rebind(param, &new_body, target, names);
            Arc::new(Term::Abs(param, body))
        }
    }
}

/// Move the binder of `λparam. body` to a name not in `avoid`.
///
/// Used by substitution when `param` would capture a free variable of the
/// replacement.
pub(crate) fn freshen_binder(
    param: &str,
    body: &Arc<Term>,
    avoid: &BTreeSet<Name>,
    names: &mut NameSupply,
) -> (Name, Arc<Term>) {
    let mut avoid = avoid.clone();
    avoid.extend(body.free_vars());
    let target = names.fresh(param, &avoid);
    rebind(param, body, target, names)
}

fn rebind(param: &str, body: &Arc<Term>, target: Name, names: &mut NameSupply) -> (Name, Arc<Term>) {
    let replacement = Arc::new(Term::Var(target.clone()));
    let replacement_free = BTreeSet::from([target.clone()]);
    let body = substitute_shared(body, param, &replacement, &replacement_free, names);
    (target, body)
}

/// True if the terms differ only in the names of bound variables.
pub fn alpha_equivalent(t1: &Term, t2: &Term) -> bool {
    fn go<'a>(
        t1: &'a Term,
        t2: &'a Term,
        left: &mut Vec<&'a str>,
        right: &mut Vec<&'a str>,
    ) -> bool {
        match (t1, t2) {
            (Term::Var(a), Term::Var(b)) => {
                let pos_a = left.iter().rposition(|n| *n == a.as_str());
                let pos_b = right.iter().rposition(|n| *n == b.as_str());
                match (pos_a, pos_b) {
                    (Some(i), Some(j)) => i == j,
                    (None, None) => a == b,
                    _ => false,
                }
            }
            (Term::Abs(p1, b1), Term::Abs(p2, b2)) => {
                left.push(p1);
                right.push(p2);
                let same = go(b1, b2, left, right);
                left.pop();
                right.pop();
                same
            }
            (Term::App(f1, a1), Term::App(f2, a2)) => {
                go(f1, f2, left, right) && go(a1, a2, left, right)
            }
            _ => false,
        }
    }

    go(t1, t2, &mut Vec::new(), &mut Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Term {
        Term::var("x")
    }

    fn y() -> Term {
        Term::var("y")
    }

    #[test]
    fn test_rename_simple() {
        // λx. x z  ->  λw. w z
        let term = Term::abs("x", Term::app(x(), Term::var("z")));
        let renamed = rename(&term, "x", "w", &mut NameSupply::new());
        assert!(renamed.identical(&Term::abs("w", Term::app(Term::var("w"), Term::var("z")))));
        assert_eq!(renamed, term);
    }

    #[test]
    fn test_rename_leaves_free_occurrences() {
        // x (λx. x)  ->  x (λw. w)
        let term = Term::app(x(), Term::abs("x", x()));
        let renamed = rename(&term, "x", "w", &mut NameSupply::new());
        assert!(renamed.identical(&Term::app(x(), Term::abs("w", Term::var("w")))));
    }

    #[test]
    fn test_rename_uses_fresh_name_when_target_is_free() {
        // λx. x y  renamed to y would capture the free y
        let term = Term::abs("x", Term::app(x(), y()));
        let renamed = rename(&term, "x", "y", &mut NameSupply::new());
        assert!(renamed.identical(&Term::abs("y1", Term::app(Term::var("y1"), y()))));
        assert_eq!(renamed, term);
    }

    #[test]
    fn test_rename_renames_inner_binder_to_avoid_capture() {
        // λx. λy. x y  ->  λy. λy1. y y1
        let term = Term::abs("x", Term::abs("y", Term::app(x(), y())));
        let renamed = rename(&term, "x", "y", &mut NameSupply::new());
        match &renamed {
            Term::Abs(param, _) => assert_eq!(param, "y"),
            other => panic!("expected abstraction, got {}", other),
        }
        assert_eq!(renamed, term);
    }

    #[test]
    fn test_rename_same_name_is_identity() {
        let term = Term::abs("x", x());
        let renamed = rename(&term, "x", "x", &mut NameSupply::new());
        assert!(renamed.identical(&term));
    }

    #[test]
    fn test_alpha_equivalence_basics() {
        let a = Term::abs("x", Term::abs("y", Term::app(x(), y())));
        let b = Term::abs("p", Term::abs("q", Term::app(Term::var("p"), Term::var("q"))));
        let c = Term::abs("p", Term::abs("q", Term::app(Term::var("q"), Term::var("p"))));

        assert!(alpha_equivalent(&a, &a));
        assert!(alpha_equivalent(&a, &b));
        assert!(alpha_equivalent(&b, &a));
        assert!(!alpha_equivalent(&a, &c));
    }

    #[test]
    fn test_alpha_equivalence_transitive() {
        let a = Term::abs("x", Term::app(x(), Term::var("z")));
        let b = Term::abs("y", Term::app(y(), Term::var("z")));
        let c = Term::abs("w", Term::app(Term::var("w"), Term::var("z")));
        assert!(alpha_equivalent(&a, &b));
        assert!(alpha_equivalent(&b, &c));
        assert!(alpha_equivalent(&a, &c));
    }

    #[test]
    fn test_alpha_equivalence_bound_vs_free() {
        // λx. y  vs  λy. y
        let a = Term::abs("x", y());
        let b = Term::abs("y", y());
        assert!(!alpha_equivalent(&a, &b));
    }

    #[test]
    fn test_alpha_equivalence_respects_shadowing() {
        // λx. λx. x  ==  λa. λb. b,  !=  λa. λb. a
        let term = Term::abs("x", Term::abs("x", x()));
        let inner = Term::abs("a", Term::abs("b", Term::var("b")));
        let outer = Term::abs("a", Term::abs("b", Term::var("a")));
        assert!(alpha_equivalent(&term, &inner));
        assert!(!alpha_equivalent(&term, &outer));
    }
}
