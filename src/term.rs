//! Lambda calculus term representation with structural sharing.
//!
//! Terms are immutable trees. Children sit behind `Arc`, so every rewrite
//! rebuilds only the spine leading to the changed subterm and shares the
//! rest. Equality and hashing are up to alpha-equivalence.
//!
//! Every traversal (substitution, free variables, rendering, drop) recurses
//! on the term structure, so nesting depth is bounded by the thread's stack.
//! Terms around a thousand levels deep are fine on a 2 MiB thread stack;
//! much deeper ones (a Church numeral of 5000, say) overflow it and abort.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::alpha;
use crate::render::{render, Notation};

/// Variable and binder names.
pub type Name = String;

/// Path from the root to a subterm: `0` selects the function of an
/// application or the body of an abstraction, `1` the argument.
pub type RedexPath = Vec<usize>;

/// Term type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermType {
    Var,
    Abs,
    App,
}

#[derive(Debug, Clone)]
pub enum Term {
    Var(Name),
    Abs(Name, Arc<Term>),
    App(Arc<Term>, Arc<Term>),
}

impl Term {
    pub fn var(name: impl Into<Name>) -> Term {
        Term::Var(name.into())
    }

    pub fn abs(param: impl Into<Name>, body: impl Into<Arc<Term>>) -> Term {
        Term::Abs(param.into(), body.into())
    }

    pub fn app(func: impl Into<Arc<Term>>, arg: impl Into<Arc<Term>>) -> Term {
        Term::App(func.into(), arg.into())
    }

    /// Left-nested application `func a1 a2 ... an`.
    pub fn apply<I>(func: Term, args: I) -> Term
    where
        I: IntoIterator<Item = Term>,
    {
        args.into_iter().fold(func, Term::app)
    }

    /// Curried abstraction `λp1. λp2. ... body`.
    pub fn lambda<I, S>(params: I, body: Term) -> Term
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<Name>,
    {
        params
            .into_iter()
            .rev()
            .fold(body, |body, param| Term::abs(param, body))
    }

    pub fn kind(&self) -> TermType {
        match self {
            Term::Var(_) => TermType::Var,
            Term::Abs(..) => TermType::Abs,
            Term::App(..) => TermType::App,
        }
    }

    /// Names occurring free, i.e. not bound by an enclosing abstraction
    /// inside this term.
    pub fn free_vars(&self) -> BTreeSet<Name> {
        fn collect<'a>(term: &'a Term, bound: &mut Vec<&'a str>, out: &mut BTreeSet<Name>) {
            match term {
                Term::Var(name) => {
                    if !bound.contains(&name.as_str()) {
                        out.insert(name.clone());
                    }
                }
                Term::Abs(param, body) => {
                    bound.push(param);
                    collect(body, bound, out);
                    bound.pop();
                }
                Term::App(func, arg) => {
                    collect(func, bound, out);
                    collect(arg, bound, out);
                }
            }
        }

        let mut out = BTreeSet::new();
        collect(self, &mut Vec::new(), &mut out);
        out
    }

    pub fn occurs_free(&self, name: &str) -> bool {
        match self {
            Term::Var(v) => v == name,
            Term::Abs(param, body) => param != name && body.occurs_free(name),
            Term::App(func, arg) => func.occurs_free(name) || arg.occurs_free(name),
        }
    }

    pub fn is_redex(&self) -> bool {
        matches!(self, Term::App(func, _) if matches!(**func, Term::Abs(..)))
    }

    /// Subterm at `path`, if the path exists.
    pub fn subterm(&self, path: &[usize]) -> Option<&Term> {
        match (self, path.split_first()) {
            (_, None) => Some(self),
            (Term::Abs(_, body), Some((0, rest))) => body.subterm(rest),
            (Term::App(func, _), Some((0, rest))) => func.subterm(rest),
            (Term::App(_, arg), Some((1, rest))) => arg.subterm(rest),
            _ => None,
        }
    }

    /// Exact syntactic equality, binder names included.
    pub fn identical(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Var(a), Term::Var(b)) => a == b,
            (Term::Abs(p1, b1), Term::Abs(p2, b2)) => p1 == p2 && b1.identical(b2),
            (Term::App(f1, a1), Term::App(f2, a2)) => f1.identical(f2) && a1.identical(a2),
            _ => false,
        }
    }

    /// Compute term size (number of nodes)
    pub fn size(&self) -> usize {
        match self {
            Term::Var(_) => 1,
            Term::Abs(_, body) => 1 + body.size(),
            Term::App(func, arg) => 1 + func.size() + arg.size(),
        }
    }

    /// Compute term depth
    pub fn depth(&self) -> usize {
        match self {
            Term::Var(_) => 1,
            Term::Abs(_, body) => 1 + body.depth(),
            Term::App(func, arg) => 1 + func.depth().max(arg.depth()),
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        alpha::alpha_equivalent(self, other)
    }
}

impl Eq for Term {}

impl Hash for Term {
    /// Hashes the nameless form so alpha-equivalent terms collide.
    fn hash<H: Hasher>(&self, state: &mut H) {
        fn go<'a, H: Hasher>(term: &'a Term, binders: &mut Vec<&'a str>, state: &mut H) {
            match term {
                Term::Var(name) => match binders.iter().rposition(|b| *b == name.as_str()) {
                    Some(pos) => {
                        0u8.hash(state);
                        (binders.len() - pos).hash(state);
                    }
                    None => {
                        1u8.hash(state);
                        name.hash(state);
                    }
                },
                Term::Abs(param, body) => {
                    2u8.hash(state);
                    binders.push(param);
                    go(body, binders, state);
                    binders.pop();
                }
                Term::App(func, arg) => {
                    3u8.hash(state);
                    go(func, binders, state);
                    go(arg, binders, state);
                }
            }
        }

        go(self, &mut Vec::new(), state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, Notation::Named).text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(term: &Term) -> u64 {
        let mut hasher = DefaultHasher::new();
        term.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_free_vars() {
        // λx. x y z
        let term = Term::abs(
            "x",
            Term::apply(Term::var("x"), [Term::var("y"), Term::var("z")]),
        );
        let free: Vec<_> = term.free_vars().into_iter().collect();
        assert_eq!(free, vec!["y".to_string(), "z".to_string()]);
        assert!(term.occurs_free("y"));
        assert!(!term.occurs_free("x"));
    }

    #[test]
    fn test_free_vars_under_shadowing() {
        // x (λx. x)
        let term = Term::app(Term::var("x"), Term::abs("x", Term::var("x")));
        assert!(term.occurs_free("x"));
        assert_eq!(term.free_vars().len(), 1);
    }

    #[test]
    fn test_size_and_depth() {
        // (λx. x)(λx. x)
        let id = Term::abs("x", Term::var("x"));
        let term = Term::app(id.clone(), id);
        assert_eq!(term.size(), 5);
        assert_eq!(term.depth(), 3);
    }

    #[test]
    fn test_lambda_and_apply_helpers() {
        let k = Term::lambda(["x", "y"], Term::var("x"));
        assert!(k.identical(&Term::abs("x", Term::abs("y", Term::var("x")))));

        let app = Term::apply(Term::var("f"), [Term::var("a"), Term::var("b")]);
        assert!(app.identical(&Term::app(
            Term::app(Term::var("f"), Term::var("a")),
            Term::var("b")
        )));
    }

    #[test]
    fn test_equality_is_up_to_alpha() {
        let a = Term::abs("x", Term::var("x"));
        let b = Term::abs("y", Term::var("y"));
        assert_eq!(a, b);
        assert!(!a.identical(&b));
        assert_eq!(hash_of(&a), hash_of(&b));

        // free variables are compared by name
        assert_ne!(Term::var("x"), Term::var("y"));
    }

    #[test]
    fn test_subterm_and_redex() {
        let redex = Term::app(Term::abs("x", Term::var("x")), Term::var("y"));
        let term = Term::app(Term::var("f"), redex.clone());
        assert!(!term.is_redex());
        assert!(term.subterm(&[1]).is_some_and(Term::is_redex));
        assert!(term.subterm(&[1, 0, 0]).is_some_and(|t| t.kind() == TermType::Var));
        assert!(term.subterm(&[0, 0]).is_none());
    }

    #[test]
    fn test_display() {
        let term = Term::abs("x", Term::app(Term::var("x"), Term::var("y")));
        assert_eq!(term.to_string(), "λx. x y");
    }
}
