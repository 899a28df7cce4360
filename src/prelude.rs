//! Standard combinators and Church encodings.
//!
//! These give the CLI and the tests a vocabulary of well-known terms without
//! a parser. `lookup` resolves a name, and bare numbers resolve to Church
//! numerals.

use crate::term::Term;

fn v(name: &str) -> Term {
    Term::var(name)
}

/// I = λx. x
pub fn identity() -> Term {
    Term::abs("x", v("x"))
}

/// K = λx. λy. x
pub fn k() -> Term {
    Term::lambda(["x", "y"], v("x"))
}

/// S = λx. λy. λz. x z (y z)
pub fn s() -> Term {
    Term::lambda(
        ["x", "y", "z"],
        Term::app(Term::app(v("x"), v("z")), Term::app(v("y"), v("z"))),
    )
}

/// B = λf. λg. λx. f (g x)
pub fn b() -> Term {
    Term::lambda(["f", "g", "x"], Term::app(v("f"), Term::app(v("g"), v("x"))))
}

/// C = λf. λx. λy. f y x
pub fn c() -> Term {
    Term::lambda(["f", "x", "y"], Term::apply(v("f"), [v("y"), v("x")]))
}

/// W = λf. λx. f x x
pub fn w() -> Term {
    Term::lambda(["f", "x"], Term::apply(v("f"), [v("x"), v("x")]))
}

/// ω = λx. x x
pub fn self_apply() -> Term {
    Term::abs("x", Term::app(v("x"), v("x")))
}

/// Ω = ω ω, the smallest term without a normal form
pub fn omega() -> Term {
    Term::app(self_apply(), self_apply())
}

/// Y = λf. (λx. f (x x)) (λx. f (x x))
pub fn y() -> Term {
    let half = Term::abs("x", Term::app(v("f"), Term::app(v("x"), v("x"))));
    Term::abs("f", Term::app(half.clone(), half))
}

/// true = λt. λf. t
pub fn tru() -> Term {
    Term::lambda(["t", "f"], v("t"))
}

/// false = λt. λf. f
pub fn fls() -> Term {
    Term::lambda(["t", "f"], v("f"))
}

/// not = λp. p false true
pub fn not() -> Term {
    Term::abs("p", Term::apply(v("p"), [fls(), tru()]))
}

/// and = λp. λq. p q p
pub fn and() -> Term {
    Term::lambda(["p", "q"], Term::apply(v("p"), [v("q"), v("p")]))
}

/// Church numeral `n` = λf. λx. f (f ... (f x))
pub fn church(n: usize) -> Term {
    let body = (0..n).fold(v("x"), |acc, _| Term::app(v("f"), acc));
    Term::lambda(["f", "x"], body)
}

/// succ = λn. λf. λx. f (n f x)
pub fn succ() -> Term {
    Term::lambda(
        ["n", "f", "x"],
        Term::app(v("f"), Term::apply(v("n"), [v("f"), v("x")])),
    )
}

/// plus = λm. λn. λf. λx. m f (n f x)
pub fn plus() -> Term {
    Term::lambda(
        ["m", "n", "f", "x"],
        Term::apply(v("m"), [v("f"), Term::apply(v("n"), [v("f"), v("x")])]),
    )
}

/// mult = λm. λn. λf. m (n f)
pub fn mult() -> Term {
    Term::lambda(["m", "n", "f"], Term::app(v("m"), Term::app(v("n"), v("f"))))
}

/// pred = λn. λf. λx. n (λg. λh. h (g f)) (λu. x) (λu. u)
pub fn pred() -> Term {
    let step = Term::lambda(["g", "h"], Term::app(v("h"), Term::app(v("g"), v("f"))));
    Term::lambda(
        ["n", "f", "x"],
        Term::apply(
            v("n"),
            [step, Term::abs("u", v("x")), Term::abs("u", v("u"))],
        ),
    )
}

/// Largest numeral [`lookup`] builds. Numerals nest one application per
/// unit, and terms that deep exhaust the stack during reduction.
pub const MAX_NUMERAL: usize = 1000;

/// Names accepted by [`lookup`], besides numerals.
pub const NAMES: &[&str] = &[
    "I", "K", "S", "B", "C", "W", "omega", "Omega", "Y", "true", "false", "not", "and", "succ",
    "plus", "mult", "pred",
];

pub fn lookup(name: &str) -> Option<Term> {
    if name.bytes().all(|b| b.is_ascii_digit()) && !name.is_empty() {
        return match name.parse::<usize>() {
            Ok(n) if n <= MAX_NUMERAL => Some(church(n)),
            _ => None,
        };
    }

    let term = match name {
        "I" | "id" => identity(),
        "K" => k(),
        "S" => s(),
        "B" => b(),
        "C" => c(),
        "W" => w(),
        "omega" => self_apply(),
        "Omega" => omega(),
        "Y" => y(),
        "true" => tru(),
        "false" => fls(),
        "not" => not(),
        "and" => and(),
        "succ" => succ(),
        "plus" => plus(),
        "mult" => mult(),
        "pred" => pred(),
        _ => return None,
    };
    Some(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beta::Strategy;
    use crate::normal::normalize;

    fn eval(term: Term) -> Term {
        normalize(&term, 10_000, Strategy::NormalOrder)
            .normal_form()
            .expect("prelude term terminates")
    }

    #[test]
    fn test_every_name_resolves() {
        for name in NAMES {
            assert!(lookup(name).is_some(), "{} should resolve", name);
        }
        assert!(lookup("nope").is_none());
        assert_eq!(lookup("3"), Some(church(3)));
    }

    #[test]
    fn test_numeral_limit() {
        assert_eq!(lookup("1000"), Some(church(MAX_NUMERAL)));
        assert!(lookup("1001").is_none());
        assert!(lookup("99999999999999999999999").is_none());
    }

    #[test]
    fn test_deep_numeral_reduces() {
        let term = Term::app(succ(), church(MAX_NUMERAL));
        let result = normalize(&term, 10, Strategy::NormalOrder);
        assert!(result.terminated);
        assert_eq!(result.term.depth(), MAX_NUMERAL + 4);
    }

    #[test]
    fn test_church_numeral_shape() {
        assert_eq!(church(0).to_string(), "λf. λx. x");
        assert_eq!(church(2).to_string(), "λf. λx. f (f x)");
    }

    #[test]
    fn test_skk_is_identity() {
        assert_eq!(eval(Term::apply(s(), [k(), k()])), identity());
    }

    #[test]
    fn test_booleans() {
        assert_eq!(eval(Term::app(not(), tru())), fls());
        assert_eq!(eval(Term::apply(and(), [tru(), fls()])), fls());
        assert_eq!(eval(Term::apply(and(), [tru(), tru()])), tru());
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval(Term::app(succ(), church(2))), church(3));
        assert_eq!(eval(Term::app(pred(), church(3))), church(2));
        assert_eq!(eval(Term::app(pred(), church(0))), church(0));
        assert_eq!(eval(Term::apply(mult(), [church(3), church(2)])), church(6));
    }

    #[test]
    fn test_y_unfolds() {
        // Y K keeps producing binders and never settles
        let result = normalize(&Term::app(y(), k()), 200, Strategy::NormalOrder);
        assert!(!result.terminated);
    }

    #[test]
    fn test_composition() {
        // B succ succ 1 = 3
        let term = Term::apply(b(), [succ(), succ(), church(1)]);
        assert_eq!(eval(term), church(3));
        // C K a b = K b a = b
        let term = Term::apply(c(), [k(), Term::var("a"), Term::var("b")]);
        assert_eq!(eval(term), Term::var("b"));
        // W K a = K a a = a
        assert_eq!(eval(Term::apply(w(), [k(), Term::var("a")])), Term::var("a"));
    }
}
