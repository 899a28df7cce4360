//! Term rendering with span tracking.
//!
//! Produces the canonical debug text (`λx. x y`) or a nameless De Bruijn form
//! (`λ.0 y`), and records the byte range of every subterm keyed by its path.
//! The driver uses the spans to point at the redex it fired.

use std::collections::HashMap;

use crate::term::{RedexPath, Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Binder names as written
    Named,
    /// Bound variables as indices (0 = innermost binder), free ones by name
    DeBruijn,
}

/// Result of rendering with span information
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub text: String,
    pub spans: HashMap<RedexPath, (usize, usize)>, // path -> (start_byte, end_byte)
}

impl RenderResult {
    /// Byte range of the subterm at `path`.
    pub fn span_of(&self, path: &[usize]) -> Option<(usize, usize)> {
        self.spans.get(path).copied()
    }

    /// Text of the subterm at `path`.
    pub fn slice_of(&self, path: &[usize]) -> Option<&str> {
        self.span_of(path).map(|(start, end)| &self.text[start..end])
    }
}

pub fn render(term: &Term, notation: Notation) -> RenderResult {
    let mut renderer = Renderer {
        notation,
        output: String::with_capacity(64),
        spans: HashMap::new(),
        binders: Vec::new(),
        path: Vec::new(),
    };
    renderer.term(term);
    RenderResult {
        text: renderer.output,
        spans: renderer.spans,
    }
}

/// Render term to De Bruijn notation with span tracking
pub fn render_debruijn(term: &Term) -> RenderResult {
    render(term, Notation::DeBruijn)
}

/// Find redex span from path; normal forms have none.
pub fn redex_span(rendered: &RenderResult, redex_path: Option<&[usize]>) -> Option<(usize, usize)> {
    redex_path.and_then(|path| rendered.span_of(path))
}

struct Renderer<'a> {
    notation: Notation,
    output: String,
    spans: HashMap<RedexPath, (usize, usize)>,
    binders: Vec<&'a str>,
    path: Vec<usize>,
}

impl<'a> Renderer<'a> {
    fn term(&mut self, term: &'a Term) {
        let start = self.output.len();

        match term {
            Term::Var(name) => self.variable(name),
            Term::Abs(param, body) => {
                self.output.push('λ');
                if self.notation == Notation::Named {
                    self.output.push_str(param);
                    self.output.push_str(". ");
                } else {
                    self.output.push('.');
                }
                self.binders.push(param);
                self.child(0, body, false);
                self.binders.pop();
            }
            Term::App(func, arg) => {
                let func_parens = matches!(**func, Term::Abs(..));
                let arg_parens = !matches!(**arg, Term::Var(_));
                self.child(0, func, func_parens);
                self.output.push(' ');
                self.child(1, arg, arg_parens);
            }
        }

        self.spans.insert(self.path.clone(), (start, self.output.len()));
    }

    fn child(&mut self, direction: usize, term: &'a Term, parens: bool) {
        if parens {
            self.output.push('(');
        }
        self.path.push(direction);
        self.term(term);
        self.path.pop();
        if parens {
            self.output.push(')');
        }
    }

    fn variable(&mut self, name: &str) {
        let index = match self.notation {
            Notation::Named => None,
            Notation::DeBruijn => self.binders.iter().rev().position(|b| *b == name),
        };
        match index {
            Some(index) => self.output.push_str(&index.to_string()),
            None => self.output.push_str(name),
        }
    }
}
