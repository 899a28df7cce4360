//! Fresh name generation.
//!
//! A `NameSupply` belongs to exactly one top-level operation. Its counter
//! only grows, so names handed out by one supply never repeat, and nothing
//! is shared between concurrent callers.

use std::collections::BTreeSet;

use crate::term::Name;

#[derive(Debug, Clone, Default)]
pub struct NameSupply {
    next: usize,
}

impl NameSupply {
    pub fn new() -> Self {
        NameSupply { next: 0 }
    }

    /// Produce a name derived from `hint` that is not in `avoid`.
    ///
    /// Trailing digits are stripped from the hint so repeated renaming of
    /// `y` gives `y1`, `y2`, ... rather than `y12`.
    pub fn fresh(&mut self, hint: &str, avoid: &BTreeSet<Name>) -> Name {
        let stem = hint.trim_end_matches(|c: char| c.is_ascii_digit());
        let stem = if stem.is_empty() { "v" } else { stem };

        loop {
            self.next += 1;
            let candidate = format!("{}{}", stem, self.next);
            if !avoid.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }

    /// Number of names handed out or skipped so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}
