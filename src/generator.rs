//! Term generator with configurable depth and size limits.
//!
//! Generates closed lambda terms. Binder names come from a small pool, so
//! shadowing and would-be captures show up often, which is what batch runs
//! and stress tests want.

use crate::term::Term;

/// Simple, fast random number generator (LCG)
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        SimpleRng {
            state: seed.wrapping_add(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        // LCG constants from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 16
    }

    pub fn gen_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min;
        min + (self.next_u64() % range as u64) as u32
    }
}

const BINDERS: &[&str] = &["x", "y", "z", "f", "g"];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub max_depth: usize,
    pub min_depth: usize,
    pub max_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_depth: 8,
            min_depth: 3,
            max_size: 100,
        }
    }
}

pub struct TermGenerator {
    config: GeneratorConfig,
}

impl TermGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        TermGenerator { config }
    }

    /// Generate a random closed term within configured constraints
    pub fn generate(&self, rng: &mut SimpleRng) -> Option<Term> {
        for _attempt in 0..100 {
            let term = self.generate_term(rng, 0, &mut Vec::new());

            if term.size() <= self.config.max_size {
                return Some(term);
            }
        }
        None
    }

    /// Recursive term generation; `scope` holds the binders in effect.
    fn generate_term(&self, rng: &mut SimpleRng, depth: usize, scope: &mut Vec<&'static str>) -> Term {
        // Force termination at max depth
        if depth + 1 >= self.config.max_depth {
            return match self.pick_var(rng, scope) {
                Some(name) => Term::var(name),
                None => self.abstraction(rng, depth, scope),
            };
        }

        // Below min depth, never stop at a variable
        let choice = if depth < self.config.min_depth {
            rng.gen_range(2, 10)
        } else {
            rng.gen_range(0, 10)
        };

        match choice {
            // Var: 20% probability
            0..=1 if !scope.is_empty() => match self.pick_var(rng, scope) {
                Some(name) => Term::var(name),
                None => self.abstraction(rng, depth, scope),
            },
            // Abs: 40% probability
            0..=5 => self.abstraction(rng, depth, scope),
            // App: 40% probability, only once something is in scope
            _ if scope.is_empty() => self.abstraction(rng, depth, scope),
            _ => {
                let func = self.generate_term(rng, depth + 1, scope);
                let arg = self.generate_term(rng, depth + 1, scope);
                Term::app(func, arg)
            }
        }
    }

    fn abstraction(&self, rng: &mut SimpleRng, depth: usize, scope: &mut Vec<&'static str>) -> Term {
        let param = BINDERS[rng.gen_range(0, BINDERS.len() as u32) as usize];
        scope.push(param);
        let body = if depth + 1 >= self.config.max_depth {
            Term::var(param)
        } else {
            self.generate_term(rng, depth + 1, scope)
        };
        scope.pop();
        Term::abs(param, body)
    }

    fn pick_var(&self, rng: &mut SimpleRng, scope: &[&'static str]) -> Option<&'static str> {
        if scope.is_empty() {
            return None;
        }
        Some(scope[rng.gen_range(0, scope.len() as u32) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation() {
        let generator = TermGenerator::new(GeneratorConfig::default());
        let mut rng = SimpleRng::seed_from_u64(42);

        let term = generator.generate(&mut rng).expect("default limits are satisfiable");
        assert!(term.size() > 0);
        assert!(term.depth() <= GeneratorConfig::default().max_depth);
    }

    #[test]
    fn test_terms_are_closed() {
        let generator = TermGenerator::new(GeneratorConfig::default());
        let mut rng = SimpleRng::seed_from_u64(7);
        for _ in 0..50 {
            if let Some(term) = generator.generate(&mut rng) {
                assert!(term.free_vars().is_empty(), "{} is open", term);
            }
        }
    }

    #[test]
    fn test_size_constraint() {
        let config = GeneratorConfig {
            max_depth: 4,
            min_depth: 2,
            max_size: 10,
        };
        let generator = TermGenerator::new(config);
        let mut rng = SimpleRng::seed_from_u64(123);

        for _ in 0..10 {
            if let Some(term) = generator.generate(&mut rng) {
                assert!(term.size() <= 10);
                assert!(term.depth() <= 4);
            }
        }
    }

    #[test]
    fn test_same_seed_same_terms() {
        let generator = TermGenerator::new(GeneratorConfig::default());
        let mut a = SimpleRng::seed_from_u64(9);
        let mut b = SimpleRng::seed_from_u64(9);
        for _ in 0..5 {
            let (ta, tb) = (generator.generate(&mut a), generator.generate(&mut b));
            assert_eq!(ta.map(|t| t.to_string()), tb.map(|t| t.to_string()));
        }
    }
}
