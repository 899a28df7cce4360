use std::collections::{BTreeMap, BTreeSet};

use crate::subst::{Substitutable, Substitution};
use crate::term::Name;
use crate::types::{Scheme, Type, TypeVar};

/// Typing assumptions: variable name to type scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnv {
    bindings: BTreeMap<Name, Scheme>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: BTreeMap::new(),
        }
    }

    pub fn with_bindings<I, S>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, Scheme)>,
        S: Into<Name>,
    {
        TypeEnv {
            bindings: bindings
                .into_iter()
                .map(|(name, scheme)| (name.into(), scheme))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Scheme> {
        self.bindings.get(name)
    }

    /// New environment with `name` bound, shadowing any earlier binding.
    pub fn extend(&self, name: impl Into<Name>, scheme: Scheme) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), scheme);
        TypeEnv { bindings }
    }

    pub fn insert(&mut self, name: impl Into<Name>, scheme: Scheme) {
        self.bindings.insert(name.into(), scheme);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Scheme)> {
        self.bindings.iter()
    }

    /// Quantify over the variables of `ty` that the environment does not
    /// mention freely.
    pub fn generalize(&self, ty: &Type) -> Scheme {
        let env_free = Substitutable::free_type_vars(self);
        let vars = ty
            .free_type_vars()
            .into_iter()
            .filter(|var| !env_free.contains(var))
            .collect();
        Scheme::polymorphic(vars, ty.clone())
    }

    /// Largest type variable mentioned anywhere, quantified ones included.
    pub(crate) fn max_var(&self) -> Option<TypeVar> {
        self.bindings.values().filter_map(Scheme::max_var).max()
    }
}

impl Substitutable for TypeEnv {
    fn apply(&self, subst: &Substitution) -> TypeEnv {
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (name.clone(), scheme.apply(subst)))
                .collect(),
        }
    }

    fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        self.bindings
            .values()
            .flat_map(Scheme::free_type_vars)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_env() {
        let env = TypeEnv::empty();
        assert!(env.lookup("x").is_none());
        assert!(env.is_empty());
    }

    #[test]
    fn test_extend_shadows() {
        let env = TypeEnv::empty()
            .extend("x", Scheme::monomorphic(Type::base("Int")))
            .extend("x", Scheme::monomorphic(Type::base("Bool")));
        assert_eq!(env.lookup("x").map(|s| &s.ty), Some(&Type::base("Bool")));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_extend_leaves_original() {
        let env = TypeEnv::empty();
        let extended = env.extend("x", Scheme::monomorphic(Type::var(0)));
        assert!(env.lookup("x").is_none());
        assert!(extended.lookup("x").is_some());
    }

    #[test]
    fn test_free_type_vars_respects_quantifiers() {
        let env = TypeEnv::with_bindings([
            ("f", Scheme::polymorphic(vec![TypeVar(0)], Type::fun(Type::var(0), Type::var(1)))),
            ("g", Scheme::monomorphic(Type::var(2))),
        ]);
        let free: Vec<_> = Substitutable::free_type_vars(&env).into_iter().collect();
        assert_eq!(free, vec![TypeVar(1), TypeVar(2)]);
        assert_eq!(env.max_var(), Some(TypeVar(2)));
    }

    #[test]
    fn test_generalize_skips_env_vars() {
        let env = TypeEnv::with_bindings([("x", Scheme::monomorphic(Type::var(1)))]);
        let scheme = env.generalize(&Type::fun(Type::var(0), Type::var(1)));
        assert_eq!(scheme.vars, vec![TypeVar(0)]);
    }

    #[test]
    fn test_apply_substitution() {
        let env = TypeEnv::with_bindings([("x", Scheme::monomorphic(Type::var(0)))]);
        let env = env.apply(&Substitution::singleton(TypeVar(0), Type::base("Int")));
        assert_eq!(env.lookup("x").map(|s| &s.ty), Some(&Type::base("Int")));
    }
}
