//! Type-level substitutions.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::types::{Scheme, Type, TypeVar};

/// Things a substitution can be applied to.
pub trait Substitutable {
    fn apply(&self, subst: &Substitution) -> Self;
    fn free_type_vars(&self) -> BTreeSet<TypeVar>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(BTreeMap<TypeVar, Type>);

impl Substitution {
    pub fn identity() -> Self {
        Substitution(BTreeMap::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        Substitution(BTreeMap::from([(var, ty)]))
    }

    pub fn get(&self, var: TypeVar) -> Option<&Type> {
        self.0.get(&var)
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeVar, &Type)> {
        self.0.iter()
    }

    /// `self ∘ other`: applying the result equals applying `other`, then `self`.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result: BTreeMap<TypeVar, Type> = other
            .0
            .iter()
            .map(|(var, ty)| (*var, ty.apply(self)))
            .collect();

        for (var, ty) in &self.0 {
            result.entry(*var).or_insert_with(|| ty.clone());
        }

        Substitution(result)
    }

    /// Same substitution without the given variables.
    pub fn without(&self, vars: &[TypeVar]) -> Substitution {
        Substitution(
            self.0
                .iter()
                .filter(|(var, _)| !vars.contains(var))
                .map(|(var, ty)| (*var, ty.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(TypeVar, Type)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (TypeVar, Type)>>(iter: I) -> Self {
        Substitution(iter.into_iter().collect())
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (var, ty)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} := {}", var, ty)?;
        }
        f.write_str("]")
    }
}

impl Substitutable for Type {
    fn apply(&self, subst: &Substitution) -> Type {
        match self {
            Type::Var(v) => subst.get(*v).cloned().unwrap_or_else(|| self.clone()),
            Type::Fun(from, to) => Type::fun(from.apply(subst), to.apply(subst)),
            Type::Base(_) => self.clone(),
        }
    }

    fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        Type::free_type_vars(self)
    }
}

impl Substitutable for Scheme {
    /// Quantified variables are left alone.
    fn apply(&self, subst: &Substitution) -> Scheme {
        let subst = subst.without(&self.vars);
        Scheme {
            vars: self.vars.clone(),
            ty: self.ty.apply(&subst),
        }
    }

    fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        Scheme::free_type_vars(self)
    }
}
