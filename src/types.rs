//! Types and type schemes for Hindley-Milner inference.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar(pub u32);

impl TypeVar {
    pub fn new(id: u32) -> Self {
        TypeVar(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeVar {
    /// `a`..`z`, then `a1`..`z1`, and so on.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'a' + (self.0 % 26) as u8) as char;
        match self.0 / 26 {
            0 => write!(f, "{}", letter),
            round => write!(f, "{}{}", letter, round),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Var(TypeVar),
    Fun(Box<Type>, Box<Type>),
    Base(String),
}

impl Type {
    pub fn var(id: u32) -> Self {
        Type::Var(TypeVar(id))
    }

    pub fn fun(from: Type, to: Type) -> Self {
        Type::Fun(Box::new(from), Box::new(to))
    }

    pub fn base(name: impl Into<String>) -> Self {
        Type::Base(name.into())
    }

    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        let mut set = BTreeSet::new();
        self.collect_vars(&mut set);
        set
    }

    fn collect_vars(&self, acc: &mut BTreeSet<TypeVar>) {
        match self {
            Type::Var(v) => {
                acc.insert(*v);
            }
            Type::Fun(from, to) => {
                from.collect_vars(acc);
                to.collect_vars(acc);
            }
            Type::Base(_) => {}
        }
    }

    pub fn occurs(&self, var: TypeVar) -> bool {
        match self {
            Type::Var(v) => *v == var,
            Type::Fun(from, to) => from.occurs(var) || to.occurs(var),
            Type::Base(_) => false,
        }
    }

    /// Renumber type variables 0, 1, 2, ... in order of first occurrence.
    pub fn canonical(&self) -> Type {
        fn go(ty: &Type, mapping: &mut BTreeMap<TypeVar, TypeVar>) -> Type {
            match ty {
                Type::Var(v) => {
                    let next = TypeVar(mapping.len() as u32);
                    Type::Var(*mapping.entry(*v).or_insert(next))
                }
                Type::Fun(from, to) => {
                    let from = go(from, mapping);
                    let to = go(to, mapping);
                    Type::fun(from, to)
                }
                Type::Base(name) => Type::Base(name.clone()),
            }
        }

        go(self, &mut BTreeMap::new())
    }

    /// Equal up to a consistent renaming of type variables.
    pub fn equivalent(&self, other: &Type) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Var(v) => write!(f, "{}", v),
            Type::Base(name) => f.write_str(name),
            Type::Fun(from, to) => {
                if matches!(**from, Type::Fun(..)) {
                    write!(f, "({}) -> {}", from, to)
                } else {
                    write!(f, "{} -> {}", from, to)
                }
            }
        }
    }
}

/// A type quantified over `vars`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub vars: Vec<TypeVar>,
    pub ty: Type,
}

impl Scheme {
    pub fn monomorphic(ty: Type) -> Self {
        Scheme {
            vars: Vec::new(),
            ty,
        }
    }

    pub fn polymorphic(vars: Vec<TypeVar>, ty: Type) -> Self {
        Scheme { vars, ty }
    }

    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        let mut free = self.ty.free_type_vars();
        for var in &self.vars {
            free.remove(var);
        }
        free
    }

    /// Every variable mentioned, quantified or not.
    pub(crate) fn max_var(&self) -> Option<TypeVar> {
        self.ty
            .free_type_vars()
            .into_iter()
            .chain(self.vars.iter().copied())
            .max()
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vars.is_empty() {
            return write!(f, "{}", self.ty);
        }
        f.write_str("forall")?;
        for var in &self.vars {
            write!(f, " {}", var)?;
        }
        write!(f, ". {}", self.ty)
    }
}
