use thiserror::Error;

use crate::subst::{Substitutable, Substitution};
use crate::types::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch { expected: Type, found: Type },
    #[error("occurs check: cannot construct infinite type {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type },
}

/// Most general substitution making `t1` and `t2` equal.
///
/// ```text
/// unify(a, Int)              = [a := Int]
/// unify(a -> b, Int -> Bool) = [a := Int, b := Bool]
/// unify(a, a -> Int)         = occurs check failure
/// unify(Int, Bool)           = mismatch
/// ```
pub fn unify(t1: &Type, t2: &Type) -> Result<Substitution, UnifyError> {
    match (t1, t2) {
        (Type::Base(a), Type::Base(b)) if a == b => Ok(Substitution::identity()),
        (Type::Var(a), Type::Var(b)) if a == b => Ok(Substitution::identity()),
        (Type::Var(var), ty) | (ty, Type::Var(var)) => bind(*var, ty),
        (Type::Fun(from1, to1), Type::Fun(from2, to2)) => {
            let s1 = unify(from1, from2)?;
            let s2 = unify(&to1.apply(&s1), &to2.apply(&s1))?;
            Ok(s2.compose(&s1))
        }
        _ => Err(UnifyError::Mismatch {
            expected: t1.clone(),
            found: t2.clone(),
        }),
    }
}

fn bind(var: TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if ty.occurs(var) {
        return Err(UnifyError::OccursCheck {
            var,
            ty: ty.clone(),
        });
    }
    Ok(Substitution::singleton(var, ty.clone()))
}
