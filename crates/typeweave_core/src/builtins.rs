//! Built-in irreducible leaves.
//!
//! Each leaf is created once per process and shared, so every caller sees
//! the same type identity.

use once_cell::sync::Lazy;
use typeweave_foundation::Value;

use crate::irreducible;
use crate::ty::Type;

static ANY: Lazy<Type> = Lazy::new(|| irreducible("Any", |_| true));
static NIL: Lazy<Type> = Lazy::new(|| irreducible("Nil", Value::is_nil));
static STR: Lazy<Type> = Lazy::new(|| irreducible("Str", |v| matches!(v, Value::String(_))));
static NUM: Lazy<Type> = Lazy::new(|| {
    irreducible("Num", |v| matches!(v, Value::Int(_) | Value::Float(_)))
});
static INT: Lazy<Type> = Lazy::new(|| {
    irreducible("Int", |v| match v {
        Value::Int(_) => true,
        Value::Float(n) => n.is_finite() && n.fract() == 0.0,
        _ => false,
    })
});
static BOOL: Lazy<Type> = Lazy::new(|| irreducible("Bool", |v| matches!(v, Value::Bool(_))));
static ARR: Lazy<Type> = Lazy::new(|| irreducible("Arr", |v| matches!(v, Value::Vec(_))));
static OBJ: Lazy<Type> = Lazy::new(|| {
    irreducible("Obj", |v| matches!(v, Value::Map(_) | Value::Record(_)))
});
static FUNC: Lazy<Type> = Lazy::new(|| irreducible("Func", |v| matches!(v, Value::Fn(_))));

/// Accepts every value.
#[must_use]
pub fn any() -> Type {
    ANY.clone()
}

/// Accepts only `nil`.
#[must_use]
pub fn nil() -> Type {
    NIL.clone()
}

/// Accepts strings.
#[must_use]
pub fn string() -> Type {
    STR.clone()
}

/// Accepts integers and floats.
#[must_use]
pub fn number() -> Type {
    NUM.clone()
}

/// Accepts integers and integral floats.
#[must_use]
pub fn integer() -> Type {
    INT.clone()
}

/// Accepts booleans.
#[must_use]
pub fn boolean() -> Type {
    BOOL.clone()
}

/// Accepts any sequence.
#[must_use]
pub fn array() -> Type {
    ARR.clone()
}

/// Accepts maps and record instances.
#[must_use]
pub fn object() -> Type {
    OBJ.clone()
}

/// Accepts any callable, checked or not.
#[must_use]
pub fn function() -> Type {
    FUNC.clone()
}
