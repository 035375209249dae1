//! Typed functions with checked domain, checked codomain, and currying.
//!
//! [`FuncType::of`] wraps a host function in an [`Application`]: a small
//! state machine holding the arguments bound so far. Each call validates
//! the new arguments against the pending domain. While arguments are still
//! missing (curried mode only) the call returns a new checked function over
//! the remaining domain; once the domain is complete the host function runs
//! and its result is validated against the codomain.
//!
//! Function values carry a [`Signature`] of type identities, which is what
//! [`Type::is`] compares for function types. Unchecked callables never
//! satisfy a function type.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use typeweave_foundation::{Callable, Error, LtFn, Result, Signature, Value};

use crate::meta::Meta;
use crate::report;
use crate::ty::{Path, Segment, Type, reject};
use crate::util::get_type_name;

/// A function type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FuncType(pub(crate) Type);

/// Creates a function type from `domain` to `codomain`.
pub fn func(domain: impl IntoIterator<Item = Type>, codomain: Type, name: Option<&str>) -> FuncType {
    FuncType(Type::new(
        Meta::Func {
            domain: domain.into_iter().collect(),
            codomain,
        },
        name,
    ))
}

impl FuncType {
    /// Returns the parameter types.
    #[must_use]
    pub fn domain(&self) -> &[Type] {
        match self.0.meta() {
            Meta::Func { domain, .. } => domain,
            _ => &[],
        }
    }

    /// Returns the return type.
    #[must_use]
    pub fn codomain(&self) -> &Type {
        match self.0.meta() {
            Meta::Func { codomain, .. } => codomain,
            _ => &self.0,
        }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.domain().len()
    }

    /// Returns the signature a checked function of this type carries.
    #[must_use]
    pub fn signature(&self) -> Signature {
        Signature {
            domain: self.domain().iter().map(Type::id).collect(),
            codomain: self.codomain().id(),
        }
    }

    /// Returns the underlying type.
    #[must_use]
    pub fn as_type(&self) -> &Type {
        &self.0
    }

    /// Wraps `f` as a checked function of this type.
    ///
    /// With `curried` set, calls may supply fewer arguments than the
    /// domain; each such call returns a checked function over the rest.
    /// Without it, every call must supply exactly [`arity`](Self::arity)
    /// arguments: trailing parameters are never optional, even when their
    /// type accepts `Nil`. Pass `Value::Nil` explicitly instead.
    pub fn of<F>(&self, f: F, curried: bool) -> Value
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Application {
            func: self.clone(),
            target: Arc::new(f),
            curried,
            bound: Vec::new(),
        }
        .into_value()
    }
}

/// A partially applied checked function.
struct Application {
    func: FuncType,
    target: Callable,
    curried: bool,
    bound: Vec<Value>,
}

impl Application {
    fn pending(&self) -> &[Type] {
        &self.func.domain()[self.bound.len()..]
    }

    fn into_value(self) -> Value {
        let signature = Signature {
            domain: self.pending().iter().map(Type::id).collect(),
            codomain: self.func.codomain().id(),
        };
        let name = get_type_name(&self.func.0);
        let app = Arc::new(self);
        let call: Callable = Arc::new(move |args: &[Value]| app.apply(args));
        Value::Fn(LtFn::checked(name, signature, call))
    }

    fn accepts(&self, supplied: usize) -> bool {
        let pending = self.pending().len();
        if self.curried && pending > 0 {
            (1..=pending).contains(&supplied)
        } else {
            supplied == pending
        }
    }

    fn apply(&self, args: &[Value]) -> Result<Value> {
        let pending = self.pending();
        if !self.accepts(args.len()) {
            return report::fail(Error::arity(
                get_type_name(&self.func.0),
                pending.len(),
                args.len(),
            ));
        }

        let root = Path::root(&self.func.0);
        let mut bound = self.bound.clone();
        for (arg, ty) in args.iter().zip(pending) {
            let at = root.child(Segment::Index(bound.len()));
            let checked = ty.create(arg, &at)?;
            bound.push(checked);
        }

        if bound.len() < self.func.arity() {
            let next = Self {
                func: self.func.clone(),
                target: self.target.clone(),
                curried: self.curried,
                bound,
            };
            return Ok(next.into_value());
        }

        let result = (self.target)(&bound)?;
        self.func
            .codomain()
            .create(&result, &root.child(Segment::Label("codomain")))
    }
}

impl Deref for FuncType {
    type Target = Type;

    fn deref(&self) -> &Type {
        &self.0
    }
}

impl From<FuncType> for Type {
    fn from(func: FuncType) -> Self {
        func.0
    }
}

impl fmt::Debug for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub(crate) fn is(domain: &[Type], codomain: &Type, value: &Value) -> bool {
    value
        .as_fn()
        .and_then(LtFn::signature)
        .is_some_and(|sig| {
            sig.codomain == codomain.id()
                && sig.domain.len() == domain.len()
                && sig.domain.iter().zip(domain).all(|(id, ty)| *id == ty.id())
        })
}

pub(crate) fn create(
    ty: &Type,
    domain: &[Type],
    codomain: &Type,
    value: &Value,
    path: &Path<'_>,
) -> Result<Value> {
    if is(domain, codomain, value) {
        Ok(value.clone())
    } else {
        reject(ty, value, path)
    }
}
