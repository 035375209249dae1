//! Core value type for all typeweave data.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::collections::{LtMap, LtOrdMap, LtVec};
use crate::id::TypeId;

/// Core value type for all typeweave data.
///
/// Values are immutable and cheaply cloneable (O(1) for most variants).
/// Large composite values use structural sharing via persistent data structures.
#[derive(Clone)]
pub enum Value {
    /// The nil value (represents absence).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Persistent vector (ordered sequence).
    Vec(LtVec<Value>),
    /// Persistent map (key-value container).
    Map(LtMap<Value, Value>),
    /// Instance of a record type.
    Record(Record),
    /// Function reference.
    Fn(LtFn),
}

/// The type that produced a value.
///
/// Records keep a handle to their record type so that nominal membership can
/// be checked and so that a rebuilt record can be validated again by the type
/// that owns it.
pub trait Shape: Send + Sync {
    /// Identity of the type.
    fn id(&self) -> TypeId;

    /// Display name of the type.
    fn name(&self) -> String;

    /// Runs the type's constructor on `value`.
    ///
    /// # Errors
    ///
    /// Returns the constructor's validation error if `value` does not fit.
    fn construct(&self, value: &Value) -> crate::Result<Value>;
}

/// An immutable record instance: named fields plus the record type that built it.
#[derive(Clone)]
pub struct Record {
    shape: Arc<dyn Shape>,
    fields: LtOrdMap<Arc<str>, Value>,
}

impl Record {
    /// Creates a record owned by `shape`.
    ///
    /// Only record types call this; everything else obtains records through
    /// a constructor.
    #[must_use]
    pub fn new(shape: Arc<dyn Shape>, fields: LtOrdMap<Arc<str>, Value>) -> Self {
        Self { shape, fields }
    }

    /// Returns the identity of the record type that built this record.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.shape.id()
    }

    /// Returns the name of the record type that built this record.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.shape.name()
    }

    /// Returns the record type that built this record.
    #[must_use]
    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    /// Gets a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&Arc<str>, &Value)> {
        self.fields.iter()
    }

    /// Returns the fields as a plain map keyed by string values.
    #[must_use]
    pub fn to_map(&self) -> LtMap<Value, Value> {
        self.fields
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.clone()))
            .collect()
    }
}

/// Signature carried by a checked function.
///
/// Lists the identities of the declared domain types and the codomain type,
/// which is what function types compare when deciding membership.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Remaining parameter types, in order.
    pub domain: Vec<TypeId>,
    /// Return type.
    pub codomain: TypeId,
}

/// Callable body of a function value.
pub type Callable = Arc<dyn Fn(&[Value]) -> crate::Result<Value> + Send + Sync>;

/// Function reference.
///
/// Plain functions carry no signature; checked functions produced by a
/// function type carry the signature they were checked against.
#[derive(Clone)]
pub struct LtFn {
    name: Arc<str>,
    func: Callable,
    signature: Option<Signature>,
}

impl LtFn {
    /// Wraps an unchecked native function.
    pub fn native<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[Value]) -> crate::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
            signature: None,
        }
    }

    /// Wraps a callable that enforces `signature` on every application.
    #[must_use]
    pub fn checked(name: impl Into<Arc<str>>, signature: Signature, func: Callable) -> Self {
        Self {
            name: name.into(),
            func,
            signature: Some(signature),
        }
    }

    /// Function name for debugging.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared signature, if this is a checked function.
    #[must_use]
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Applies the function.
    ///
    /// # Errors
    ///
    /// Propagates whatever the function body returns.
    pub fn call(&self, args: &[Value]) -> crate::Result<Value> {
        (self.func)(args)
    }
}

impl Value {
    /// Returns a short name for this value's variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Vec(_) => "vec",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Fn(_) => "fn",
        }
    }

    /// Builds a map value from key-value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns true if this value is truthy.
    ///
    /// Only `nil` and `false` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    ///
    /// Note: Converting large i64 values to f64 may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a vector reference.
    #[must_use]
    pub const fn as_vec(&self) -> Option<&LtVec<Value>> {
        match self {
            Self::Vec(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a map reference.
    #[must_use]
    pub const fn as_map(&self) -> Option<&LtMap<Value, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a record reference.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Attempts to extract a function reference.
    #[must_use]
    pub const fn as_fn(&self) -> Option<&LtFn> {
        match self {
            Self::Fn(f) => Some(f),
            _ => None,
        }
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Vec(a), Self::Vec(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Fn(a), Self::Fn(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::Vec(v) => v.hash(state),
            Self::Map(m) => m.hash(state),
            Self::Record(r) => r.hash(state),
            Self::Fn(f) => f.hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Vec(v) => write!(f, "{v:?}"),
            Self::Map(m) => write!(f, "{m:?}"),
            Self::Record(r) => write!(f, "{r:?}"),
            Self::Fn(func) => write!(f, "{func:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Vec(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::Record(r) => write!(f, "{r}"),
            Self::Fn(func) => write!(f, "{func}"),
        }
    }
}

// Record implementations

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id() && self.fields == other.fields
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id().hash(state);
        self.fields.hash(state);
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.type_name());
        for (name, value) in self.fields() {
            s.field(name.as_ref(), value);
        }
        s.finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name())?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {name}: {value}")?;
        }
        write!(f, " }}")
    }
}

// LtFn implementations

impl PartialEq for LtFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for LtFn {}

impl Hash for LtFn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.func).cast::<()>().hash(state);
    }
}

impl fmt::Debug for LtFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signature.is_some() {
            write!(f, "<checked fn {}>", self.name)
        } else {
            write!(f, "<native fn {}>", self.name)
        }
    }
}

impl fmt::Display for LtFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl From<LtFn> for Value {
    fn from(f: LtFn) -> Self {
        Self::Fn(f)
    }
}

impl From<LtVec<Value>> for Value {
    fn from(v: LtVec<Value>) -> Self {
        Self::Vec(v)
    }
}

impl From<LtMap<Value, Value>> for Value {
    fn from(m: LtMap<Value, Value>) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Vec(v.into_iter().map(Into::into).collect())
    }
}
