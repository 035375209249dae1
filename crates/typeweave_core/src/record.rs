//! Record types: fixed-shape composites with named, typed fields.
//!
//! Records are nominal. An instance remembers the record type that built it,
//! and only that type's `is` accepts it; a structurally identical record type
//! with another identity does not.
//!
//! # Extension
//!
//! [`RecordType::extend`] builds a new record type from the base's fields
//! plus an ordered list of [`Mixin`] sources. Fields are merged with a
//! conflict check, so a name repeated across sources fails unless the
//! extension allows overrides (later sources win).
//!
//! # Behavior
//!
//! Methods live in a [`Behavior`] attached once per record type. Lookup
//! checks the type's own behavior, then each extension source in order.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use log::debug;
use typeweave_foundation::{Error, LtOrdMap, Record, Result, Value};

use crate::meta::{Field, Meta};
use crate::report;
use crate::ty::{Path, Segment, Type, reject};
use crate::util::{get_type_name, merge_fields};

/// A method: receives the instance and the call arguments.
pub type Method = Arc<dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync>;

/// Named methods attached to a record type.
#[derive(Clone, Default)]
pub struct Behavior {
    methods: Vec<(Arc<str>, Method)>,
}

impl Behavior {
    /// Creates an empty behavior.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a method, replacing any method with the same name.
    #[must_use]
    pub fn with_method<F>(mut self, name: impl Into<Arc<str>>, method: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let method: Method = Arc::new(method);
        match self.methods.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = method,
            None => self.methods.push((name, method)),
        }
        self
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, m)| m)
    }

    /// Returns the method names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|(n, _)| n.as_ref())
    }

    /// Returns the number of methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if there are no methods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// One source of an extension.
#[derive(Clone, Debug)]
pub enum Mixin {
    /// Plain fields.
    Props(Vec<Field>),
    /// Another record type; its fields are used and its behavior joins the
    /// lookup chain.
    Record(RecordType),
    /// Methods only.
    Behavior(Behavior),
}

impl Mixin {
    /// Builds a field source from name/type pairs.
    pub fn props<K: Into<Arc<str>>>(props: impl IntoIterator<Item = (K, Type)>) -> Self {
        Self::Props(
            props
                .into_iter()
                .map(|(name, ty)| Field::new(name, ty))
                .collect(),
        )
    }

    fn fields(&self) -> &[Field] {
        match self {
            Self::Props(fields) => fields,
            Self::Record(record) => record.props(),
            Self::Behavior(_) => &[],
        }
    }
}

impl From<Vec<Field>> for Mixin {
    fn from(fields: Vec<Field>) -> Self {
        Self::Props(fields)
    }
}

impl From<RecordType> for Mixin {
    fn from(record: RecordType) -> Self {
        Self::Record(record)
    }
}

impl From<Behavior> for Mixin {
    fn from(behavior: Behavior) -> Self {
        Self::Behavior(behavior)
    }
}

/// Options for [`RecordType::extend_with`].
#[derive(Clone, Debug, Default)]
pub struct ExtendOptions<'a> {
    /// Name of the new type.
    pub name: Option<&'a str>,
    /// Let later sources replace earlier fields instead of failing.
    pub allow_override: bool,
}

/// A record type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RecordType(pub(crate) Type);

/// Creates a record type from name/type pairs.
///
/// # Errors
///
/// Fails with `Conflict` if a field name repeats.
pub fn record<K: Into<Arc<str>>>(
    props: impl IntoIterator<Item = (K, Type)>,
    name: Option<&str>,
) -> Result<RecordType> {
    let source: Vec<Field> = props
        .into_iter()
        .map(|(name, ty)| Field::new(name, ty))
        .collect();
    let mut fields = Vec::with_capacity(source.len());
    merge_fields(&mut fields, &source, false, name.unwrap_or("struct"))?;
    Ok(RecordType(Type::new(
        Meta::Record {
            props: fields,
            path: Vec::new(),
        },
        name,
    )))
}

impl RecordType {
    /// Returns the declared fields, in declaration order.
    #[must_use]
    pub fn props(&self) -> &[Field] {
        match self.0.meta() {
            Meta::Record { props, .. } => props,
            _ => &[],
        }
    }

    /// Returns the extension sources, base first.
    #[must_use]
    pub fn path(&self) -> &[Mixin] {
        match self.0.meta() {
            Meta::Record { path, .. } => path,
            _ => &[],
        }
    }

    /// Returns the underlying type.
    #[must_use]
    pub fn as_type(&self) -> &Type {
        &self.0
    }

    /// Extends this record with `mixins`, rejecting repeated field names.
    ///
    /// # Errors
    ///
    /// Fails with `Conflict` if a field name appears in more than one source.
    pub fn extend(
        &self,
        mixins: impl IntoIterator<Item = Mixin>,
        name: Option<&str>,
    ) -> Result<RecordType> {
        self.extend_with(
            mixins,
            ExtendOptions {
                name,
                allow_override: false,
            },
        )
    }

    /// Extends this record with `mixins` under `options`.
    ///
    /// # Errors
    ///
    /// Fails with `Conflict` on a repeated field name unless
    /// `options.allow_override` is set.
    pub fn extend_with(
        &self,
        mixins: impl IntoIterator<Item = Mixin>,
        options: ExtendOptions<'_>,
    ) -> Result<RecordType> {
        let target = options
            .name
            .map_or_else(|| format!("extension of {}", get_type_name(&self.0)), str::to_string);
        let mixins: Vec<Mixin> = mixins.into_iter().collect();
        let mut props = self.props().to_vec();
        for mixin in &mixins {
            merge_fields(&mut props, mixin.fields(), options.allow_override, &target)?;
        }
        let mut path = Vec::with_capacity(mixins.len() + 1);
        path.push(Mixin::Record(self.clone()));
        path.extend(mixins);
        let extended = RecordType(Type::new(Meta::Record { props, path }, options.name));
        debug!("extended {} into {}", self.0, extended.0);
        Ok(extended)
    }

    /// Attaches `behavior` to this type.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyAssigned` if behavior was already attached or the
    /// type has already constructed a value.
    pub fn set_behavior(&self, behavior: Behavior) -> Result<()> {
        self.0
            .0
            .behavior
            .set(behavior)
            .map_err(|_| report::raise(Error::already_assigned("behavior", get_type_name(&self.0))))?;
        debug!("attached behavior to {}", self.0);
        Ok(())
    }

    /// Returns the attached behavior, if any.
    #[must_use]
    pub fn behavior(&self) -> Option<&Behavior> {
        self.0.0.behavior.get()
    }

    /// Resolves a method by name: own behavior, then each extension source
    /// in order.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<Method> {
        if let Some(method) = self.behavior().and_then(|b| b.get(name)) {
            return Some(method.clone());
        }
        self.path().iter().find_map(|mixin| match mixin {
            Mixin::Record(record) => record.method(name),
            Mixin::Behavior(behavior) => behavior.get(name).cloned(),
            Mixin::Props(_) => None,
        })
    }

    /// Invokes method `name` on `instance`.
    ///
    /// # Errors
    ///
    /// Fails with `Validation` if `instance` is not an instance of this
    /// type, `MethodNotFound` if no method resolves, or whatever the method
    /// returns.
    pub fn call_method(&self, instance: &Value, name: &str, args: &[Value]) -> Result<Value> {
        if !self.0.is(instance) {
            return Err(report::raise(Error::validation(
                get_type_name(&self.0),
                instance.clone(),
                vec![get_type_name(&self.0), name.to_string()],
            )));
        }
        let Some(method) = self.method(name) else {
            return Err(report::raise(Error::method_not_found(
                get_type_name(&self.0),
                name,
            )));
        };
        method(instance, args)
    }
}

impl Deref for RecordType {
    type Target = Type;

    fn deref(&self) -> &Type {
        &self.0
    }
}

impl From<RecordType> for Type {
    fn from(record: RecordType) -> Self {
        record.0
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub(crate) fn is(ty: &Type, value: &Value) -> bool {
    value.as_record().is_some_and(|r| r.type_id() == ty.id())
}

pub(crate) fn create(ty: &Type, props: &[Field], value: &Value, path: &Path<'_>) -> Result<Value> {
    if is(ty, value) {
        return Ok(value.clone());
    }
    // First construction seals the behavior slot.
    ty.0.behavior.get_or_init(Behavior::default);

    let lookup = |name: &str| -> Value {
        let found = match value {
            Value::Map(m) => m.get(&Value::from(name)).cloned(),
            Value::Record(r) => r.get(name).cloned(),
            _ => None,
        };
        found.unwrap_or(Value::Nil)
    };
    if !matches!(value, Value::Map(_) | Value::Record(_)) {
        return reject(ty, value, path);
    }

    let mut fields = LtOrdMap::new();
    for field in props {
        let raw = lookup(&field.name);
        let built = field
            .ty
            .create(&raw, &path.child(Segment::Field(&field.name)))?;
        fields = fields.insert(field.name.clone(), built);
    }
    Ok(Value::Record(Record::new(ty.shape(), fields)))
}
