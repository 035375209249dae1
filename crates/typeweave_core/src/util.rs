//! Utility layer: diagnostic names, conflict-checked merge, assertions.

use typeweave_foundation::{Error, LtMap, Result, Value};

use crate::config::config;
use crate::meta::{Field, Meta};
use crate::report;
use crate::ty::Type;

/// Returns the name used for `ty` in diagnostics.
///
/// A declared name always wins. Otherwise, when name inference is enabled,
/// a structural name is rendered from the descriptor (`Array<Num>`,
/// `{[key: Str]: Num}`, `?Num`, `(Num, Num) => Num`, ...). With inference
/// disabled the bare kind tag is used.
#[must_use]
pub fn get_type_name(ty: &Type) -> String {
    if let Some(name) = ty.name() {
        return name.to_string();
    }
    if !config().infer_names {
        return ty.kind().to_string();
    }
    match ty.meta() {
        Meta::Irreducible { .. } => ty.kind().to_string(),
        Meta::Subtype { base, .. } => format!("{{{} | refinement}}", get_type_name(base)),
        Meta::Enums { map } => join(map.iter().map(|(k, _)| format!("{k:?}")), " | "),
        Meta::Record { props, .. } => format!(
            "{{{}}}",
            join(
                props
                    .iter()
                    .map(|f| format!("{}: {}", f.name, get_type_name(&f.ty))),
                ", "
            )
        ),
        Meta::Tuple { types } => format!("[{}]", join(types.iter().map(get_type_name), ", ")),
        Meta::List { item } => format!("Array<{}>", get_type_name(item)),
        Meta::Dict { domain, codomain } => format!(
            "{{[key: {}]: {}}}",
            get_type_name(domain),
            get_type_name(codomain)
        ),
        Meta::Union { types } => join(types.iter().map(get_type_name), " | "),
        Meta::Maybe { inner } => format!("?{}", get_type_name(inner)),
        Meta::Func { domain, codomain } => format!(
            "({}) => {}",
            join(domain.iter().map(get_type_name), ", "),
            get_type_name(codomain)
        ),
    }
}

fn join(parts: impl Iterator<Item = String>, sep: &str) -> String {
    parts.collect::<Vec<_>>().join(sep)
}

/// Copies every entry of `source` onto `target`, returning a new map.
///
/// Both sides may be maps or records. A key present on both sides is a
/// conflict unless `allow_override` is set, in which case `source` wins.
///
/// # Errors
///
/// Fails with `Conflict` on a repeated key, or `Validation` if either side
/// is not a key-value container.
pub fn mixin(target: &Value, source: &Value, allow_override: bool) -> Result<Value> {
    let target = entries(target)?;
    let source = entries(source)?;
    if !allow_override {
        if let Some(key) = source.keys().find(|k| target.contains_key(k)) {
            return Err(report::raise(Error::conflict(key.to_string(), "mixin target")));
        }
    }
    Ok(Value::Map(target.merge(&source)))
}

fn entries(value: &Value) -> Result<LtMap<Value, Value>> {
    match value {
        Value::Nil => Ok(LtMap::new()),
        Value::Map(m) => Ok(m.clone()),
        Value::Record(r) => Ok(r.to_map()),
        other => Err(report::raise(Error::validation(
            "Obj",
            other.clone(),
            vec!["mixin".to_string()],
        ))),
    }
}

/// Overlays `source` fields onto `target`, in order.
///
/// A repeated name is a conflict unless `allow_override` is set; then the
/// later field replaces the earlier one in place.
pub(crate) fn merge_fields(
    target: &mut Vec<Field>,
    source: &[Field],
    allow_override: bool,
    target_name: &str,
) -> Result<()> {
    for field in source {
        match target.iter_mut().find(|f| f.name == field.name) {
            Some(existing) if allow_override => *existing = field.clone(),
            Some(_) => {
                return Err(report::raise(Error::conflict(
                    field.name.as_ref(),
                    target_name,
                )));
            }
            None => target.push(field.clone()),
        }
    }
    Ok(())
}

/// Reports an `Assertion` failure when `guard` is false.
///
/// # Errors
///
/// Fails with `Assertion` unless the failure hook recovers.
pub fn assert(guard: bool, message: impl Into<String>) -> Result<()> {
    if guard {
        return Ok(());
    }
    report::fail(Error::assertion(message)).map(|_| ())
}
