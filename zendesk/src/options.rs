//! Query option encoding.
//!
//! Options types are plain serde structs. Each field names its query key and
//! carries a `skip_serializing_if` helper from this module, so a field at its
//! zero value never reaches the URL. Shared parameter groups (page numbers,
//! cursors, search terms) are named fields marked `#[serde(flatten)]`.

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{OptionsError, Result};

pub(crate) fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

pub(crate) fn is_empty(value: &str) -> bool {
    value.is_empty()
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Append the encoded `opts` to `path`.
///
/// Keys are sorted so the same options always produce the same URL. Query
/// parameters already on `path` are kept. With nothing to encode, `path` is
/// returned as is.
pub fn add_options<O: Serialize + Debug + ?Sized>(path: &str, opts: &O) -> Result<String> {
    let pairs = query_pairs(opts)?;
    Ok(merge_query(path, pairs))
}

/// [`add_options`] with a missing options value treated as `O::default()`.
pub fn add_options_or_default<O>(path: &str, opts: Option<&O>) -> Result<String>
where
    O: Serialize + Debug + Default,
{
    match opts {
        Some(opts) => add_options(path, opts),
        None => add_options(path, &O::default()),
    }
}

/// Flatten `opts` into sorted `(key, value)` pairs.
pub fn query_pairs<O: Serialize + Debug + ?Sized>(
    opts: &O,
) -> std::result::Result<Vec<(String, String)>, OptionsError> {
    let value = serde_json::to_value(opts).map_err(|e| OptionsError::new(opts, e.to_string()))?;
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(OptionsError::new(
                opts,
                format!("expected a struct of query fields, got {}", kind(&other)),
            ))
        }
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    let encoded = scalar(&item).ok_or_else(|| {
                        OptionsError::new(opts, format!("`{key}` holds a non-scalar list item"))
                    })?;
                    pairs.push((key.clone(), encoded));
                }
            }
            other => {
                let encoded = scalar(&other).ok_or_else(|| {
                    OptionsError::new(opts, format!("`{key}` is a nested {}", kind(&other)))
                })?;
                pairs.push((key, encoded));
            }
        }
    }

    // Stable: repeated keys keep their list order.
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

fn merge_query(path: &str, pairs: Vec<(String, String)>) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }

    let (base, existing) = match path.split_once('?') {
        Some((base, query)) => (base, query),
        None => (path, ""),
    };

    let mut all: Vec<(String, String)> = form_urlencoded::parse(existing.as_bytes())
        .into_owned()
        .collect();
    all.extend(pairs);
    all.sort_by(|a, b| a.0.cmp(&b.0));

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(&all)
        .finish();
    format!("{base}?{query}")
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
