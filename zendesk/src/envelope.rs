//! Response envelopes.
//!
//! The API wraps results in a flat object keyed by resource name:
//! `{"articles": [...], "next_page": ..., "count": ...}` for offset
//! pagination, `{"custom_object_records": [...], "meta": {...}}` for cursor
//! pagination and `{"custom_status": {...}}` for a single object. Each
//! endpoint statically picks the envelope matching its pagination style.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DecodeError, Result};
use crate::types::{CursorPaginationMeta, Page, SourcesByTarget};

/// A resource type and the JSON keys that wrap it.
pub trait Resource {
    /// Key of a single wrapped object, e.g. `custom_object_record`.
    const SINGULAR: &'static str;
    /// Key of the item array in list responses, e.g. `custom_object_records`.
    const PLURAL: &'static str;
}

/// Items plus sibling `next_page` / `previous_page` / `count` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetEnvelope<R> {
    pub items: Vec<R>,
    pub page: Page,
}

/// Items plus a nested `meta` object, and `count` on search endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorEnvelope<R> {
    pub items: Vec<R>,
    pub meta: CursorPaginationMeta,
    pub count: Option<i64>,
}

/// Items only, for endpoints that return the whole list at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEnvelope<R>(pub Vec<R>);

/// One object wrapped under its singular key, both ways.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleEnvelope<R>(pub R);

/// Decode a response body.
///
/// Any mismatch fails with the JSON path where decoding stopped; a body is
/// never read as an empty result.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let mut de = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut de).map_err(DecodeError::from)?;
    de.end().map_err(|e| DecodeError {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(value)
}

struct Parts<R> {
    items: Option<Vec<R>>,
    next_page: Option<String>,
    previous_page: Option<String>,
    count: Option<i64>,
    meta: Option<CursorPaginationMeta>,
}

struct PartsVisitor<R> {
    cursor: bool,
    marker: PhantomData<R>,
}

impl<R> PartsVisitor<R> {
    fn new(cursor: bool) -> Self {
        Self {
            cursor,
            marker: PhantomData,
        }
    }
}

impl<'de, R> Visitor<'de> for PartsVisitor<R>
where
    R: Resource + Deserialize<'de>,
{
    type Value = Parts<R>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object with a `{}` array", R::PLURAL)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Parts<R>, A::Error> {
        let mut parts = Parts {
            items: None,
            next_page: None,
            previous_page: None,
            count: None,
            meta: None,
        };

        while let Some(key) = map.next_key::<String>()? {
            if key == R::PLURAL {
                let items: Option<Vec<R>> = map.next_value()?;
                parts.items = Some(items.unwrap_or_default());
                continue;
            }
            match key.as_str() {
                "next_page" => parts.next_page = map.next_value()?,
                "previous_page" => parts.previous_page = map.next_value()?,
                "count" => parts.count = map.next_value()?,
                "meta" if self.cursor => parts.meta = Some(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(parts)
    }
}

impl<'de, R> Deserialize<'de> for OffsetEnvelope<R>
where
    R: Resource + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parts = deserializer.deserialize_map(PartsVisitor::<R>::new(false))?;
        let items = parts
            .items
            .ok_or_else(|| de::Error::missing_field(R::PLURAL))?;
        Ok(OffsetEnvelope {
            items,
            page: Page {
                previous_page: parts.previous_page,
                next_page: parts.next_page,
                count: parts.count.unwrap_or_default(),
            },
        })
    }
}

impl<'de, R> Deserialize<'de> for CursorEnvelope<R>
where
    R: Resource + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parts = deserializer.deserialize_map(PartsVisitor::<R>::new(true))?;
        let items = parts
            .items
            .ok_or_else(|| de::Error::missing_field(R::PLURAL))?;
        let meta = parts.meta.ok_or_else(|| de::Error::missing_field("meta"))?;
        Ok(CursorEnvelope {
            items,
            meta,
            count: parts.count,
        })
    }
}

impl<'de, R> Deserialize<'de> for ListEnvelope<R>
where
    R: Resource + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parts = deserializer.deserialize_map(PartsVisitor::<R>::new(false))?;
        parts
            .items
            .map(ListEnvelope)
            .ok_or_else(|| de::Error::missing_field(R::PLURAL))
    }
}

struct SingleVisitor<R>(PhantomData<R>);

impl<'de, R> Visitor<'de> for SingleVisitor<R>
where
    R: Resource + Deserialize<'de>,
{
    type Value = R;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object with a `{}` field", R::SINGULAR)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<R, A::Error> {
        let mut item = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == R::SINGULAR {
                item = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        item.ok_or_else(|| de::Error::missing_field(R::SINGULAR))
    }
}

impl<'de, R> Deserialize<'de> for SingleEnvelope<R>
where
    R: Resource + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer
            .deserialize_map(SingleVisitor(PhantomData))
            .map(SingleEnvelope)
    }
}

impl<R: Resource + Serialize> Serialize for SingleEnvelope<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(R::SINGULAR, &self.0)?;
        map.end()
    }
}

const SOURCE_LISTS: &[&str] = &["custom_object_records", "users", "organizations", "tickets"];

struct SourcesVisitor;

impl<'de> Visitor<'de> for SourcesVisitor {
    type Value = SourcesByTarget;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object with one of {}", SOURCE_LISTS.join(", "))
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut map: A,
    ) -> std::result::Result<SourcesByTarget, A::Error> {
        let mut sources = SourcesByTarget::default();
        let mut found = false;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "custom_object_records" => {
                    sources.custom_object_records =
                        map.next_value::<Option<Vec<_>>>()?.unwrap_or_default();
                    found = true;
                }
                "users" => {
                    sources.users = map.next_value::<Option<Vec<_>>>()?.unwrap_or_default();
                    found = true;
                }
                "organizations" => {
                    sources.organizations =
                        map.next_value::<Option<Vec<_>>>()?.unwrap_or_default();
                    found = true;
                }
                "tickets" => {
                    sources.tickets = map.next_value::<Option<Vec<_>>>()?.unwrap_or_default();
                    found = true;
                }
                "next_page" => sources.page.next_page = map.next_value()?,
                "previous_page" => sources.page.previous_page = map.next_value()?,
                "count" => sources.page.count = map.next_value::<Option<i64>>()?.unwrap_or_default(),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        if !found {
            return Err(de::Error::custom(format_args!(
                "expected one of {}",
                SOURCE_LISTS.join(", ")
            )));
        }
        Ok(sources)
    }
}

impl<'de> Deserialize<'de> for SourcesByTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SourcesVisitor)
    }
}
