use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Resource;
use crate::options::is_empty;
use super::page::{CursorPagination, Page};
use super::null_as_default;

/// User-defined fields of a record, keyed by field key, in server order.
pub type CustomObjectFields = Map<String, Value>;

/// A record of a custom object type.
///
/// `custom_object_key` addresses the record endpoints and must be set.
/// `custom_object_fields` is required by the server on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomObjectRecord {
    #[serde(skip_serializing_if = "is_empty", deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "is_empty", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "is_empty", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_object_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_object_fields: CustomObjectFields,
    #[serde(skip_serializing_if = "is_empty", deserialize_with = "null_as_default")]
    pub created_by_user_id: String,
    #[serde(skip_serializing_if = "is_empty", deserialize_with = "null_as_default")]
    pub updated_by_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl Resource for CustomObjectRecord {
    const SINGULAR: &'static str = "custom_object_record";
    const PLURAL: &'static str = "custom_object_records";
}

impl CustomObjectRecord {
    pub fn new(custom_object_key: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            custom_object_key: custom_object_key.to_string(),
            ..Self::default()
        }
    }

    /// Set one user-defined field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.custom_object_fields.insert(key.to_string(), value.into());
        self
    }
}

/// Field definition of a custom object type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomObjectField {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_description: String,
    pub position: i64,
    pub active: bool,
    pub system: bool,
    pub regexp_for_validation: Value,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for CustomObjectField {
    const SINGULAR: &'static str = "custom_object_field";
    const PLURAL: &'static str = "custom_object_fields";
}

/// Sources whose lookup field points at a target object.
///
/// Depending on the source type the server fills one of the lists; the
/// others stay empty. Users, organizations and tickets are kept as raw JSON.
/// A body carrying none of the four lists fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourcesByTarget {
    pub custom_object_records: Vec<CustomObjectRecord>,
    pub users: Vec<Value>,
    pub organizations: Vec<Value>,
    pub tickets: Vec<Value>,
    #[serde(flatten)]
    pub page: Page,
}

/// Options for `GET /custom_objects/{key}/records`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomObjectListOptions {
    #[serde(flatten)]
    pub pagination: CursorPagination,
    /// Comma-separated record ids.
    #[serde(rename = "filter[ids]", skip_serializing_if = "is_empty")]
    pub ids: String,
    /// Comma-separated external ids.
    #[serde(rename = "filter[external_ids]", skip_serializing_if = "is_empty")]
    pub external_ids: String,
}

/// Options for `GET /custom_objects/{key}/records/autocomplete`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutocompleteSearchCustomObjectRecordsOptions {
    #[serde(skip_serializing_if = "is_empty")]
    pub name: String,
    #[serde(flatten)]
    pub pagination: CursorPagination,
}

/// Options for `GET /custom_objects/{key}/records/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCustomObjectRecordsOptions {
    #[serde(flatten)]
    pub pagination: CursorPagination,
    /// One of `name`, `created_at`, `updated_at`, optionally prefixed with
    /// `-` for descending order. Relevance when empty.
    #[serde(skip_serializing_if = "is_empty")]
    pub sort: String,
    #[serde(skip_serializing_if = "is_empty")]
    pub query: String,
    #[serde(skip_serializing_if = "is_empty")]
    pub external_id: String,
}
