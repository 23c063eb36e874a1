use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::Resource;
use crate::options::{is_empty, is_zero};
use super::page::PageOptions;
use super::null_as_default;

/// End-user view of a ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub priority: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub organization_id: Option<i64>,
    pub via: Option<RequestVia>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_fields: Vec<CustomField>,
    pub requester_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub collaborator_ids: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub email_cc_ids: Vec<i64>,
    pub is_public: bool,
    pub due_at: Option<DateTime<Utc>>,
    pub can_be_solved_by_me: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub recipient: Option<String>,
    pub followup_source_id: Option<i64>,
    pub assignee_id: Option<i64>,
    pub ticket_form_id: Option<i64>,
    pub custom_status_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<RequestField>,
}

impl Resource for Request {
    const SINGULAR: &'static str = "request";
    const PLURAL: &'static str = "requests";
}

/// How the request was created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestVia {
    #[serde(deserialize_with = "null_as_default")]
    pub channel: String,
    pub source: RequestViaSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestViaSource {
    pub from: Value,
    pub to: Value,
    pub rel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    pub id: i64,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestField {
    pub id: i64,
    pub value: Value,
}

/// Search parameters shared by the search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    #[serde(flatten)]
    pub page: PageOptions,
    #[serde(skip_serializing_if = "is_empty")]
    pub query: String,
    #[serde(skip_serializing_if = "is_empty")]
    pub sort_by: String,
    #[serde(skip_serializing_if = "is_empty")]
    pub sort_order: String,
}

/// Options for `GET /requests/search.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestsOptions {
    #[serde(flatten)]
    pub search: SearchOptions,
    #[serde(skip_serializing_if = "is_zero")]
    pub organization_id: i64,
}
