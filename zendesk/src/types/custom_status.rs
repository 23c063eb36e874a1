use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Resource;
use crate::options::{is_empty, is_false};
use super::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomStatus {
    pub id: i64,
    pub active: bool,
    pub default: bool,
    /// `new`, `open`, `pending`, `hold` or `solved`.
    #[serde(deserialize_with = "null_as_default")]
    pub status_category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agent_label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_agent_label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_user_label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_end_user_label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_user_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub raw_end_user_description: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for CustomStatus {
    const SINGULAR: &'static str = "custom_status";
    const PLURAL: &'static str = "custom_statuses";
}

/// Options for `GET /custom_statuses.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomTicketStatusOptions {
    #[serde(skip_serializing_if = "is_false")]
    pub active: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub default: bool,
    /// Comma-separated status categories.
    #[serde(skip_serializing_if = "is_empty")]
    pub status_categories: String,
}
