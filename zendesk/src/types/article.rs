use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Resource;
use crate::options::is_empty;
use super::page::PageOptions;
use super::null_as_default;

/// Help Center article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    pub author_id: i64,
    pub body: Option<String>,
    pub comments_disabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub content_tag_ids: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub edited_at: Option<DateTime<Utc>>,
    pub draft: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub label_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub locale: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source_locale: String,
    pub outdated: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub outdated_locales: Vec<String>,
    pub permission_group_id: i64,
    pub position: i64,
    pub promoted: bool,
    pub section_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub user_segment_id: Option<i64>,
    pub vote_count: i64,
    pub vote_sum: i64,
}

impl Resource for Article {
    const SINGULAR: &'static str = "article";
    const PLURAL: &'static str = "articles";
}

/// Options for `GET /help_center/articles.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleListOptions {
    #[serde(flatten)]
    pub page: PageOptions,
    /// `position`, `title`, `created_at` or `updated_at`.
    #[serde(skip_serializing_if = "is_empty")]
    pub sort_by: String,
    /// `asc` or `desc`.
    #[serde(skip_serializing_if = "is_empty")]
    pub sort_order: String,
}
