use serde::{Deserialize, Serialize};

use crate::options::{is_empty, is_zero};

/// Offset/link pagination state returned alongside an item array.
///
/// `next_page` and `previous_page` are full URLs chosen by the server. A
/// missing (or empty) `next_page` is the only end-of-listing signal; `count`
/// is informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub previous_page: Option<String>,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub count: i64,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.next_url().is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev_url().is_some()
    }

    /// URL to request for the following page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.next_page.as_deref().filter(|u| !u.is_empty())
    }

    pub fn prev_url(&self) -> Option<&str> {
        self.previous_page.as_deref().filter(|u| !u.is_empty())
    }
}

/// Page-number request parameters for offset-paginated endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageOptions {
    #[serde(skip_serializing_if = "is_zero")]
    pub per_page: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
}

/// Cursor pagination request parameters.
///
/// Set at most one of `page_after` / `page_before`; when both are sent the
/// server decides which one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CursorPagination {
    #[serde(rename = "page[size]", skip_serializing_if = "is_zero")]
    pub page_size: u32,
    #[serde(rename = "page[after]", skip_serializing_if = "is_empty")]
    pub page_after: String,
    #[serde(rename = "page[before]", skip_serializing_if = "is_empty")]
    pub page_before: String,
}

impl CursorPagination {
    pub fn with_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Continue forward from an opaque cursor, keeping the page size.
    pub fn after(&self, cursor: &str) -> Self {
        Self {
            page_size: self.page_size,
            page_after: cursor.to_string(),
            page_before: String::new(),
        }
    }

    /// Continue backward from an opaque cursor, keeping the page size.
    pub fn before(&self, cursor: &str) -> Self {
        Self {
            page_size: self.page_size,
            page_after: String::new(),
            page_before: cursor.to_string(),
        }
    }
}

/// Cursor pagination state, nested under `meta` in the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPaginationMeta {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub after_cursor: Option<String>,
    #[serde(default)]
    pub before_cursor: Option<String>,
}

impl CursorPaginationMeta {
    /// Cursor to continue forward with. `None` once `has_more` is false,
    /// whatever `after_cursor` holds.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_more {
            return None;
        }
        self.after_cursor.as_deref().filter(|c| !c.is_empty())
    }

    pub fn prev_cursor(&self) -> Option<&str> {
        self.before_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_next_page_is_last_page() {
        let page: Page =
            serde_json::from_str(r#"{"next_page":"","previous_page":null,"count":120}"#).unwrap();
        assert!(!page.has_next());
        assert!(!page.has_prev());
        assert_eq!(page.count, 120);
    }

    #[test]
    fn next_url_is_server_supplied() {
        let page = Page {
            next_page: Some("https://acme.zendesk.com/api/v2/help_center/articles.json?page=2".into()),
            ..Page::default()
        };
        assert_eq!(
            page.next_url(),
            Some("https://acme.zendesk.com/api/v2/help_center/articles.json?page=2")
        );
    }

    #[test]
    fn no_more_ignores_after_cursor() {
        let meta = CursorPaginationMeta {
            has_more: false,
            after_cursor: Some("xyz".into()),
            before_cursor: None,
        };
        assert_eq!(meta.next_cursor(), None);
    }

    #[test]
    fn has_more_yields_cursor_verbatim() {
        let meta: CursorPaginationMeta = serde_json::from_str(
            r#"{"has_more":true,"after_cursor":"abc","before_cursor":"zzz"}"#,
        )
        .unwrap();
        assert_eq!(meta.next_cursor(), Some("abc"));
        assert_eq!(meta.prev_cursor(), Some("zzz"));
    }

    #[test]
    fn after_keeps_page_size() {
        let next = CursorPagination::with_size(25).after("abc");
        assert_eq!(next.page_size, 25);
        assert_eq!(next.page_after, "abc");
        assert!(next.page_before.is_empty());
    }

    #[test]
    fn before_keeps_page_size_and_drops_after() {
        let prev = CursorPagination::with_size(25).after("abc").before("a+b/c=");
        assert_eq!(prev.page_size, 25);
        assert_eq!(prev.page_before, "a+b/c=");
        assert!(prev.page_after.is_empty());
    }
}
