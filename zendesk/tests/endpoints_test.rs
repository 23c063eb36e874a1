//! Endpoint and pagination tests over a recording transport.
//!
//! Each test queues canned response bodies, drives the client, then checks
//! the exact method, URL and request body the client produced.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::TryStreamExt;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use zendesk::*;

#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: &'static str,
    url: String,
    body: Option<Value>,
}

#[derive(Default)]
struct Recording {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<Result<Bytes>>>,
}

impl Recording {
    fn respond(&self, body: Value) {
        self.respond_raw(body.to_string());
    }

    fn respond_raw(&self, body: impl Into<String>) {
        let body: String = body.into();
        self.responses.lock().unwrap().push_back(Ok(Bytes::from(body)));
    }

    fn fail(&self, err: ZendeskError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.url).collect()
    }

    fn record(&self, method: &'static str, url: &str, body: Option<Bytes>) -> Result<Bytes> {
        let body = body.map(|b| serde_json::from_slice(&b).expect("request body is JSON"));
        self.calls.lock().unwrap().push(Call {
            method,
            url: url.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Bytes::new()))
    }
}

#[async_trait]
impl Transport for Recording {
    async fn get(&self, _ctx: &CancellationToken, url: &str) -> Result<Bytes> {
        self.record("GET", url, None)
    }

    async fn post(&self, _ctx: &CancellationToken, url: &str, body: Option<Bytes>) -> Result<Bytes> {
        self.record("POST", url, body)
    }

    async fn patch(
        &self,
        _ctx: &CancellationToken,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        self.record("PATCH", url, body)
    }

    async fn delete(&self, _ctx: &CancellationToken, url: &str) -> Result<Bytes> {
        self.record("DELETE", url, None)
    }
}

fn client() -> Zendesk<Recording> {
    Zendesk::with_transport(Recording::default())
}

fn ctx() -> CancellationToken {
    CancellationToken::new()
}

fn book(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "custom_object_key": "book",
        "custom_object_fields": {"author": "Herbert"}
    })
}

// ---------------------------------------------------------------------------
// Custom object records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_records_without_options() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_records": [book("1", "Dune"), book("2", "Emma")],
        "meta": {"has_more": false, "after_cursor": null, "before_cursor": null}
    }));

    let (records, meta) = zd
        .list_custom_object_records(&ctx(), "book", None)
        .await
        .unwrap();

    assert_eq!(zd.transport().urls(), ["/custom_objects/book/records"]);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].name, "Emma");
    assert!(!meta.has_more);
    assert_eq!(meta.next_cursor(), None);
}

#[tokio::test]
async fn test_search_records_returns_count() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_records": [book("1", "Foo A"), book("2", "Foo B")],
        "meta": {"has_more": false},
        "count": 2
    }));

    let opts = SearchCustomObjectRecordsOptions {
        query: "foo".into(),
        sort: "-name".into(),
        ..Default::default()
    };
    let (records, _, count) = zd
        .search_custom_object_records(&ctx(), "book", Some(&opts))
        .await
        .unwrap();

    assert_eq!(
        zd.transport().urls(),
        ["/custom_objects/book/records/search?query=foo&sort=-name"]
    );
    assert_eq!(records.len(), 2);
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_search_records_without_count() {
    let zd = client();
    zd.transport()
        .respond(json!({"custom_object_records": [], "meta": {"has_more": false}}));

    let (records, _, count) = zd
        .search_custom_object_records(&ctx(), "book", None)
        .await
        .unwrap();
    assert!(records.is_empty());
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_autocomplete_records() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_records": [book("1", "Dune")],
        "meta": {"has_more": true, "after_cursor": "xyz"}
    }));

    let opts = AutocompleteSearchCustomObjectRecordsOptions {
        name: "Du".into(),
        pagination: CursorPagination::with_size(10),
    };
    let (records, meta) = zd
        .autocomplete_search_custom_object_records(&ctx(), "book", Some(&opts))
        .await
        .unwrap();

    assert_eq!(
        zd.transport().urls(),
        ["/custom_objects/book/records/autocomplete?name=Du&page%5Bsize%5D=10"]
    );
    assert_eq!(records[0].name, "Dune");
    assert_eq!(meta.next_cursor(), Some("xyz"));
}

#[tokio::test]
async fn test_list_records_filters() {
    let zd = client();
    zd.transport()
        .respond(json!({"custom_object_records": [], "meta": {"has_more": false}}));

    let opts = CustomObjectListOptions {
        external_ids: "a,b".into(),
        ..Default::default()
    };
    zd.list_custom_object_records(&ctx(), "book", Some(&opts))
        .await
        .unwrap();
    assert_eq!(
        zd.transport().urls(),
        ["/custom_objects/book/records?filter%5Bexternal_ids%5D=a%2Cb"]
    );
}

#[tokio::test]
async fn test_show_record() {
    let zd = client();
    zd.transport()
        .respond(json!({"custom_object_record": book("01GB", "Dune")}));

    let record = zd
        .show_custom_object_record(&ctx(), "book", "01GB")
        .await
        .unwrap();
    assert_eq!(zd.transport().urls(), ["/custom_objects/book/records/01GB"]);
    assert_eq!(record.id, "01GB");
    assert_eq!(record.custom_object_fields["author"], "Herbert");
}

#[tokio::test]
async fn test_create_record_wraps_body() {
    let zd = client();
    zd.transport()
        .respond(json!({"custom_object_record": book("01GB", "Dune")}));

    let record = CustomObjectRecord::new("book", "Dune").with_field("author", "Herbert");
    let created = zd
        .create_custom_object_record(&ctx(), record, "book")
        .await
        .unwrap();

    let calls = zd.transport().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].url, "/custom_objects/book/records.json");
    assert_eq!(
        calls[0].body,
        Some(json!({
            "custom_object_record": {
                "name": "Dune",
                "custom_object_key": "book",
                "custom_object_fields": {"author": "Herbert"}
            }
        }))
    );
    assert_eq!(created.id, "01GB");
}

#[tokio::test]
async fn test_update_record_patches() {
    let zd = client();
    zd.transport()
        .respond(json!({"custom_object_record": book("01GB", "Dune Messiah")}));

    let record = CustomObjectRecord::new("book", "Dune Messiah");
    let updated = zd
        .update_custom_object_record(&ctx(), "book", "01GB", record)
        .await
        .unwrap();

    let calls = zd.transport().calls();
    assert_eq!(calls[0].method, "PATCH");
    assert_eq!(calls[0].url, "/custom_objects/book/records/01GB");
    assert_eq!(
        calls[0].body.as_ref().unwrap()["custom_object_record"]["name"],
        "Dune Messiah"
    );
    assert_eq!(updated.name, "Dune Messiah");
}

#[tokio::test]
async fn test_delete_record_with_empty_response() {
    let zd = client();
    let record = CustomObjectRecord {
        id: "42".into(),
        custom_object_key: "book".into(),
        ..Default::default()
    };

    zd.delete_custom_object_record(&ctx(), &record).await.unwrap();

    assert_eq!(
        zd.transport().calls(),
        [Call {
            method: "DELETE",
            url: "/custom_objects/book/records/42".into(),
            body: None,
        }]
    );
}

#[tokio::test]
async fn test_empty_identifiers_are_rejected_before_sending() {
    let zd = client();

    let err = zd
        .list_custom_object_records(&ctx(), "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ZendeskError::InvalidArgument(_)));

    let no_id = CustomObjectRecord::new("book", "Dune");
    let err = zd
        .delete_custom_object_record(&ctx(), &no_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ZendeskError::InvalidArgument(_)));

    assert!(zd.transport().calls().is_empty());
}

#[tokio::test]
async fn test_path_segments_are_escaped() {
    let zd = client();
    zd.transport()
        .respond(json!({"custom_object_record": book("a/b", "Odd")}));

    zd.show_custom_object_record(&ctx(), "book", "a/b")
        .await
        .unwrap();
    assert_eq!(zd.transport().urls(), ["/custom_objects/book/records/a%2Fb"]);
}

#[tokio::test]
async fn test_list_fields() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_fields": [
            {"id": 1, "key": "author", "type": "text", "title": "Author", "active": true},
            {"id": 2, "key": "isbn", "type": "text", "title": "ISBN", "active": true}
        ]
    }));

    let fields = zd.list_custom_object_fields(&ctx(), "book").await.unwrap();
    assert_eq!(zd.transport().urls(), ["/custom_objects/book/fields"]);
    let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, ["author", "isbn"]);
    assert_eq!(fields[0].kind, "text");
}

#[tokio::test]
async fn test_sources_by_target() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_records": [book("1", "Dune")],
        "users": [],
        "next_page": null,
        "previous_page": null,
        "count": 1
    }));

    let opts = PageOptions { per_page: 5, page: 1 };
    let sources = zd
        .get_sources_by_target(&ctx(), "tickets", "35", "1001", "zen:custom_object:book", Some(&opts))
        .await
        .unwrap();

    assert_eq!(
        zd.transport().urls(),
        ["/tickets/35/relationship_fields/1001/zen:custom_object:book?page=1&per_page=5"]
    );
    assert_eq!(sources.custom_object_records.len(), 1);
    assert_eq!(sources.page.count, 1);
    assert!(!sources.page.has_next());
}

#[tokio::test]
async fn test_sources_by_target_rejects_unrelated_body() {
    let zd = client();
    zd.transport()
        .respond(json!({"error": "unexpected", "details": {}}));

    let err = zd
        .get_sources_by_target(&ctx(), "tickets", "35", "1001", "zen:user", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ZendeskError::Decode(_)));
}

// ---------------------------------------------------------------------------
// Articles, requests, custom statuses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_articles_page() {
    let zd = client();
    zd.transport().respond(json!({
        "articles": [{"id": 7, "title": "Welcome", "locale": "en-us"}],
        "next_page": "https://acme.zendesk.com/api/v2/help_center/articles.json?page=2",
        "previous_page": null,
        "count": 31
    }));

    let opts = ArticleListOptions {
        sort_by: "title".into(),
        sort_order: "asc".into(),
        ..Default::default()
    };
    let (articles, page) = zd.list_articles(&ctx(), Some(&opts)).await.unwrap();

    assert_eq!(
        zd.transport().urls(),
        ["/help_center/articles.json?sort_by=title&sort_order=asc"]
    );
    assert_eq!(articles[0].locale, "en-us");
    assert_eq!(page.count, 31);
    assert!(page.has_next());
    assert!(!page.has_prev());
}

#[tokio::test]
async fn test_show_article() {
    let zd = client();
    zd.transport()
        .respond(json!({"article": {"id": 7, "title": "Welcome", "body": "<p>Hi</p>"}}));

    let article = zd.show_article(&ctx(), 7).await.unwrap();
    assert_eq!(zd.transport().urls(), ["/help_center/articles/7.json"]);
    assert_eq!(article.body.as_deref(), Some("<p>Hi</p>"));
}

#[tokio::test]
async fn test_search_requests() {
    let zd = client();
    zd.transport().respond(json!({
        "requests": [{"id": 33, "subject": "Printer on fire", "status": "open", "type": "incident"}],
        "next_page": null,
        "previous_page": null,
        "count": 1
    }));

    let opts = RequestsOptions {
        search: SearchOptions {
            query: "printer".into(),
            ..Default::default()
        },
        organization_id: 9,
    };
    let (requests, page) = zd.search_requests(&ctx(), Some(&opts)).await.unwrap();

    assert_eq!(
        zd.transport().urls(),
        ["/requests/search.json?organization_id=9&query=printer"]
    );
    assert_eq!(requests[0].kind.as_deref(), Some("incident"));
    assert_eq!(page.count, 1);
}

#[tokio::test]
async fn test_search_requests_without_options_matches_default() {
    let zd = client();
    let empty = json!({"requests": [], "next_page": null, "count": 0});
    zd.transport().respond(empty.clone());
    zd.transport().respond(empty);

    let (none, _) = zd.search_requests(&ctx(), None).await.unwrap();
    let (zeroed, _) = zd
        .search_requests(&ctx(), Some(&RequestsOptions::default()))
        .await
        .unwrap();

    assert!(none.is_empty());
    assert_eq!(none, zeroed);
    assert_eq!(
        zd.transport().urls(),
        ["/requests/search.json", "/requests/search.json"]
    );
}

#[tokio::test]
async fn test_custom_statuses() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_statuses": [
            {"id": 1, "status_category": "open", "agent_label": "Open", "active": true},
            {"id": 2, "status_category": "pending", "agent_label": "Waiting", "active": true}
        ]
    }));
    zd.transport().respond(json!({
        "custom_status": {"id": 2, "status_category": "pending", "agent_label": "Waiting"}
    }));

    let opts = CustomTicketStatusOptions {
        active: true,
        status_categories: "open,pending".into(),
        ..Default::default()
    };
    let statuses = zd
        .list_custom_ticket_statuses(&ctx(), Some(&opts))
        .await
        .unwrap();
    let status = zd.show_custom_ticket_status(&ctx(), 2).await.unwrap();

    assert_eq!(
        zd.transport().urls(),
        [
            "/custom_statuses.json?active=true&status_categories=open%2Cpending",
            "/custom_statuses/2",
        ]
    );
    assert_eq!(statuses.len(), 2);
    assert_eq!(status.agent_label, "Waiting");
}

// ---------------------------------------------------------------------------
// Decoding failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let zd = client();
    zd.transport().respond_raw(r#"{"custom_statuses": [{"id": 1"#);

    let err = zd.list_custom_ticket_statuses(&ctx(), None).await.unwrap_err();
    assert!(matches!(err, ZendeskError::Decode(_)));
}

#[tokio::test]
async fn test_wrong_shape_reports_path() {
    let zd = client();
    zd.transport()
        .respond(json!({"articles": [{"id": 1}, {"id": "seven"}], "count": 2}));

    let err = zd.list_articles(&ctx(), None).await.unwrap_err();
    match err {
        ZendeskError::Decode(e) => assert_eq!(e.path, "articles[1].id"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_passes_through() {
    let zd = client();
    zd.transport()
        .fail(ApiError::new(404, r#"{"error":"RecordNotFound"}"#).into());

    let err = zd
        .show_custom_object_record(&ctx(), "book", "missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_offset_pager_follows_next_page_until_null() {
    let zd = client();
    let next = "https://acme.zendesk.com/api/v2/help_center/articles.json?page=2&per_page=1";
    zd.transport().respond(json!({
        "articles": [{"id": 1}],
        "next_page": next,
        "count": 2
    }));
    zd.transport().respond(json!({
        "articles": [{"id": 2}],
        "next_page": null,
        "previous_page": "https://acme.zendesk.com/api/v2/help_center/articles.json?page=1&per_page=1",
        "count": 2
    }));

    let opts = ArticleListOptions {
        page: PageOptions { per_page: 1, page: 0 },
        ..Default::default()
    };
    let mut pager = zd.articles_pager(Some(&opts)).unwrap();

    let first = pager.next_page(&ctx()).await.unwrap().unwrap();
    assert_eq!(first[0].id, 1);
    assert!(!pager.is_done());

    let second = pager.next_page(&ctx()).await.unwrap().unwrap();
    assert_eq!(second[0].id, 2);
    assert!(pager.is_done());
    assert!(pager.page().has_prev());

    assert!(pager.next_page(&ctx()).await.unwrap().is_none());
    assert_eq!(
        zd.transport().urls(),
        ["/help_center/articles.json?per_page=1", next]
    );
}

#[tokio::test]
async fn test_offset_pager_empty_next_page_ends() {
    let zd = client();
    zd.transport()
        .respond(json!({"articles": [{"id": 1}], "next_page": "", "count": 1}));

    let articles = zd
        .articles_pager(None)
        .unwrap()
        .collect_all(&ctx())
        .await
        .unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(zd.transport().urls(), ["/help_center/articles.json"]);
}

#[tokio::test]
async fn test_cursor_pager_echoes_after_cursor() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_records": [book("1", "A"), book("2", "B")],
        "meta": {"has_more": true, "after_cursor": "abc", "before_cursor": "zzz"}
    }));
    zd.transport().respond(json!({
        "custom_object_records": [book("3", "C")],
        "meta": {"has_more": false, "after_cursor": "def", "before_cursor": "abc"}
    }));

    let opts = CustomObjectListOptions {
        pagination: CursorPagination::with_size(2),
        ..Default::default()
    };
    let records = zd
        .custom_object_records_pager("book", opts)
        .unwrap()
        .collect_all(&ctx())
        .await
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(
        zd.transport().urls(),
        [
            "/custom_objects/book/records?page%5Bsize%5D=2",
            "/custom_objects/book/records?page%5Bafter%5D=abc&page%5Bsize%5D=2",
        ]
    );
}

#[tokio::test]
async fn test_cursor_pager_stops_when_has_more_is_false() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_records": [book("1", "Foo")],
        "meta": {"has_more": false, "after_cursor": "ignored"},
        "count": 1
    }));

    let opts = SearchCustomObjectRecordsOptions {
        query: "foo".into(),
        ..Default::default()
    };
    let mut pager = zd.search_custom_object_records_pager("book", opts).unwrap();
    assert_eq!(pager.next_page(&ctx()).await.unwrap().unwrap().len(), 1);
    assert!(pager.is_done());
    assert_eq!(pager.count(), Some(1));
    assert!(pager.next_page(&ctx()).await.unwrap().is_none());
    assert_eq!(zd.transport().calls().len(), 1);
    assert_eq!(pager.options().pagination.page_after, "");
}

#[tokio::test]
async fn test_pager_stops_after_error() {
    let zd = client();
    zd.transport().fail(ZendeskError::Timeout);

    let mut pager = zd
        .custom_object_records_pager("book", CustomObjectListOptions::default())
        .unwrap();
    assert!(matches!(
        pager.next_page(&ctx()).await,
        Err(ZendeskError::Timeout)
    ));
    assert!(pager.is_done());
    assert!(pager.next_page(&ctx()).await.unwrap().is_none());
    assert_eq!(zd.transport().calls().len(), 1);
}

#[tokio::test]
async fn test_pager_stream_yields_pages() {
    let zd = client();
    zd.transport().respond(json!({
        "custom_object_records": [book("1", "A")],
        "meta": {"has_more": true, "after_cursor": "c1"}
    }));
    zd.transport().respond(json!({
        "custom_object_records": [book("2", "B")],
        "meta": {"has_more": false}
    }));

    let pages: Vec<Vec<CustomObjectRecord>> = zd
        .custom_object_records_pager("book", CustomObjectListOptions::default())
        .unwrap()
        .into_stream(ctx())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1][0].name, "B");
}
