pub mod api;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod options;
pub mod pagination;
pub mod rest;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::Zendesk;
pub use config::{Credential, ZendeskConfig};
pub use error::{ApiError, ApiErrorKind, DecodeError, OptionsError, Result, ZendeskError};

// Transport
pub use rest::{Transport, ZendeskHttpClient};

// Endpoint traits
pub use api::{ArticleApi, CustomObjectApi, CustomStatusApi, RequestApi};

// Options encoding + envelopes
pub use envelope::{decode, Resource};
pub use options::{add_options, query_pairs};

// Pagination
pub use pagination::{CursorOptions, CursorPager, OffsetPager};
pub use types::{CursorPagination, CursorPaginationMeta, Page, PageOptions};

// Help center
pub use types::{Article, ArticleListOptions};

// Requests
pub use types::{Request, RequestsOptions, SearchOptions};

// Custom objects
pub use types::{
    AutocompleteSearchCustomObjectRecordsOptions, CustomObjectField, CustomObjectListOptions,
    CustomObjectRecord, SearchCustomObjectRecordsOptions, SourcesByTarget,
};

// Custom statuses
pub use types::{CustomStatus, CustomTicketStatusOptions};
