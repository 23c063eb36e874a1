//! Loop drivers for the two pagination protocols.
//!
//! [`OffsetPager`] follows the `next_page` URL the server hands back.
//! [`CursorPager`] re-sends its options with `page[after]` set to the opaque
//! `after_cursor` of the previous response. The two never mix: an endpoint
//! speaks one protocol or the other.
//!
//! A pager is finished after the last page or after the first error; it
//! never retries.

use std::fmt::Debug;
use std::marker::PhantomData;

use futures_util::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::client::Zendesk;
use crate::envelope::{CursorEnvelope, OffsetEnvelope, Resource};
use crate::error::{Result, ZendeskError};
use crate::options::add_options;
use crate::rest::Transport;
use crate::types::{
    AutocompleteSearchCustomObjectRecordsOptions, CursorPagination, CursorPaginationMeta,
    CustomObjectListOptions, Page, SearchCustomObjectRecordsOptions,
};

/// Options types that carry a cursor pagination group.
pub trait CursorOptions: Serialize + Debug + Send + Sync {
    fn pagination(&self) -> &CursorPagination;
    fn pagination_mut(&mut self) -> &mut CursorPagination;
}

macro_rules! impl_cursor_options {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CursorOptions for $ty {
                fn pagination(&self) -> &CursorPagination {
                    &self.pagination
                }

                fn pagination_mut(&mut self) -> &mut CursorPagination {
                    &mut self.pagination
                }
            }
        )*
    };
}

impl_cursor_options!(
    CustomObjectListOptions,
    AutocompleteSearchCustomObjectRecordsOptions,
    SearchCustomObjectRecordsOptions,
);

/// Pages through an offset-paginated listing by following `next_page`.
pub struct OffsetPager<'a, T, R> {
    client: &'a Zendesk<T>,
    next: Option<String>,
    page: Page,
    marker: PhantomData<fn() -> R>,
}

impl<'a, T, R> OffsetPager<'a, T, R>
where
    T: Transport,
    R: Resource + DeserializeOwned,
{
    /// Start at `url`, a path with its query already encoded.
    pub fn new(client: &'a Zendesk<T>, url: impl Into<String>) -> Self {
        Self {
            client,
            next: Some(url.into()),
            page: Page::default(),
            marker: PhantomData,
        }
    }

    /// Paging fields of the last page fetched.
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_done(&self) -> bool {
        self.next.is_none()
    }

    /// Fetch the next page. `Ok(None)` once the listing is exhausted.
    pub async fn next_page(&mut self, ctx: &CancellationToken) -> Result<Option<Vec<R>>> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };
        let env: OffsetEnvelope<R> = self.client.get_json(ctx, &url).await?;
        self.next = env.page.next_url().map(str::to_string);
        self.page = env.page;
        Ok(Some(env.items))
    }

    /// Drain every remaining page into one list.
    pub async fn collect_all(mut self, ctx: &CancellationToken) -> Result<Vec<R>> {
        let mut all = Vec::new();
        while let Some(items) = self.next_page(ctx).await? {
            all.extend(items);
        }
        Ok(all)
    }

    /// One stream item per page.
    pub fn into_stream(self, ctx: CancellationToken) -> impl Stream<Item = Result<Vec<R>>> + 'a
    where
        R: 'a,
    {
        stream::try_unfold(self, move |mut pager| {
            let ctx = ctx.clone();
            async move {
                let items = pager.next_page(&ctx).await?;
                Ok::<_, ZendeskError>(items.map(|items| (items, pager)))
            }
        })
    }
}

/// Pages through a cursor-paginated listing by echoing `after_cursor`.
pub struct CursorPager<'a, T, R, O> {
    client: &'a Zendesk<T>,
    path: String,
    opts: O,
    done: bool,
    meta: CursorPaginationMeta,
    count: Option<i64>,
    marker: PhantomData<fn() -> R>,
}

impl<'a, T, R, O> CursorPager<'a, T, R, O>
where
    T: Transport,
    R: Resource + DeserializeOwned,
    O: CursorOptions,
{
    /// Start at `path` with `opts`; the first request uses the cursor in
    /// `opts` as given.
    pub fn new(client: &'a Zendesk<T>, path: impl Into<String>, opts: O) -> Self {
        Self {
            client,
            path: path.into(),
            opts,
            done: false,
            meta: CursorPaginationMeta::default(),
            count: None,
            marker: PhantomData,
        }
    }

    /// Options the next request will be sent with.
    pub fn options(&self) -> &O {
        &self.opts
    }

    /// Meta of the last page fetched.
    pub fn meta(&self) -> &CursorPaginationMeta {
        &self.meta
    }

    /// Top-level `count` of the last page, on endpoints that send one.
    pub fn count(&self) -> Option<i64> {
        self.count
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fetch the next page. `Ok(None)` once `has_more` was false.
    pub async fn next_page(&mut self, ctx: &CancellationToken) -> Result<Option<Vec<R>>> {
        if self.done {
            return Ok(None);
        }
        self.done = true;

        let url = add_options(&self.path, &self.opts)?;
        let env: CursorEnvelope<R> = self.client.get_json(ctx, &url).await?;

        // has_more without a cursor leaves nothing to continue from.
        if let Some(cursor) = env.meta.next_cursor() {
            let next = self.opts.pagination().after(cursor);
            *self.opts.pagination_mut() = next;
            self.done = false;
        }
        self.meta = env.meta;
        self.count = env.count;
        Ok(Some(env.items))
    }

    /// Drain every remaining page into one list.
    pub async fn collect_all(mut self, ctx: &CancellationToken) -> Result<Vec<R>> {
        let mut all = Vec::new();
        while let Some(items) = self.next_page(ctx).await? {
            all.extend(items);
        }
        Ok(all)
    }

    /// One stream item per page.
    pub fn into_stream(self, ctx: CancellationToken) -> impl Stream<Item = Result<Vec<R>>> + 'a
    where
        R: 'a,
        O: 'a,
    {
        stream::try_unfold(self, move |mut pager| {
            let ctx = ctx.clone();
            async move {
                let items = pager.next_page(&ctx).await?;
                Ok::<_, ZendeskError>(items.map(|items| (items, pager)))
            }
        })
    }
}
