use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::Zendesk;
use crate::envelope::{OffsetEnvelope, SingleEnvelope};
use crate::error::Result;
use crate::options::add_options_or_default;
use crate::pagination::OffsetPager;
use crate::rest::Transport;
use crate::types::*;

const ARTICLES_PATH: &str = "/help_center/articles.json";

/// Help Center articles.
#[async_trait]
pub trait ArticleApi {
    /// GET /help_center/articles.json - one page of articles.
    async fn list_articles(
        &self,
        ctx: &CancellationToken,
        opts: Option<&ArticleListOptions>,
    ) -> Result<(Vec<Article>, Page)>;

    /// GET /help_center/articles/{id}.json
    async fn show_article(&self, ctx: &CancellationToken, article_id: i64) -> Result<Article>;
}

#[async_trait]
impl<T: Transport> ArticleApi for Zendesk<T> {
    async fn list_articles(
        &self,
        ctx: &CancellationToken,
        opts: Option<&ArticleListOptions>,
    ) -> Result<(Vec<Article>, Page)> {
        let url = add_options_or_default(ARTICLES_PATH, opts)?;
        let env: OffsetEnvelope<Article> = self.get_json(ctx, &url).await?;
        Ok((env.items, env.page))
    }

    async fn show_article(&self, ctx: &CancellationToken, article_id: i64) -> Result<Article> {
        let url = format!("/help_center/articles/{article_id}.json");
        let env: SingleEnvelope<Article> = self.get_json(ctx, &url).await?;
        Ok(env.0)
    }
}

impl<T: Transport> Zendesk<T> {
    /// Offset pager over `GET /help_center/articles.json`.
    pub fn articles_pager(
        &self,
        opts: Option<&ArticleListOptions>,
    ) -> Result<OffsetPager<'_, T, Article>> {
        let url = add_options_or_default(ARTICLES_PATH, opts)?;
        Ok(OffsetPager::new(self, url))
    }
}
