use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::Zendesk;
use crate::envelope::OffsetEnvelope;
use crate::error::Result;
use crate::options::add_options_or_default;
use crate::rest::Transport;
use crate::types::*;

/// End-user requests.
#[async_trait]
pub trait RequestApi {
    /// GET /requests/search.json
    async fn search_requests(
        &self,
        ctx: &CancellationToken,
        opts: Option<&RequestsOptions>,
    ) -> Result<(Vec<Request>, Page)>;
}

#[async_trait]
impl<T: Transport> RequestApi for Zendesk<T> {
    async fn search_requests(
        &self,
        ctx: &CancellationToken,
        opts: Option<&RequestsOptions>,
    ) -> Result<(Vec<Request>, Page)> {
        let url = add_options_or_default("/requests/search.json", opts)?;
        let env: OffsetEnvelope<Request> = self.get_json(ctx, &url).await?;
        Ok((env.items, env.page))
    }
}
