use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::Zendesk;
use crate::envelope::{ListEnvelope, SingleEnvelope};
use crate::error::Result;
use crate::options::add_options_or_default;
use crate::rest::Transport;
use crate::types::*;

/// Custom ticket statuses.
#[async_trait]
pub trait CustomStatusApi {
    /// GET /custom_statuses.json
    async fn list_custom_ticket_statuses(
        &self,
        ctx: &CancellationToken,
        opts: Option<&CustomTicketStatusOptions>,
    ) -> Result<Vec<CustomStatus>>;

    /// GET /custom_statuses/{id}
    async fn show_custom_ticket_status(
        &self,
        ctx: &CancellationToken,
        custom_status_id: i64,
    ) -> Result<CustomStatus>;
}

#[async_trait]
impl<T: Transport> CustomStatusApi for Zendesk<T> {
    async fn list_custom_ticket_statuses(
        &self,
        ctx: &CancellationToken,
        opts: Option<&CustomTicketStatusOptions>,
    ) -> Result<Vec<CustomStatus>> {
        let url = add_options_or_default("/custom_statuses.json", opts)?;
        let env: ListEnvelope<CustomStatus> = self.get_json(ctx, &url).await?;
        Ok(env.0)
    }

    async fn show_custom_ticket_status(
        &self,
        ctx: &CancellationToken,
        custom_status_id: i64,
    ) -> Result<CustomStatus> {
        let url = format!("/custom_statuses/{custom_status_id}");
        let env: SingleEnvelope<CustomStatus> = self.get_json(ctx, &url).await?;
        Ok(env.0)
    }
}
