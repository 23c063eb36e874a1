use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::ZendeskConfig;
use crate::envelope::decode;
use crate::error::{Result, ZendeskError};
use crate::rest::{Transport, ZendeskHttpClient};

/// Characters escaped when a caller-supplied value becomes one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

pub(crate) fn segment(value: &str) -> PercentEncode<'_> {
    utf8_percent_encode(value, PATH_SEGMENT)
}

/// Reject identifiers that would address the wrong endpoint.
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ZendeskError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Zendesk API client.
///
/// Holds nothing but its transport, so one instance can be cloned or shared
/// across tasks. Endpoint methods live on the per-resource traits in
/// [`crate::api`].
#[derive(Debug, Clone)]
pub struct Zendesk<T = ZendeskHttpClient> {
    transport: T,
}

impl Zendesk<ZendeskHttpClient> {
    /// Create a client over the default HTTP transport.
    pub fn new(config: &ZendeskConfig) -> Result<Self> {
        Ok(Self::with_transport(ZendeskHttpClient::new(config)?))
    }

    /// Create a client from `ZENDESK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&ZendeskConfig::from_env()?)
    }
}

impl<T: Transport> Zendesk<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) async fn get(&self, ctx: &CancellationToken, url: &str) -> Result<Bytes> {
        self.transport.get(ctx, url).await
    }

    /// GET and decode into `D`.
    pub(crate) async fn get_json<D: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        url: &str,
    ) -> Result<D> {
        let body = self.get(ctx, url).await?;
        decode(&body)
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        ctx: &CancellationToken,
        url: &str,
        body: &B,
    ) -> Result<Bytes> {
        let body = serde_json::to_vec(body)?;
        self.transport.post(ctx, url, Some(body.into())).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized>(
        &self,
        ctx: &CancellationToken,
        url: &str,
        body: &B,
    ) -> Result<Bytes> {
        let body = serde_json::to_vec(body)?;
        self.transport.patch(ctx, url, Some(body.into())).await
    }

    pub(crate) async fn delete(&self, ctx: &CancellationToken, url: &str) -> Result<()> {
        self.transport.delete(ctx, url).await?;
        Ok(())
    }
}
