use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{Credential, ZendeskConfig};
use crate::error::{ApiError, Result, ZendeskError};

/// The single place HTTP calls are made.
///
/// `url` is either a path below the API root (`/custom_statuses.json`) or an
/// absolute URL handed out by the server, used verbatim. A 2xx body comes
/// back untouched; anything else is an [`ApiError`]. Once `ctx` is cancelled
/// the call returns [`ZendeskError::Cancelled`] without waiting for the
/// server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, ctx: &CancellationToken, url: &str) -> Result<Bytes>;

    /// `body` is JSON, `None` for an empty request body.
    async fn post(&self, ctx: &CancellationToken, url: &str, body: Option<Bytes>)
        -> Result<Bytes>;

    /// `body` is JSON, `None` for an empty request body.
    async fn patch(
        &self,
        ctx: &CancellationToken,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes>;

    async fn delete(&self, ctx: &CancellationToken, url: &str) -> Result<Bytes>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, ctx: &CancellationToken, url: &str) -> Result<Bytes> {
        (**self).get(ctx, url).await
    }

    async fn post(
        &self,
        ctx: &CancellationToken,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        (**self).post(ctx, url, body).await
    }

    async fn patch(
        &self,
        ctx: &CancellationToken,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        (**self).patch(ctx, url, body).await
    }

    async fn delete(&self, ctx: &CancellationToken, url: &str) -> Result<Bytes> {
        (**self).delete(ctx, url).await
    }
}

/// `reqwest`-backed transport for the Zendesk REST API.
#[derive(Debug, Clone)]
pub struct ZendeskHttpClient {
    client: Client,
    base_url: String,
    credential: Credential,
}

impl ZendeskHttpClient {
    pub fn new(config: &ZendeskConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)
            .map_err(|e| ZendeskError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: config.credential.clone(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("https://") || url.starts_with("http://") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url)
        }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            Credential::ApiToken { email, token } => {
                req.basic_auth(format!("{email}/token"), Some(token))
            }
            Credential::Password { email, password } => req.basic_auth(email, Some(password)),
            Credential::Bearer(token) => req.bearer_auth(token),
        }
    }

    async fn send(
        &self,
        ctx: &CancellationToken,
        method: Method,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        let url = self.resolve(url);
        let mut req = self
            .authorize(self.client.request(method.clone(), &url))
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        // Dropping the losing branch aborts the in-flight request.
        tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                debug!(%method, %url, "request cancelled");
                Err(ZendeskError::Cancelled)
            }
            res = execute(req, &method, &url) => res,
        }
    }
}

async fn execute(req: RequestBuilder, method: &Method, url: &str) -> Result<Bytes> {
    let resp = req.send().await.map_err(request_error)?;
    let status = resp.status();
    debug!(%method, %url, status = status.as_u16(), "response received");

    if !status.is_success() {
        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(%url, ?retry_after, "rate limited");
        }
        return Err(ApiError::new(status.as_u16(), body)
            .with_retry_after(retry_after)
            .into());
    }

    resp.bytes().await.map_err(request_error)
}

fn request_error(err: reqwest::Error) -> ZendeskError {
    if err.is_timeout() {
        ZendeskError::Timeout
    } else {
        ZendeskError::Request(err)
    }
}

#[async_trait]
impl Transport for ZendeskHttpClient {
    async fn get(&self, ctx: &CancellationToken, url: &str) -> Result<Bytes> {
        self.send(ctx, Method::GET, url, None).await
    }

    async fn post(
        &self,
        ctx: &CancellationToken,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        self.send(ctx, Method::POST, url, body).await
    }

    async fn patch(
        &self,
        ctx: &CancellationToken,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        self.send(ctx, Method::PATCH, url, body).await
    }

    async fn delete(&self, ctx: &CancellationToken, url: &str) -> Result<Bytes> {
        self.send(ctx, Method::DELETE, url, None).await
    }
}
