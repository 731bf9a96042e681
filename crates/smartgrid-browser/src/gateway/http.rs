//! HTTP adapter for the platform's Admin GraphQL endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use smartgrid_core::AppConfig;

use super::{Gateway, GraphqlResponse};
use crate::error::GatewayError;
use crate::retry::retry_with_backoff;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Connect timeout used when the caller does not supply one.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Posts GraphQL documents to `https://{shop}/admin/api/{version}/graphql.json`.
///
/// Throttling (429), timeouts, connect failures and 5xx responses are retried
/// with exponential backoff up to `max_retries` extra attempts; a 429 is never
/// retried before its `Retry-After`. The default is no retries.
pub struct HttpGateway {
    client: Client,
    endpoint: Url,
    access_token: String,
    connect_timeout: Duration,
    max_retries: u32,
    backoff_base_secs: u64,
}

fn admin_endpoint(shop_domain: &str, api_version: &str) -> String {
    format!("https://{shop_domain}/admin/api/{api_version}/graphql.json")
}

impl HttpGateway {
    /// Creates a gateway for the shop's Admin API.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GatewayError::InvalidEndpoint`] if the domain does not form a URL.
    pub fn new(
        shop_domain: &str,
        api_version: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GatewayError> {
        Self::with_endpoint(
            &admin_endpoint(shop_domain, api_version),
            access_token,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a gateway from loaded application configuration, including its
    /// connect timeout and retry policy.
    ///
    /// # Errors
    ///
    /// See [`HttpGateway::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        Ok(Self::build(
            &admin_endpoint(&config.shop_domain, &config.api_version),
            &config.access_token,
            config.gateway_timeout_secs,
            config.gateway_connect_timeout_secs,
            &config.user_agent,
        )?
        .with_retries(config.gateway_max_retries, config.gateway_backoff_base_secs))
    }

    /// Creates a gateway posting to an explicit endpoint URL (used against
    /// mock servers in tests).
    ///
    /// # Errors
    ///
    /// See [`HttpGateway::new`].
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GatewayError> {
        Self::build(
            endpoint,
            access_token,
            timeout_secs,
            DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent,
        )
    }

    fn build(
        endpoint: &str,
        access_token: &str,
        timeout_secs: u64,
        connect_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GatewayError> {
        let connect_timeout = Duration::from_secs(connect_timeout_secs);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| GatewayError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
            connect_timeout,
            max_retries: 0,
            backoff_base_secs: 0,
        })
    }

    /// Enables backoff retries for throttling, network failures and 5xx.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_secs: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_secs = backoff_base_secs;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    async fn post_once(
        &self,
        body: &serde_json::Value,
    ) -> Result<GraphqlResponse, GatewayError> {
        let endpoint = self.endpoint.to_string();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(GatewayError::Throttled {
                endpoint,
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(GatewayError::Unauthorized {
                status: status.as_u16(),
                endpoint,
            });
        }

        if !status.is_success() {
            return Err(GatewayError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<GraphqlResponse>(&text).map_err(|e| GatewayError::Deserialize {
            context: format!("GraphQL response from {endpoint}"),
            source: e,
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn query(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<GraphqlResponse, GatewayError> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.post_once(&body)
        })
        .await
    }
}

/// Parses a `Retry-After` value given in (possibly fractional) seconds,
/// rounding up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_retry_after(raw: &str) -> Option<u64> {
    let secs = raw.trim().parse::<f64>().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some(secs.ceil() as u64)
}
