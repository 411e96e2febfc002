// ABOUTME: Pluggable request-response transport used by the dispatcher and OAuth client
// ABOUTME: Reqwest implementation with pooled connections, timeouts and an explicit factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientOptions;
use crate::errors::{WhoopError, WhoopResult};

/// Body attached to an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json` body
    Json(Value),
    /// `application/x-www-form-urlencoded` body
    Form(Vec<(String, String)>),
}

/// Transport-neutral request description
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL without query string
    pub url: String,
    /// Query parameters in send order
    pub query: Vec<(String, String)>,
    /// Extra headers
    pub headers: Vec<(String, String)>,
    /// Optional body
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Request with no query, headers or body
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `GET` request to `url`
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// `POST` request to `url`
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Append query pairs
    #[must_use]
    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Add or replace a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Attach a form body
    #[must_use]
    pub fn with_form(mut self, params: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(params));
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Value of a header, matched case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// Authorization headers and form bodies carry secrets
impl Debug for HttpRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("headers", &header_names)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Transport-neutral response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Headers keyed by lower-cased name
    pub headers: HashMap<String, String>,
    /// Raw body text
    pub body: String,
}

impl HttpResponse {
    /// Response with no headers
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header, lower-casing its name
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Header value by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body as JSON
    ///
    /// # Errors
    ///
    /// Returns `Deserialization` naming `context` when the body does not match `T`
    pub fn json<T: DeserializeOwned>(&self, context: &str) -> WhoopResult<T> {
        serde_json::from_str(&self.body).map_err(|e| WhoopError::deserialization(context, e))
    }
}

/// Sends one request and returns the raw response
///
/// Implementations never interpret status codes; a non-2xx response is still `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request`
    ///
    /// # Errors
    ///
    /// Returns `Transport` when no response was received
    async fn send(&self, request: HttpRequest) -> WhoopResult<HttpResponse>;
}

/// Creates transports for new sessions
pub trait TransportFactory: Send + Sync {
    /// Build a transport configured from `options`
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when the transport cannot be built
    fn create(&self, options: &ClientOptions) -> WhoopResult<Arc<dyn HttpTransport>>;
}

/// Production transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with the timeouts and user agent from `options`
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the TLS backend cannot be initialized
    pub fn new(options: &ClientOptions) -> WhoopResult<Self> {
        let client = ClientBuilder::new()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .user_agent(options.user_agent.clone())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| WhoopError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> WhoopResult<HttpResponse> {
        let HttpRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        debug!(%method, %url, "sending request");

        let mut builder = self.client.request(method, &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match body {
            Some(RequestBody::Json(json)) => builder.json(&json),
            Some(RequestBody::Form(params)) => builder.form(&params),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| WhoopError::transport(format!("request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_owned()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| WhoopError::transport(format!("failed to read response body: {e}")))?;

        debug!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Factory producing a fresh [`ReqwestTransport`] per session
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransportFactory;

impl TransportFactory for ReqwestTransportFactory {
    fn create(&self, options: &ClientOptions) -> WhoopResult<Arc<dyn HttpTransport>> {
        Ok(Arc::new(ReqwestTransport::new(options)?))
    }
}
