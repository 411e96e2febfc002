// ABOUTME: Authenticated request dispatch with response classification and refresh-and-retry
// ABOUTME: Composes the retry policy with the token manager around one transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use http::Method;
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::config::ClientOptions;
use crate::errors::{WhoopError, WhoopResult};
use crate::oauth2_client::{OAuth2Client, TokenInfo, TokenManager};
use crate::retry::RetryPolicy;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Issues authenticated API calls for one session
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    retry: Arc<RetryPolicy>,
    tokens: Arc<TokenManager>,
    oauth: Option<OAuth2Client>,
    options: ClientOptions,
}

impl Dispatcher {
    /// Dispatcher over `transport`
    ///
    /// Without an `oauth` client the dispatcher never refreshes.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        retry: Arc<RetryPolicy>,
        tokens: Arc<TokenManager>,
        oauth: Option<OAuth2Client>,
        options: ClientOptions,
    ) -> Self {
        Self {
            transport,
            retry,
            tokens,
            oauth,
            options,
        }
    }

    /// OAuth client used for refresh and code exchange, if credentials were given
    #[must_use]
    pub const fn oauth(&self) -> Option<&OAuth2Client> {
        self.oauth.as_ref()
    }

    /// Token holder shared with the owning client
    #[must_use]
    pub const fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Options this dispatcher was built with
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn can_refresh(&self, token: &TokenInfo) -> bool {
        self.options.auto_refresh && self.oauth.is_some() && token.can_refresh()
    }

    /// Refresh through the token manager
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without client credentials, otherwise whatever
    /// the refresh itself returns
    pub async fn refresh(&self, stale: Option<&Arc<TokenInfo>>) -> WhoopResult<Arc<TokenInfo>> {
        let oauth = self.oauth.as_ref().ok_or_else(|| {
            WhoopError::configuration("cannot refresh token without client_id and client_secret")
        })?;
        self.tokens.refresh(oauth, stale).await
    }

    async fn usable_token(&self) -> WhoopResult<Arc<TokenInfo>> {
        let token = self.tokens.current().ok_or_else(|| {
            WhoopError::authentication("no access token available; complete the authorization flow first")
        })?;
        if token.is_expired() && self.can_refresh(&token) {
            debug!("access token expired, refreshing before request");
            return self.refresh(Some(&token)).await;
        }
        Ok(token)
    }

    /// Send an authenticated request to `path` under the versioned API prefix
    ///
    /// Transient failures are retried by the retry policy. A rejected access
    /// token is refreshed once and the request is repeated exactly once more.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the final attempt
    #[instrument(skip(self, query, body), fields(api_call = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> WhoopResult<HttpResponse> {
        let url = self.options.api_url(path);
        let token = self.usable_token().await?;
        let refreshable = self.can_refresh(&token);

        match self
            .send_with_retry(&method, &url, path, &query, body.as_ref(), &token, refreshable)
            .await
        {
            Err(WhoopError::TokenExpired { .. }) => {
                info!("access token rejected, refreshing and retrying once");
                let token = self.refresh(Some(&token)).await?;
                self.send_with_retry(&method, &url, path, &query, body.as_ref(), &token, false)
                    .await
            }
            other => other,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn send_with_retry(
        &self,
        method: &Method,
        url: &str,
        resource: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        token: &TokenInfo,
        refreshable: bool,
    ) -> WhoopResult<HttpResponse> {
        let mut request = HttpRequest::new(method.clone(), url)
            .with_query(query.to_vec())
            .with_header("Accept", "application/json")
            .with_header("Authorization", token.authorization_header());
        if let Some(body) = body {
            request = request.with_json(body.clone());
        }

        self.retry
            .execute(|| {
                let request = request.clone();
                async move {
                    let response = self.transport.send(request).await?;
                    classify_response(response, resource, refreshable)
                }
            })
            .await
    }
}

/// Map a response to success or a categorized error
///
/// `refreshable` selects `TokenExpired` over `Authentication` for a 401.
///
/// # Errors
///
/// Returns the error category matching any non-2xx status
pub fn classify_response(
    response: HttpResponse,
    resource: &str,
    refreshable: bool,
) -> WhoopResult<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status;
    let retry_after = response
        .header("retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = if response.body.is_empty() {
        None
    } else {
        Some(response.body)
    };

    let err = match status {
        400 => {
            let parsed: Option<Map<String, Value>> = body
                .as_deref()
                .and_then(|b| serde_json::from_str::<Value>(b).ok())
                .and_then(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                });
            let message = parsed
                .as_ref()
                .and_then(|m| m.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Bad request")
                .to_owned();
            WhoopError::Validation {
                message,
                field_errors: parsed,
                body,
            }
        }
        401 if refreshable => WhoopError::TokenExpired { body },
        401 => WhoopError::Authentication {
            message: "access token was rejected".to_owned(),
            status_code: Some(401),
            body,
        },
        404 => WhoopError::ResourceNotFound {
            resource: resource.to_owned(),
            body,
        },
        429 => WhoopError::RateLimit { retry_after, body },
        500..=599 => WhoopError::Server {
            status_code: status,
            body,
        },
        _ => WhoopError::Unexpected {
            status_code: status,
            body,
        },
    };

    match &err {
        WhoopError::RateLimit { .. } | WhoopError::Server { .. } => {
            warn!(status, category = err.category().as_str(), "transient API failure");
        }
        WhoopError::TokenExpired { .. } => debug!(status, "access token rejected"),
        _ => error!(status, category = err.category().as_str(), "API request failed"),
    }
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_validation_keeps_field_errors() {
        let response = HttpResponse::new(400, r#"{"message":"bad limit","limit":"too large"}"#);
        let err = classify_response(response, "cycle", true).unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("limit").and_then(Value::as_str), Some("too large"));
        assert!(err.to_string().contains("bad limit"));
    }

    #[test]
    fn test_classify_401_depends_on_refresh_availability() {
        let err = classify_response(HttpResponse::new(401, ""), "cycle", true).unwrap_err();
        assert!(matches!(err, WhoopError::TokenExpired { .. }));

        let err = classify_response(HttpResponse::new(401, ""), "cycle", false).unwrap_err();
        assert!(matches!(err, WhoopError::Authentication { .. }));
    }

    #[test]
    fn test_classify_rate_limit_reads_retry_after() {
        let response = HttpResponse::new(429, "slow down").with_header("Retry-After", "2");
        let err = classify_response(response, "cycle", false).unwrap_err();
        assert_eq!(err.retry_after(), Some(2));
        assert_eq!(err.body(), Some("slow down"));
    }

    #[test]
    fn test_classify_other_statuses() {
        assert!(classify_response(HttpResponse::new(204, ""), "x", false).is_ok());
        let not_found = classify_response(HttpResponse::new(404, ""), "cycle/1", false).unwrap_err();
        assert!(matches!(not_found, WhoopError::ResourceNotFound { ref resource, .. } if resource == "cycle/1"));
        let server = classify_response(HttpResponse::new(503, ""), "x", false).unwrap_err();
        assert_eq!(server.status_code(), Some(503));
        let teapot = classify_response(HttpResponse::new(418, "tea"), "x", false).unwrap_err();
        assert!(matches!(teapot, WhoopError::Unexpected { status_code: 418, .. }));
    }
}
