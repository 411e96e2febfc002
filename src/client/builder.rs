// ABOUTME: Builder assembling credentials, token, options and transport factory into a client
// ABOUTME: The transport implementation is chosen explicitly here, never by a global default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::blocking::BlockingWhoopClient;
use crate::client::WhoopClient;
use crate::config::{ClientOptions, WhoopConfig};
use crate::errors::WhoopResult;
use crate::oauth2_client::{TokenInfo, TokenManager};
use crate::retry::{JitterSource, RetryPolicy};
use crate::transport::{ReqwestTransportFactory, TransportFactory};

/// Parts shared by the async and blocking clients
pub(crate) struct ClientParts {
    pub config: Option<WhoopConfig>,
    pub options: ClientOptions,
    pub tokens: Arc<TokenManager>,
    pub factory: Arc<dyn TransportFactory>,
    pub retry: Arc<RetryPolicy>,
}

/// Builder for [`WhoopClient`] and [`BlockingWhoopClient`]
#[derive(Default)]
pub struct WhoopClientBuilder {
    config: Option<WhoopConfig>,
    token: Option<TokenInfo>,
    options: Option<ClientOptions>,
    factory: Option<Arc<dyn TransportFactory>>,
    jitter: Option<Box<dyn JitterSource>>,
}

impl WhoopClientBuilder {
    /// Empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// OAuth application credentials, required for code exchange and refresh
    #[must_use]
    pub fn config(mut self, config: WhoopConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Initial token
    #[must_use]
    pub fn token(mut self, token: TokenInfo) -> Self {
        self.token = Some(token);
        self
    }

    /// Initial token if one was loaded
    #[must_use]
    pub fn maybe_token(mut self, token: Option<TokenInfo>) -> Self {
        self.token = token;
        self
    }

    /// Runtime options
    #[must_use]
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Transport factory; defaults to [`ReqwestTransportFactory`]
    #[must_use]
    pub fn transport_factory(mut self, factory: Arc<dyn TransportFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Jitter source for retry backoff
    ///
    /// The source is shared by every session of the built client, including
    /// the per-call sessions of a blocking client.
    #[must_use]
    pub fn jitter_source(mut self, jitter: Box<dyn JitterSource>) -> Self {
        self.jitter = Some(jitter);
        self
    }

    fn into_parts(self) -> ClientParts {
        let options = self.options.unwrap_or_default();
        let retry = match self.jitter {
            Some(jitter) => RetryPolicy::with_jitter_source(options.retry.clone(), jitter),
            None => RetryPolicy::new(options.retry.clone()),
        };
        ClientParts {
            config: self.config,
            tokens: Arc::new(TokenManager::new(self.token)),
            factory: self
                .factory
                .unwrap_or_else(|| Arc::new(ReqwestTransportFactory)),
            retry: Arc::new(retry),
            options,
        }
    }

    /// Open an async client session
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the transport cannot be created
    pub fn build(self) -> WhoopResult<WhoopClient> {
        WhoopClient::open(&self.into_parts())
    }

    /// Build a blocking client; sessions are opened per call
    #[must_use]
    pub fn build_blocking(self) -> BlockingWhoopClient {
        BlockingWhoopClient::from_parts(self.into_parts())
    }
}
