//! Client configuration types.
//!
//! [`ClientConfig`] tunes the default [`HyperClient`]; [`Config`] bundles
//! everything a call needs: base URL, HTTP client, serializer and logger.

use std::sync::Arc;
use std::time::Duration;

use lark_oapi_core::{
    DefaultSerialization, HttpClient, LogLevel, Logger, LoggerProxy, Serialization, TracingLogger,
};

use crate::HyperClient;

/// Base URL of the Feishu open platform.
pub const FEISHU_BASE_URL: &str = "https://open.feishu.cn";

/// Base URL of the Lark open platform.
pub const LARK_BASE_URL: &str = "https://open.larksuite.com";

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overall deadline of one exchange, response body included.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

/// Everything a call needs, passed by reference to [`crate::request`].
///
/// # Example
///
/// ```ignore
/// use lark_oapi::{Config, LARK_BASE_URL};
/// use std::time::Duration;
///
/// let config = Config::builder()
///     .base_url(LARK_BASE_URL)
///     .req_timeout(Duration::from_secs(10))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct Config<C = HyperClient, S = DefaultSerialization> {
    base_url: String,
    http_client: C,
    serializer: S,
    logger: LoggerProxy,
    req_timeout: Option<Duration>,
    log_req_at_debug: bool,
}

impl Config {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl<C, S> Config<C, S> {
    /// Domain prefixed to relative API paths.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// HTTP client executing the exchanges.
    #[must_use]
    pub const fn http_client(&self) -> &C {
        &self.http_client
    }

    /// Body serializer.
    #[must_use]
    pub const fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Level-filtered logger.
    #[must_use]
    pub const fn logger(&self) -> &LoggerProxy {
        &self.logger
    }

    /// Request timeout applied to the default client, if one was set.
    #[must_use]
    pub const fn req_timeout(&self) -> Option<Duration> {
        self.req_timeout
    }

    /// Whether whole requests and responses are logged at debug level.
    #[must_use]
    pub const fn log_req_at_debug(&self) -> bool {
        self.log_req_at_debug
    }
}

/// Builder for [`Config`].
#[derive(Clone)]
pub struct ConfigBuilder<S = DefaultSerialization> {
    base_url: Option<String>,
    serializer: S,
    logger: Option<Arc<dyn Logger>>,
    log_level: LogLevel,
    req_timeout: Option<Duration>,
    log_req_at_debug: bool,
    http_logging: bool,
    client_config: ClientConfig,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            serializer: DefaultSerialization,
            logger: None,
            log_level: LogLevel::default(),
            req_timeout: None,
            log_req_at_debug: false,
            http_logging: false,
            client_config: ClientConfig::default(),
        }
    }
}

impl<S> std::fmt::Debug for ConfigBuilder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .field("req_timeout", &self.req_timeout)
            .field("log_req_at_debug", &self.log_req_at_debug)
            .field("http_logging", &self.http_logging)
            .field("client_config", &self.client_config)
            .finish_non_exhaustive()
    }
}

impl<S: Serialization> ConfigBuilder<S> {
    /// Set the domain, defaults to [`FEISHU_BASE_URL`].
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replace the body serializer.
    #[must_use]
    pub fn serializer<S2: Serialization>(self, serializer: S2) -> ConfigBuilder<S2> {
        ConfigBuilder {
            base_url: self.base_url,
            serializer,
            logger: self.logger,
            log_level: self.log_level,
            req_timeout: self.req_timeout,
            log_req_at_debug: self.log_req_at_debug,
            http_logging: self.http_logging,
            client_config: self.client_config,
        }
    }

    /// Replace the log sink, defaults to [`TracingLogger`].
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Minimum level of SDK messages.
    #[must_use]
    pub const fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Deadline of one exchange for the default client.
    #[must_use]
    pub const fn req_timeout(mut self, timeout: Duration) -> Self {
        self.req_timeout = Some(timeout);
        self
    }

    /// Log whole requests and responses at debug level.
    #[must_use]
    pub const fn log_req_at_debug(mut self, enabled: bool) -> Self {
        self.log_req_at_debug = enabled;
        self
    }

    /// Install [`crate::middleware::LoggingLayer`] on the default client.
    #[must_use]
    pub const fn http_logging(mut self, enabled: bool) -> Self {
        self.http_logging = enabled;
        self
    }

    /// Tune the default client.
    #[must_use]
    pub fn client_config(mut self, config: ClientConfig) -> Self {
        self.client_config = config;
        self
    }

    /// Build with the default [`HyperClient`].
    #[must_use]
    pub fn build(self) -> Config<HyperClient, S> {
        let mut client_config = self.client_config.clone();
        if let Some(timeout) = self.req_timeout {
            client_config.timeout = timeout;
        }

        let mut builder = HyperClient::builder().config(client_config);
        if self.http_logging {
            builder = builder.with_logging();
        }
        let client = builder.build();

        self.build_with_client(client)
    }

    /// Build around a caller supplied client.
    #[must_use]
    pub fn build_with_client<C: HttpClient>(self, http_client: C) -> Config<C, S> {
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));
        Config {
            base_url: self
                .base_url
                .unwrap_or_else(|| FEISHU_BASE_URL.to_string()),
            http_client,
            serializer: self.serializer,
            logger: LoggerProxy::new(self.log_level, logger),
            req_timeout: self.req_timeout,
            log_req_at_debug: self.log_req_at_debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
    }

    #[test]
    fn client_config_builder_overrides() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_idle_per_host, 16);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(90));
    }

    #[test]
    fn config_defaults() {
        let config = Config::builder().build();

        assert_eq!(config.base_url(), FEISHU_BASE_URL);
        assert_eq!(config.logger().level(), LogLevel::Info);
        assert_eq!(config.req_timeout(), None);
        assert!(!config.log_req_at_debug());
        assert_eq!(
            config.http_client().config().timeout,
            Duration::from_secs(30)
        );
    }

    #[test]
    fn config_req_timeout_applies_to_default_client() {
        let config = Config::builder()
            .base_url(LARK_BASE_URL)
            .req_timeout(Duration::from_secs(3))
            .log_level(LogLevel::Debug)
            .log_req_at_debug(true)
            .build();

        assert_eq!(config.base_url(), LARK_BASE_URL);
        assert_eq!(config.req_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.http_client().config().timeout, Duration::from_secs(3));
        assert_eq!(config.logger().level(), LogLevel::Debug);
        assert!(config.log_req_at_debug());
    }
}
