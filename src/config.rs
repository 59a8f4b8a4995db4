use serde::{Deserialize, Serialize};

fn default_api_host() -> String {
    "https://api.sparkpost.com".to_owned()
}

/// Configuration for the SparkPost delivery client.
///
/// Holds the API credentials plus process-wide defaults for every
/// transmission option a message may override. Every default is optional:
/// a key left unset here (and unset on the message) is simply absent from
/// the wire payload, so the provider-side default applies.
///
/// # Examples
///
/// ```
/// use sparkpost_delivery::SparkPostConfig;
///
/// let config = SparkPostConfig::new("api-key")
///     .with_sandbox(true)
///     .with_campaign_id("onboarding");
/// assert_eq!(config.api_host, "https://api.sparkpost.com");
/// assert_eq!(config.sandbox, Some(true));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparkPostConfig {
    /// SparkPost API key, sent in the `Authorization` request header.
    pub api_key: String,

    /// Base URL of the SparkPost API. Override this for the EU region or
    /// for testing against a mock server.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Default for the sandbox flag (sends route to the test domain).
    pub sandbox: Option<bool>,

    /// Default for open tracking.
    pub track_opens: Option<bool>,

    /// Default for click tracking.
    pub track_clicks: Option<bool>,

    /// Default campaign identifier.
    pub campaign_id: Option<String>,

    /// Default bounce return-path address.
    pub return_path: Option<String>,

    /// Default for the transactional flag.
    pub transactional: Option<bool>,

    /// Default dedicated IP pool name.
    pub ip_pool: Option<String>,

    /// Default for provider-side CSS inlining.
    pub inline_css: Option<bool>,

    /// When set, a message whose only body is plain text is sent as HTML
    /// content instead.
    pub html_content_only: Option<bool>,

    /// Default subaccount identifier for sends on behalf of a subaccount.
    pub subaccount: Option<String>,
}

impl SparkPostConfig {
    /// Create a new configuration with the given API key.
    ///
    /// Uses the default US API host and leaves every option default unset.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: default_api_host(),
            sandbox: None,
            track_opens: None,
            track_clicks: None,
            campaign_id: None,
            return_path: None,
            transactional: None,
            ip_pool: None,
            inline_css: None,
            html_content_only: None,
            subaccount: None,
        }
    }

    /// Override the API base URL (EU region, test endpoints).
    #[must_use]
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    /// Set the default sandbox flag.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = Some(sandbox);
        self
    }

    /// Set the default open-tracking flag.
    #[must_use]
    pub fn with_track_opens(mut self, track_opens: bool) -> Self {
        self.track_opens = Some(track_opens);
        self
    }

    /// Set the default click-tracking flag.
    #[must_use]
    pub fn with_track_clicks(mut self, track_clicks: bool) -> Self {
        self.track_clicks = Some(track_clicks);
        self
    }

    /// Set the default campaign identifier.
    #[must_use]
    pub fn with_campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    /// Set the default bounce return-path address.
    #[must_use]
    pub fn with_return_path(mut self, return_path: impl Into<String>) -> Self {
        self.return_path = Some(return_path.into());
        self
    }

    /// Set the default transactional flag.
    #[must_use]
    pub fn with_transactional(mut self, transactional: bool) -> Self {
        self.transactional = Some(transactional);
        self
    }

    /// Set the default IP pool name.
    #[must_use]
    pub fn with_ip_pool(mut self, ip_pool: impl Into<String>) -> Self {
        self.ip_pool = Some(ip_pool.into());
        self
    }

    /// Set the default CSS-inlining flag.
    #[must_use]
    pub fn with_inline_css(mut self, inline_css: bool) -> Self {
        self.inline_css = Some(inline_css);
        self
    }

    /// Set whether text-only bodies are sent as HTML content.
    #[must_use]
    pub fn with_html_content_only(mut self, html_content_only: bool) -> Self {
        self.html_content_only = Some(html_content_only);
        self
    }

    /// Set the default subaccount identifier.
    #[must_use]
    pub fn with_subaccount(mut self, subaccount: impl Into<String>) -> Self {
        self.subaccount = Some(subaccount.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_default_host_and_no_option_defaults() {
        let config = SparkPostConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.api_host, "https://api.sparkpost.com");
        assert!(config.sandbox.is_none());
        assert!(config.track_opens.is_none());
        assert!(config.track_clicks.is_none());
        assert!(config.campaign_id.is_none());
        assert!(config.return_path.is_none());
        assert!(config.transactional.is_none());
        assert!(config.ip_pool.is_none());
        assert!(config.inline_css.is_none());
        assert!(config.html_content_only.is_none());
        assert!(config.subaccount.is_none());
    }

    #[test]
    fn with_api_host_overrides_default() {
        let config = SparkPostConfig::new("key").with_api_host("https://api.eu.sparkpost.com");
        assert_eq!(config.api_host, "https://api.eu.sparkpost.com");
    }

    #[test]
    fn builder_methods_set_defaults() {
        let config = SparkPostConfig::new("key")
            .with_sandbox(true)
            .with_track_opens(true)
            .with_track_clicks(false)
            .with_campaign_id("spring-sale")
            .with_return_path("bounces@example.com")
            .with_transactional(true)
            .with_ip_pool("marketing")
            .with_inline_css(true)
            .with_html_content_only(true)
            .with_subaccount("123");

        assert_eq!(config.sandbox, Some(true));
        assert_eq!(config.track_opens, Some(true));
        assert_eq!(config.track_clicks, Some(false));
        assert_eq!(config.campaign_id.as_deref(), Some("spring-sale"));
        assert_eq!(config.return_path.as_deref(), Some("bounces@example.com"));
        assert_eq!(config.transactional, Some(true));
        assert_eq!(config.ip_pool.as_deref(), Some("marketing"));
        assert_eq!(config.inline_css, Some(true));
        assert_eq!(config.html_content_only, Some(true));
        assert_eq!(config.subaccount.as_deref(), Some("123"));
    }

    #[test]
    fn deserialize_fills_api_host_default() {
        let config: SparkPostConfig =
            serde_json::from_str(r#"{"api_key":"k","sandbox":true}"#).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.api_host, "https://api.sparkpost.com");
        assert_eq!(config.sandbox, Some(true));
        assert!(config.campaign_id.is_none());
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = SparkPostConfig::new("key")
            .with_api_host("http://localhost:9999")
            .with_campaign_id("c1")
            .with_sandbox(false);
        let json = serde_json::to_string(&config).unwrap();
        let back: SparkPostConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_key, "key");
        assert_eq!(back.api_host, "http://localhost:9999");
        assert_eq!(back.campaign_id.as_deref(), Some("c1"));
        assert_eq!(back.sandbox, Some(false));
    }
}
