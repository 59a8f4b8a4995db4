use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SparkPostConfig;

/// Per-message SparkPost options.
///
/// Every field is optional; a field left unset falls back to the
/// process-wide default from [`SparkPostConfig`], and a key unset in both
/// places is absent from the wire payload entirely. Deserializing a bag
/// from JSON ignores unknown keys, so option bags from newer callers
/// degrade gracefully.
///
/// # Examples
///
/// ```
/// use sparkpost_delivery::SparkPostData;
///
/// let data = SparkPostData::default()
///     .with_template_id("welcome-template")
///     .with_campaign_id("onboarding")
///     .with_sandbox(true);
/// assert_eq!(data.template_id.as_deref(), Some("welcome-template"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparkPostData {
    /// Stored template to render instead of the inline bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    /// Campaign identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,

    /// Bounce return-path address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,

    /// Free-form transmission description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Dedicated IP pool name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_pool: Option<String>,

    /// Subaccount identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,

    /// Stored recipient list to send to instead of the message recipients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_list_id: Option<String>,

    /// A/B test to draw content from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ab_test_id: Option<String>,

    /// Route the send to the sandbox domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<bool>,

    /// Track opens for this transmission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_tracking: Option<bool>,

    /// Track clicks for this transmission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_tracking: Option<bool>,

    /// Mark the transmission transactional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactional: Option<bool>,

    /// Inline CSS on the provider side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_css: Option<bool>,

    /// Send a text-only body as HTML content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content_only: Option<bool>,

    /// Opaque transmission metadata, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,

    /// Per-recipient substitution data, keyed by recipient email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution_data: Option<BTreeMap<String, serde_json::Value>>,
}

impl SparkPostData {
    /// Set the stored template id.
    #[must_use]
    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Set the campaign id.
    #[must_use]
    pub fn with_campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    /// Set the bounce return-path address.
    #[must_use]
    pub fn with_return_path(mut self, return_path: impl Into<String>) -> Self {
        self.return_path = Some(return_path.into());
        self
    }

    /// Set the transmission description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the IP pool name.
    #[must_use]
    pub fn with_ip_pool(mut self, ip_pool: impl Into<String>) -> Self {
        self.ip_pool = Some(ip_pool.into());
        self
    }

    /// Set the subaccount id.
    #[must_use]
    pub fn with_subaccount(mut self, subaccount: impl Into<String>) -> Self {
        self.subaccount = Some(subaccount.into());
        self
    }

    /// Send to a stored recipient list instead of the message recipients.
    #[must_use]
    pub fn with_recipient_list_id(mut self, list_id: impl Into<String>) -> Self {
        self.recipient_list_id = Some(list_id.into());
        self
    }

    /// Set the A/B test id.
    #[must_use]
    pub fn with_ab_test_id(mut self, ab_test_id: impl Into<String>) -> Self {
        self.ab_test_id = Some(ab_test_id.into());
        self
    }

    /// Set the sandbox flag.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = Some(sandbox);
        self
    }

    /// Set the open-tracking flag.
    #[must_use]
    pub fn with_open_tracking(mut self, open_tracking: bool) -> Self {
        self.open_tracking = Some(open_tracking);
        self
    }

    /// Set the click-tracking flag.
    #[must_use]
    pub fn with_click_tracking(mut self, click_tracking: bool) -> Self {
        self.click_tracking = Some(click_tracking);
        self
    }

    /// Set the transactional flag.
    #[must_use]
    pub fn with_transactional(mut self, transactional: bool) -> Self {
        self.transactional = Some(transactional);
        self
    }

    /// Set the CSS-inlining flag.
    #[must_use]
    pub fn with_inline_css(mut self, inline_css: bool) -> Self {
        self.inline_css = Some(inline_css);
        self
    }

    /// Set whether a text-only body is sent as HTML.
    #[must_use]
    pub fn with_html_content_only(mut self, html_content_only: bool) -> Self {
        self.html_content_only = Some(html_content_only);
        self
    }

    /// Set the opaque transmission metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add substitution data for one recipient address.
    #[must_use]
    pub fn with_substitution(
        mut self,
        address: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        self.substitution_data
            .get_or_insert_with(BTreeMap::new)
            .insert(address.into(), data);
        self
    }
}

/// The option bag actually consumed by the payload builder: message-level
/// options merged over the configured defaults, message winning per key.
///
/// Ephemeral - constructed and discarded within a single delivery call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    pub template_id: Option<String>,
    pub campaign_id: Option<String>,
    pub return_path: Option<String>,
    pub description: Option<String>,
    pub ip_pool: Option<String>,
    pub subaccount: Option<String>,
    pub recipient_list_id: Option<String>,
    pub ab_test_id: Option<String>,
    pub sandbox: Option<bool>,
    pub open_tracking: Option<bool>,
    pub click_tracking: Option<bool>,
    pub transactional: Option<bool>,
    pub inline_css: Option<bool>,
    pub html_content_only: Option<bool>,
    pub metadata: Option<serde_json::Value>,
    pub substitution_data: Option<BTreeMap<String, serde_json::Value>>,
}

impl ResolvedOptions {
    /// Merge message-level options over the config defaults.
    ///
    /// Keys without a config counterpart (template, metadata, substitution
    /// data, recipient list, A/B test, description) come from the message
    /// alone.
    pub fn resolve(config: &SparkPostConfig, data: &SparkPostData) -> Self {
        Self {
            template_id: data.template_id.clone(),
            campaign_id: data
                .campaign_id
                .clone()
                .or_else(|| config.campaign_id.clone()),
            return_path: data
                .return_path
                .clone()
                .or_else(|| config.return_path.clone()),
            description: data.description.clone(),
            ip_pool: data.ip_pool.clone().or_else(|| config.ip_pool.clone()),
            subaccount: data
                .subaccount
                .clone()
                .or_else(|| config.subaccount.clone()),
            recipient_list_id: data.recipient_list_id.clone(),
            ab_test_id: data.ab_test_id.clone(),
            sandbox: data.sandbox.or(config.sandbox),
            open_tracking: data.open_tracking.or(config.track_opens),
            click_tracking: data.click_tracking.or(config.track_clicks),
            transactional: data.transactional.or(config.transactional),
            inline_css: data.inline_css.or(config.inline_css),
            html_content_only: data.html_content_only.or(config.html_content_only),
            metadata: data.metadata.clone(),
            substitution_data: data.substitution_data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_option_overrides_config_default() {
        let config = SparkPostConfig::new("key").with_sandbox(false);
        let data = SparkPostData::default().with_sandbox(true);
        let resolved = ResolvedOptions::resolve(&config, &data);
        assert_eq!(resolved.sandbox, Some(true));
    }

    #[test]
    fn config_default_applies_when_message_unset() {
        let config = SparkPostConfig::new("key")
            .with_track_opens(true)
            .with_campaign_id("default-campaign")
            .with_ip_pool("pool-a");
        let resolved = ResolvedOptions::resolve(&config, &SparkPostData::default());
        assert_eq!(resolved.open_tracking, Some(true));
        assert_eq!(resolved.campaign_id.as_deref(), Some("default-campaign"));
        assert_eq!(resolved.ip_pool.as_deref(), Some("pool-a"));
    }

    #[test]
    fn keys_absent_everywhere_stay_absent() {
        let config = SparkPostConfig::new("key");
        let resolved = ResolvedOptions::resolve(&config, &SparkPostData::default());
        assert_eq!(resolved, ResolvedOptions::default());
    }

    #[test]
    fn message_only_keys_come_from_message() {
        let config = SparkPostConfig::new("key");
        let data = SparkPostData::default()
            .with_template_id("tpl")
            .with_description("weekly digest")
            .with_recipient_list_id("list-1")
            .with_ab_test_id("ab-9")
            .with_metadata(serde_json::json!({"team": "growth"}));
        let resolved = ResolvedOptions::resolve(&config, &data);
        assert_eq!(resolved.template_id.as_deref(), Some("tpl"));
        assert_eq!(resolved.description.as_deref(), Some("weekly digest"));
        assert_eq!(resolved.recipient_list_id.as_deref(), Some("list-1"));
        assert_eq!(resolved.ab_test_id.as_deref(), Some("ab-9"));
        assert_eq!(
            resolved.metadata,
            Some(serde_json::json!({"team": "growth"}))
        );
    }

    #[test]
    fn string_override_wins_over_config() {
        let config = SparkPostConfig::new("key")
            .with_campaign_id("default")
            .with_return_path("default@example.com");
        let data = SparkPostData::default()
            .with_campaign_id("override")
            .with_return_path("override@example.com");
        let resolved = ResolvedOptions::resolve(&config, &data);
        assert_eq!(resolved.campaign_id.as_deref(), Some("override"));
        assert_eq!(resolved.return_path.as_deref(), Some("override@example.com"));
    }

    #[test]
    fn substitution_builder_accumulates_by_address() {
        let data = SparkPostData::default()
            .with_substitution("a@example.com", serde_json::json!({"name": "A"}))
            .with_substitution("b@example.com", serde_json::json!({"name": "B"}));
        let map = data.substitution_data.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a@example.com"], serde_json::json!({"name": "A"}));
    }

    #[test]
    fn unknown_keys_in_json_bag_are_ignored() {
        let data: SparkPostData = serde_json::from_str(
            r#"{"campaign_id":"c1","some_future_option":true,"another":"x"}"#,
        )
        .unwrap();
        assert_eq!(data.campaign_id.as_deref(), Some("c1"));
        assert_eq!(
            data,
            SparkPostData::default().with_campaign_id("c1")
        );
    }

    #[test]
    fn unset_bools_serialize_to_no_keys() {
        let json = serde_json::to_value(SparkPostData::default().with_sandbox(true)).unwrap();
        assert_eq!(json, serde_json::json!({"sandbox": true}));
    }
}
