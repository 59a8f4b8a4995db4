use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ─── Request side ────────────────────────────────────────────────────

/// Request body for the SparkPost `POST /api/v1/transmissions` endpoint.
///
/// Built exclusively by [`payload::build`](crate::payload::build). Optional
/// fields absent from the resolved options are absent from the JSON - no
/// null-filling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionRequest {
    /// Tracking/sandbox/routing flags. Omitted entirely when no flag is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<TransmissionOptions>,

    /// Inline recipient array, or a stored recipient list reference.
    pub recipients: RecipientsField,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Opaque transmission metadata, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,

    pub content: Content,
}

/// The transmission `options` block. A flag left unset means "use the
/// provider-side default", never a literal false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransmissionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_tracking: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_tracking: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactional: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_css: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_pool: Option<String>,
}

impl TransmissionOptions {
    /// True when no flag is set and the block should be omitted.
    pub fn is_empty(&self) -> bool {
        self.open_tracking.is_none()
            && self.click_tracking.is_none()
            && self.transactional.is_none()
            && self.sandbox.is_none()
            && self.inline_css.is_none()
            && self.ip_pool.is_none()
    }
}

/// The transmission `recipients` field: an inline array for message
/// recipients, or a stored-list reference when `recipient_list_id` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecipientsField {
    /// Stored recipient list reference, `{"list_id": "..."}`.
    StoredList { list_id: String },

    /// Inline recipient array.
    Inline(Vec<Recipient>),
}

/// One entry of the inline recipient array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipient {
    pub address: AddressSpec,

    /// Per-recipient template substitution data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution_data: Option<serde_json::Value>,
}

/// A recipient or sender address on the wire. The API accepts both a bare
/// address string and an email+name object; cc/bcc entries additionally
/// carry `header_to` so the rendered mail shows the right visible headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AddressSpec {
    /// Bare address string, used when there is no display name.
    Bare(String),

    /// Email+name object, also used whenever `header_to` is needed.
    Full {
        email: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        header_to: Option<String>,
    },
}

/// The transmission `content` block: either a stored template reference or
/// inline content, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<AddressSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(skip_serializing_if = "WireHeaders::is_empty")]
    pub headers: WireHeaders,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentSpec>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inline_images: Vec<AttachmentSpec>,

    /// Stored template reference. Mutually exclusive with every inline
    /// content field above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ab_test_id: Option<String>,
}

/// One attachment entry, `{name, type, data}` with base64 data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub mime_type: String,

    /// Base64-encoded content.
    pub data: String,
}

/// Insertion-ordered header map with case-insensitive last-write-wins
/// inserts.
///
/// `serde_json` maps do not preserve insertion order, and the header rules
/// need both verbatim name spelling and a stable order, so this is a thin
/// `Vec` with a manual [`Serialize`] impl. On a case-insensitive collision
/// the entry keeps its position and adopts the later write's spelling and
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireHeaders {
    entries: Vec<(String, String)>,
}

impl WireHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, overwriting any existing entry whose name matches
    /// case-insensitively.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            *entry = (name, value);
        } else {
            self.entries.push((name, value));
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Serialize for WireHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ─── Response side ───────────────────────────────────────────────────

/// Envelope of a transmissions API response: a `results` object on
/// success, an `errors` array on failure. Anything else is unparseable.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub results: Option<TransmissionResults>,
    pub errors: Option<Vec<ApiErrorEntry>>,
}

/// The `results` object of a successful transmission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransmissionResults {
    #[serde(default)]
    pub total_accepted_recipients: u64,

    #[serde(default)]
    pub total_rejected_recipients: u64,

    /// Provider-assigned transmission id.
    #[serde(default)]
    pub id: String,
}

/// One entry of a transmissions API `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Opaque provider error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Normalized outcome of a successful delivery call.
///
/// Partial rejection is not an error: `rejected` may be non-zero on an
/// otherwise-successful send, and treating that as a failure is the
/// caller's policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    /// Recipients the provider accepted.
    pub accepted: u64,

    /// Recipients the provider rejected.
    pub rejected: u64,

    /// Provider-assigned transmission id.
    pub id: String,
}
