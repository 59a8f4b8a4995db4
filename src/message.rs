use crate::options::SparkPostData;

/// A single email address with an optional display name.
///
/// Serialization to the wire format happens in the payload builder: an
/// address without a display name becomes a bare string, one with a name
/// becomes an email+name object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// The bare email address.
    pub email: String,

    /// Optional display name shown in visible mail headers.
    pub name: Option<String>,
}

impl Address {
    /// Create an address without a display name.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Render the address as it appears in a visible mail header,
    /// `Name <email>` or the bare email.
    pub(crate) fn header_string(&self) -> String {
        match &self.name {
            Some(name) => format!("{name} <{}>", self.email),
            None => self.email.clone(),
        }
    }
}

impl From<&str> for Address {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl From<String> for Address {
    fn from(email: String) -> Self {
        Self::new(email)
    }
}

/// A file attached to a message.
///
/// For regular attachments `name` is the filename shown to the recipient.
/// For inline images `name` is the Content-ID the HTML body references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Filename, or Content-ID for inline images.
    pub name: String,

    /// MIME type of the content (e.g. `application/pdf`).
    pub mime_type: String,

    /// Raw content bytes. Base64 encoding happens in the payload builder.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Create an attachment from raw bytes.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A composed email message, immutable once handed to the client.
///
/// Carries everything the payload builder needs: recipients, bodies,
/// ordered custom headers (names preserved verbatim), ordered attachments,
/// and the per-message SparkPost options in [`data`](Self::data) - a
/// first-class field rather than metadata bolted on at runtime.
///
/// # Examples
///
/// ```
/// use sparkpost_delivery::{Address, Message, SparkPostData};
///
/// let message = Message::new(Address::new("app@example.com"), "Welcome")
///     .to(Address::new("user@example.com").with_name("User"))
///     .cc("manager@example.com")
///     .text("Hello!")
///     .html("<p>Hello!</p>")
///     .header("X-Priority", "1")
///     .data(SparkPostData::default().with_campaign_id("onboarding"));
/// assert_eq!(message.to.len(), 1);
/// assert_eq!(message.cc.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Sender address.
    pub from: Address,

    /// Primary recipients.
    pub to: Vec<Address>,

    /// Carbon-copy recipients.
    pub cc: Vec<Address>,

    /// Blind-carbon-copy recipients. Delivered to, never shown in headers.
    pub bcc: Vec<Address>,

    /// Subject line.
    pub subject: String,

    /// Optional reply-to address.
    pub reply_to: Option<String>,

    /// Plain-text body part.
    pub text_body: Option<String>,

    /// HTML body part.
    pub html_body: Option<String>,

    /// Ordered custom headers, names case-insensitive but preserved
    /// verbatim.
    pub headers: Vec<(String, String)>,

    /// Ordered file attachments.
    pub attachments: Vec<Attachment>,

    /// Ordered inline images (attachment `name` is the Content-ID).
    pub inline_images: Vec<Attachment>,

    /// Per-message SparkPost options, merged over the configured defaults
    /// at delivery time.
    pub data: SparkPostData,
}

impl Message {
    /// Create a message with a sender and subject and no recipients yet.
    pub fn new(from: impl Into<Address>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            reply_to: None,
            text_body: None,
            html_body: None,
            headers: Vec::new(),
            attachments: Vec::new(),
            inline_images: Vec::new(),
            data: SparkPostData::default(),
        }
    }

    /// Add a primary recipient.
    #[must_use]
    pub fn to(mut self, address: impl Into<Address>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Add a carbon-copy recipient.
    #[must_use]
    pub fn cc(mut self, address: impl Into<Address>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a blind-carbon-copy recipient.
    #[must_use]
    pub fn bcc(mut self, address: impl Into<Address>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the reply-to address.
    #[must_use]
    pub fn reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Set the plain-text body part.
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    /// Set the HTML body part.
    #[must_use]
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Append a custom header. Duplicate names are resolved
    /// last-write-wins by the payload builder.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a file attachment.
    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Append an inline image.
    #[must_use]
    pub fn inline_image(mut self, image: Attachment) -> Self {
        self.inline_images.push(image);
        self
    }

    /// Attach the per-message SparkPost options.
    #[must_use]
    pub fn data(mut self, data: SparkPostData) -> Self {
        self.data = data;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_from_str_has_no_name() {
        let address: Address = "user@example.com".into();
        assert_eq!(address.email, "user@example.com");
        assert!(address.name.is_none());
    }

    #[test]
    fn address_header_string_with_name() {
        let address = Address::new("user@example.com").with_name("Jo User");
        assert_eq!(address.header_string(), "Jo User <user@example.com>");
    }

    #[test]
    fn address_header_string_bare() {
        let address = Address::new("user@example.com");
        assert_eq!(address.header_string(), "user@example.com");
    }

    #[test]
    fn message_builder_collects_recipients_in_order() {
        let message = Message::new("app@example.com", "Hi")
            .to("a@example.com")
            .to("b@example.com")
            .cc("c@example.com")
            .bcc("d@example.com");
        assert_eq!(message.to[0].email, "a@example.com");
        assert_eq!(message.to[1].email, "b@example.com");
        assert_eq!(message.cc[0].email, "c@example.com");
        assert_eq!(message.bcc[0].email, "d@example.com");
    }

    #[test]
    fn message_headers_preserve_order_and_spelling() {
        let message = Message::new("app@example.com", "Hi")
            .header("X-First", "1")
            .header("x-second", "2");
        assert_eq!(
            message.headers,
            vec![
                ("X-First".to_owned(), "1".to_owned()),
                ("x-second".to_owned(), "2".to_owned())
            ]
        );
    }

    #[test]
    fn message_attachments_keep_raw_bytes() {
        let message = Message::new("app@example.com", "Hi")
            .attach(Attachment::new("a.pdf", "application/pdf", vec![1, 2, 3]))
            .inline_image(Attachment::new("logo", "image/png", vec![4, 5]));
        assert_eq!(message.attachments[0].data, vec![1, 2, 3]);
        assert_eq!(message.inline_images[0].name, "logo");
    }

    #[test]
    fn message_starts_with_empty_data() {
        let message = Message::new("app@example.com", "Hi");
        assert_eq!(message.data, SparkPostData::default());
    }
}
