//! The payload builder: composed message + resolved options in, wire
//! request body out. Pure - no I/O, no validation beyond what the wire
//! shape itself demands (the provider rejects malformed transmissions).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::message::{Address, Attachment, Message};
use crate::options::ResolvedOptions;
use crate::types::{
    AddressSpec, AttachmentSpec, Content, Recipient, RecipientsField, TransmissionOptions,
    TransmissionRequest, WireHeaders,
};

/// Build the transmission request body for a composed message.
///
/// Deterministic: the same message and options always produce the same
/// payload. Options absent from `options` are absent from the output -
/// the provider-side default applies, never a literal false or empty
/// value.
pub fn build(message: &Message, options: &ResolvedOptions) -> TransmissionRequest {
    TransmissionRequest {
        options: build_options(options),
        recipients: build_recipients(message, options),
        campaign_id: options.campaign_id.clone(),
        description: options.description.clone(),
        metadata: options.metadata.clone(),
        return_path: options.return_path.clone(),
        subaccount: options.subaccount.clone(),
        content: build_content(message, options),
    }
}

fn build_options(options: &ResolvedOptions) -> Option<TransmissionOptions> {
    let block = TransmissionOptions {
        open_tracking: options.open_tracking,
        click_tracking: options.click_tracking,
        transactional: options.transactional,
        sandbox: options.sandbox,
        inline_css: options.inline_css,
        ip_pool: options.ip_pool.clone(),
    };
    if block.is_empty() { None } else { Some(block) }
}

/// Flatten to/cc/bcc into the wire recipient array, or reference a stored
/// list when one is configured.
///
/// The provider's recipient model does not distinguish cc/bcc natively:
/// cc/bcc entries carry `header_to` pointing at the visible `To` addresses
/// so the rendered mail shows the right headers, and cc addresses get a
/// synthesized `CC` header in [`build_content`]. Bcc never appears in any
/// header.
fn build_recipients(message: &Message, options: &ResolvedOptions) -> RecipientsField {
    if let Some(list_id) = &options.recipient_list_id {
        return RecipientsField::StoredList {
            list_id: list_id.clone(),
        };
    }

    let header_to = message
        .to
        .iter()
        .map(|address| address.email.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let mut recipients =
        Vec::with_capacity(message.to.len() + message.cc.len() + message.bcc.len());
    for address in &message.to {
        recipients.push(Recipient {
            address: visible_address(address),
            substitution_data: substitution_for(options, address),
        });
    }
    for address in message.cc.iter().chain(&message.bcc) {
        recipients.push(Recipient {
            address: AddressSpec::Full {
                email: address.email.clone(),
                name: address.name.clone(),
                header_to: Some(header_to.clone()),
            },
            substitution_data: substitution_for(options, address),
        });
    }
    RecipientsField::Inline(recipients)
}

/// A visible address: bare string without a display name, email+name
/// object with one.
fn visible_address(address: &Address) -> AddressSpec {
    match &address.name {
        Some(name) => AddressSpec::Full {
            email: address.email.clone(),
            name: Some(name.clone()),
            header_to: None,
        },
        None => AddressSpec::Bare(address.email.clone()),
    }
}

fn substitution_for(
    options: &ResolvedOptions,
    address: &Address,
) -> Option<serde_json::Value> {
    options
        .substitution_data
        .as_ref()
        .and_then(|map| map.get(&address.email))
        .cloned()
}

/// Select template or inline content, then headers and attachments.
///
/// A template reference excludes every inline field; otherwise from and
/// subject are always emitted and html/text follow whatever the message
/// carries (both set = multipart). A message with neither body still gets
/// a from/subject-only content block - the provider rejects it, this
/// layer does not pre-validate.
fn build_content(message: &Message, options: &ResolvedOptions) -> Content {
    if let Some(template_id) = &options.template_id {
        return Content {
            template_id: Some(template_id.clone()),
            ..Content::default()
        };
    }

    let mut headers = WireHeaders::new();
    for (name, value) in &message.headers {
        headers.insert(name.clone(), value.clone());
    }
    if !message.cc.is_empty() {
        let cc = message
            .cc
            .iter()
            .map(Address::header_string)
            .collect::<Vec<_>>()
            .join(", ");
        headers.insert("CC", cc);
    }

    let (text, html) = match (&message.text_body, &message.html_body) {
        // A text-only message is promoted to HTML content when the
        // html_content_only option is set.
        (Some(text), None) if options.html_content_only == Some(true) => {
            (None, Some(text.clone()))
        }
        (text, html) => (text.clone(), html.clone()),
    };

    Content {
        from: Some(visible_address(&message.from)),
        subject: Some(message.subject.clone()),
        reply_to: message.reply_to.clone(),
        text,
        html,
        headers,
        attachments: message.attachments.iter().map(attachment_spec).collect(),
        inline_images: message.inline_images.iter().map(attachment_spec).collect(),
        template_id: None,
        ab_test_id: options.ab_test_id.clone(),
    }
}

fn attachment_spec(attachment: &Attachment) -> AttachmentSpec {
    AttachmentSpec {
        name: attachment.name.clone(),
        mime_type: attachment.mime_type.clone(),
        data: BASE64.encode(&attachment.data),
    }
}
