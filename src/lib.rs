//! SparkPost delivery client.
//!
//! Sends composed mail through the SparkPost
//! [Transmissions API](https://developers.sparkpost.com/api/transmissions/)
//! instead of SMTP. The crate splits into a pure payload builder
//! ([`payload::build`]) that turns a [`Message`] plus resolved options
//! into the exact wire JSON the endpoint accepts, and a thin transport
//! ([`SparkPostClient`]) that performs one HTTP POST and interprets the
//! JSON response into a [`DeliveryResult`] or a typed [`SparkPostError`].
//!
//! Per-message provider options live in [`SparkPostData`], a first-class
//! field on the message; process-wide defaults come from
//! [`SparkPostConfig`] and are merged under the message options per key.
//!
//! # Quick start
//!
//! ```no_run
//! use sparkpost_delivery::{Address, Message, SparkPostClient, SparkPostConfig, SparkPostData};
//!
//! # async fn send() -> Result<(), sparkpost_delivery::SparkPostError> {
//! let config = SparkPostConfig::new("your-api-key").with_track_opens(true);
//! let client = SparkPostClient::new(config)?;
//!
//! let message = Message::new(Address::new("app@example.com").with_name("App"), "Welcome")
//!     .to("user@example.com")
//!     .html("<h1>Welcome!</h1>")
//!     .text("Welcome!")
//!     .data(SparkPostData::default().with_campaign_id("onboarding"));
//!
//! let result = client.deliver(&message).await?;
//! assert_eq!(result.rejected, 0);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod options;
pub mod payload;
pub mod types;

pub use client::SparkPostClient;
pub use config::SparkPostConfig;
pub use error::SparkPostError;
pub use message::{Address, Attachment, Message};
pub use options::{ResolvedOptions, SparkPostData};
pub use types::{
    ApiErrorEntry, DeliveryResult, TransmissionRequest, WireHeaders,
};
