use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use crate::config::SparkPostConfig;
use crate::error::SparkPostError;
use crate::message::Message;
use crate::options::ResolvedOptions;
use crate::payload;
use crate::types::{ApiResponse, DeliveryResult};

/// Client for the SparkPost Transmissions API.
///
/// Stateless apart from configuration and the underlying HTTP client;
/// safe to share across tasks and call concurrently. Each
/// [`deliver`](Self::deliver) call performs exactly one POST - no
/// retries, no queuing.
///
/// # Examples
///
/// ```no_run
/// use sparkpost_delivery::{Address, Message, SparkPostClient, SparkPostConfig};
///
/// # async fn send() -> Result<(), sparkpost_delivery::SparkPostError> {
/// let config = SparkPostConfig::new("your-api-key").with_sandbox(true);
/// let client = SparkPostClient::new(config)?;
///
/// let message = Message::new(Address::new("app@example.com"), "Welcome")
///     .to("user@example.com")
///     .text("Hello!");
/// let result = client.deliver(&message).await?;
/// println!("transmission {} accepted {}", result.id, result.accepted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SparkPostClient {
    config: SparkPostConfig,
    client: Client,
}

impl SparkPostClient {
    /// Create a client from the given configuration.
    ///
    /// Uses a default `reqwest::Client` with a 30 second timeout. Fails
    /// with [`SparkPostError::Configuration`] when the API key is empty.
    pub fn new(config: SparkPostConfig) -> Result<Self, SparkPostError> {
        if config.api_key.is_empty() {
            return Err(SparkPostError::Configuration("API key is required".into()));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Ok(Self { config, client })
    }

    /// Create a client with a custom HTTP client.
    ///
    /// Useful for testing or for sharing a connection pool.
    pub fn with_client(config: SparkPostConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn api_url(&self) -> String {
        format!("{}/api/v1/transmissions", self.config.api_host)
    }

    /// Deliver a composed message through the transmissions endpoint.
    ///
    /// Resolves the message options against the configured defaults,
    /// builds the wire payload, performs one HTTP POST, and interprets
    /// the JSON response. A response with rejected recipients is still a
    /// success - inspect [`DeliveryResult::rejected`].
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    pub async fn deliver(&self, message: &Message) -> Result<DeliveryResult, SparkPostError> {
        let options = ResolvedOptions::resolve(&self.config, &message.data);
        let request = payload::build(message, &options);
        let url = self.api_url();

        debug!(
            recipients = message.to.len() + message.cc.len() + message.bcc.len(),
            "posting transmission"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "transmission POST failed");
                e
            })?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, "interpreting transmission response");

        let result = interpret_response(&body)?;
        info!(
            id = %result.id,
            accepted = result.accepted,
            rejected = result.rejected,
            "transmission accepted"
        );
        Ok(result)
    }
}

/// Classify a raw response body.
///
/// A body with a `results` object is a success (even with rejected
/// recipients); a body with a non-empty `errors` array is an API error
/// regardless of HTTP status; anything else is unparseable and the raw
/// body is preserved for diagnosis. Free function so the taxonomy tests
/// need no transport.
fn interpret_response(body: &str) -> Result<DeliveryResult, SparkPostError> {
    let Ok(parsed) = serde_json::from_str::<ApiResponse>(body) else {
        return Err(SparkPostError::UnparseableResponse {
            body: body.to_owned(),
        });
    };

    if let Some(results) = parsed.results {
        if results.total_rejected_recipients > 0 {
            warn!(
                rejected = results.total_rejected_recipients,
                "transmission accepted with rejected recipients"
            );
        }
        return Ok(DeliveryResult {
            accepted: results.total_accepted_recipients,
            rejected: results.total_rejected_recipients,
            id: results.id,
        });
    }

    match parsed.errors {
        Some(entries) if !entries.is_empty() => Err(SparkPostError::from_api_errors(entries)),
        _ => Err(SparkPostError::UnparseableResponse {
            body: body.to_owned(),
        }),
    }
}
