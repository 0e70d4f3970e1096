use async_trait::async_trait;
use reqwest;
use serde::Serialize;
use sigmax_core::common::ChatId;
use sigmax_core::notify::error::NotifyError;
use sigmax_core::notify::port::Notifier;

/// # Summary
/// A notifier implementation that sends messages via Telegram Bot API.
///
/// # Invariants
/// * `bot_token` must be valid.
/// * The target chat must have started a conversation with the bot.
pub struct TelegramNotifier {
    /// The Bot API token.
    bot_token: String,
    /// The HTTP client used for requests.
    client: reqwest::Client,
}

/// # Summary
/// Payload structure for Telegram `sendMessage` API.
#[derive(Serialize)]
struct TelegramMessage {
    chat_id: ChatId,
    text: String,
    parse_mode: String,
}

impl TelegramNotifier {
    /// # Summary
    /// Creates a new `TelegramNotifier`.
    ///
    /// # Logic
    /// Initializes the struct with the provided token and a default HTTP client.
    ///
    /// # Arguments
    /// * `bot_token` - The Telegram Bot API token.
    ///
    /// # Returns
    /// * A new instance of `TelegramNotifier`.
    pub fn new(bot_token: String) -> Self {
        Self {
            bot_token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// # Summary
    /// Sends a text message to the given Telegram chat.
    ///
    /// # Logic
    /// 1. Constructs the Telegram API URL.
    /// 2. Sends a POST request with the chat ID and message text.
    /// 3. Checks the response status and returns success or failure.
    ///
    /// # Arguments
    /// * `chat_id` - The target chat.
    /// * `text` - The message body, Markdown formatted.
    ///
    /// # Returns
    /// * `Ok(())` if the message was sent successfully.
    /// * `Err(NotifyError)` if a network error occurs or the API returns a non-success status.
    async fn notify(&self, chat_id: ChatId, text: &str) -> Result<(), NotifyError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let payload = TelegramMessage {
            chat_id,
            text: text.to_string(),
            parse_mode: "Markdown".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::Platform(format!(
                "Telegram API error: {}",
                error_text
            )));
        }

        Ok(())
    }
}
