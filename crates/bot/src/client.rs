use crate::error::BotError;
use crate::router::CommandRouter;
use serde::Deserialize;
use sigmax_core::common::ChatId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

// 长轮询挂起时长（秒），HTTP 客户端超时需留出余量
const POLL_TIMEOUT_SECS: u64 = 30;
const RETRY_PAUSE_SECS: u64 = 5;

/// # Summary
/// Telegram 入站消息客户端，基于 `getUpdates` 长轮询。
///
/// # Invariants
/// - `offset` 单调递增，已确认的更新不会二次投递。
/// - 仅订阅 message 类型的更新。
pub struct TelegramClient {
    /// The Bot API token.
    bot_token: String,
    /// The HTTP client used for requests.
    client: reqwest::Client,
    // 下一次轮询的起始更新号
    offset: i64,
}

/// # Summary
/// 经过裁剪的入站文本消息。
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub text: String,
}

/// # Summary
/// Telegram `getUpdates` 响应顶层结构。
#[derive(Deserialize, Debug)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Deserialize, Debug)]
struct Message {
    chat: Chat,
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Chat {
    id: ChatId,
}

impl TelegramClient {
    /// # Summary
    /// 创建一个新的 TelegramClient 实例。
    ///
    /// # Logic
    /// 1. HTTP 超时设为长轮询挂起时长加 10 秒余量。
    /// 2. 更新号从 0 开始，首轮拉取服务端积压的全部更新。
    ///
    /// # Arguments
    /// * `bot_token` - The Telegram Bot API token.
    ///
    /// # Returns
    /// 返回初始化后的 TelegramClient。
    pub fn new(bot_token: String) -> Self {
        Self {
            bot_token,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
                .build()
                .expect("Failed to build HTTP client"),
            offset: 0,
        }
    }

    /// # Summary
    /// 执行一次长轮询并确认已消费的更新。
    ///
    /// # Logic
    /// 1. 携带 offset 与 30 秒挂起时长请求 `getUpdates`。
    /// 2. 业务失败（ok=false）视为平台错误。
    /// 3. 推进 offset 到最大更新号加一。
    /// 4. 过滤出带文本的消息。
    ///
    /// # Returns
    /// 成功返回本轮新消息列表，失败返回 BotError。
    pub async fn poll(&mut self) -> Result<Vec<IncomingMessage>, BotError> {
        let url = format!("https://api.telegram.org/bot{}/getUpdates", self.bot_token);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("timeout", POLL_TIMEOUT_SECS.to_string()),
                ("offset", self.offset.to_string()),
                ("allowed_updates", r#"["message"]"#.to_string()),
            ])
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Platform(format!("HTTP {}", response.status())));
        }

        let updates: UpdatesResponse = response
            .json()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !updates.ok {
            return Err(BotError::Platform(
                updates.description.unwrap_or_default(),
            ));
        }

        let mut messages = Vec::new();
        for update in updates.result {
            self.offset = self.offset.max(update.update_id + 1);
            if let Some(message) = update.message {
                if let Some(text) = message.text {
                    messages.push(IncomingMessage {
                        chat_id: message.chat.id,
                        text,
                    });
                }
            }
        }
        Ok(messages)
    }

    /// # Summary
    /// 以无限轮询的方式持续消费入站消息。
    ///
    /// # Logic
    /// 1. 每轮 poll 得到的消息逐条交给路由器处理。
    /// 2. 轮询失败只记录日志，短暂停顿后重试。
    /// 3. 循环自身永不退出，停止由外部中止协程实现。
    ///
    /// # Arguments
    /// * `router` - 指令路由器。
    pub async fn run(mut self, router: Arc<CommandRouter>) {
        info!("Command poll loop started");
        loop {
            match self.poll().await {
                Ok(messages) => {
                    for message in messages {
                        router.handle(message.chat_id, &message.text).await;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Update poll failed, retrying");
                    tokio::time::sleep(Duration::from_secs(RETRY_PAUSE_SECS)).await;
                }
            }
        }
    }
}
