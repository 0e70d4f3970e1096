use crate::command::Command;
use sigmax_core::common::{ChatId, TimeFrame};
use sigmax_core::notify::port::Notifier;
use sigmax_core::profile::error::ProfileError;
use sigmax_core::profile::port::ProfileStore;
use std::sync::Arc;
use tracing::{error, info};

/// # Summary
/// 指令路由器，将解析后的指令落到档案存储并通过推送端口回复。
///
/// # Invariants
/// - 编译期仅依赖 `sigmax-core` 中的 Trait 定义，具体实现通过构造函数注入。
/// - 每条入站消息恰好产生一条回复。
pub struct CommandRouter {
    // 用户档案接口
    store: Arc<dyn ProfileStore>,
    // 消息推送接口
    notifier: Arc<dyn Notifier>,
}

impl CommandRouter {
    /// # Summary
    /// 创建 CommandRouter 实例。
    ///
    /// # Arguments
    /// * `store` - 用户档案接口的具体实现。
    /// * `notifier` - 消息推送接口的具体实现。
    ///
    /// # Returns
    /// * `Arc<Self>` - 可共享的路由器实例。
    pub fn new(store: Arc<dyn ProfileStore>, notifier: Arc<dyn Notifier>) -> Arc<Self> {
        Arc::new(Self { store, notifier })
    }

    /// # Summary
    /// 处理一条入站消息并回复。
    ///
    /// # Logic
    /// 1. 解析消息文本为指令。
    /// 2. 执行指令得到回复文本。
    /// 3. 通过推送端口回复，失败只记录日志。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `text`: 原始消息文本。
    pub async fn handle(&self, chat_id: ChatId, text: &str) {
        let command = Command::parse(text);
        info!(chat_id, command = ?command, "Handling command");
        let reply = self.execute(chat_id, command).await;
        if let Err(e) = self.notifier.notify(chat_id, &reply).await {
            error!(chat_id, error = %e, "Command reply failed");
        }
    }

    /// # Summary
    /// 执行指令并渲染回复文本。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `command`: 解析后的指令。
    ///
    /// # Returns
    /// 回复文本。
    pub async fn execute(&self, chat_id: ChatId, command: Command) -> String {
        match command {
            Command::Start => {
                let profile = self.store.get_or_create(chat_id).await;
                format!(
                    "Hi! I am SigmaxBot.\n\n\
                     I track crypto trading signals using technical analysis \
                     (EMA, RSI, MACD).\n\n\
                     Available commands:\n\
                     /add SYMBOL - add a pair to the watch list\n\
                     /remove SYMBOL - remove a pair from the watch list\n\
                     /coins - show the watch list\n\
                     /timeframe INTERVAL - set the timeframe ({})\n\
                     /start - show this message\n\n\
                     Current settings:\n\
                     Timeframe: {}\n\
                     Watched pairs: {}",
                    allowed_timeframes(),
                    profile.timeframe,
                    profile.symbols.len()
                )
            }
            Command::Coins => {
                let profile = self.store.get_or_create(chat_id).await;
                if profile.symbols.is_empty() {
                    "You are not watching any pairs.\n\nUse /add SYMBOL to add one.".to_string()
                } else {
                    let mut reply = format!("Watched pairs ({}):\n\n", profile.symbols.len());
                    for (i, symbol) in profile.symbols.iter().enumerate() {
                        reply.push_str(&format!("{}. {}\n", i + 1, symbol));
                    }
                    reply.push_str(&format!("\nTimeframe: {}", profile.timeframe));
                    reply
                }
            }
            Command::Add(symbol) => match self.store.add_symbol(chat_id, &symbol).await {
                Ok(total) => format!(
                    "{} added to the watch list.\n\nTotal pairs: {}",
                    symbol, total
                ),
                Err(ProfileError::AlreadyWatched(_)) => {
                    format!("{} is already on the watch list.", symbol)
                }
                Err(e) => e.to_string(),
            },
            Command::Remove(symbol) => match self.store.remove_symbol(chat_id, &symbol).await {
                Ok(remaining) => format!(
                    "{} removed from the watch list.\n\nRemaining pairs: {}",
                    symbol, remaining
                ),
                Err(ProfileError::NotWatched(_)) => {
                    format!("{} is not on the watch list.", symbol)
                }
                Err(e) => e.to_string(),
            },
            Command::SetTimeframe(raw) => match raw.parse::<TimeFrame>() {
                Ok(timeframe) => {
                    let previous = self.store.set_timeframe(chat_id, timeframe).await;
                    format!(
                        "Timeframe changed from {} to {}.\n\n\
                         Signal history was reset for the new timeframe.",
                        previous, timeframe
                    )
                }
                Err(_) => format!(
                    "Unsupported timeframe: {}\n\nAllowed: {}",
                    raw,
                    allowed_timeframes()
                ),
            },
            Command::Malformed { usage } => format!("Invalid command usage.\n\n{}", usage),
            Command::Unknown => {
                "Unknown command. Use /start to see available commands.".to_string()
            }
        }
    }
}

fn allowed_timeframes() -> String {
    TimeFrame::allowed()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
