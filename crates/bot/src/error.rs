use thiserror::Error;

/// # Summary
/// 命令轮询链路的错误枚举。
#[derive(Error, Debug)]
pub enum BotError {
    // 网络或超时错误
    #[error("Network error: {0}")]
    Network(String),
    // Telegram 平台侧拒绝
    #[error("Telegram API error: {0}")]
    Platform(String),
}
