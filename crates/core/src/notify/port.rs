use crate::common::ChatId;
use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// 发送通知到外部会话的接口定义。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 发送失败必须以 `NotifyError` 表达，由调用方决定补偿策略。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 向指定会话发送一条文本通知。
    ///
    /// # Logic
    /// 1. 根据目标平台要求格式化消息。
    /// 2. 通过底层传输协议发送消息。
    /// 3. 返回成功或失败状态。
    ///
    /// # Arguments
    /// * `chat_id` - 目标会话标识。
    /// * `text` - 通知的具体内容。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`。
    /// * 失败返回 `Err(NotifyError)`。
    async fn notify(&self, chat_id: ChatId, text: &str) -> Result<(), NotifyError>;
}
