use crate::common::{ChatId, TimeFrame};
use crate::profile::entity::UserProfile;
use crate::profile::error::ProfileError;
use crate::signal::entity::Signal;
use async_trait::async_trait;

/// # Summary
/// 用户档案存取契约，命令层与监控循环共享的唯一可变状态入口。
///
/// # Invariants
/// - 单用户的读改写必须是原子的（add/remove/set_timeframe/record_signal
///   不允许与同一用户的其他变更交错）。
/// - 跨用户操作互不协调，无全局锁。
/// - `snapshot` 返回的副本与后续变更完全隔离。
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// # Summary
    /// 获取用户档案，首次交互时以默认配置惰性创建。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    ///
    /// # Returns
    /// 档案的独立副本。
    async fn get_or_create(&self, chat_id: ChatId) -> UserProfile;

    /// # Summary
    /// 向监控列表追加一个交易对。
    ///
    /// # Logic
    /// 1. 惰性创建档案。
    /// 2. 已存在则拒绝，否则追加到列表末尾。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `symbol`: 交易对代码（调用方负责规范化大小写）。
    ///
    /// # Returns
    /// 成功返回监控列表的新长度，重复返回 ProfileError::AlreadyWatched。
    async fn add_symbol(&self, chat_id: ChatId, symbol: &str) -> Result<usize, ProfileError>;

    /// # Summary
    /// 从监控列表移除一个交易对。
    ///
    /// # Logic
    /// 1. 不存在则拒绝。
    /// 2. 移除交易对并同步清理其去重状态。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `symbol`: 交易对代码。
    ///
    /// # Returns
    /// 成功返回监控列表的剩余长度，缺失返回 ProfileError::NotWatched。
    async fn remove_symbol(&self, chat_id: ChatId, symbol: &str) -> Result<usize, ProfileError>;

    /// # Summary
    /// 切换用户的 K 线周期。
    ///
    /// # Logic
    /// 1. 写入新周期。
    /// 2. 清空该用户全部去重状态，强制所有交易对重新武装。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `timeframe`: 新周期。
    ///
    /// # Returns
    /// 返回切换前的旧周期。
    async fn set_timeframe(&self, chat_id: ChatId, timeframe: TimeFrame) -> TimeFrame;

    /// # Summary
    /// 记录某交易对最近一次已通知的信号。
    ///
    /// # Logic
    /// 1. 若用户或交易对在记录时已被移除，静默忽略。
    /// 2. 否则覆盖写入去重状态。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `symbol`: 交易对代码。
    /// * `signal`: 已通知的信号。
    async fn record_signal(&self, chat_id: ChatId, symbol: &str, signal: Signal);

    /// # Summary
    /// 获取全部用户档案的稳定副本，供监控循环迭代。
    ///
    /// # Returns
    /// 档案副本列表，与存储内后续变更互不影响。
    async fn snapshot(&self) -> Vec<UserProfile>;
}
