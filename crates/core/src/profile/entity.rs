use crate::common::{ChatId, TimeFrame};
use crate::signal::entity::Signal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// # Summary
/// 用户监控档案聚合根，维护单个会话的监控列表与去重状态。
///
/// # Invariants
/// - `symbols` 保持插入顺序且无重复项。
/// - `last_signals` 的 Key 必须是 `symbols` 的子集（移除交易对时同步清理）。
/// - 切换 `timeframe` 必须清空全部 `last_signals`，因为信号语义依赖周期。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    // 会话标识（Telegram Chat ID）
    pub chat_id: ChatId,
    // 监控中的交易对，按加入顺序排列
    pub symbols: Vec<String>,
    // 当前使用的 K 线周期
    pub timeframe: TimeFrame,
    // 每个交易对最近一次已通知的信号
    pub last_signals: HashMap<String, Signal>,
}

impl UserProfile {
    /// # Summary
    /// 以默认监控配置构建新的用户档案。
    ///
    /// # Logic
    /// 1. 复制默认交易对列表与默认周期。
    /// 2. 去重状态初始化为空（所有交易对处于未武装状态）。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `symbols`: 默认交易对列表。
    /// * `timeframe`: 默认周期。
    ///
    /// # Returns
    /// 初始化后的 UserProfile。
    pub fn new(chat_id: ChatId, symbols: Vec<String>, timeframe: TimeFrame) -> Self {
        Self {
            chat_id,
            symbols,
            timeframe,
            last_signals: HashMap::new(),
        }
    }
}
