use async_trait::async_trait;
use dashmap::DashMap;
use sigmax_core::common::{ChatId, TimeFrame};
use sigmax_core::config::ProfileDefaults;
use sigmax_core::profile::entity::UserProfile;
use sigmax_core::profile::error::ProfileError;
use sigmax_core::profile::port::ProfileStore;
use sigmax_core::signal::entity::Signal;

/// # Summary
/// 基于 DashMap 的内存用户档案存储实现。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 单用户的读改写持有对应分片锁，同一用户的变更不会交错。
/// - 不提供持久化，进程重启后档案回到默认配置。
pub struct MemoryProfileStore {
    // 新用户的默认监控配置
    defaults: ProfileDefaults,
    // 线程安全的档案容器
    profiles: DashMap<ChatId, UserProfile>,
}

impl MemoryProfileStore {
    /// # Summary
    /// 创建一个新的 MemoryProfileStore 实例。
    ///
    /// # Logic
    /// 初始化底层的 DashMap 存储引擎并保存默认配置。
    ///
    /// # Arguments
    /// * `defaults`: 新档案的默认监控配置。
    ///
    /// # Returns
    /// * `Self` - 初始化的存储实例。
    pub fn new(defaults: ProfileDefaults) -> Self {
        Self {
            defaults,
            profiles: DashMap::new(),
        }
    }

    fn default_profile(&self, chat_id: ChatId) -> UserProfile {
        UserProfile::new(
            chat_id,
            self.defaults.symbols.clone(),
            self.defaults.timeframe,
        )
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    /// # Summary
    /// 获取用户档案，首次交互时以默认配置惰性创建。
    ///
    /// # Logic
    /// 通过 entry 接口原子地取出或插入默认档案，返回独立克隆。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    ///
    /// # Returns
    /// 档案的独立副本。
    async fn get_or_create(&self, chat_id: ChatId) -> UserProfile {
        self.profiles
            .entry(chat_id)
            .or_insert_with(|| self.default_profile(chat_id))
            .clone()
    }

    /// # Summary
    /// 向监控列表追加一个交易对。
    ///
    /// # Logic
    /// 1. 惰性创建档案并持有其分片锁。
    /// 2. 已存在则拒绝，否则追加到列表末尾。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `symbol`: 交易对代码。
    ///
    /// # Returns
    /// 成功返回监控列表的新长度。
    async fn add_symbol(&self, chat_id: ChatId, symbol: &str) -> Result<usize, ProfileError> {
        let mut profile = self
            .profiles
            .entry(chat_id)
            .or_insert_with(|| self.default_profile(chat_id));
        if profile.symbols.iter().any(|s| s == symbol) {
            return Err(ProfileError::AlreadyWatched(symbol.to_string()));
        }
        profile.symbols.push(symbol.to_string());
        Ok(profile.symbols.len())
    }

    /// # Summary
    /// 从监控列表移除一个交易对。
    ///
    /// # Logic
    /// 1. 惰性创建档案并持有其分片锁。
    /// 2. 不存在则拒绝，存在则移除并同步清理其去重状态。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `symbol`: 交易对代码。
    ///
    /// # Returns
    /// 成功返回监控列表的剩余长度。
    async fn remove_symbol(&self, chat_id: ChatId, symbol: &str) -> Result<usize, ProfileError> {
        let mut profile = self
            .profiles
            .entry(chat_id)
            .or_insert_with(|| self.default_profile(chat_id));
        let Some(pos) = profile.symbols.iter().position(|s| s == symbol) else {
            return Err(ProfileError::NotWatched(symbol.to_string()));
        };
        profile.symbols.remove(pos);
        profile.last_signals.remove(symbol);
        Ok(profile.symbols.len())
    }

    /// # Summary
    /// 切换用户的 K 线周期。
    ///
    /// # Logic
    /// 1. 惰性创建档案并持有其分片锁。
    /// 2. 写入新周期并清空全部去重状态，所有交易对重新武装。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `timeframe`: 新周期。
    ///
    /// # Returns
    /// 切换前的旧周期。
    async fn set_timeframe(&self, chat_id: ChatId, timeframe: TimeFrame) -> TimeFrame {
        let mut profile = self
            .profiles
            .entry(chat_id)
            .or_insert_with(|| self.default_profile(chat_id));
        let previous = profile.timeframe;
        profile.timeframe = timeframe;
        profile.last_signals.clear();
        previous
    }

    /// # Summary
    /// 记录某交易对最近一次已通知的信号。
    ///
    /// # Logic
    /// 1. 用户不存在时静默忽略，不做惰性创建。
    /// 2. 交易对已被移出监控列表时同样静默忽略。
    /// 3. 否则覆盖写入去重状态。
    ///
    /// # Arguments
    /// * `chat_id`: 会话标识。
    /// * `symbol`: 交易对代码。
    /// * `signal`: 已通知的信号。
    async fn record_signal(&self, chat_id: ChatId, symbol: &str, signal: Signal) {
        if let Some(mut profile) = self.profiles.get_mut(&chat_id) {
            if profile.symbols.iter().any(|s| s == symbol) {
                profile.last_signals.insert(symbol.to_string(), signal);
            }
        }
    }

    /// # Summary
    /// 获取全部用户档案的稳定副本。
    ///
    /// # Logic
    /// 逐分片克隆档案，返回的列表与存储内后续变更互不影响。
    ///
    /// # Returns
    /// 档案副本列表。
    async fn snapshot(&self) -> Vec<UserProfile> {
        self.profiles.iter().map(|e| e.value().clone()).collect()
    }
}
