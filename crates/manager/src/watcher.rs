use sigmax_core::common::TimeFrame;
use sigmax_core::config::{IndicatorConfig, WatchConfig};
use sigmax_core::market::port::MarketDataProvider;
use sigmax_core::notify::port::Notifier;
use sigmax_core::profile::entity::UserProfile;
use sigmax_core::profile::port::ProfileStore;
use sigmax_core::signal::entity::Signal;
use sigmax_engine::evaluate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// # Summary
/// 监控循环，系统的应用服务层门面 (Facade)。
/// 编译期仅依赖 `sigmax-core` 中的 Trait 定义，所有具体实现通过构造函数注入。
///
/// # Invariants
/// - 每轮评估基于档案快照，循环期间的档案变更下一轮生效。
/// - 单个交易对的失败不得影响同轮其他交易对与其他用户。
/// - 同一 (用户, 交易对) 的同向信号至多通知一次，换向后才会再次通知。
pub struct SignalWatcher {
    // 行情数据接口
    provider: Arc<dyn MarketDataProvider>,
    // 消息推送接口
    notifier: Arc<dyn Notifier>,
    // 用户档案接口
    store: Arc<dyn ProfileStore>,
    // 轮询参数
    watch: WatchConfig,
    // 指标参数集
    indicators: IndicatorConfig,
}

impl SignalWatcher {
    /// # Summary
    /// 创建 SignalWatcher 实例。
    ///
    /// # Arguments
    /// * `provider` - 行情数据接口的具体实现。
    /// * `notifier` - 消息推送接口的具体实现。
    /// * `store` - 用户档案接口的具体实现。
    /// * `watch` - 轮询参数。
    /// * `indicators` - 指标参数集。
    ///
    /// # Returns
    /// * `Arc<Self>` - 可共享的监控器实例。
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn ProfileStore>,
        watch: WatchConfig,
        indicators: IndicatorConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            notifier,
            store,
            watch,
            indicators,
        })
    }

    /// # Summary
    /// 执行一轮完整的监控评估。
    ///
    /// # Logic
    /// 1. 取全部用户档案的稳定快照。
    /// 2. 逐用户逐交易对抓取行情并评估信号。
    /// 3. 任何单交易对的失败只记录日志并跳过。
    ///
    /// # Returns
    /// * None，本轮所有可失败步骤均已在内部隔离。
    pub async fn run_tick(&self) {
        let profiles = self.store.snapshot().await;
        for profile in profiles {
            for symbol in &profile.symbols {
                self.check_symbol(&profile, symbol).await;
            }
        }
    }

    /// # Summary
    /// 评估单个 (用户, 交易对) 并在信号变化时推送通知。
    ///
    /// # Logic
    /// 1. 抓取最近 K 线，失败则跳过该交易对。
    /// 2. 评估信号，无信号时保留既有去重状态。
    /// 3. 与快照中的上次信号相同则不重复通知。
    /// 4. 推送通知，之后无论发送结果如何都推进去重状态。
    ///
    /// # Arguments
    /// * `profile` - 快照中的用户档案。
    /// * `symbol` - 交易对代码。
    async fn check_symbol(&self, profile: &UserProfile, symbol: &str) {
        let chat_id = profile.chat_id;
        let candles = match self
            .provider
            .fetch_candles(symbol, profile.timeframe, self.watch.candle_limit)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!(chat_id, symbol, error = %e, "Candle fetch failed, skipping symbol");
                return;
            }
        };

        let Some(signal) = evaluate(&candles, &self.indicators) else {
            return;
        };
        if profile.last_signals.get(symbol) == Some(&signal) {
            return;
        }

        let last_close = candles.last().map(|c| c.close).unwrap_or_default();
        let text = self.signal_message(symbol, profile.timeframe, signal, last_close);
        if let Err(e) = self.notifier.notify(chat_id, &text).await {
            error!(chat_id, symbol, %signal, error = %e, "Signal dispatch failed");
        } else {
            info!(chat_id, symbol, %signal, "Signal notified");
        }
        self.store.record_signal(chat_id, symbol, signal).await;
    }

    /// # Summary
    /// 以无限轮询的方式持续运行监控循环。
    ///
    /// # Logic
    /// 1. 按配置的轮询间隔建立定时器。
    /// 2. 每次到点执行一轮 run_tick。
    /// 3. 循环自身永不退出，停止由外部中止协程实现。
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.watch.poll_interval_secs));
        info!(
            interval_secs = self.watch.poll_interval_secs,
            "Signal watcher started"
        );
        loop {
            ticker.tick().await;
            self.run_tick().await;
        }
    }

    /// # Summary
    /// 渲染信号通知文本。
    ///
    /// # Logic
    /// 1. 标题为信号方向，附交易对与周期。
    /// 2. 列出触发该信号的三个已满足条件。
    /// 3. 末尾附最新收盘价。
    ///
    /// # Arguments
    /// * `symbol` - 交易对代码。
    /// * `timeframe` - 评估所用周期。
    /// * `signal` - 判定出的信号。
    /// * `last_close` - 最新收盘价。
    ///
    /// # Returns
    /// Markdown 格式的通知文本。
    pub fn signal_message(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        signal: Signal,
        last_close: f64,
    ) -> String {
        let mut message = format!(
            "*{} signal*\nPair: {}\nTimeframe: {}\n\n",
            signal, symbol, timeframe
        );
        match signal {
            Signal::Long => {
                message.push_str(&format!(
                    "- EMA{} crossed above EMA{}\n",
                    self.indicators.ema_short, self.indicators.ema_long
                ));
                message.push_str("- RSI > 50\n");
                message.push_str("- MACD in positive zone\n");
            }
            Signal::Short => {
                message.push_str(&format!(
                    "- EMA{} crossed below EMA{}\n",
                    self.indicators.ema_short, self.indicators.ema_long
                ));
                message.push_str("- RSI < 50\n");
                message.push_str("- MACD in negative zone\n");
            }
        }
        message.push_str(&format!("\nLast close: {}", last_close));
        message
    }
}
