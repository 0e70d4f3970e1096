use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use sigmax_core::common::{ChatId, TimeFrame};
use sigmax_core::config::{IndicatorConfig, ProfileDefaults, WatchConfig};
use sigmax_core::market::entity::Candle;
use sigmax_core::market::error::MarketError;
use sigmax_core::market::port::MarketDataProvider;
use sigmax_core::notify::error::NotifyError;
use sigmax_core::notify::port::Notifier;
use sigmax_core::profile::port::ProfileStore;
use sigmax_core::signal::entity::Signal;
use sigmax_manager::watcher::SignalWatcher;
use sigmax_store::memory::MemoryProfileStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// # Summary
/// 以收盘价序列构造升序 K 线。
fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            time: start + ChronoDuration::minutes(15 * i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        })
        .collect()
}

/// 平盘基线加末根突破，评估结果为做多信号
fn long_series() -> Vec<Candle> {
    let mut closes = vec![100.0; 35];
    closes[20] = 101.0;
    closes[34] = 110.0;
    candles_from_closes(&closes)
}

/// 平盘基线加末根破位，评估结果为做空信号
fn short_series() -> Vec<Candle> {
    let mut closes = vec![100.0; 35];
    closes[20] = 99.0;
    closes[34] = 90.0;
    candles_from_closes(&closes)
}

/// # Summary
/// 模拟行情提供者，按交易对返回预置 K 线。
struct MockProvider {
    candles: Mutex<HashMap<String, Vec<Candle>>>,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            candles: Mutex::new(HashMap::new()),
        }
    }

    fn set(&self, symbol: &str, candles: Vec<Candle>) {
        self.candles
            .lock()
            .unwrap()
            .insert(symbol.to_string(), candles);
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        _timeframe: TimeFrame,
        _limit: usize,
    ) -> Result<Vec<Candle>, MarketError> {
        self.candles
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketError::Network("mock fetch failure".to_string()))
    }
}

/// # Summary
/// 模拟通知器，记录全部发送尝试，可配置为始终失败。
struct MockNotifier {
    sent: Mutex<Vec<(ChatId, String)>>,
    fail: bool,
}

impl MockNotifier {
    fn new(fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail,
        }
    }

    fn attempts(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, chat_id: ChatId, text: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        if self.fail {
            return Err(NotifyError::Network("mock dispatch failure".to_string()));
        }
        Ok(())
    }
}

fn watcher_with(
    provider: Arc<MockProvider>,
    notifier: Arc<MockNotifier>,
    store: Arc<MemoryProfileStore>,
) -> Arc<SignalWatcher> {
    SignalWatcher::new(
        provider,
        notifier,
        store,
        WatchConfig {
            poll_interval_secs: 60,
            candle_limit: 100,
        },
        IndicatorConfig::default(),
    )
}

fn store_watching(symbols: &[&str]) -> Arc<MemoryProfileStore> {
    Arc::new(MemoryProfileStore::new(ProfileDefaults {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        timeframe: TimeFrame::Minute15,
    }))
}

#[tokio::test]
async fn test_tick_notifies_and_deduplicates() {
    let provider = Arc::new(MockProvider::new());
    provider.set("BTC-USDT", long_series());
    let notifier = Arc::new(MockNotifier::new(false));
    let store = store_watching(&["BTC-USDT"]);
    let _ = store.get_or_create(1).await;

    let watcher = watcher_with(provider, notifier.clone(), store.clone());
    watcher.run_tick().await;

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].0, 1);
    assert!(attempts[0].1.contains("LONG"));
    assert!(attempts[0].1.contains("BTC-USDT"));

    let profile = store.get_or_create(1).await;
    assert_eq!(profile.last_signals.get("BTC-USDT"), Some(&Signal::Long));

    // 同向信号不得重复通知
    watcher.run_tick().await;
    assert_eq!(notifier.attempts().len(), 1);
}

#[tokio::test]
async fn test_tick_renotifies_on_direction_change() {
    let provider = Arc::new(MockProvider::new());
    provider.set("BTC-USDT", long_series());
    let notifier = Arc::new(MockNotifier::new(false));
    let store = store_watching(&["BTC-USDT"]);
    let _ = store.get_or_create(1).await;

    let watcher = watcher_with(provider.clone(), notifier.clone(), store);
    watcher.run_tick().await;
    assert_eq!(notifier.attempts().len(), 1);

    provider.set("BTC-USDT", short_series());
    watcher.run_tick().await;

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[1].1.contains("SHORT"));
}

#[tokio::test]
async fn test_tick_isolates_per_symbol_failures() {
    let provider = Arc::new(MockProvider::new());
    // BAD-USDT 未预置数据，抓取将返回错误
    provider.set("BTC-USDT", long_series());
    let notifier = Arc::new(MockNotifier::new(false));
    let store = store_watching(&["BAD-USDT", "BTC-USDT"]);
    let _ = store.get_or_create(1).await;

    let watcher = watcher_with(provider, notifier.clone(), store);
    watcher.run_tick().await;

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].1.contains("BTC-USDT"));
}

#[tokio::test]
async fn test_tick_skips_insufficient_history() {
    let provider = Arc::new(MockProvider::new());
    provider.set("BTC-USDT", candles_from_closes(&vec![100.0; 10]));
    let notifier = Arc::new(MockNotifier::new(false));
    let store = store_watching(&["BTC-USDT"]);
    let _ = store.get_or_create(1).await;

    let watcher = watcher_with(provider, notifier.clone(), store.clone());
    watcher.run_tick().await;

    assert!(notifier.attempts().is_empty());
    let profile = store.get_or_create(1).await;
    assert!(profile.last_signals.is_empty());
}

#[tokio::test]
async fn test_tick_none_preserves_recorded_signal() {
    let provider = Arc::new(MockProvider::new());
    provider.set("BTC-USDT", candles_from_closes(&vec![100.0; 40]));
    let notifier = Arc::new(MockNotifier::new(false));
    let store = store_watching(&["BTC-USDT"]);
    let _ = store.get_or_create(1).await;
    store.record_signal(1, "BTC-USDT", Signal::Long).await;

    let watcher = watcher_with(provider, notifier.clone(), store.clone());
    watcher.run_tick().await;

    assert!(notifier.attempts().is_empty());
    let profile = store.get_or_create(1).await;
    // 无信号轮次不得清除既有去重状态
    assert_eq!(profile.last_signals.get("BTC-USDT"), Some(&Signal::Long));
}

#[tokio::test]
async fn test_dispatch_failure_still_advances_state() {
    let provider = Arc::new(MockProvider::new());
    provider.set("BTC-USDT", long_series());
    let notifier = Arc::new(MockNotifier::new(true));
    let store = store_watching(&["BTC-USDT"]);
    let _ = store.get_or_create(1).await;

    let watcher = watcher_with(provider, notifier.clone(), store.clone());
    watcher.run_tick().await;
    watcher.run_tick().await;

    // 发送失败也推进去重状态，第二轮不再重试
    assert_eq!(notifier.attempts().len(), 1);
    let profile = store.get_or_create(1).await;
    assert_eq!(profile.last_signals.get("BTC-USDT"), Some(&Signal::Long));
}

#[tokio::test]
async fn test_tick_covers_multiple_users() {
    let provider = Arc::new(MockProvider::new());
    provider.set("BTC-USDT", long_series());
    let notifier = Arc::new(MockNotifier::new(false));
    let store = store_watching(&["BTC-USDT"]);
    let _ = store.get_or_create(1).await;
    let _ = store.get_or_create(2).await;

    let watcher = watcher_with(provider, notifier.clone(), store);
    watcher.run_tick().await;

    let mut chats: Vec<ChatId> = notifier.attempts().iter().map(|(c, _)| *c).collect();
    chats.sort_unstable();
    assert_eq!(chats, vec![1, 2]);
}

#[tokio::test]
async fn test_signal_message_lists_conditions() {
    let provider = Arc::new(MockProvider::new());
    let notifier = Arc::new(MockNotifier::new(false));
    let store = store_watching(&["BTC-USDT"]);
    let watcher = watcher_with(provider, notifier, store);

    let text = watcher.signal_message("BTC-USDT", TimeFrame::Minute15, Signal::Long, 93650.3);
    assert!(text.contains("*LONG signal*"));
    assert!(text.contains("Pair: BTC-USDT"));
    assert!(text.contains("Timeframe: 15m"));
    assert!(text.contains("EMA8 crossed above EMA21"));
    assert!(text.contains("RSI > 50"));
    assert!(text.contains("MACD in positive zone"));
    assert!(text.contains("Last close: 93650.3"));
}
