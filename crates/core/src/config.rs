use crate::common::TimeFrame;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub feed: FeedConfig,
    pub watch: WatchConfig,
    pub indicators: IndicatorConfig,
    pub profile: ProfileDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    // 监控循环的轮询间隔（秒）
    pub poll_interval_secs: u64,
    // 每次评估拉取的 K 线条数
    pub candle_limit: usize,
}

/// # Summary
/// 指标参数集，引擎计算与信号判定共用。
///
/// # Invariants
/// - `min_candles` 必须不小于各指标的最长预热长度，否则判定窗口内全是 NaN。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub ema_short: usize,
    pub ema_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    // 评估所需的最少 K 线条数
    pub min_candles: usize,
}

/// 新用户的默认监控配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDefaults {
    pub symbols: Vec<String>,
    pub timeframe: TimeFrame,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig {
                bot_token: String::new(), // Must be provided via config file or env
            },
            feed: FeedConfig {
                base_url: "https://www.okx.com/api/v5".to_string(),
            },
            watch: WatchConfig {
                poll_interval_secs: 60,
                candle_limit: 100,
            },
            indicators: IndicatorConfig::default(),
            profile: ProfileDefaults {
                symbols: vec![
                    "BTC-USDT".to_string(),
                    "ETH-USDT".to_string(),
                    "SOL-USDT".to_string(),
                    "HBAR-USDT".to_string(),
                    "DOGE-USDT".to_string(),
                    "H-USDT".to_string(),
                    "SOON-USDT".to_string(),
                ],
                timeframe: TimeFrame::Minute15,
            },
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_short: 8,
            ema_long: 21,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            min_candles: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.telegram.bot_token.is_empty());
        assert_eq!(config.feed.base_url, "https://www.okx.com/api/v5");
        assert_eq!(config.watch.poll_interval_secs, 60);
        assert_eq!(config.watch.candle_limit, 100);
        assert_eq!(config.indicators.ema_short, 8);
        assert_eq!(config.indicators.ema_long, 21);
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.indicators.macd_fast, 12);
        assert_eq!(config.indicators.macd_slow, 26);
        assert_eq!(config.indicators.macd_signal, 9);
        assert_eq!(config.indicators.min_candles, 30);
        assert_eq!(config.profile.symbols.len(), 7);
        assert_eq!(config.profile.symbols[0], "BTC-USDT");
        assert_eq!(config.profile.timeframe, TimeFrame::Minute15);
    }
}
