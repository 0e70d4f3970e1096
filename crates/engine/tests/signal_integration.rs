use chrono::{Duration, TimeZone, Utc};
use sigmax_core::config::IndicatorConfig;
use sigmax_core::market::entity::Candle;
use sigmax_core::signal::entity::Signal;
use sigmax_engine::evaluate;

/// # Summary
/// 以收盘价序列构造升序 K 线，开高低量取占位值。
fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            time: start + Duration::minutes(15 * i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1.0,
        })
        .collect()
}

#[test]
fn test_evaluate_rejects_short_history() {
    let cfg = IndicatorConfig::default();
    let candles = candles_from_closes(&vec![100.0; 29]);
    assert_eq!(evaluate(&candles, &cfg), None);
}

#[test]
fn test_evaluate_flat_series_yields_nothing() {
    let cfg = IndicatorConfig::default();
    let candles = candles_from_closes(&vec![100.0; 40]);
    assert_eq!(evaluate(&candles, &cfg), None);
}

#[test]
fn test_evaluate_steady_uptrend_without_fresh_cross() {
    let cfg = IndicatorConfig::default();
    // 短 EMA 早已在长 EMA 之上，最后两行不构成新的交叉
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let candles = candles_from_closes(&closes);
    assert_eq!(evaluate(&candles, &cfg), None);
}

#[test]
fn test_evaluate_long_on_final_breakout() {
    let cfg = IndicatorConfig::default();
    // 平盘基线中置入一次小幅波动让 RSI 可定义，末根放量突破触发金叉
    let mut closes = vec![100.0; 35];
    closes[20] = 101.0;
    closes[34] = 110.0;
    let candles = candles_from_closes(&closes);
    assert_eq!(evaluate(&candles, &cfg), Some(Signal::Long));
}

#[test]
fn test_evaluate_short_on_final_breakdown() {
    let cfg = IndicatorConfig::default();
    let mut closes = vec![100.0; 35];
    closes[20] = 99.0;
    closes[34] = 90.0;
    let candles = candles_from_closes(&closes);
    assert_eq!(evaluate(&candles, &cfg), Some(Signal::Short));
}
