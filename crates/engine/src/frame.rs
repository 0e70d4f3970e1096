use crate::indicators::{ema, macd, rsi};
use sigmax_core::config::IndicatorConfig;
use sigmax_core::market::entity::Candle;

/// # Summary
/// 单交易对的指标矩阵，收盘价及全部派生列按时间升序对齐。
///
/// # Invariants
/// - 所有列与输入 K 线等长。
/// - 预热期内的未定义值以 NaN 表示，消费方必须自行判 `is_finite`。
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    // 收盘价
    pub close: Vec<f64>,
    // 短周期 EMA
    pub ema_short: Vec<f64>,
    // 长周期 EMA
    pub ema_long: Vec<f64>,
    // RSI
    pub rsi: Vec<f64>,
    // MACD 线
    pub macd_line: Vec<f64>,
    // MACD 信号线
    pub macd_signal: Vec<f64>,
    // MACD 柱
    pub macd_histogram: Vec<f64>,
}

impl IndicatorFrame {
    /// # Summary
    /// 从 K 线序列计算全部指标列。
    ///
    /// # Logic
    /// 1. 抽取收盘价列。
    /// 2. 依次计算短长 EMA、RSI 与 MACD 三线。
    ///
    /// # Arguments
    /// * `candles`: 按时间升序排列的 K 线。
    /// * `cfg`: 指标参数集。
    ///
    /// # Returns
    /// 对齐后的指标矩阵。
    pub fn compute(candles: &[Candle], cfg: &IndicatorConfig) -> Self {
        let close: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let ema_short = ema(&close, cfg.ema_short);
        let ema_long = ema(&close, cfg.ema_long);
        let rsi = rsi(&close, cfg.rsi_period);
        let macd = macd(&close, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
        Self {
            close,
            ema_short,
            ema_long,
            rsi,
            macd_line: macd.line,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
        }
    }

    /// # Summary
    /// 矩阵的行数。
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// # Summary
    /// 矩阵是否为空。
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}
