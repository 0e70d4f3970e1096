use crate::frame::IndicatorFrame;
use sigmax_core::config::IndicatorConfig;
use sigmax_core::market::entity::Candle;
use sigmax_core::signal::entity::Signal;
use tracing::debug;

/// # Summary
/// 依据指标矩阵最后两行判定方向性信号。
///
/// # Logic
/// 1. 行数不足两行，或最后两行的 EMA、RSI、MACD 线存在未预热值时放弃判定。
/// 2. 金叉：前一行短 EMA 不高于长 EMA 且当前行严格高于。
/// 3. 死叉：前一行短 EMA 不低于长 EMA 且当前行严格低于。
/// 4. 金叉叠加 RSI > 50 与 MACD 线 > 0 判为做多；
///    死叉叠加 RSI < 50 与 MACD 线 < 0 判为做空。
///
/// # Invariants
/// - 交叉判定对前一行取宽松比较、对当前行取严格比较，
///   短长 EMA 恰好相等的行可作为交叉起点。
///
/// # Arguments
/// * `frame`: 对齐后的指标矩阵。
///
/// # Returns
/// 满足条件返回信号，否则 None。
pub fn classify(frame: &IndicatorFrame) -> Option<Signal> {
    let n = frame.len();
    if n < 2 {
        debug!(rows = n, "Not enough indicator rows to classify");
        return None;
    }
    let cur = n - 1;
    let prev = n - 2;
    let finite = [
        frame.ema_short[prev],
        frame.ema_long[prev],
        frame.rsi[prev],
        frame.macd_line[prev],
        frame.ema_short[cur],
        frame.ema_long[cur],
        frame.rsi[cur],
        frame.macd_line[cur],
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite {
        debug!("Indicator warm-up incomplete, skipping classification");
        return None;
    }

    let cross_up =
        frame.ema_short[prev] <= frame.ema_long[prev] && frame.ema_short[cur] > frame.ema_long[cur];
    let cross_down =
        frame.ema_short[prev] >= frame.ema_long[prev] && frame.ema_short[cur] < frame.ema_long[cur];

    if cross_up && frame.rsi[cur] > 50.0 && frame.macd_line[cur] > 0.0 {
        return Some(Signal::Long);
    }
    if cross_down && frame.rsi[cur] < 50.0 && frame.macd_line[cur] < 0.0 {
        return Some(Signal::Short);
    }
    None
}

/// # Summary
/// 安全评估入口：K 线充足性检查加指标计算加信号判定。
///
/// # Logic
/// 1. K 线数量少于 min_candles 直接返回 None，不报错。
/// 2. 计算指标矩阵并交给 classify 判定。
///
/// # Arguments
/// * `candles`: 按时间升序排列的 K 线。
/// * `cfg`: 指标参数集。
///
/// # Returns
/// 判定出的信号，或 None。
pub fn evaluate(candles: &[Candle], cfg: &IndicatorConfig) -> Option<Signal> {
    if candles.len() < cfg.min_candles {
        debug!(
            candles = candles.len(),
            min = cfg.min_candles,
            "Insufficient candles for evaluation"
        );
        return None;
    }
    let frame = IndicatorFrame::compute(candles, cfg);
    classify(&frame)
}
