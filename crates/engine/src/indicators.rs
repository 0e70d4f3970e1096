/// # Summary
/// MACD 三线输出，各列与输入价格序列等长对齐。
#[derive(Debug, Clone)]
pub struct Macd {
    // 快慢 EMA 之差
    pub line: Vec<f64>,
    // MACD 线自身的 EMA
    pub signal: Vec<f64>,
    // line 与 signal 之差
    pub histogram: Vec<f64>,
}

/// # Summary
/// 指数移动平均，递推式平滑。
///
/// # Logic
/// 1. 平滑系数 α = 2 / (period + 1)。
/// 2. 首值直接取首个价格作为种子，不做窗口均值预热。
/// 3. 其余各项按 out[i] = α * p[i] + (1 - α) * out[i-1] 递推。
///
/// # Arguments
/// * `prices`: 价格序列。
/// * `period`: 平滑周期。
///
/// # Returns
/// 与输入等长的 EMA 序列，空输入返回空序列。
pub fn ema(prices: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = prices.first() else {
        return Vec::new();
    };
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len());
    out.push(first);
    for &price in &prices[1..] {
        let prev = out[out.len() - 1];
        out.push(alpha * price + (1.0 - alpha) * prev);
    }
    out
}

/// # Summary
/// 相对强弱指数，基于涨跌幅的简单滑动平均。
///
/// # Logic
/// 1. 逐项差分得到涨跌幅，首项的涨跌幅均记为 0。
/// 2. 拆分为涨幅与跌幅两列，各自做 period 窗口的简单滑动平均。
/// 3. rs = 平均涨幅 / 平均跌幅，rsi = 100 - 100 / (1 + rs)。
///
/// # Invariants
/// - 窗口未满的前 period-1 个位置输出 NaN。
/// - 除法遵循 IEEE-754：只涨不跌时 rs 为正无穷、rsi 饱和到 100；
///   窗口内完全无波动时 rs 为 NaN，rsi 同为 NaN。
///
/// # Arguments
/// * `prices`: 价格序列。
/// * `period`: 滑动平均窗口长度。
///
/// # Returns
/// 与输入等长的 RSI 序列。
pub fn rsi(prices: &[f64], period: usize) -> Vec<f64> {
    let n = prices.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = prices[i] - prices[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }
    let mut out = vec![f64::NAN; n];
    for i in 0..n {
        if i + 1 < period {
            continue;
        }
        let window = i + 1 - period..=i;
        let avg_gain: f64 = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss: f64 = losses[window].iter().sum::<f64>() / period as f64;
        let rs = avg_gain / avg_loss;
        out[i] = 100.0 - 100.0 / (1.0 + rs);
    }
    out
}

/// # Summary
/// MACD 指标，快慢 EMA 之差再做一次 EMA 平滑。
///
/// # Logic
/// 1. line = ema(fast) - ema(slow)，逐项相减。
/// 2. signal = ema(line, signal_period)，对派生序列套用同样的种子规则。
/// 3. histogram = line - signal。
///
/// # Arguments
/// * `prices`: 价格序列。
/// * `fast`: 快线周期。
/// * `slow`: 慢线周期。
/// * `signal_period`: 信号线平滑周期。
///
/// # Returns
/// 三列等长的 Macd 结构。
pub fn macd(prices: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    let fast_ema = ema(prices, fast);
    let slow_ema = ema(prices, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&line, signal_period);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();
    Macd {
        line,
        signal,
        histogram,
    }
}
