use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use sigmax_core::common::TimeFrame;
use sigmax_core::market::entity::Candle;
use sigmax_core::market::error::MarketError;
use sigmax_core::market::port::MarketDataProvider;
use std::time::Duration;
use tracing::debug;

/// # Summary
/// OKX 公共行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 仅访问无需鉴权的公共 REST 接口。
#[derive(Clone)]
pub struct OkxProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// REST 接口基地址
    base_url: String,
}

impl OkxProvider {
    /// # Summary
    /// 创建一个新的 OkxProvider 实例。
    ///
    /// # Logic
    /// 1. 配置 10 秒超时。
    /// 2. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `base_url`: REST 接口基地址，不含末尾斜杠。
    ///
    /// # Returns
    /// 返回初始化后的 OkxProvider。
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

/// # Summary
/// OKX API 响应顶层结构。
///
/// # Invariants
/// - 映射自 OKX v5 market 接口，`code` 为 "0" 表示成功。
#[derive(Deserialize, Debug)]
struct OkxResponse {
    code: String,
    msg: String,
    // 每行依次为 ts, o, h, l, c, vol 及若干附加列，全部为字符串
    #[serde(default)]
    data: Vec<Vec<String>>,
}

/// # Summary
/// 将 OKX 的单行字符串 K 线解析为 Candle。
///
/// # Logic
/// 1. 前六列依次为毫秒时间戳与 OHLCV。
/// 2. 列缺失或数值解析失败均视为解析错误。
///
/// # Arguments
/// * `row`: 单行字符串数组。
///
/// # Returns
/// 成功返回 Candle，失败返回 MarketError::Parse。
fn parse_row(row: &[String]) -> Result<Candle, MarketError> {
    let field = |i: usize| -> Result<&str, MarketError> {
        row.get(i)
            .map(String::as_str)
            .ok_or_else(|| MarketError::Parse(format!("Missing candle column {}", i)))
    };
    let num = |i: usize| -> Result<f64, MarketError> {
        field(i)?
            .parse::<f64>()
            .map_err(|e| MarketError::Parse(format!("Invalid candle column {}: {}", i, e)))
    };

    let ts = field(0)?
        .parse::<i64>()
        .map_err(|e| MarketError::Parse(format!("Invalid candle timestamp: {}", e)))?;
    let time = Utc
        .timestamp_millis_opt(ts)
        .single()
        .ok_or_else(|| MarketError::Parse(format!("Out-of-range candle timestamp: {}", ts)))?;

    Ok(Candle {
        time,
        open: num(1)?,
        high: num(2)?,
        low: num(3)?,
        close: num(4)?,
        volume: num(5)?,
    })
}

#[async_trait]
impl MarketDataProvider for OkxProvider {
    /// # Summary
    /// 从 OKX 抓取 K 线历史数据。
    ///
    /// # Logic
    /// 1. 映射 TimeFrame 周期为 OKX 识别的 bar 参数。
    /// 2. 构建包含 instId, bar, limit 的 API URL。
    /// 3. 发起异步请求并解析响应信封。
    /// 4. 非 "0" 业务码视为交易所错误，空数据视为交易对不存在。
    /// 5. 接口按新到旧返回，统一按时间升序排序后交付。
    ///
    /// # Arguments
    /// * `symbol`: 交易对代码，如 BTC-USDT。
    /// * `timeframe`: 周期。
    /// * `limit`: 拉取条数上限。
    ///
    /// # Returns
    /// 成功返回升序 K 线列表，失败返回 MarketError。
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketError> {
        let url = format!("{}/market/history-candles", self.base_url);
        let bar = timeframe.to_string();
        let limit = limit.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[("instId", symbol), ("bar", &bar), ("limit", &limit)])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let json: OkxResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        if json.code != "0" {
            return Err(MarketError::Exchange(format!(
                "code {}: {}",
                json.code, json.msg
            )));
        }
        if json.data.is_empty() {
            return Err(MarketError::NotFound);
        }

        let mut candles = json
            .data
            .iter()
            .map(|row| parse_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        candles.sort_by_key(|c| c.time);

        debug!(symbol, bar, count = candles.len(), "Fetched candles");
        Ok(candles)
    }
}
