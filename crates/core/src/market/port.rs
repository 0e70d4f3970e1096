use crate::common::TimeFrame;
use crate::market::entity::Candle;
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 市场行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 返回的 K 线必须按时间升序排列且无重复时间戳。
/// - 拉取失败必须以 `MarketError` 表达，绝不 panic。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取特定交易对最近的 K 线数据。
    ///
    /// # Logic
    /// 1. 将 TimeFrame 映射为数据源识别的周期参数。
    /// 2. 构建数据源请求并执行网络调用。
    /// 3. 解析响应并按时间升序整理。
    ///
    /// # Arguments
    /// * `symbol`: 交易对代码 (例如: BTC-USDT)。
    /// * `timeframe`: K 线周期。
    /// * `limit`: 请求的 K 线数量上限。
    ///
    /// # Returns
    /// 成功返回升序 K 线列表，失败返回 MarketError。
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: TimeFrame,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketError>;
}
