use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// Telegram 会话标识别名，同时作为系统内的用户标识。
pub type ChatId = i64;

/// # Summary
/// 交易时间周期枚举，定义 K 线的时间跨度。
///
/// # Invariants
/// - 仅允许监控支持的三个短周期。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    // 1分钟
    Minute1,
    // 5分钟
    Minute5,
    // 15分钟
    Minute15,
}

impl TimeFrame {
    /// # Summary
    /// 列出所有允许的周期，供命令层做合法性提示。
    ///
    /// # Returns
    /// 固定顺序的周期切片。
    pub fn allowed() -> &'static [TimeFrame] {
        &[TimeFrame::Minute1, TimeFrame::Minute5, TimeFrame::Minute15]
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "minute1" => Ok(TimeFrame::Minute1),
            "5m" | "minute5" => Ok(TimeFrame::Minute5),
            "15m" | "minute15" => Ok(TimeFrame::Minute15),
            _ => Err(format!("Unknown TimeFrame: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFrame::Minute1 => write!(f, "1m"),
            TimeFrame::Minute5 => write!(f, "5m"),
            TimeFrame::Minute15 => write!(f, "15m"),
        }
    }
}
