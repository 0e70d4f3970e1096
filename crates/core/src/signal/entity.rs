use serde::{Deserialize, Serialize};

/// # Summary
/// 指标组合判定出的方向性信号。
///
/// # Invariants
/// - 不存在"无信号"成员，无信号以 `Option::None` 表达。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Signal {
    // 做多信号：短期 EMA 上穿长期 EMA 且动能为正
    Long,
    // 做空信号：短期 EMA 下穿长期 EMA 且动能为负
    Short,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Long => write!(f, "LONG"),
            Signal::Short => write!(f, "SHORT"),
        }
    }
}
