use thiserror::Error;

/// # Summary
/// 用户档案域错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum ProfileError {
    // 交易对已在监控列表中
    #[error("Symbol already watched: {0}")]
    AlreadyWatched(String),
    // 交易对不在监控列表中
    #[error("Symbol not watched: {0}")]
    NotWatched(String),
}
