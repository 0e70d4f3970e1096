pub mod classify;
pub mod frame;
pub mod indicators;

pub use classify::evaluate;
pub use frame::IndicatorFrame;
