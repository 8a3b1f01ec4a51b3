pub mod sizing_engine;
pub mod trade_levels;
pub mod volatility;

pub use sizing_engine::SizingEngine;
pub use trade_levels::{TradeLevelGenerator, reward_risk_ratio};
pub use volatility::classify_volatility;
