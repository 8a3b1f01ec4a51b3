// Market data value objects
pub mod bias;
pub mod candle;
pub mod timeframe;
