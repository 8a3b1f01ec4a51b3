// Signal composition, narrative rendering and the analysis service
pub mod analysis;

// Indicators and trend structure
pub mod market_data;

// Stops, targets, sizing and volatility
pub mod risk_management;

// Smart-money pattern detection
pub mod strategies;
