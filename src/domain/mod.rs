// Analysis inputs, decisions and outputs
pub mod analysis;

// Analysis and risk parameters
pub mod config;

// Domain-specific error types
pub mod errors;

// Candles, timeframes and trend bias
pub mod market;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Funding and positioning snapshot
pub mod sentiment;

// Order blocks, sweeps and trade levels
pub mod trading;
