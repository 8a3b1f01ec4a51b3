mod smc;

pub use smc::{LiquiditySweepDetector, OrderBlockDetector};
