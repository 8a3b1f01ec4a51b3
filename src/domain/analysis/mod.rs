// Analysis inputs, decision record and outputs
pub mod bundle;
pub mod decision;
pub mod record;
pub mod result;

pub use bundle::{BundleError, MarketDataBundle, coin_name, normalize_symbol};
pub use decision::{Decision, Recommendation};
pub use record::AnalysisRecord;
pub use result::{AnalysisResult, IndicatorSnapshot, Volatility};
