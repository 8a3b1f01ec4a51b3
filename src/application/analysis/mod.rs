pub mod narrative;
pub mod service;
pub mod signal_composer;

pub use service::{AnalysisService, BatchAnalysisResult};
pub use signal_composer::SignalComposer;
