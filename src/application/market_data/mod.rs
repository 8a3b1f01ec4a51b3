pub mod indicators;
pub mod market_structure;

pub use market_structure::StructureClassifier;
