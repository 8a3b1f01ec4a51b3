// Trade setup value objects
pub mod types;
