pub mod market_data;
pub mod mock;
pub mod repositories;

pub use market_data::CsvMarketDataProvider;
pub use mock::MockMarketDataProvider;
pub use repositories::InMemoryAnalysisRepository;
