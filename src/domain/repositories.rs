//! Repository Pattern Abstractions
//!
//! `AnalysisRepository` is the persistence collaborator the analysis service
//! hands finished records to. Storage technology is the implementor's
//! concern; the crate ships an in-memory implementation.

use crate::domain::analysis::AnalysisRecord;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    async fn save(&self, record: &AnalysisRecord) -> Result<()>;

    /// Most recent records first
    async fn find_recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AnalysisRecord>>;

    async fn count(&self) -> Result<usize>;
}
