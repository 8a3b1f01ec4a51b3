//! In-Memory Repository Implementations
//!
//! Thread-safe, in-memory implementation of `domain::repositories::AnalysisRepository`.
//!
//! # Limitations
//!
//! - Data is lost on application restart
//! - No persistence across multiple instances
//!
//! For durable history, implement `AnalysisRepository` over a real store.

use crate::domain::analysis::AnalysisRecord;
use crate::domain::repositories::AnalysisRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Append-only analysis history kept in insertion order
#[derive(Clone)]
pub struct InMemoryAnalysisRepository {
    records: Arc<RwLock<Vec<AnalysisRecord>>>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryAnalysisRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn save(&self, record: &AnalysisRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AnalysisRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
