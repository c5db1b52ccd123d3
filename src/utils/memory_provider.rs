//! In-memory classification provider for testing

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::traits::*;
use crate::types::*;

/// In-memory provider for testing and development.
///
/// Can simulate a slow or failing upstream and counts how often it was called.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    name: String,
    entries: Arc<RwLock<HashMap<String, HsnCode>>>,
    latency: Option<Duration>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MemoryProvider {
    /// Create an empty provider
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Arc::new(RwLock::new(HashMap::new())),
            latency: None,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add a classification, builder style
    pub fn with_entry(self, hsn: HsnCode) -> Self {
        self.insert(hsn);
        self
    }

    /// Delay every fetch by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every fetch fail with [`ProviderError::Unavailable`]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Add or replace a classification
    pub fn insert(&self, hsn: HsnCode) {
        self.entries.write().insert(hsn.code.clone(), hsn);
    }

    /// Number of fetches so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[async_trait]
impl ClassificationProvider for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, code: &str) -> Result<Option<HsnCode>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.fail {
            return Err(ProviderError::Unavailable(format!(
                "{} is configured to fail",
                self.name
            )));
        }

        Ok(self.entries.read().get(code).cloned())
    }
}
