//! Usage counter
//!
//! Owned by the server; clones share the same count.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::types::MetricsReport;

#[derive(Debug, Clone, Default)]
pub struct UsageCounter {
    count: Arc<AtomicU64>,
}

impl UsageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new total
    pub fn record(&self) -> MetricsReport {
        let total = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        MetricsReport {
            total_searches: total,
        }
    }
}
