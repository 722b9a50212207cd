use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::store::{PlanKey, PlanStore, StoreError, PLAN_EXPIRATION_TIME};

#[derive(Debug)]
struct Entry {
    plan: Value,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Process-local store. Only visible to the instance that holds it.
///
/// Plans nobody polls expire after the store's ttl and are pruned on `put`.
#[derive(Debug)]
pub struct MemoryStore {
    plans: DashMap<PlanKey, Entry>,
    ttl: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_ttl(PLAN_EXPIRATION_TIME)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            plans: DashMap::new(),
            ttl,
        }
    }

    /// Number of held entries, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn put(&self, key: PlanKey, plan: Value) -> Result<(), StoreError> {
        let now = Instant::now();
        self.plans.retain(|_, entry| !entry.is_expired(now));
        self.plans.insert(
            key,
            Entry {
                plan,
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn take(&self, key: PlanKey) -> Result<Option<Value>, StoreError> {
        let now = Instant::now();
        Ok(self
            .plans
            .remove(&key)
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(_, entry)| entry.plan))
    }
}
