use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

pub mod dynamo;
pub mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Unpolled plans are dropped after this long.
pub const PLAN_EXPIRATION_TIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Slot a final plan is kept under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKey {
    /// The single global slot used by callbacks and polls without an id.
    Latest,
    Request(Uuid),
}

impl PlanKey {
    pub fn parse(id: Option<&str>) -> Result<Self, uuid::Error> {
        match id {
            None => Ok(PlanKey::Latest),
            Some(id) => Ok(PlanKey::Request(Uuid::parse_str(id)?)),
        }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanKey::Latest => f.write_str("latest"),
            PlanKey::Request(id) => write!(f, "{id}"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("dynamodb request failed: {0}")]
    Dynamo(#[from] Box<aws_sdk_dynamodb::Error>),
    #[error("stored item is malformed: {0}")]
    Malformed(String),
    #[error("stored plan is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keyed holder of pending plans. `take` hands a value out at most once.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Stores `plan` under `key`, replacing whatever was there.
    async fn put(&self, key: PlanKey, plan: Value) -> Result<(), StoreError>;

    /// Removes and returns the plan under `key`.
    async fn take(&self, key: PlanKey) -> Result<Option<Value>, StoreError>;
}
