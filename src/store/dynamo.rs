use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use serde_json::Value;
use tracing::info;

use crate::store::{PlanKey, PlanStore, StoreError, PLAN_EXPIRATION_TIME};

const ID_ATTRIBUTE: &str = "ID";
const PLAN_ATTRIBUTE: &str = "PLAN";
const EXPIRES_AT_ATTRIBUTE: &str = "EXPIRES_AT";

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub plan: String,
    pub expires_at: u64,
}

impl From<Item> for HashMap<String, AttributeValue> {
    fn from(item: Item) -> Self {
        HashMap::from([
            (ID_ATTRIBUTE.into(), AttributeValue::S(item.id)),
            (PLAN_ATTRIBUTE.into(), AttributeValue::S(item.plan)),
            (
                EXPIRES_AT_ATTRIBUTE.into(),
                AttributeValue::N(item.expires_at.to_string()),
            ),
        ])
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for Item {
    type Error = StoreError;

    fn try_from(value: HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        let string_attribute = |name: &str| -> Result<String, StoreError> {
            value
                .get(name)
                .and_then(|val| val.as_s().ok())
                .cloned()
                .ok_or_else(|| StoreError::Malformed(format!("missing {name}")))
        };

        let expires_at = value
            .get(EXPIRES_AT_ATTRIBUTE)
            .and_then(|val| val.as_n().ok())
            .and_then(|val| val.parse::<u64>().ok())
            .ok_or_else(|| StoreError::Malformed(format!("missing {EXPIRES_AT_ATTRIBUTE}")))?;

        Ok(Item {
            id: string_attribute(ID_ATTRIBUTE)?,
            plan: string_attribute(PLAN_ATTRIBUTE)?,
            expires_at,
        })
    }
}

/// Store shared by every instance through one DynamoDB table keyed on `ID`.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|val| val.as_secs())
        .unwrap_or_default()
}

fn dynamo_error(err: impl Into<aws_sdk_dynamodb::Error>) -> StoreError {
    StoreError::Dynamo(Box::new(err.into()))
}

#[async_trait]
impl PlanStore for DynamoStore {
    #[tracing::instrument(skip(self, plan))]
    async fn put(&self, key: PlanKey, plan: Value) -> Result<(), StoreError> {
        let item = Item {
            id: key.to_string(),
            plan: serde_json::to_string(&plan)?,
            expires_at: now_secs() + PLAN_EXPIRATION_TIME.as_secs(),
        };

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item.into()))
            .send()
            .await
            .map_err(dynamo_error)?;

        info!("Stored plan under {}", key);
        Ok(())
    }

    // A single DeleteItem returning the old attributes, so two pollers
    // can never both receive the same plan.
    #[tracing::instrument(skip(self))]
    async fn take(&self, key: PlanKey) -> Result<Option<Value>, StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, AttributeValue::S(key.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(dynamo_error)?;

        let Some(attributes) = output.attributes else {
            return Ok(None);
        };

        let item = Item::try_from(attributes)?;
        // TTL deletion is lazy; an expired item may still be returned
        if item.expires_at <= now_secs() {
            info!("Dropped expired plan under {}", key);
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&item.plan)?))
    }
}
