use std::sync::Arc;

use aws_config::BehaviorVersion;
use tracing::{info, warn};

use crate::common::config::Config;
use crate::store::{DynamoStore, MemoryStore, PlanStore};
use crate::trigger::{HttpTrigger, Trigger};

/// Everything a handler needs, built once per cold start.
pub struct Services {
    pub config: Config,
    pub store: Arc<dyn PlanStore>,
    pub trigger: Arc<dyn Trigger>,
}

impl Services {
    pub fn new(config: Config, store: Arc<dyn PlanStore>, trigger: Arc<dyn Trigger>) -> Self {
        Self {
            config,
            store,
            trigger,
        }
    }

    pub async fn init() -> Self {
        let config = Config::from_env();

        let store: Arc<dyn PlanStore> = match &config.table_name {
            Some(table_name) => {
                info!("Keeping plans in DynamoDB table {}", table_name);
                let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
                let client = aws_sdk_dynamodb::Client::new(&aws_config);
                Arc::new(DynamoStore::new(client, table_name.clone()))
            }
            None => {
                warn!("TABLE_NAME is not set, plans are kept in this instance's memory");
                Arc::new(MemoryStore::new())
            }
        };

        if config.trigger_url.is_none() {
            warn!("RELAY_TRIGGER_URL is not set, every plan request will fail");
        }
        let trigger = Arc::new(HttpTrigger::new(config.trigger_url.clone()));

        Self::new(config, store, trigger)
    }
}
