use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Form fields forwarded to the trigger service untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerInputs {
    #[serde(flatten)]
    pub form: PlanForm,
    pub callback_url: String,
}

/// Body of the outbound trigger call: `{"inputs": {..., "callback_url"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRequest {
    pub inputs: TriggerInputs,
}

impl TriggerRequest {
    pub fn new(form: PlanForm, callback_url: impl Into<String>) -> Self {
        Self {
            inputs: TriggerInputs {
                form,
                callback_url: callback_url.into(),
            },
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TriggerError {
    #[error("trigger url is not configured")]
    NotConfigured,
    #[error("trigger request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait Trigger: Send + Sync {
    /// Sends one request to the trigger service. Succeeds once the service
    /// answered, whatever its status.
    async fn fire(&self, request: &TriggerRequest) -> Result<(), TriggerError>;
}

/// Posts trigger requests as JSON to a fixed URL. No timeout, no retry.
#[derive(Debug, Clone)]
pub struct HttpTrigger {
    client: Client,
    url: Option<String>,
}

impl HttpTrigger {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Trigger for HttpTrigger {
    // callback_url carries the webhook token, keep it out of the span
    #[tracing::instrument(skip_all)]
    async fn fire(&self, request: &TriggerRequest) -> Result<(), TriggerError> {
        let url = self.url.as_deref().ok_or(TriggerError::NotConfigured)?;

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        if status.is_success() {
            info!("Trigger accepted with status {}", status);
        } else {
            warn!("Trigger answered with status {}", status);
        }

        Ok(())
    }
}
