#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lambda_http::http::{self, StatusCode};
use lambda_http::{Body, Request, RequestExt, Response};
use plan_relay::common::config::Config;
use plan_relay::store::MemoryStore;
use plan_relay::trigger::{Trigger, TriggerError, TriggerRequest};
use plan_relay::{router, Services};
use serde_json::Value;

/// Records every trigger request instead of sending it.
#[derive(Default)]
pub struct RecordingTrigger {
    pub requests: Mutex<Vec<TriggerRequest>>,
    pub fail: bool,
}

impl RecordingTrigger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<TriggerRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Trigger for RecordingTrigger {
    async fn fire(&self, request: &TriggerRequest) -> Result<(), TriggerError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            Err(TriggerError::NotConfigured)
        } else {
            Ok(())
        }
    }
}

pub struct Harness {
    pub services: Services,
    pub store: Arc<MemoryStore>,
    pub trigger: Arc<RecordingTrigger>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(Config::default(), RecordingTrigger::default())
    }

    pub fn with(config: Config, trigger: RecordingTrigger) -> Self {
        let store = Arc::new(MemoryStore::new());
        let trigger = Arc::new(trigger);
        let services = Services::new(config, store.clone(), trigger.clone());

        Self {
            services,
            store,
            trigger,
        }
    }

    pub async fn send(&self, request: Request) -> Response<Body> {
        router::handle(request, &self.services).await.unwrap()
    }

    pub async fn send_json(&self, request: Request) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        let body = serde_json::from_slice(&body_bytes(&response)).unwrap();
        (status, body)
    }
}

pub fn body_bytes(response: &Response<Body>) -> Vec<u8> {
    match response.body() {
        Body::Empty => Vec::new(),
        Body::Text(val) => val.clone().into_bytes(),
        Body::Binary(val) => val.clone(),
    }
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::Empty)
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_query(request: Request, pairs: &[(&str, &str)]) -> Request {
    let params: HashMap<String, Vec<String>> = pairs
        .iter()
        .map(|(key, val)| (key.to_string(), vec![val.to_string()]))
        .collect();
    request.with_query_string_parameters(params)
}

/// Collects formatted tracing output for inspection.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Routes this thread's tracing events into a buffer until the guard drops.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}

pub fn head(uri: &str) -> Request {
    http::Request::builder()
        .method("HEAD")
        .uri(uri)
        .body(Body::Empty)
        .unwrap()
}
