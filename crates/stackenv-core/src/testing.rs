//! Scripted provider client and log recorder for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, OnceLock};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::provider::ProviderClient;

/// A provider client that replays queued responses.
///
/// Responses are keyed by (service, operation) and consumed in FIFO order,
/// so paginated listings are scripted as one queued response per page.
/// Every request is recorded for assertions on parameters.
pub(crate) struct MockProvider {
    region: String,
    account_id: String,
    stack_name: String,
    responses: Mutex<HashMap<(String, String), VecDeque<Result<Value>>>>,
    requests: Mutex<Vec<(String, String, Value)>>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self {
            region: "us-east-1".into(),
            account_id: "123456789012".into(),
            stack_name: "test-stack".into(),
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub(crate) fn with_stack_name(mut self, stack_name: impl Into<String>) -> Self {
        self.stack_name = stack_name.into();
        self
    }

    /// Queue a successful response for (service, operation).
    pub(crate) fn enqueue(&self, service: &str, operation: &str, response: Value) {
        self.responses
            .lock()
            .unwrap()
            .entry((service.to_string(), operation.to_string()))
            .or_default()
            .push_back(Ok(response));
    }

    /// Queue a failure for (service, operation).
    pub(crate) fn enqueue_err(&self, service: &str, operation: &str, error: Error) {
        self.responses
            .lock()
            .unwrap()
            .entry((service.to_string(), operation.to_string()))
            .or_default()
            .push_back(Err(error));
    }

    /// All requests issued so far, in order.
    pub(crate) fn requests(&self) -> Vec<(String, String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn request(&self, service: &str, operation: &str, params: Value) -> Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((service.to_string(), operation.to_string(), params));

        self.responses
            .lock()
            .unwrap()
            .get_mut(&(service.to_string(), operation.to_string()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(Error::provider(
                    service,
                    operation,
                    "no scripted response queued",
                ))
            })
    }

    fn region(&self) -> String {
        self.region.clone()
    }

    async fn account_id(&self) -> Result<String> {
        Ok(self.account_id.clone())
    }

    fn stack_name(&self) -> String {
        self.stack_name.clone()
    }
}

static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());
static CAPTURE_LOCK: Mutex<()> = Mutex::new(());

struct RecordingLogger;

impl log::Log for RecordingLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Record everything logged until dropped.
///
/// The process-wide logger can only be installed once, so the recorder is
/// global; the returned guard serializes capturing tests against each other.
/// Tests that do not capture still log concurrently into the shared buffer,
/// so assertions should count messages naming something unique to the test.
pub(crate) struct LogCapture {
    _guard: MutexGuard<'static, ()>,
}

pub(crate) fn capture_logs() -> LogCapture {
    static INSTALL: OnceLock<()> = OnceLock::new();
    INSTALL.get_or_init(|| {
        log::set_boxed_logger(Box::new(RecordingLogger)).expect("logger already installed");
        log::set_max_level(log::LevelFilter::Debug);
    });

    // A failed capturing test must not poison the lock for the rest.
    let guard = CAPTURE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    RECORDS.lock().unwrap().clear();
    LogCapture { _guard: guard }
}

impl LogCapture {
    /// All records captured so far, in order.
    pub(crate) fn records(&self) -> Vec<(log::Level, String)> {
        RECORDS.lock().unwrap().clone()
    }

    /// Warning messages captured so far.
    pub(crate) fn warnings(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(level, _)| *level == log::Level::Warn)
            .map(|(_, message)| message)
            .collect()
    }
}
