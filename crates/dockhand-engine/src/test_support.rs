//! Test support utilities for dockhand-engine
//!
//! Provides MockEngine for exercising inventory, dispatch and refresh logic
//! without a real Docker daemon.

use crate::*;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Records which methods were called on the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List { all: bool },
    Start { id: String },
    Stop { id: String },
    Restart { id: String },
    Remove { id: String, force: bool },
    Ping,
}

impl MockCall {
    /// Whether this call changes a container's lifecycle state
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            MockCall::Start { .. } | MockCall::Stop { .. } | MockCall::Restart { .. }
        )
    }
}

/// Holds listing calls open until released.
///
/// Obtained from [`MockEngine::hold_list`]. Every `list_containers` call made
/// while the gate is closed waits; `release` lets all of them through.
#[derive(Clone)]
pub struct ListGate(Arc<Semaphore>);

impl ListGate {
    /// Let every waiting and future listing call proceed
    pub fn release(&self) {
        self.0.close();
    }
}

/// Configurable mock engine for testing
pub struct MockEngine {
    calls: Mutex<Vec<MockCall>>,
    /// Result for list calls
    list_result: Mutex<Result<Vec<ContainerRecord>>>,
    /// Container ids whose lifecycle calls fail
    failing_ids: Mutex<HashSet<String>>,
    /// Result for ping calls
    ping_result: Mutex<Result<()>>,
    list_gate: Mutex<Option<ListGate>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Create a mock with an empty listing and succeeding calls
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            list_result: Mutex::new(Ok(Vec::new())),
            failing_ids: Mutex::new(HashSet::new()),
            ping_result: Mutex::new(Ok(())),
            list_gate: Mutex::new(None),
        }
    }

    /// Create a mock serving the given listing
    pub fn with_containers(records: Vec<ContainerRecord>) -> Self {
        let mock = Self::new();
        mock.set_containers(records);
        mock
    }

    /// Replace the listing returned by subsequent list calls
    pub fn set_containers(&self, records: Vec<ContainerRecord>) {
        *self.list_result.lock().unwrap() = Ok(records);
    }

    /// Make subsequent list calls fail
    pub fn fail_list(&self, err: EngineError) {
        *self.list_result.lock().unwrap() = Err(err);
    }

    /// Make subsequent pings fail
    pub fn fail_ping(&self, err: EngineError) {
        *self.ping_result.lock().unwrap() = Err(err);
    }

    /// Make lifecycle calls against `id` fail
    pub fn fail_container(&self, id: &str) {
        self.failing_ids.lock().unwrap().insert(id.to_string());
    }

    /// Hold list calls open until the returned gate is released
    pub fn hold_list(&self) -> ListGate {
        let gate = ListGate(Arc::new(Semaphore::new(0)));
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Record a call
    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get recorded start/stop/restart calls only
    pub fn lifecycle_calls(&self) -> Vec<MockCall> {
        self.get_calls()
            .into_iter()
            .filter(MockCall::is_lifecycle)
            .collect()
    }

    /// Number of list calls made so far
    pub fn list_count(&self) -> usize {
        self.get_calls()
            .iter()
            .filter(|c| matches!(c, MockCall::List { .. }))
            .count()
    }

    /// Check if a specific call was made
    pub fn was_called(&self, call: &MockCall) -> bool {
        self.calls.lock().unwrap().contains(call)
    }

    fn lifecycle_result(&self, id: &ContainerId) -> Result<()> {
        if self.failing_ids.lock().unwrap().contains(&id.0) {
            Err(EngineError::Runtime(format!("mock failure for {}", id)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EngineClient for MockEngine {
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerRecord>> {
        self.record(MockCall::List { all });

        let gate = self.list_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            // Closed semaphore means the gate was released
            let _ = gate.0.acquire().await;
        }

        self.list_result.lock().unwrap().clone()
    }

    async fn start_container(&self, id: &ContainerId) -> Result<()> {
        self.record(MockCall::Start { id: id.0.clone() });
        self.lifecycle_result(id)
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<()> {
        self.record(MockCall::Stop { id: id.0.clone() });
        self.lifecycle_result(id)
    }

    async fn restart_container(&self, id: &ContainerId) -> Result<()> {
        self.record(MockCall::Restart { id: id.0.clone() });
        self.lifecycle_result(id)
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<()> {
        self.record(MockCall::Remove {
            id: id.0.clone(),
            force,
        });
        self.lifecycle_result(id)
    }

    async fn ping(&self) -> Result<()> {
        self.record(MockCall::Ping);
        self.ping_result.lock().unwrap().clone()
    }

    fn info(&self) -> EngineInfo {
        EngineInfo {
            endpoint: "mock://engine".to_string(),
            api_version: "mock".to_string(),
        }
    }
}

/// Build a raw record the way the engine reports it (name prefixed with `/`)
pub fn record(
    id: &str,
    name: &str,
    state: &str,
    project: Option<&str>,
    service: Option<&str>,
) -> ContainerRecord {
    let mut labels = HashMap::new();
    if let Some(project) = project {
        labels.insert(COMPOSE_PROJECT_LABEL.to_string(), project.to_string());
    }
    if let Some(service) = service {
        labels.insert(COMPOSE_SERVICE_LABEL.to_string(), service.to_string());
    }

    ContainerRecord {
        id: ContainerId::new(id),
        names: vec![format!("/{}", name)],
        status: match state {
            "running" => "Up 5 minutes".to_string(),
            "exited" => "Exited (0) 1 hour ago".to_string(),
            other => other.to_string(),
        },
        state: state.to_string(),
        image: format!("{}:latest", name),
        labels,
    }
}
