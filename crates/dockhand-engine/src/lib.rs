//! Container engine client for dockhand
//!
//! This crate provides the [`EngineClient`] abstraction the dashboard talks
//! to, and a Docker-compatible implementation built on bollard.

mod docker;
mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod types;

pub use docker::DockerEngine;
pub use error::*;
pub use types::*;

use async_trait::async_trait;
use dockhand_config::EngineConfig;
use std::sync::Arc;

/// Operations the dashboard needs from a container engine.
///
/// Implementations must tolerate concurrent independent calls; the client is
/// shared as `Arc<dyn EngineClient>` between the UI and background tasks.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// List containers, including stopped ones when `all` is set
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerRecord>>;

    /// Start a container
    async fn start_container(&self, id: &ContainerId) -> Result<()>;

    /// Stop a container
    async fn stop_container(&self, id: &ContainerId) -> Result<()>;

    /// Restart a container
    async fn restart_container(&self, id: &ContainerId) -> Result<()>;

    /// Remove a container
    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<()>;

    /// Check the engine is reachable
    async fn ping(&self) -> Result<()>;

    /// Describe the connected engine
    fn info(&self) -> EngineInfo;
}

/// Connect to the engine described by `config` and hand back a shareable client.
pub async fn connect(config: &EngineConfig) -> Result<Arc<dyn EngineClient>> {
    let engine = DockerEngine::connect(config).await?;
    Ok(Arc::new(engine))
}
