//! Common types exchanged with the container engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label the compose tooling puts on every container of a project
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";

/// Label carrying the compose service a container was created for
pub const COMPOSE_SERVICE_LABEL: &str = "com.docker.compose.service";

/// Container ID wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        if self.0.len() > 12 {
            &self.0[..12]
        } else {
            &self.0
        }
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One container as reported by the engine's listing call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: ContainerId,
    /// Names as the engine reports them, usually prefixed with `/`
    pub names: Vec<String>,
    /// Human-readable status ("Up 3 minutes", "Exited (0) 2 hours ago")
    pub status: String,
    /// Lifecycle state string ("running", "exited", ...)
    pub state: String,
    pub image: String,
    pub labels: HashMap<String, String>,
}

impl ContainerRecord {
    /// Compose project label, if present and non-empty
    pub fn compose_project(&self) -> Option<&str> {
        self.label(COMPOSE_PROJECT_LABEL)
    }

    /// Compose service label, if present and non-empty
    pub fn compose_service(&self) -> Option<&str> {
        self.label(COMPOSE_SERVICE_LABEL)
    }

    fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Engine identity, shown in the dashboard header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInfo {
    /// Endpoint the client ended up connected to
    pub endpoint: String,
    pub api_version: String,
}
