//! Containers and the compose projects that group them

use dockhand_engine::ContainerId;

/// Project name given to containers without a compose project label
pub const STANDALONE_PROJECT: &str = "Standalone";

/// Normalized container lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Exited,
    Dead,
    Unknown,
}

impl ContainerState {
    /// Single-character status glyph used in the list
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Running => "●",
            Self::Paused => "‖",
            Self::Restarting => "↻",
            Self::Exited => "○",
            Self::Dead => "✗",
            Self::Created => "◦",
            Self::Unknown => "?",
        }
    }
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Restarting => write!(f, "restarting"),
            Self::Exited => write!(f, "exited"),
            Self::Dead => write!(f, "dead"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<&str> for ContainerState {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }
}

/// A container as of one inventory fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: ContainerId,
    /// Primary name without the engine's leading `/`
    pub name: String,
    /// Human-readable status text from the engine
    pub status: String,
    pub state: ContainerState,
    /// Owning compose project ([`STANDALONE_PROJECT`] when unlabelled)
    pub compose_project: String,
    pub compose_service: Option<String>,
    pub image: String,
}

impl Container {
    pub fn is_running(&self) -> bool {
        self.state == ContainerState::Running
    }
}

/// A named group of containers, ordered by container name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub containers: Vec<Container>,
}

impl Project {
    pub fn running_count(&self) -> usize {
        self.containers.iter().filter(|c| c.is_running()).count()
    }

    pub fn total_count(&self) -> usize {
        self.containers.len()
    }

    pub fn all_running(&self) -> bool {
        self.containers.iter().all(Container::is_running)
    }

    pub fn any_running(&self) -> bool {
        self.containers.iter().any(Container::is_running)
    }

    pub fn is_standalone(&self) -> bool {
        self.name == STANDALONE_PROJECT
    }
}
