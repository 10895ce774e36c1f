//! Docker engine implementation using bollard

use crate::{ContainerId, ContainerRecord, EngineClient, EngineError, EngineInfo, Result};
use async_trait::async_trait;
use bollard::container::{
    ListContainersOptions, RemoveContainerOptions, RestartContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::Docker;
use dockhand_config::EngineConfig;

/// Where to look for the engine, in the order they are tried
#[derive(Debug, Clone, PartialEq, Eq)]
enum Endpoint {
    /// Endpoint set explicitly in the config file
    Configured(String),
    /// bollard's platform defaults (honours `DOCKER_HOST`)
    LocalDefaults,
    /// Well-known local socket
    Socket(String),
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured(addr) => write!(f, "{}", addr),
            Self::LocalDefaults => write!(f, "default transport"),
            Self::Socket(path) => write!(f, "unix://{}", path.trim_start_matches("unix://")),
        }
    }
}

/// Docker engine client using the bollard crate
pub struct DockerEngine {
    client: Docker,
    endpoint: String,
    stop_timeout: u32,
}

impl DockerEngine {
    /// Connect to the first reachable endpoint.
    ///
    /// Tries the configured endpoint (if any), then the default transport,
    /// then the fallback socket. Each candidate must answer a ping.
    pub async fn connect(config: &EngineConfig) -> Result<Self> {
        let mut failures = Vec::new();

        for endpoint in candidates(config) {
            let attempt = match open(&endpoint, config.timeout_secs) {
                Ok(client) => {
                    let engine = Self {
                        client,
                        endpoint: endpoint.to_string(),
                        stop_timeout: config.stop_timeout_secs,
                    };
                    engine.ping().await.map(|()| engine)
                }
                Err(e) => Err(e),
            };

            match attempt {
                Ok(engine) => {
                    tracing::info!("Connected to container engine at {}", endpoint);
                    return Ok(engine);
                }
                Err(e) => {
                    tracing::warn!("Engine not reachable at {}: {}", endpoint, e);
                    failures.push((endpoint, e));
                }
            }
        }

        Err(EngineError::Unavailable(format_connection_error(&failures)))
    }
}

fn candidates(config: &EngineConfig) -> Vec<Endpoint> {
    let mut endpoints = Vec::with_capacity(3);
    if let Some(addr) = config.endpoint.as_deref().filter(|a| !a.is_empty()) {
        endpoints.push(Endpoint::Configured(addr.to_string()));
    }
    endpoints.push(Endpoint::LocalDefaults);
    if !config.socket.is_empty() {
        endpoints.push(Endpoint::Socket(config.socket.clone()));
    }
    endpoints
}

/// Build a client for `endpoint`; nothing is sent until the first request
fn open(endpoint: &Endpoint, timeout: u64) -> Result<Docker> {
    match endpoint {
        Endpoint::LocalDefaults => Docker::connect_with_local_defaults()
            .map_err(|e| EngineError::Unavailable(e.to_string())),
        Endpoint::Configured(addr) | Endpoint::Socket(addr) => open_address(addr, timeout),
    }
}

fn open_address(addr: &str, timeout: u64) -> Result<Docker> {
    let client = if addr.starts_with("http://")
        || addr.starts_with("https://")
        || addr.starts_with("tcp://")
    {
        Docker::connect_with_http(addr, timeout, bollard::API_DEFAULT_VERSION)
    } else {
        // unix:// or a bare socket path
        let path = addr.trim_start_matches("unix://");
        Docker::connect_with_socket(path, timeout, bollard::API_DEFAULT_VERSION)
    };
    client.map_err(|e| EngineError::Unavailable(e.to_string()))
}

/// Build the message shown when no endpoint answered
fn format_connection_error(failures: &[(Endpoint, EngineError)]) -> String {
    let mut msg = String::from("no container engine answered");
    for (endpoint, err) in failures {
        msg.push_str(&format!("\n  {}: {}", endpoint, err));
    }
    msg
}

/// Listing failures are query errors unless the transport itself is down
fn query_error(err: bollard::errors::Error) -> EngineError {
    match EngineError::from(err) {
        EngineError::Runtime(msg) => EngineError::Query(msg),
        other => other,
    }
}

#[async_trait]
impl EngineClient for DockerEngine {
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerRecord>> {
        let options = ListContainersOptions::<String> {
            all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(options))
            .await
            .map_err(query_error)?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerRecord {
                id: ContainerId::new(c.id.unwrap_or_default()),
                names: c.names.unwrap_or_default(),
                status: c.status.unwrap_or_default(),
                state: c.state.unwrap_or_default(),
                image: c.image.unwrap_or_default(),
                labels: c.labels.unwrap_or_default(),
            })
            .collect())
    }

    async fn start_container(&self, id: &ContainerId) -> Result<()> {
        self.client
            .start_container(&id.0, None::<StartContainerOptions<String>>)
            .await?;
        Ok(())
    }

    async fn stop_container(&self, id: &ContainerId) -> Result<()> {
        let options = StopContainerOptions {
            t: self.stop_timeout as i64,
        };
        self.client.stop_container(&id.0, Some(options)).await?;
        Ok(())
    }

    async fn restart_container(&self, id: &ContainerId) -> Result<()> {
        let options = RestartContainerOptions {
            t: self.stop_timeout as isize,
        };
        self.client.restart_container(&id.0, Some(options)).await?;
        Ok(())
    }

    async fn remove_container(&self, id: &ContainerId, force: bool) -> Result<()> {
        let options = RemoveContainerOptions {
            force,
            ..Default::default()
        };
        self.client.remove_container(&id.0, Some(options)).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .ping()
            .await
            .map_err(|e| EngineError::Unavailable(e.to_string()))?;
        Ok(())
    }

    fn info(&self) -> EngineInfo {
        EngineInfo {
            endpoint: self.endpoint.clone(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
        }
    }
}
