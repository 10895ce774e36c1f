//! Inventory fetching: engine listing to sorted compose projects

use crate::{Container, ContainerState, Project, Result, STANDALONE_PROJECT};
use dockhand_engine::{ContainerRecord, EngineClient};
use std::collections::BTreeMap;

/// Fetch every container (stopped ones included) and group them into projects.
///
/// Projects come back sorted by name, containers within a project by name.
pub async fn fetch_projects(engine: &dyn EngineClient) -> Result<Vec<Project>> {
    let records = engine.list_containers(true).await?;
    tracing::debug!("Engine listed {} containers", records.len());
    Ok(group_projects(records))
}

/// Map raw records to containers and group them by compose project.
///
/// Total: records without a usable project label land in
/// [`STANDALONE_PROJECT`], nothing is rejected.
pub fn group_projects(records: Vec<ContainerRecord>) -> Vec<Project> {
    let mut groups: BTreeMap<String, Vec<Container>> = BTreeMap::new();

    for container in records.into_iter().map(to_container) {
        groups
            .entry(container.compose_project.clone())
            .or_default()
            .push(container);
    }

    groups
        .into_iter()
        .map(|(name, mut containers)| {
            containers.sort_by(|a, b| a.name.cmp(&b.name));
            Project { name, containers }
        })
        .collect()
}

/// Convert one engine record into a container
pub fn to_container(record: ContainerRecord) -> Container {
    let compose_project = record
        .compose_project()
        .unwrap_or(STANDALONE_PROJECT)
        .to_string();
    let compose_service = record.compose_service().map(str::to_string);

    let name = record
        .names
        .first()
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_default();

    Container {
        id: record.id,
        name,
        status: record.status,
        state: ContainerState::from(record.state.as_str()),
        compose_project,
        compose_service,
        image: record.image,
    }
}
