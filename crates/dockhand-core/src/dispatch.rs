//! Lifecycle command dispatch for single containers and whole projects

use crate::{Container, CoreError, Project};
use dockhand_engine::EngineClient;
use futures::future::join_all;
use std::sync::Arc;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start, or restart when already running (the "Restart/Start" control)
    Start,
    Stop,
    Restart,
}

/// The engine call actually issued for each affected container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Start,
    Stop,
    Restart,
}

impl LifecycleAction {
    fn verb(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }

    fn progressive(&self) -> &'static str {
        match self {
            Self::Start => "Starting",
            Self::Stop => "Stopping",
            Self::Restart => "Restarting",
        }
    }

    fn past(&self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
            Self::Restart => "restarted",
        }
    }
}

/// The entity a command applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Container(Container),
    Project(Project),
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Self::Container(c) => &c.name,
            Self::Project(p) => &p.name,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Self::Container(_) => "container",
            Self::Project(_) => "project",
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Self::Container(c) => c.is_running(),
            Self::Project(p) => p.any_running(),
        }
    }

    fn containers(&self) -> Vec<&Container> {
        match self {
            Self::Container(c) => vec![c],
            Self::Project(p) => p.containers.iter().collect(),
        }
    }
}

/// Decide which engine call an intent turns into for this target.
///
/// `Start` becomes `Restart` when the container is running, or when a project
/// has at least one running member.
pub fn resolve_action(intent: Intent, target: &Target) -> LifecycleAction {
    match intent {
        Intent::Start if target.is_active() => LifecycleAction::Restart,
        Intent::Start => LifecycleAction::Start,
        Intent::Stop => LifecycleAction::Stop,
        Intent::Restart => LifecycleAction::Restart,
    }
}

/// Status text shown while a command is in flight
pub fn progress_message(intent: Intent, target: &Target) -> String {
    let action = resolve_action(intent, target);
    format!("{} {} {}...", action.progressive(), target.noun(), target.name())
}

/// Status text shown once a command has finished
pub fn result_message(intent: Intent, target: &Target, success: bool) -> String {
    let action = resolve_action(intent, target);
    if success {
        let noun = match target {
            Target::Container(_) => "Container",
            Target::Project(_) => "Project",
        };
        format!("{} {} {} successfully", noun, target.name(), action.past())
    } else {
        format!("Failed to {} {} {}", action.verb(), target.noun(), target.name())
    }
}

/// Turns intents into engine lifecycle calls
#[derive(Clone)]
pub struct CommandDispatcher {
    engine: Arc<dyn EngineClient>,
}

impl CommandDispatcher {
    pub fn new(engine: Arc<dyn EngineClient>) -> Self {
        Self { engine }
    }

    /// Run `intent` against `target` and report overall success.
    ///
    /// Project targets fan out to every member concurrently. Every call is
    /// attempted even when a sibling fails; the result is true only if all
    /// succeeded. Engine errors never escape, they are logged and counted as
    /// failures. The caller is responsible for refreshing afterwards.
    pub async fn execute(&self, intent: Intent, target: &Target) -> bool {
        let action = resolve_action(intent, target);
        let containers = target.containers();

        tracing::info!(
            "Dispatching {} to {} {} ({} containers)",
            action.verb(),
            target.noun(),
            target.name(),
            containers.len()
        );

        let results = join_all(containers.into_iter().map(|c| self.run(action, c))).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            tracing::warn!("{}", err);
        }
        if failed > 0 {
            tracing::warn!(
                "{} of {} {} calls failed for {} {}",
                failed,
                results.len(),
                action.verb(),
                target.noun(),
                target.name()
            );
        }

        failed == 0
    }

    async fn run(&self, action: LifecycleAction, container: &Container) -> Result<(), CoreError> {
        let result = match action {
            LifecycleAction::Start => self.engine.start_container(&container.id).await,
            LifecycleAction::Stop => self.engine.stop_container(&container.id).await,
            LifecycleAction::Restart => self.engine.restart_container(&container.id).await,
        };

        result.map_err(|e| {
            CoreError::CommandFailure(format!(
                "Failed to {} container {} ({}): {}",
                action.verb(),
                container.name,
                container.id.short(),
                e
            ))
        })
    }
}
