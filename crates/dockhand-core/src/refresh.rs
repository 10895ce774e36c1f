//! Refresh coordination
//!
//! A refresh cycle is one fetch followed by the UI applying the result. At
//! most one cycle is in flight: the coordinator hands out a single permit and
//! the permit rides inside the [`RefreshOutcome`] until the UI drops it, so
//! the apply step is covered too. Triggers that arrive while a cycle is in
//! flight are refused and the caller decides whether to drop or retry them.

use crate::{fetch_projects, Project, Result};
use dockhand_engine::EngineClient;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

/// Status shown while a user-triggered refresh is fetching
pub const LOADING_STATUS: &str = "Loading...";

/// What started a refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Explicit request (startup, F5, after a command)
    User,
    /// Periodic timer
    Auto,
}

/// Where the single refresh cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Fetching,
    Applying,
}

impl RefreshPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Fetching,
            2 => Self::Applying,
            _ => Self::Idle,
        }
    }
}

/// Held for the whole cycle; returns the coordinator to `Idle` when dropped
#[derive(Debug)]
struct RefreshGuard {
    _permit: OwnedSemaphorePermit,
    phase: Arc<AtomicU8>,
}

impl RefreshGuard {
    fn set(&self, phase: RefreshPhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.set(RefreshPhase::Idle);
    }
}

/// Result of one fetch, waiting to be applied.
///
/// Keeps the cycle exclusive until dropped.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub trigger: RefreshTrigger,
    pub generation: u64,
    pub result: Result<Vec<Project>>,
    guard: RefreshGuard,
}

impl RefreshOutcome {
    /// Status line describing this outcome
    pub fn status_message(&self) -> String {
        match (&self.result, self.trigger) {
            (Ok(projects), RefreshTrigger::User) => {
                format!("Loaded {}", summary(projects))
            }
            (Ok(projects), RefreshTrigger::Auto) => {
                format!("Auto-refreshed: {}", summary(projects))
            }
            (Err(e), RefreshTrigger::User) => format!("Error: {}", e),
            (Err(e), RefreshTrigger::Auto) => format!("Auto-refresh error: {}", e),
        }
    }
}

fn summary(projects: &[Project]) -> String {
    let total: usize = projects.iter().map(Project::total_count).sum();
    format!("{} containers in {} projects", total, projects.len())
}

/// Serializes refresh cycles against one engine
pub struct RefreshCoordinator {
    engine: Arc<dyn EngineClient>,
    permit: Arc<Semaphore>,
    phase: Arc<AtomicU8>,
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RefreshCoordinator {
    pub fn new(engine: Arc<dyn EngineClient>) -> Self {
        Self {
            engine,
            permit: Arc::new(Semaphore::new(1)),
            phase: Arc::new(AtomicU8::new(RefreshPhase::Idle as u8)),
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    pub fn phase(&self) -> RefreshPhase {
        RefreshPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != RefreshPhase::Idle
    }

    /// Claim the cycle, or `None` if one is already in flight
    fn begin(&self) -> Option<(RefreshGuard, u64)> {
        let permit = Arc::clone(&self.permit).try_acquire_owned().ok()?;
        let guard = RefreshGuard {
            _permit: permit,
            phase: Arc::clone(&self.phase),
        };
        guard.set(RefreshPhase::Fetching);
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Some((guard, generation))
    }

    /// Start a fetch on a background task and hand the outcome to `deliver`.
    ///
    /// `deliver` runs on the background task; it is expected to post the
    /// outcome to whoever owns the view. Returns `None` when refused.
    pub fn spawn<F>(&self, trigger: RefreshTrigger, deliver: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(RefreshOutcome) + Send + 'static,
    {
        let Some((guard, generation)) = self.begin() else {
            tracing::debug!("Refresh ({:?}) refused, cycle already in flight", trigger);
            return None;
        };

        let engine = Arc::clone(&self.engine);
        Some(tokio::spawn(async move {
            deliver(fetch(engine, trigger, generation, guard).await);
        }))
    }

    /// Whether an outcome is still worth applying.
    ///
    /// Rejects outcomes older than the newest one already accepted.
    pub fn accept(&self, outcome: &RefreshOutcome) -> bool {
        self.accept_generation(outcome.generation)
    }

    fn accept_generation(&self, generation: u64) -> bool {
        let newest = self.applied.fetch_max(generation, Ordering::SeqCst);
        if generation <= newest {
            tracing::debug!(
                "Discarding stale refresh #{} (newest applied #{})",
                generation,
                newest
            );
            return false;
        }
        true
    }
}

async fn fetch(
    engine: Arc<dyn EngineClient>,
    trigger: RefreshTrigger,
    generation: u64,
    guard: RefreshGuard,
) -> RefreshOutcome {
    let result = fetch_projects(engine.as_ref()).await;
    match &result {
        Ok(projects) => tracing::debug!(
            "Refresh #{} ({:?}) fetched {}",
            generation,
            trigger,
            summary(projects)
        ),
        Err(e) => tracing::warn!("Refresh #{} ({:?}) failed: {}", generation, trigger, e),
    }
    guard.set(RefreshPhase::Applying);

    RefreshOutcome {
        trigger,
        generation,
        result,
        guard,
    }
}
