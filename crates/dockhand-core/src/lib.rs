//! Core logic for dockhand
//!
//! This crate provides:
//! - The container/project data model
//! - Inventory fetching and compose-project grouping
//! - Lifecycle command dispatch for single containers and whole projects
//! - Refresh coordination (at most one fetch+apply cycle in flight)

mod dispatch;
mod error;
mod inventory;
mod model;
mod refresh;

pub use dispatch::*;
pub use error::*;
pub use inventory::*;
pub use model::*;
pub use refresh::*;
