//! Configuration for dockhand
//!
//! Global configuration lives at `~/.config/dockhand/config.toml`.

mod error;
mod global;

pub use error::*;
pub use global::*;
