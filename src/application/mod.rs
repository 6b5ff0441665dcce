//! Application layer - use cases and orchestration.
//!
//! Resolves repository sets, plans the reconciliation and applies it.

pub mod formatter;
pub mod mutator;
pub mod planner;
pub mod resolver;
pub mod session;

pub use formatter::{format_outcomes_table, format_summary};
pub use session::WatchSession;
