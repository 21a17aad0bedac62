//! Error module orchestrator.

mod types;

pub use types::{DashboardError, Result};
