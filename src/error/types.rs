use thiserror::Error;

/// Unified result type for the dashgrid crate.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors surfaced by the dashboard layout engine and its storage layer.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("widget `{0}` not found")]
    WidgetNotFound(String),
    #[error("widget width {width} exceeds the {columns} available grid columns")]
    WidthExceedsColumns { width: u32, columns: u32 },
    #[error("invalid backup file format: {0}")]
    InvalidBackup(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
