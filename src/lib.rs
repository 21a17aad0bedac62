//! Responsive dashboard grid engine.
//!
//! Widgets live on a multi-column grid with five breakpoints. The `layout`
//! module decides where new widgets land and keeps every breakpoint's
//! placements in step with the widget collection; `state` wraps that in a
//! pure transition function and `engine` drives it with logging, metrics and
//! storage.

pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod state;
pub mod storage;
pub mod widget;

pub use engine::{DashboardEngine, EngineConfig};
pub use error::{DashboardError, Result};
pub use geometry::{Rect, Size};
pub use layout::{
    Bounds, Breakpoint, ColumnPolicy, LayoutMap, LayoutSync, PartialPlacement, Placement,
    RawLayoutMap, WidgetId, find_placement, try_find_placement, validate,
};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{EngineMetrics, MetricSnapshot};
pub use state::{DashboardState, Intent, apply, apply_with};
pub use storage::{
    DashboardSettings, DashboardStorage, DirectoryStore, KeyValueStore, MemoryStore,
    UserPreferences,
};
pub use widget::{Widget, WidgetKind};
