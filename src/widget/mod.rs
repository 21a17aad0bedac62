//! Widget module orchestrator.
//!
//! Widget kinds form a closed set; per-kind sizing lives in a lookup table
//! rather than behind a trait.

mod core;

pub use self::core::{WIDGET_TYPES, Widget, WidgetIdGenerator, WidgetKind, WidgetType};
