//! Layout module orchestrator.
//!
//! Placement search, per-breakpoint synchronisation and record validation.
//! None of it performs I/O; callers pass snapshots in and get new ones back.

mod breakpoint;
mod map;
mod placement;
pub mod search;
mod sync;
pub mod validate;

pub use breakpoint::Breakpoint;
pub use map::{LayoutMap, RawLayoutMap};
pub use placement::{Bounds, PartialPlacement, Placement, WidgetId};
pub use search::{find_placement, try_find_placement};
pub use sync::{ColumnPolicy, LEGACY_COLUMNS, LayoutSync, MIN_COLUMNS, Snapshot};
pub use validate::{validate, validate_placement};
