//! Persistence for widgets, layouts and settings.
//!
//! The layout engine never touches storage; the engine's `load`/`persist`
//! calls are the only bridge.

mod core;
mod dashboard;

pub use self::core::{DirectoryStore, KeyValueStore, MemoryStore};
pub use dashboard::{
    Backup, CURRENT_VERSION, DASHBOARD_KEYS, DashboardSettings, DashboardStorage, LAYOUTS_KEY,
    PREFERENCES_KEY, SETTINGS_KEY, StorageInfo, StorageItem, Theme, UserPreferences, VERSION_KEY,
    WIDGETS_KEY,
};
