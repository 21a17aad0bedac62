use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::core::KeyValueStore;
use crate::error::{DashboardError, Result};
use crate::layout::{LayoutMap, LayoutSync};
use crate::logging::{LogLevel, Logger, STORAGE_TARGET, current_ms, event_with_fields, json_kv, json_str};
use crate::widget::Widget;

pub const WIDGETS_KEY: &str = "dashboard-widgets";
pub const LAYOUTS_KEY: &str = "dashboard-layouts";
pub const SETTINGS_KEY: &str = "dashboard-settings";
pub const PREFERENCES_KEY: &str = "user-preferences";
pub const VERSION_KEY: &str = "dashboard-version";

/// Keys owned by the dashboard, cleared together by [`DashboardStorage::clear_dashboard_data`].
pub const DASHBOARD_KEYS: [&str; 4] = [WIDGETS_KEY, LAYOUTS_KEY, SETTINGS_KEY, PREFERENCES_KEY];

pub const CURRENT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

/// User-editable dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    pub name: String,
    pub description: String,
    pub theme: Theme,
    pub grid_size: u32,
    pub enable_animations: bool,
    pub auto_refresh: bool,
    /// Seconds between refreshes when `auto_refresh` is on.
    pub refresh_interval: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            name: "My Dashboard".to_string(),
            description: "A customizable dashboard with drag-and-drop widgets".to_string(),
            theme: Theme::Light,
            grid_size: 12,
            enable_animations: true,
            auto_refresh: false,
            refresh_interval: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub recent_widgets: Vec<String>,
    pub favorite_layouts: Vec<Value>,
    pub collapsed_sections: Vec<String>,
}

/// Byte usage of one storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageItem {
    pub key: &'static str,
    pub size: usize,
    pub has_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    pub total_size: usize,
    pub items: Vec<StorageItem>,
}

/// Full export of everything the dashboard persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default)]
    pub version: Option<String>,
    pub widgets: Vec<Widget>,
    pub layouts: LayoutMap,
    #[serde(default)]
    pub settings: Option<DashboardSettings>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    #[serde(default)]
    pub exported_at_ms: u128,
}

/// Typed view over a [`KeyValueStore`] holding JSON documents.
#[derive(Debug)]
pub struct DashboardStorage<S> {
    store: S,
    logger: Option<Logger>,
}

impl<S: KeyValueStore> DashboardStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set_raw(key, raw)
    }

    pub fn widgets(&self) -> Result<Vec<Widget>> {
        Ok(self.read(WIDGETS_KEY)?.unwrap_or_default())
    }

    pub fn set_widgets(&mut self, widgets: &[Widget]) -> Result<()> {
        self.write(WIDGETS_KEY, widgets)
    }

    /// Stored layouts. Each record is validated as it is read.
    pub fn layouts(&self) -> Result<LayoutMap> {
        Ok(self.read(LAYOUTS_KEY)?.unwrap_or_default())
    }

    pub fn set_layouts(&mut self, layouts: &LayoutMap) -> Result<()> {
        self.write(LAYOUTS_KEY, layouts)
    }

    pub fn settings(&self) -> Result<DashboardSettings> {
        Ok(self.read(SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn set_settings(&mut self, settings: &DashboardSettings) -> Result<()> {
        self.write(SETTINGS_KEY, settings)
    }

    pub fn preferences(&self) -> Result<UserPreferences> {
        Ok(self.read(PREFERENCES_KEY)?.unwrap_or_default())
    }

    pub fn set_preferences(&mut self, preferences: &UserPreferences) -> Result<()> {
        self.write(PREFERENCES_KEY, preferences)
    }

    pub fn clear_dashboard_data(&mut self) -> Result<()> {
        for key in DASHBOARD_KEYS {
            self.store.remove(key)?;
        }
        self.emit(LogLevel::Info, "cleared", [json_kv("keys", DASHBOARD_KEYS.len())]);
        Ok(())
    }

    pub fn storage_info(&self) -> Result<StorageInfo> {
        let mut items = Vec::with_capacity(DASHBOARD_KEYS.len());
        for key in DASHBOARD_KEYS {
            let raw = self.store.get_raw(key)?;
            items.push(StorageItem {
                key,
                size: raw.as_ref().map_or(0, String::len),
                has_data: raw.is_some_and(|r| !r.is_empty()),
            });
        }
        Ok(StorageInfo {
            total_size: items.iter().map(|item| item.size).sum(),
            items,
        })
    }

    pub fn version(&self) -> Result<Option<String>> {
        self.read(VERSION_KEY)
    }

    /// Stamp `version` unless a version is already recorded.
    pub fn initialize(&mut self, version: &str) -> Result<()> {
        if self.version()?.is_none() {
            self.write(VERSION_KEY, version)?;
        }
        Ok(())
    }

    pub fn needs_migration(&self, version: &str) -> Result<bool> {
        Ok(self.version()?.as_deref() != Some(version))
    }

    /// Bring stored data up to `to_version`: layouts are validated, stripped
    /// of orphaned or duplicate placements, and filled in for widgets that
    /// lack one. Returns the number of placements dropped.
    pub fn migrate(&mut self, to_version: &str) -> Result<usize> {
        let from = self.version()?;
        let widgets = self.widgets()?;
        let layouts = self.layouts()?;

        let repaired = LayoutSync::default().reconcile(&widgets, &layouts);
        let added: usize = repaired
            .iter()
            .map(|(breakpoint, list)| {
                list.iter()
                    .filter(|p| layouts.placement(breakpoint, &p.id).is_none())
                    .count()
            })
            .sum();
        // repaired = kept + added, stored = kept + dropped
        let dropped = layouts.placement_count() + added - repaired.placement_count();

        self.set_layouts(&repaired)?;
        self.write(VERSION_KEY, to_version)?;
        self.emit(
            LogLevel::Info,
            "migrated",
            [
                json_kv("from", from),
                json_str("to", to_version),
                json_kv("dropped_placements", dropped),
            ],
        );
        Ok(dropped)
    }

    pub fn export_backup(&self) -> Result<Backup> {
        Ok(Backup {
            version: self.version()?,
            widgets: self.widgets()?,
            layouts: self.layouts()?,
            settings: Some(self.settings()?),
            preferences: Some(self.preferences()?),
            exported_at_ms: current_ms(),
        })
    }

    pub fn export_backup_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_backup()?)?)
    }

    /// Restore from a backup document. `widgets` and `layouts` are required.
    pub fn import_backup(&mut self, json: &str) -> Result<Backup> {
        let value: Value = serde_json::from_str(json)?;
        let has = |key: &str| value.get(key).is_some_and(|v| !v.is_null());
        if !has("widgets") || !has("layouts") {
            return Err(DashboardError::InvalidBackup(
                "backup must contain widgets and layouts".to_string(),
            ));
        }
        let backup: Backup = serde_json::from_value(value)?;

        self.set_widgets(&backup.widgets)?;
        self.set_layouts(&backup.layouts)?;
        if let Some(settings) = &backup.settings {
            self.set_settings(settings)?;
        }
        if let Some(preferences) = &backup.preferences {
            self.set_preferences(preferences)?;
        }
        if let Some(version) = &backup.version {
            self.write(VERSION_KEY, version)?;
        }
        self.emit(
            LogLevel::Info,
            "backup_imported",
            [json_kv("widgets", backup.widgets.len())],
        );
        Ok(backup)
    }

    fn emit(&self, level: LogLevel, message: &str, fields: impl IntoIterator<Item = (String, Value)>) {
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(event_with_fields(level, STORAGE_TARGET, message, fields));
        }
    }
}
