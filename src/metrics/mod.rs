use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated by the engine across applied intents.
#[derive(Debug, Default, Clone)]
pub struct EngineMetrics {
    intents: u64,
    widgets_added: u64,
    widgets_removed: u64,
    layout_updates: u64,
    placements_computed: u64,
    rejected: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_intent(&mut self) {
        self.intents = self.intents.saturating_add(1);
    }

    /// One widget added, placed on `breakpoints` breakpoints.
    pub fn record_add(&mut self, breakpoints: usize) {
        self.widgets_added = self.widgets_added.saturating_add(1);
        self.placements_computed = self.placements_computed.saturating_add(breakpoints as u64);
    }

    pub fn record_remove(&mut self) {
        self.widgets_removed = self.widgets_removed.saturating_add(1);
    }

    pub fn record_layout_update(&mut self) {
        self.layout_updates = self.layout_updates.saturating_add(1);
    }

    /// Placements created outside an add, e.g. while reconciling a loaded snapshot.
    pub fn record_placements(&mut self, count: usize) {
        if count > 0 {
            self.placements_computed = self.placements_computed.saturating_add(count as u64);
        }
    }

    pub fn record_rejected(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            intents: self.intents,
            widgets_added: self.widgets_added,
            widgets_removed: self.widgets_removed,
            layout_updates: self.layout_updates,
            placements_computed: self.placements_computed,
            rejected: self.rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub intents: u64,
    pub widgets_added: u64,
    pub widgets_removed: u64,
    pub layout_updates: u64,
    pub placements_computed: u64,
    pub rejected: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "engine_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("intents".to_string(), json!(self.intents));
        map.insert("widgets_added".to_string(), json!(self.widgets_added));
        map.insert("widgets_removed".to_string(), json!(self.widgets_removed));
        map.insert("layout_updates".to_string(), json!(self.layout_updates));
        map.insert(
            "placements_computed".to_string(),
            json!(self.placements_computed),
        );
        map.insert("rejected".to_string(), json!(self.rejected));
        map
    }
}
