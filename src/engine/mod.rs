//! Widget-management layer: owns the current dashboard state, turns user
//! intents into state transitions and bridges to storage.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::{DashboardError, Result};
use crate::layout::{ColumnPolicy, LayoutMap, LayoutSync, Placement, WidgetId};
use crate::logging::{ENGINE_TARGET, LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::{EngineMetrics, MetricSnapshot};
use crate::state::{DashboardState, Intent, apply_with};
use crate::storage::{DashboardStorage, KeyValueStore};
use crate::widget::{Widget, WidgetIdGenerator, WidgetKind};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Grid width used when placing new widgets.
    pub column_policy: ColumnPolicy,
    /// Optional structured logger used by the engine.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with whoever holds the handle.
    pub metrics: Option<Arc<Mutex<EngineMetrics>>>,
    /// Target field used for engine log events.
    pub log_target: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            column_policy: ColumnPolicy::default(),
            logger: None,
            metrics: None,
            log_target: ENGINE_TARGET.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_column_policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = policy;
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(EngineMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<EngineMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

#[derive(Debug, Default)]
pub struct DashboardEngine {
    state: DashboardState,
    config: EngineConfig,
    ids: WidgetIdGenerator,
}

impl DashboardEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_state(DashboardState::new(), config)
    }

    pub fn with_state(state: DashboardState, config: EngineConfig) -> Self {
        Self {
            state,
            config,
            ids: WidgetIdGenerator::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn into_state(self) -> DashboardState {
        self.state
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.state.widgets
    }

    pub fn layouts(&self) -> &LayoutMap {
        &self.state.layouts
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    fn sync(&self) -> LayoutSync {
        LayoutSync::new(self.config.column_policy)
    }

    /// Apply one intent to the current state.
    pub fn dispatch(&mut self, intent: Intent) -> &DashboardState {
        let name = intent.name();
        let detail = match &intent {
            Intent::AddWidget(widget) => Some(json_str("widget", widget.id.clone())),
            Intent::RemoveWidget(id) => Some(json_str("widget", id.clone())),
            Intent::UpdateWidgetLayout { widget_id, .. } => {
                Some(json_str("widget", widget_id.clone()))
            }
            _ => None,
        };
        let breakpoints = self.state.layouts.breakpoints().count();

        self.with_metrics(|metrics| {
            metrics.record_intent();
            match &intent {
                Intent::AddWidget(_) => metrics.record_add(breakpoints),
                Intent::RemoveWidget(_) => metrics.record_remove(),
                Intent::UpdateLayout(_) => metrics.record_layout_update(),
                _ => {}
            }
        });

        let sync = self.sync();
        let state = std::mem::take(&mut self.state);
        self.state = apply_with(&sync, state, intent);

        let mut fields = vec![
            json_kv("widgets", self.state.widgets.len()),
            json_kv("placements", self.state.layouts.placement_count()),
        ];
        fields.extend(detail);
        self.log(LogLevel::Debug, name, fields);
        &self.state
    }

    /// Create a widget of `kind`, place it on every breakpoint and return its id.
    pub fn add_widget(&mut self, kind: WidgetKind, config: Value) -> WidgetId {
        let id = self.ids.next_id();
        let widget = Widget::new(id.clone(), kind).with_config(config);
        self.dispatch(Intent::AddWidget(widget));
        id
    }

    pub fn remove_widget(&mut self, widget_id: &str) -> Result<()> {
        self.ensure_known(widget_id, "remove_widget")?;
        self.dispatch(Intent::RemoveWidget(widget_id.to_string()));
        Ok(())
    }

    /// Accept a layout reported by a drag/resize interaction.
    pub fn update_layout(&mut self, layouts: LayoutMap) {
        self.dispatch(Intent::UpdateLayout(layouts));
    }

    pub fn update_widget_layout(&mut self, widget_id: &str, layout: Placement) -> Result<()> {
        self.ensure_known(widget_id, "update_widget_layout")?;
        self.dispatch(Intent::UpdateWidgetLayout {
            widget_id: widget_id.to_string(),
            layout,
        });
        Ok(())
    }

    pub fn toggle_settings(&mut self) -> bool {
        self.dispatch(Intent::ToggleSettings).is_settings_open
    }

    /// Replace the layout map with its clamped form.
    pub fn validate_layouts(&mut self) {
        let validated = self.state.layouts.validated();
        if validated != self.state.layouts {
            self.dispatch(Intent::UpdateLayout(validated));
        }
    }

    /// Load widgets and layouts, falling back to empty defaults for entries
    /// that cannot be read, then repair any referential gaps between them.
    pub fn load<S: KeyValueStore>(&mut self, storage: &DashboardStorage<S>) {
        let widgets = storage.widgets().unwrap_or_else(|err| {
            self.log(
                LogLevel::Warn,
                "load_widgets_failed",
                [json_str("error", err.to_string())],
            );
            Vec::new()
        });
        let layouts = storage.layouts().unwrap_or_else(|err| {
            self.log(
                LogLevel::Warn,
                "load_layouts_failed",
                [json_str("error", err.to_string())],
            );
            LayoutMap::default()
        });

        self.dispatch(Intent::LoadWidgets(widgets));
        self.dispatch(Intent::LoadLayouts(layouts));

        let repaired = self.sync().reconcile(&self.state.widgets, &self.state.layouts);
        if repaired != self.state.layouts {
            let before = self.state.layouts.placement_count();
            let after = repaired.placement_count();
            self.with_metrics(|metrics| metrics.record_placements(after.saturating_sub(before)));
            self.log(
                LogLevel::Warn,
                "layouts_reconciled",
                [json_kv("before", before), json_kv("after", after)],
            );
            self.dispatch(Intent::LoadLayouts(repaired));
        }
    }

    pub fn persist<S: KeyValueStore>(&self, storage: &mut DashboardStorage<S>) -> Result<()> {
        storage.set_widgets(&self.state.widgets)?;
        storage.set_layouts(&self.state.layouts)?;
        Ok(())
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        metrics.lock().ok().map(|guard| guard.snapshot())
    }

    /// Log the current metrics snapshot, if both logger and metrics are configured.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) = (self.config.logger.as_ref(), self.metrics_snapshot())
        {
            let target = format!("{}.metrics", self.config.log_target);
            let _ = logger.log_event(snapshot.to_log_event(&target));
        }
    }

    fn ensure_known(&mut self, widget_id: &str, operation: &str) -> Result<()> {
        if self.state.contains_widget(widget_id) {
            return Ok(());
        }
        self.with_metrics(EngineMetrics::record_rejected);
        self.log(
            LogLevel::Warn,
            "unknown_widget",
            [json_str("widget", widget_id), json_kv("operation", json!(operation))],
        );
        Err(DashboardError::WidgetNotFound(widget_id.to_string()))
    }

    fn with_metrics(&self, record: impl FnOnce(&mut EngineMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
