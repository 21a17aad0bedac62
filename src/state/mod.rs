//! Dashboard state and the pure transition function over it.
//!
//! `apply` interprets one [`Intent`] against a state snapshot and returns the
//! next snapshot. Nothing here dispatches, stores or logs.

use serde::{Deserialize, Serialize};

use crate::layout::{LayoutMap, LayoutSync, Placement, WidgetId};
use crate::widget::Widget;

/// Everything the dashboard needs to render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub widgets: Vec<Widget>,
    pub layouts: LayoutMap,
    #[serde(default)]
    pub is_settings_open: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn contains_widget(&self, id: &str) -> bool {
        self.widget(id).is_some()
    }

    /// True when the layout map references exactly the current widgets.
    pub fn is_consistent(&self) -> bool {
        self.layouts
            .is_consistent_with(self.widgets.iter().map(|w| &w.id))
    }
}

/// State transitions requested by the widget-management layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Replace the widget collection, e.g. after reading storage.
    LoadWidgets(Vec<Widget>),
    /// Replace the layout map, e.g. after reading storage.
    LoadLayouts(LayoutMap),
    AddWidget(Widget),
    RemoveWidget(WidgetId),
    /// Layout reported by a drag/resize interaction for all breakpoints.
    UpdateLayout(LayoutMap),
    /// Record a widget's own last-known placement.
    UpdateWidgetLayout {
        widget_id: WidgetId,
        layout: Placement,
    },
    ToggleSettings,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::LoadWidgets(_) => "load_widgets",
            Intent::LoadLayouts(_) => "load_layouts",
            Intent::AddWidget(_) => "add_widget",
            Intent::RemoveWidget(_) => "remove_widget",
            Intent::UpdateLayout(_) => "update_layout",
            Intent::UpdateWidgetLayout { .. } => "update_widget_layout",
            Intent::ToggleSettings => "toggle_settings",
        }
    }
}

/// Apply `intent` using per-breakpoint column counts.
pub fn apply(state: DashboardState, intent: Intent) -> DashboardState {
    apply_with(&LayoutSync::default(), state, intent)
}

/// Apply `intent` with an explicit synchronisation policy.
pub fn apply_with(sync: &LayoutSync, state: DashboardState, intent: Intent) -> DashboardState {
    match intent {
        Intent::LoadWidgets(widgets) => DashboardState { widgets, ..state },
        Intent::LoadLayouts(layouts) => DashboardState { layouts, ..state },
        Intent::AddWidget(widget) => {
            let (widgets, layouts) = sync.on_add_widget(&state.widgets, &state.layouts, widget);
            DashboardState {
                widgets,
                layouts,
                ..state
            }
        }
        Intent::RemoveWidget(widget_id) => {
            let (widgets, layouts) =
                sync.on_remove_widget(&state.widgets, &state.layouts, &widget_id);
            DashboardState {
                widgets,
                layouts,
                ..state
            }
        }
        Intent::UpdateLayout(layouts) => {
            let layouts = sync.on_layout_change(&state.layouts, layouts);
            DashboardState { layouts, ..state }
        }
        Intent::UpdateWidgetLayout { widget_id, layout } => {
            let widgets = state
                .widgets
                .into_iter()
                .map(|widget| {
                    if widget.id == widget_id {
                        Widget {
                            layout: Some(layout.clone()),
                            ..widget
                        }
                    } else {
                        widget
                    }
                })
                .collect();
            DashboardState {
                widgets,
                layouts: state.layouts,
                is_settings_open: state.is_settings_open,
            }
        }
        Intent::ToggleSettings => DashboardState {
            is_settings_open: !state.is_settings_open,
            ..state
        },
    }
}
