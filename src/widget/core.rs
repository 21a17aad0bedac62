use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::Size;
use crate::layout::{Placement, WidgetId};
use crate::logging::current_ms;

/// Closed set of widget kinds the dashboard knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Table,
    Chart,
    Kpi,
}

/// Library metadata for a widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetType {
    pub kind: WidgetKind,
    pub name: &'static str,
    pub description: &'static str,
    pub default_size: Size,
}

pub static WIDGET_TYPES: [WidgetType; 3] = [
    WidgetType {
        kind: WidgetKind::Table,
        name: "Data Table",
        description: "Display data in a tabular format",
        default_size: Size::new(6, 4),
    },
    WidgetType {
        kind: WidgetKind::Chart,
        name: "Chart",
        description: "Visualize data with charts",
        default_size: Size::new(4, 3),
    },
    WidgetType {
        kind: WidgetKind::Kpi,
        name: "KPI Card",
        description: "Show key performance indicators",
        default_size: Size::new(2, 2),
    },
];

impl WidgetKind {
    pub fn info(self) -> &'static WidgetType {
        match self {
            WidgetKind::Table => &WIDGET_TYPES[0],
            WidgetKind::Chart => &WIDGET_TYPES[1],
            WidgetKind::Kpi => &WIDGET_TYPES[2],
        }
    }

    pub fn default_size(self) -> Size {
        self.info().default_size
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Table => "table",
            WidgetKind::Chart => "chart",
            WidgetKind::Kpi => "kpi",
        }
    }
}

/// Dashboard entity. The layout engine only looks at `id` and `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub config: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Placement>,
}

impl Widget {
    pub fn new(id: impl Into<WidgetId>, kind: WidgetKind) -> Self {
        Self {
            id: id.into(),
            kind,
            config: Value::Null,
            layout: None,
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn default_size(&self) -> Size {
        self.kind.default_size()
    }
}

/// Produces `widget-<ms>-<suffix>` identifiers that stay unique within one
/// generator even when several are minted in the same millisecond.
#[derive(Debug, Default)]
pub struct WidgetIdGenerator {
    counter: u64,
}

const SUFFIX_LEN: usize = 9;

impl WidgetIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> WidgetId {
        self.next_id_at(current_ms())
    }

    pub fn next_id_at(&mut self, ts_ms: u128) -> WidgetId {
        self.counter = self.counter.wrapping_add(1);
        let mut hasher = blake3::Hasher::new();
        hasher.update(&ts_ms.to_le_bytes());
        hasher.update(&self.counter.to_le_bytes());
        let hex = hasher.finalize().to_hex();
        format!("widget-{ts_ms}-{}", &hex.as_str()[..SUFFIX_LEN])
    }
}
