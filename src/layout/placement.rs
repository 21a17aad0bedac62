use serde::{Deserialize, Serialize};

use super::validate::validate;
use crate::geometry::{Rect, Size};

/// Widget identifier referenced by placements.
pub type WidgetId = String;

/// Resize limits attached to a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_w: u32,
    pub min_h: u32,
    pub max_w: u32,
    pub max_h: u32,
}

impl Bounds {
    /// Limits given to every freshly placed widget.
    pub const DEFAULT: Bounds = Bounds {
        min_w: 2,
        min_h: 2,
        max_w: 12,
        max_h: 8,
    };
}

impl Default for Bounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rectangle assigned to one widget within one breakpoint's grid.
///
/// Deserialization reads a [`PartialPlacement`] and validates it, so stored
/// records with missing bounds or negative coordinates load clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PartialPlacement")]
pub struct Placement {
    #[serde(rename = "i")]
    pub id: WidgetId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub min_w: u32,
    pub min_h: u32,
    pub max_w: u32,
    pub max_h: u32,
}

impl Placement {
    pub fn new(id: impl Into<WidgetId>, rect: Rect, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            min_w: bounds.min_w,
            min_h: bounds.min_h,
            max_w: bounds.max_w,
            max_h: bounds.max_h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_w: self.min_w,
            min_h: self.min_h,
            max_w: self.max_w,
            max_h: self.max_h,
        }
    }

    /// Lossless conversion back into the untrusted record shape.
    pub fn to_partial(&self) -> PartialPlacement {
        PartialPlacement {
            id: Some(self.id.clone()),
            x: Some(i64::from(self.x)),
            y: Some(i64::from(self.y)),
            w: Some(i64::from(self.w)),
            h: Some(i64::from(self.h)),
            min_w: Some(i64::from(self.min_w)),
            min_h: Some(i64::from(self.min_h)),
            max_w: Some(i64::from(self.max_w)),
            max_h: Some(i64::from(self.max_h)),
        }
    }
}

impl From<PartialPlacement> for Placement {
    fn from(raw: PartialPlacement) -> Self {
        validate(&raw)
    }
}

/// Possibly incomplete or out-of-range layout record, as reported by a
/// drag/resize interaction or read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialPlacement {
    #[serde(rename = "i", skip_serializing_if = "Option::is_none")]
    pub id: Option<WidgetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_w: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_h: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_w: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_h: Option<i64>,
}
