use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::breakpoint::Breakpoint;
use super::placement::{PartialPlacement, Placement, WidgetId};
use super::validate::{validate, validate_placement};

/// Placements for every breakpoint, keyed `lg`, `md`, `sm`, `xs`, `xxs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutMap {
    layouts: BTreeMap<Breakpoint, Vec<Placement>>,
}

/// Untrusted layout map as read from storage or an interaction callback.
pub type RawLayoutMap = BTreeMap<Breakpoint, Vec<PartialPlacement>>;

impl Default for LayoutMap {
    /// All five breakpoints, each with an empty placement array.
    fn default() -> Self {
        Self {
            layouts: Breakpoint::ALL
                .into_iter()
                .map(|bp| (bp, Vec::new()))
                .collect(),
        }
    }
}

impl LayoutMap {
    /// Map without any breakpoint keys.
    pub fn empty() -> Self {
        Self {
            layouts: BTreeMap::new(),
        }
    }

    pub fn from_raw(raw: &RawLayoutMap) -> Self {
        Self {
            layouts: raw
                .iter()
                .map(|(bp, entries)| (*bp, entries.iter().map(validate).collect()))
                .collect(),
        }
    }

    pub fn with_breakpoint(mut self, breakpoint: Breakpoint, placements: Vec<Placement>) -> Self {
        self.layouts.insert(breakpoint, placements);
        self
    }

    pub fn insert(&mut self, breakpoint: Breakpoint, placements: Vec<Placement>) {
        self.layouts.insert(breakpoint, placements);
    }

    pub fn get(&self, breakpoint: Breakpoint) -> &[Placement] {
        self.layouts
            .get(&breakpoint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn placement(&self, breakpoint: Breakpoint, id: &str) -> Option<&Placement> {
        self.get(breakpoint).iter().find(|p| p.id == id)
    }

    pub fn contains_breakpoint(&self, breakpoint: Breakpoint) -> bool {
        self.layouts.contains_key(&breakpoint)
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.layouts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &[Placement])> + '_ {
        self.layouts.iter().map(|(bp, list)| (*bp, list.as_slice()))
    }

    /// Total number of placements across all breakpoints.
    pub fn placement_count(&self) -> usize {
        self.layouts.values().map(Vec::len).sum()
    }

    /// Copy of this map with every placement run through validation.
    pub fn validated(&self) -> Self {
        Self {
            layouts: self
                .layouts
                .iter()
                .map(|(bp, list)| (*bp, list.iter().map(validate_placement).collect()))
                .collect(),
        }
    }

    /// Copy of this map keeping only placements whose id satisfies `keep`.
    pub fn retain_ids(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            layouts: self
                .layouts
                .iter()
                .map(|(bp, list)| {
                    let kept = list.iter().filter(|p| keep(&p.id)).cloned().collect();
                    (*bp, kept)
                })
                .collect(),
        }
    }

    /// True when every breakpoint holds exactly one placement per id in `ids`
    /// and nothing else.
    pub fn is_consistent_with<'a>(&self, ids: impl IntoIterator<Item = &'a WidgetId>) -> bool {
        let expected: Vec<&str> = ids.into_iter().map(String::as_str).collect();
        let expected_set: BTreeSet<&str> = expected.iter().copied().collect();
        if expected_set.len() != expected.len() {
            return false;
        }
        self.layouts.values().all(|list| {
            let found: BTreeSet<&str> = list.iter().map(|p| p.id.as_str()).collect();
            found.len() == list.len() && found == expected_set
        })
    }
}
