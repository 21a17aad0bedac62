//! Keeps per-breakpoint layouts consistent with the widget collection.
//!
//! Every operation takes the current snapshot by reference and returns a new
//! one, so all breakpoints change together or not at all.

use std::collections::HashSet;

use super::breakpoint::Breakpoint;
use super::map::LayoutMap;
use super::placement::{Bounds, Placement};
use super::search::find_placement;
use crate::geometry::Rect;
use crate::widget::Widget;

/// Grid width used when searching for a free slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Use each breakpoint's own column count.
    #[default]
    PerBreakpoint,
    /// Use the same column count for every breakpoint.
    Fixed(u32),
}

/// Column count older dashboards used for every breakpoint.
pub const LEGACY_COLUMNS: u32 = 12;

/// Narrowest grid a fixed policy may ask for; widgets are never narrower
/// than their minimum width.
pub const MIN_COLUMNS: u32 = Bounds::DEFAULT.min_w;

impl ColumnPolicy {
    pub fn legacy() -> Self {
        ColumnPolicy::Fixed(LEGACY_COLUMNS)
    }

    pub fn columns_for(self, breakpoint: Breakpoint) -> u32 {
        match self {
            ColumnPolicy::PerBreakpoint => breakpoint.columns(),
            ColumnPolicy::Fixed(columns) => columns.max(MIN_COLUMNS),
        }
    }
}

/// Widget collection paired with its layout map.
pub type Snapshot = (Vec<Widget>, LayoutMap);

#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutSync {
    policy: ColumnPolicy,
}

impl LayoutSync {
    pub fn new(policy: ColumnPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ColumnPolicy {
        self.policy
    }

    /// Place `new_widget` on every breakpoint present in `layouts` and append
    /// it to the widget collection.
    ///
    /// Placements whose id is not a known widget are dropped along the way,
    /// as is any earlier placement carrying the new widget's id.
    pub fn on_add_widget(
        &self,
        widgets: &[Widget],
        layouts: &LayoutMap,
        new_widget: Widget,
    ) -> Snapshot {
        let known: HashSet<&str> = widgets
            .iter()
            .map(|w| w.id.as_str())
            .filter(|id| *id != new_widget.id)
            .collect();

        let mut next_layouts = LayoutMap::empty();
        for (breakpoint, current) in layouts.iter() {
            let mut kept: Vec<Placement> = current
                .iter()
                .filter(|p| known.contains(p.id.as_str()))
                .cloned()
                .collect();
            let placed = self.place(breakpoint, &kept, &new_widget);
            kept.push(placed);
            next_layouts.insert(breakpoint, kept);
        }

        let mut next_widgets: Vec<Widget> = widgets
            .iter()
            .filter(|w| w.id != new_widget.id)
            .cloned()
            .collect();
        next_widgets.push(new_widget);
        (next_widgets, next_layouts)
    }

    /// Drop `widget_id` from the collection and from every breakpoint.
    pub fn on_remove_widget(
        &self,
        widgets: &[Widget],
        layouts: &LayoutMap,
        widget_id: &str,
    ) -> Snapshot {
        let next_widgets = widgets
            .iter()
            .filter(|w| w.id != widget_id)
            .cloned()
            .collect();
        (next_widgets, layouts.retain_ids(|id| id != widget_id))
    }

    /// Accept a user-driven layout for all breakpoints as reported.
    ///
    /// No validation happens here; see [`LayoutMap::validated`].
    pub fn on_layout_change(&self, _current: &LayoutMap, new_layouts: LayoutMap) -> LayoutMap {
        new_layouts
    }

    /// Repair a loaded snapshot: drop orphaned or duplicate placements and
    /// place widgets that are missing from a breakpoint.
    pub fn reconcile(&self, widgets: &[Widget], layouts: &LayoutMap) -> LayoutMap {
        let known: HashSet<&str> = widgets.iter().map(|w| w.id.as_str()).collect();
        let mut next_layouts = LayoutMap::empty();
        for (breakpoint, current) in layouts.iter() {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut kept: Vec<Placement> = current
                .iter()
                .filter(|p| known.contains(p.id.as_str()) && seen.insert(p.id.as_str()))
                .cloned()
                .collect();
            for widget in widgets {
                if !seen.contains(widget.id.as_str()) {
                    let placed = self.place(breakpoint, &kept, widget);
                    kept.push(placed);
                }
            }
            next_layouts.insert(breakpoint, kept);
        }
        next_layouts
    }

    /// Compute a placement for `widget` against one breakpoint's existing placements.
    pub fn place(&self, breakpoint: Breakpoint, existing: &[Placement], widget: &Widget) -> Placement {
        let columns = self.policy.columns_for(breakpoint);
        let size = widget.default_size().fit_columns(columns);
        let occupied: Vec<Rect> = existing.iter().map(Placement::rect).collect();
        let rect = find_placement(&occupied, size, columns);
        Placement::new(widget.id.clone(), rect, Bounds::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetKind;

    fn widget(id: &str, kind: WidgetKind) -> Widget {
        Widget::new(id, kind)
    }

    fn ids(widgets: &[Widget]) -> Vec<String> {
        widgets.iter().map(|w| w.id.clone()).collect()
    }

    #[test]
    fn add_places_widget_on_every_breakpoint() {
        let sync = LayoutSync::default();
        let (widgets, layouts) =
            sync.on_add_widget(&[], &LayoutMap::default(), widget("t", WidgetKind::Table));

        assert_eq!(ids(&widgets), vec!["t"]);
        for breakpoint in Breakpoint::ALL {
            let placed = layouts.placement(breakpoint, "t").unwrap();
            assert_eq!((placed.x, placed.y), (0, 0));
            assert_eq!(placed.w, 6u32.min(breakpoint.columns()));
            assert_eq!(placed.h, 4);
            assert_eq!(placed.bounds(), Bounds::DEFAULT);
        }
    }

    #[test]
    fn add_fills_row_using_breakpoint_columns() {
        let sync = LayoutSync::default();
        let (widgets, layouts) =
            sync.on_add_widget(&[], &LayoutMap::default(), widget("a", WidgetKind::Chart));
        let (_, layouts) = sync.on_add_widget(&widgets, &layouts, widget("b", WidgetKind::Chart));

        // 4 + 4 fits in 12 and 10 columns but not in 6.
        assert_eq!(layouts.placement(Breakpoint::Lg, "b").unwrap().rect(), Rect::new(4, 0, 4, 3));
        assert_eq!(layouts.placement(Breakpoint::Md, "b").unwrap().rect(), Rect::new(4, 0, 4, 3));
        assert_eq!(layouts.placement(Breakpoint::Sm, "b").unwrap().rect(), Rect::new(0, 3, 4, 3));
        assert_eq!(layouts.placement(Breakpoint::Xxs, "b").unwrap().rect(), Rect::new(0, 3, 2, 3));
    }

    #[test]
    fn legacy_policy_uses_twelve_columns_everywhere() {
        let sync = LayoutSync::new(ColumnPolicy::legacy());
        let (widgets, layouts) =
            sync.on_add_widget(&[], &LayoutMap::default(), widget("a", WidgetKind::Chart));
        let (_, layouts) = sync.on_add_widget(&widgets, &layouts, widget("b", WidgetKind::Table));

        for breakpoint in Breakpoint::ALL {
            assert_eq!(
                layouts.placement(breakpoint, "b").unwrap().rect(),
                Rect::new(4, 0, 6, 4)
            );
        }
    }

    #[test]
    fn fixed_policy_never_narrows_below_minimum_width() {
        for columns in [0, 1] {
            let sync = LayoutSync::new(ColumnPolicy::Fixed(columns));
            assert_eq!(sync.policy().columns_for(Breakpoint::Lg), MIN_COLUMNS);
            let (widgets, layouts) =
                sync.on_add_widget(&[], &LayoutMap::default(), widget("a", WidgetKind::Table));
            let (_, layouts) = sync.on_add_widget(&widgets, &layouts, widget("b", WidgetKind::Kpi));
            for breakpoint in Breakpoint::ALL {
                let a = layouts.placement(breakpoint, "a").unwrap();
                let b = layouts.placement(breakpoint, "b").unwrap();
                assert_eq!(a.rect(), Rect::new(0, 0, 2, 4));
                assert_eq!(b.rect(), Rect::new(0, 4, 2, 2));
                assert!(a.w >= a.min_w && b.w >= b.min_w);
            }
        }
    }

    #[test]
    fn add_only_touches_breakpoints_present_in_map() {
        let sync = LayoutSync::default();
        let layouts = LayoutMap::empty().with_breakpoint(Breakpoint::Sm, Vec::new());
        let (_, layouts) = sync.on_add_widget(&[], &layouts, widget("k", WidgetKind::Kpi));
        assert_eq!(layouts.breakpoints().collect::<Vec<_>>(), vec![Breakpoint::Sm]);
    }

    #[test]
    fn add_drops_stale_and_duplicate_placements() {
        let sync = LayoutSync::default();
        let stale = Placement::new("ghost", Rect::new(0, 0, 12, 8), Bounds::DEFAULT);
        let old_self = Placement::new("k", Rect::new(6, 6, 2, 2), Bounds::DEFAULT);
        let layouts = LayoutMap::empty().with_breakpoint(Breakpoint::Lg, vec![stale, old_self]);

        let (widgets, layouts) = sync.on_add_widget(&[], &layouts, widget("k", WidgetKind::Kpi));
        assert_eq!(layouts.get(Breakpoint::Lg).len(), 1);
        assert_eq!(layouts.placement(Breakpoint::Lg, "k").unwrap().rect(), Rect::new(0, 0, 2, 2));
        assert!(layouts.is_consistent_with(&ids(&widgets)));
    }

    #[test]
    fn re_adding_existing_widget_keeps_single_entry() {
        let sync = LayoutSync::default();
        let (widgets, layouts) =
            sync.on_add_widget(&[], &LayoutMap::default(), widget("a", WidgetKind::Kpi));
        let (widgets, layouts) = sync.on_add_widget(&widgets, &layouts, widget("a", WidgetKind::Table));
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].kind, WidgetKind::Table);
        assert!(layouts.is_consistent_with(&ids(&widgets)));
    }

    #[test]
    fn add_then_remove_restores_previous_snapshot() {
        let sync = LayoutSync::default();
        let mut snapshot: Snapshot = (Vec::new(), LayoutMap::default());
        for (id, kind) in [("a", WidgetKind::Table), ("b", WidgetKind::Kpi), ("c", WidgetKind::Chart)] {
            snapshot = sync.on_add_widget(&snapshot.0, &snapshot.1, widget(id, kind));
        }
        let before = snapshot.clone();

        let added = sync.on_add_widget(&before.0, &before.1, widget("w", WidgetKind::Chart));
        let restored = sync.on_remove_widget(&added.0, &added.1, "w");
        assert_eq!(restored, before);
    }

    #[test]
    fn integrity_holds_across_mixed_sequence() {
        let sync = LayoutSync::default();
        let kinds = [WidgetKind::Table, WidgetKind::Chart, WidgetKind::Kpi];
        let mut snapshot: Snapshot = (Vec::new(), LayoutMap::default());
        for step in 0..24 {
            snapshot = if step % 5 == 4 {
                let victim = snapshot.0[step % snapshot.0.len()].id.clone();
                sync.on_remove_widget(&snapshot.0, &snapshot.1, &victim)
            } else {
                let id = format!("w{step}");
                sync.on_add_widget(&snapshot.0, &snapshot.1, widget(&id, kinds[step % 3]))
            };
            assert!(snapshot.1.is_consistent_with(&ids(&snapshot.0)), "step {step}");
        }
    }

    #[test]
    fn placements_never_overlap_or_overflow() {
        let sync = LayoutSync::default();
        let kinds = [WidgetKind::Table, WidgetKind::Kpi, WidgetKind::Chart, WidgetKind::Kpi];
        let mut snapshot: Snapshot = (Vec::new(), LayoutMap::default());
        for step in 0..16 {
            let id = format!("w{step}");
            snapshot = sync.on_add_widget(&snapshot.0, &snapshot.1, widget(&id, kinds[step % 4]));
        }
        for (breakpoint, placements) in snapshot.1.iter() {
            for (i, a) in placements.iter().enumerate() {
                assert!(a.rect().right() <= breakpoint.columns());
                for b in &placements[i + 1..] {
                    assert!(!a.rect().intersects(&b.rect()), "{breakpoint:?}: {a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let sync = LayoutSync::default();
        let snapshot = sync.on_add_widget(&[], &LayoutMap::default(), widget("a", WidgetKind::Kpi));
        let after = sync.on_remove_widget(&snapshot.0, &snapshot.1, "missing");
        assert_eq!(after, snapshot);
    }

    #[test]
    fn layout_change_is_applied_verbatim() {
        let sync = LayoutSync::default();
        let reported = LayoutMap::empty().with_breakpoint(
            Breakpoint::Lg,
            vec![Placement::new("a", Rect::new(30, 0, 40, 1), Bounds::DEFAULT)],
        );
        let next = sync.on_layout_change(&LayoutMap::default(), reported.clone());
        assert_eq!(next, reported);
    }

    #[test]
    fn reconcile_repairs_loaded_snapshot() {
        let sync = LayoutSync::default();
        let widgets = vec![widget("a", WidgetKind::Chart), widget("b", WidgetKind::Kpi)];
        let a = Placement::new("a", Rect::new(0, 0, 4, 3), Bounds::DEFAULT);
        let ghost = Placement::new("ghost", Rect::new(4, 0, 2, 2), Bounds::DEFAULT);
        let layouts = LayoutMap::empty()
            .with_breakpoint(Breakpoint::Lg, vec![a.clone(), ghost, a.clone()])
            .with_breakpoint(Breakpoint::Xs, Vec::new());

        let repaired = sync.reconcile(&widgets, &layouts);
        assert!(repaired.is_consistent_with(&ids(&widgets)));
        assert_eq!(repaired.placement(Breakpoint::Lg, "a"), Some(&a));
        assert_eq!(
            repaired.placement(Breakpoint::Lg, "b").unwrap().rect(),
            Rect::new(4, 0, 2, 2)
        );
        assert_eq!(
            repaired.placement(Breakpoint::Xs, "b").unwrap().rect(),
            Rect::new(0, 3, 2, 2)
        );
    }
}
