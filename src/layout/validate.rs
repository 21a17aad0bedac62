//! Normalisation of untrusted layout records.
//!
//! Missing fields take their defaults and present fields are clamped into
//! range, so every input yields a usable [`Placement`].

use super::placement::{Placement, PartialPlacement};

pub const DEFAULT_W: u32 = 4;
pub const DEFAULT_H: u32 = 3;
pub const MIN_W: u32 = 2;
pub const MAX_W: u32 = 12;
pub const MIN_H: u32 = 2;
pub const MAX_H: u32 = 8;
/// Upper limit for the `maxH` bound itself, looser than the `h` range.
pub const MAX_H_BOUND: u32 = 12;

/// Produce a fully populated, clamped placement from `raw`.
pub fn validate(raw: &PartialPlacement) -> Placement {
    Placement {
        id: raw.id.clone().unwrap_or_default(),
        x: at_least(raw.x, 0, 0),
        y: at_least(raw.y, 0, 0),
        w: clamp(raw.w, MIN_W, MAX_W, DEFAULT_W),
        h: clamp(raw.h, MIN_H, MAX_H, DEFAULT_H),
        min_w: at_least(raw.min_w, 1, 2),
        min_h: at_least(raw.min_h, 1, 2),
        max_w: at_most(raw.max_w, MAX_W, MAX_W),
        max_h: at_most(raw.max_h, MAX_H_BOUND, MAX_H),
    }
}

/// Re-run validation over an already typed placement.
pub fn validate_placement(placement: &Placement) -> Placement {
    validate(&placement.to_partial())
}

fn clamp(value: Option<i64>, lo: u32, hi: u32, default: u32) -> u32 {
    value
        .map(|v| v.clamp(i64::from(lo), i64::from(hi)) as u32)
        .unwrap_or(default)
}

fn at_least(value: Option<i64>, lo: u32, default: u32) -> u32 {
    value
        .map(|v| v.clamp(i64::from(lo), i64::from(u32::MAX)) as u32)
        .unwrap_or(default)
}

fn at_most(value: Option<i64>, hi: u32, default: u32) -> u32 {
    value
        .map(|v| v.clamp(0, i64::from(hi)) as u32)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_takes_defaults() {
        let placement = validate(&PartialPlacement::default());
        assert_eq!(placement.id, "");
        assert_eq!((placement.x, placement.y), (0, 0));
        assert_eq!((placement.w, placement.h), (4, 3));
        assert_eq!((placement.min_w, placement.min_h), (2, 2));
        assert_eq!((placement.max_w, placement.max_h), (12, 8));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let raw = PartialPlacement {
            w: Some(20),
            h: Some(1),
            min_w: Some(0),
            max_h: Some(99),
            ..PartialPlacement::default()
        };
        let placement = validate(&raw);
        assert_eq!(placement.w, 12);
        assert_eq!(placement.h, 2);
        assert_eq!(placement.min_w, 1);
        assert_eq!(placement.max_h, 12);
        assert_eq!(placement.min_h, 2);
        assert_eq!(placement.max_w, 12);
    }

    #[test]
    fn negative_positions_clamp_to_zero() {
        let raw = PartialPlacement {
            id: Some("widget-7".into()),
            x: Some(-4),
            y: Some(-1),
            ..PartialPlacement::default()
        };
        let placement = validate(&raw);
        assert_eq!(placement.id, "widget-7");
        assert_eq!((placement.x, placement.y), (0, 0));
    }

    #[test]
    fn in_range_values_pass_through() {
        let raw = PartialPlacement {
            id: Some("w".into()),
            x: Some(3),
            y: Some(9),
            w: Some(6),
            h: Some(4),
            min_w: Some(3),
            min_h: Some(1),
            max_w: Some(10),
            max_h: Some(6),
        };
        let placement = validate(&raw);
        assert_eq!(placement.to_partial(), raw);
    }

    #[test]
    fn validation_is_idempotent() {
        let values = [
            None,
            Some(i64::MIN),
            Some(-1),
            Some(0),
            Some(1),
            Some(3),
            Some(8),
            Some(13),
            Some(i64::from(u32::MAX) + 1),
            Some(i64::MAX),
        ];
        let n = values.len();
        // Each field walks the value list at its own stride, so every field
        // sees every value and field pairs vary across records.
        for a in 0..n {
            for b in 0..n {
                let pick = |field: usize| values[(a + b * (field + 1)) % n];
                let raw = PartialPlacement {
                    id: (a % 2 == 0).then(|| format!("w{b}")),
                    x: pick(0),
                    y: pick(1),
                    w: pick(2),
                    h: pick(3),
                    min_w: pick(4),
                    min_h: pick(5),
                    max_w: pick(6),
                    max_h: pick(7),
                };
                let once = validate(&raw);
                assert_eq!(validate_placement(&once), once, "{raw:?}");
                assert!((MIN_W..=MAX_W).contains(&once.w), "{raw:?}");
                assert!((MIN_H..=MAX_H).contains(&once.h), "{raw:?}");
                assert!(once.min_w >= 1 && once.min_h >= 1, "{raw:?}");
                assert!(once.max_w <= MAX_W && once.max_h <= MAX_H_BOUND, "{raw:?}");
            }
        }
    }
}
