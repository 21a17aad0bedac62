//! Responsive breakpoints and their grid widths.

use serde::{Deserialize, Serialize};

/// Named responsive grid configuration, ordered widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
    Xxs,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Number of grid columns available at this breakpoint.
    pub const fn columns(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 6,
            Breakpoint::Xs => 4,
            Breakpoint::Xxs => 2,
        }
    }

    /// Minimum container width in pixels for this breakpoint to apply.
    pub const fn min_width(self) -> u32 {
        match self {
            Breakpoint::Lg => 1200,
            Breakpoint::Md => 996,
            Breakpoint::Sm => 768,
            Breakpoint::Xs => 480,
            Breakpoint::Xxs => 0,
        }
    }

    /// Pick the widest breakpoint whose minimum width fits `width` pixels.
    pub fn for_width(width: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Xxs)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
            Breakpoint::Xxs => "xxs",
        }
    }
}
