//! First-fit placement search over a fixed-width grid.
//!
//! Candidates are scanned row-major (top row first, then leftmost column)
//! so the result is fully determined by the inputs. The packer is greedy: it
//! never moves existing rectangles and may leave gaps that later, wider
//! widgets cannot use.

use crate::error::{DashboardError, Result};
use crate::geometry::{Rect, Size};

/// Rows scanned below the current content before giving up on the grid.
pub const SEARCH_MARGIN_ROWS: u32 = 6;

/// Find the first free top-left corner for a rectangle of `size`.
///
/// Returns `(0, 0)` on an empty grid. When no candidate inside the scanned
/// range fits, the rectangle is placed at `(0, maxY + 1)`, which is below
/// every existing rectangle. A width larger than `columns` yields no
/// candidates at all and always lands on that fallback; use
/// [`try_find_placement`] to reject such input instead.
pub fn find_placement(existing: &[Rect], size: Size, columns: u32) -> Rect {
    if existing.is_empty() {
        return Rect::at(0, 0, size);
    }

    let max_y = content_bottom(existing);
    let last_row = max_y.saturating_add(SEARCH_MARGIN_ROWS);

    if let Some(last_col) = columns.checked_sub(size.w) {
        for y in 0..=last_row {
            for x in 0..=last_col {
                let candidate = Rect::at(x, y, size);
                if !existing.iter().any(|rect| rect.intersects(&candidate)) {
                    return candidate;
                }
            }
        }
    }

    Rect::at(0, max_y.saturating_add(1), size)
}

/// Checked variant of [`find_placement`] that refuses widths the grid cannot hold.
pub fn try_find_placement(existing: &[Rect], size: Size, columns: u32) -> Result<Rect> {
    if size.w > columns {
        return Err(DashboardError::WidthExceedsColumns {
            width: size.w,
            columns,
        });
    }
    Ok(find_placement(existing, size, columns))
}

/// Lowest occupied row boundary (`max(y + h)`), zero for an empty grid.
pub fn content_bottom(existing: &[Rect]) -> u32 {
    existing.iter().map(Rect::bottom).max().unwrap_or(0)
}
