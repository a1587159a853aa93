//! Perimeter handles: the draggable view over a grid's border points.
//!
//! Handles are derived, ephemeral values. Only perimeter points become
//! handles; interior lattice points never do. The set is recomputed each
//! time crop mode is (re-)entered and is never persisted.

use crate::geometry::ViewTransform;
use crate::grid::Grid;

/// Default hit-test tolerance in display pixels (half of the original's
/// 8x8 handle rectangle).
pub const HIT_TOLERANCE: i32 = 4;

/// A perimeter grid point exposed as draggable, tagged with the border(s)
/// it lies on. Corners carry two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    /// Point row index in the grid.
    pub row: usize,
    /// Point column index in the grid.
    pub col: usize,
    /// True when `col == 0`.
    pub on_left: bool,
    /// True when `col == col_count`.
    pub on_right: bool,
    /// True when `row == 0`.
    pub on_top: bool,
    /// True when `row == row_count`.
    pub on_bottom: bool,
}

impl Handle {
    /// Build the handle for a perimeter point, or `None` for interior
    /// points.
    pub fn at(row: usize, col: usize, grid: &Grid) -> Option<Self> {
        let handle = Self {
            row,
            col,
            on_left: col == 0,
            on_right: col == grid.col_count(),
            on_top: row == 0,
            on_bottom: row == grid.row_count(),
        };
        if handle.on_left || handle.on_right || handle.on_top || handle.on_bottom {
            Some(handle)
        } else {
            None
        }
    }

    /// True when the handle sits on two borders at once.
    pub fn is_corner(&self) -> bool {
        (self.on_left || self.on_right) && (self.on_top || self.on_bottom)
    }

    /// True when this handle may move horizontally (left/right borders).
    pub fn permits_horizontal(&self) -> bool {
        self.on_left || self.on_right
    }

    /// True when this handle may move vertically (top/bottom borders).
    pub fn permits_vertical(&self) -> bool {
        self.on_top || self.on_bottom
    }

    /// True when the two handles lie on a vertical border they both share,
    /// i.e. they translate together horizontally.
    pub fn shares_vertical_border(&self, other: &Handle) -> bool {
        (self.on_left && other.on_left) || (self.on_right && other.on_right)
    }

    /// True when the two handles lie on a horizontal border they both
    /// share, i.e. they translate together vertically.
    pub fn shares_horizontal_border(&self, other: &Handle) -> bool {
        (self.on_top && other.on_top) || (self.on_bottom && other.on_bottom)
    }

    /// True when the handles share any edge membership.
    pub fn shares_edge(&self, other: &Handle) -> bool {
        self.shares_vertical_border(other) || self.shares_horizontal_border(other)
    }
}

/// Derive the full perimeter handle set for a grid.
///
/// Walks the four border lines and de-duplicates the corners, yielding
/// exactly `2*(rows+1) + 2*(cols+1) - 4` handles.
pub fn derive_handles(grid: &Grid) -> Vec<Handle> {
    let rows = grid.row_count();
    let cols = grid.col_count();
    let mut handles = Vec::with_capacity(2 * (rows + 1) + 2 * (cols + 1) - 4);

    // Top and bottom border lines, full width
    for col in 0..=cols {
        handles.extend(Handle::at(0, col, grid));
        handles.extend(Handle::at(rows, col, grid));
    }
    // Left and right border lines, corners already visited above
    for row in 1..rows {
        handles.extend(Handle::at(row, 0, grid));
        handles.extend(Handle::at(row, cols, grid));
    }

    handles
}

/// Find the first handle within `tolerance` display pixels of a pointer
/// position.
///
/// Uses a box test matching the square handle rectangles the original drew.
/// Tie-break between overlapping handles is unspecified; minimum grid
/// spacing makes that case unreachable in practice. Handles whose grid
/// point is missing are skipped defensively.
pub fn hit_test(
    handles: &[Handle],
    grid: &Grid,
    transform: &ViewTransform,
    display_point: (i32, i32),
    tolerance: i32,
) -> Option<Handle> {
    handles.iter().copied().find(|handle| {
        grid.get(handle.row, handle.col).is_some_and(|p| {
            let (hx, hy) = transform.to_display(p);
            (display_point.0 - hx).abs() <= tolerance && (display_point.1 - hy).abs() <= tolerance
        })
    })
}
