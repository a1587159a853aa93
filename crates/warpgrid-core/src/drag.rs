//! The drag session: scratch-copy editing of the grid perimeter with
//! spacing preservation.
//!
//! A session is bound to one grabbed handle. It captures a snapshot of the
//! grid, accumulates pointer deltas in original-image units, translates
//! every handle that shares a border with the grabbed one, and
//! redistributes the interior points of the border lines terminating at the
//! grabbed handle so their *relative* spacing is invariant under the whole
//! drag.
//!
//! # Drift avoidance
//!
//! Two rules keep repeated small pointer-move events from compounding
//! rounding error:
//!
//! - Deltas accumulate as `f64` against the pre-drag snapshot; each event
//!   recomputes working positions as `snapshot + round(total)`, never
//!   `working + round(step)`.
//! - The fractional positions used for redistribution are captured exactly
//!   once, on the first move, from pre-drag coordinates. They are never
//!   recomputed mid-drag.

use crate::geometry::ViewTransform;
use crate::grid::Grid;
use crate::handle::{derive_handles, Handle};

/// Axis along which a border line stretches when its endpoint moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// One interior point of a border line, pinned to its pre-drag fraction of
/// the span between the fixed corner (0) and the moving endpoint (1).
#[derive(Debug, Clone)]
struct PreserveEntry {
    row: usize,
    col: usize,
    fraction: f64,
}

/// A border line terminating at the grabbed handle: the fixed far corner
/// plus the fractions of every point strictly between the two endpoints.
#[derive(Debug, Clone)]
struct PreserveLine {
    axis: Axis,
    fixed: (usize, usize),
    entries: Vec<PreserveEntry>,
}

/// A drag in progress: one grabbed handle, a scratch copy of the grid, and
/// the state needed to move and redistribute the perimeter without drift.
///
/// The session is armed by [`DragSession::arm`], becomes active on the
/// first [`drag_to`](DragSession::drag_to), and ends by being either
/// committed ([`commit`](DragSession::commit) hands back the working grid)
/// or cancelled (dropping the session discards all scratch state).
#[derive(Debug, Clone)]
pub struct DragSession {
    grabbed: Handle,
    /// Pre-drag grid, the baseline every move is computed against.
    snapshot: Grid,
    /// Scratch copy; sole source of truth for display during the session.
    working: Grid,
    /// Handles that translate with the grabbed one (grabbed included).
    peers: Vec<Handle>,
    /// Last pointer position in display space.
    last_pointer: (i32, i32),
    /// Total pointer movement in original-image units since arming.
    accumulated: (f64, f64),
    /// Preserve sets, captured on the first move. `None` while armed.
    preserve: Option<Vec<PreserveLine>>,
}

impl DragSession {
    /// Arm a session on a grabbed handle.
    ///
    /// Clones the grid into the working copy and records the pointer
    /// position; nothing moves until the first `drag_to`.
    pub fn arm(grid: &Grid, grabbed: Handle, pointer: (i32, i32)) -> Self {
        let peers = derive_handles(grid)
            .into_iter()
            .filter(|h| grabbed.shares_edge(h))
            .collect();
        Self {
            grabbed,
            snapshot: grid.clone(),
            working: grid.clone(),
            peers,
            last_pointer: pointer,
            accumulated: (0.0, 0.0),
            preserve: None,
        }
    }

    /// The handle this session is bound to.
    pub fn grabbed(&self) -> Handle {
        self.grabbed
    }

    /// The scratch grid being edited. Render from this during the session.
    pub fn working(&self) -> &Grid {
        &self.working
    }

    /// True once the first pointer move has been processed.
    pub fn is_active(&self) -> bool {
        self.preserve.is_some()
    }

    /// Process a pointer-move event at a new display-space position.
    pub fn drag_to(&mut self, pointer: (i32, i32), transform: &ViewTransform) {
        let (last_x, last_y) = transform.to_original_f64(self.last_pointer);
        let (cur_x, cur_y) = transform.to_original_f64(pointer);
        self.last_pointer = pointer;

        // Zero the axis the grabbed handle does not permit.
        let dx = if self.grabbed.permits_horizontal() {
            cur_x - last_x
        } else {
            0.0
        };
        let dy = if self.grabbed.permits_vertical() {
            cur_y - last_y
        } else {
            0.0
        };

        if self.preserve.is_none() {
            self.preserve = Some(capture_preserve_lines(&self.snapshot, self.grabbed));
        }

        self.accumulated.0 += dx;
        self.accumulated.1 += dy;

        self.translate_peers();
        self.redistribute();
    }

    /// Commit the session, handing back the working grid for an atomic
    /// replace of the real one.
    pub fn commit(self) -> Grid {
        self.working
    }

    /// Move every peer handle from its snapshot position by the rounded
    /// accumulated delta, on the axis of the border it shares with the
    /// grabbed handle.
    fn translate_peers(&mut self) {
        let shift_x = self.accumulated.0.round() as i32;
        let shift_y = self.accumulated.1.round() as i32;

        for peer in &self.peers {
            // A stale handle index is skipped, never a panic.
            let Some(base) = self.snapshot.get(peer.row, peer.col) else {
                continue;
            };
            let mut moved = base;
            if self.grabbed.shares_vertical_border(peer) {
                moved.x = base.x + shift_x;
            }
            if self.grabbed.shares_horizontal_border(peer) {
                moved.y = base.y + shift_y;
            }
            self.working.set(peer.row, peer.col, moved);
        }
    }

    /// Re-place the preserved interior points of each captured border line
    /// between the fixed corner and the just-moved grabbed endpoint.
    fn redistribute(&mut self) {
        let Some(lines) = &self.preserve else {
            return;
        };
        let Some(moving) = self.working.get(self.grabbed.row, self.grabbed.col) else {
            return;
        };

        for line in lines {
            let Some(fixed) = self.working.get(line.fixed.0, line.fixed.1) else {
                continue;
            };
            let (origin, span) = match line.axis {
                Axis::X => (fixed.x, moving.x - fixed.x),
                Axis::Y => (fixed.y, moving.y - fixed.y),
            };
            for entry in &line.entries {
                let Some(mut p) = self.working.get(entry.row, entry.col) else {
                    continue;
                };
                let coord = (origin as f64 + entry.fraction * span as f64).round() as i32;
                match line.axis {
                    Axis::X => p.x = coord,
                    Axis::Y => p.y = coord,
                }
                self.working.set(entry.row, entry.col, p);
            }
        }
    }
}

/// Capture the preserve sets for the border lines terminating at the
/// grabbed handle, from pre-drag positions.
///
/// A corner terminates two border lines (one horizontal, one vertical); a
/// mid-edge handle terminates none, so its whole border translates rigidly.
/// Lines with a degenerate (zero-length) pre-drag span are skipped.
fn capture_preserve_lines(snapshot: &Grid, grabbed: Handle) -> Vec<PreserveLine> {
    let mut lines = Vec::with_capacity(2);
    if !grabbed.is_corner() {
        return lines;
    }

    let rows = snapshot.row_count();
    let cols = snapshot.col_count();

    // Horizontal border through the grabbed corner, stretching in x.
    {
        let row = grabbed.row;
        let fixed_col = if grabbed.on_left { cols } else { 0 };
        if let (Some(e), Some(f)) = (snapshot.get(row, grabbed.col), snapshot.get(row, fixed_col)) {
            if e.x != f.x {
                let span = (e.x - f.x) as f64;
                let entries = (1..cols)
                    .filter_map(|col| {
                        snapshot.get(row, col).map(|p| PreserveEntry {
                            row,
                            col,
                            fraction: (p.x - f.x) as f64 / span,
                        })
                    })
                    .collect();
                lines.push(PreserveLine {
                    axis: Axis::X,
                    fixed: (row, fixed_col),
                    entries,
                });
            }
        }
    }

    // Vertical border through the grabbed corner, stretching in y.
    {
        let col = grabbed.col;
        let fixed_row = if grabbed.on_top { rows } else { 0 };
        if let (Some(e), Some(f)) = (snapshot.get(grabbed.row, col), snapshot.get(fixed_row, col)) {
            if e.y != f.y {
                let span = (e.y - f.y) as f64;
                let entries = (1..rows)
                    .filter_map(|row| {
                        snapshot.get(row, col).map(|p| PreserveEntry {
                            row,
                            col,
                            fraction: (p.y - f.y) as f64 / span,
                        })
                    })
                    .collect();
                lines.push(PreserveLine {
                    axis: Axis::Y,
                    fixed: (fixed_row, col),
                    entries,
                });
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GridPoint;
    use crate::handle::Handle;

    fn identity() -> ViewTransform {
        ViewTransform::new(1.0, 0)
    }

    /// 1x4 grid over a 100x50 image: top row at y=0 with x = 0,25,50,75,100.
    fn grid_1x4() -> Grid {
        Grid::uniform(100, 50, 1, 4).unwrap()
    }

    fn handle_at(grid: &Grid, row: usize, col: usize) -> Handle {
        Handle::at(row, col, grid).unwrap()
    }

    #[test]
    fn test_corner_drag_preserves_top_row_spacing() {
        let grid = grid_1x4();
        let grabbed = handle_at(&grid, 0, 0);
        let mut session = DragSession::arm(&grid, grabbed, (0, 0));

        session.drag_to((10, 0), &identity());
        let w = session.working();

        // Moved endpoint and redistributed interior; far corner fixed.
        // Fractions from the fixed end: 0.75, 0.5, 0.25 of the new span 90.
        assert_eq!(w.get(0, 0), Some(GridPoint::new(10, 0)));
        assert_eq!(w.get(0, 1).unwrap().x, 33); // 100 + 0.75 * -90 = 32.5
        assert_eq!(w.get(0, 2).unwrap().x, 55);
        assert_eq!(w.get(0, 3).unwrap().x, 78); // 100 + 0.25 * -90 = 77.5
        assert_eq!(w.get(0, 4), Some(GridPoint::new(100, 0)));

        // The left border translated, so the bottom-left endpoint moved,
        // but the bottom row's interior is a different border line and
        // stays put.
        assert_eq!(w.get(1, 0), Some(GridPoint::new(10, 50)));
        assert_eq!(w.get(1, 1).unwrap().x, 25);
        assert_eq!(w.get(1, 2).unwrap().x, 50);
        assert_eq!(w.get(1, 3).unwrap().x, 75);
        assert_eq!(w.get(1, 4), Some(GridPoint::new(100, 50)));
    }

    #[test]
    fn test_corner_drag_vertical_redistributes_side_border() {
        // 4x1 grid over a 50x100 image: left column at x=0, y = 0,25,50,75,100.
        let grid = Grid::uniform(50, 100, 4, 1).unwrap();
        let grabbed = handle_at(&grid, 0, 0);
        let mut session = DragSession::arm(&grid, grabbed, (0, 0));

        session.drag_to((0, 10), &identity());
        let w = session.working();

        assert_eq!(w.get(0, 0), Some(GridPoint::new(0, 10)));
        assert_eq!(w.get(1, 0).unwrap().y, 33);
        assert_eq!(w.get(2, 0).unwrap().y, 55);
        assert_eq!(w.get(3, 0).unwrap().y, 78);
        assert_eq!(w.get(4, 0), Some(GridPoint::new(0, 100)));
        // The top border translated in y; its far endpoint came along.
        assert_eq!(w.get(0, 1), Some(GridPoint::new(50, 10)));
    }

    #[test]
    fn test_mid_edge_drag_translates_whole_border() {
        let grid = Grid::uniform(100, 100, 2, 4).unwrap();
        let grabbed = handle_at(&grid, 1, 0); // mid-left, horizontal only
        let mut session = DragSession::arm(&grid, grabbed, (0, 50));

        session.drag_to((-20, 60), &identity());
        let w = session.working();

        // Whole left border shifts in x; the vertical component is not
        // permitted for a left-edge handle and is dropped.
        for row in 0..=2 {
            assert_eq!(w.get(row, 0).unwrap().x, -20);
            assert_eq!(w.get(row, 0).unwrap().y, grid.get(row, 0).unwrap().y);
        }
        // Everything off the left border is untouched.
        for row in 0..=2 {
            for col in 1..=4 {
                assert_eq!(w.get(row, col), grid.get(row, col));
            }
        }
    }

    #[test]
    fn test_axis_filtering_on_edge_handle() {
        let grid = Grid::uniform(100, 100, 2, 4).unwrap();
        let grabbed = handle_at(&grid, 0, 2); // mid-top, vertical only
        let mut session = DragSession::arm(&grid, grabbed, (50, 0));

        session.drag_to((70, -15), &identity());
        let w = session.working();

        // Top border translates in y only; x movement is filtered out.
        for col in 0..=4 {
            assert_eq!(w.get(0, col).unwrap().y, -15);
            assert_eq!(w.get(0, col).unwrap().x, grid.get(0, col).unwrap().x);
        }
    }

    #[test]
    fn test_incremental_moves_match_single_move() {
        let grid = grid_1x4();
        let grabbed = handle_at(&grid, 0, 0);

        let mut one = DragSession::arm(&grid, grabbed, (0, 0));
        one.drag_to((10, 0), &identity());

        let mut many = DragSession::arm(&grid, grabbed, (0, 0));
        for step in 1..=10 {
            many.drag_to((step, 0), &identity());
        }

        assert_eq!(one.working(), many.working());
    }

    #[test]
    fn test_no_drift_at_fractional_zoom() {
        // At zoom 3 each display pixel is a third of an original pixel;
        // thirty single-pixel moves must land exactly where one big move
        // does.
        let grid = grid_1x4();
        let grabbed = handle_at(&grid, 0, 0);
        let t = ViewTransform::new(3.0, 0);

        let mut one = DragSession::arm(&grid, grabbed, (0, 0));
        one.drag_to((30, 0), &t);

        let mut many = DragSession::arm(&grid, grabbed, (0, 0));
        for step in 1..=30 {
            many.drag_to((step, 0), &t);
        }

        assert_eq!(one.working(), many.working());
    }

    #[test]
    fn test_drag_out_and_back_restores_positions() {
        // Baselines are captured once, so returning to the start position
        // must reproduce the pre-drag grid exactly.
        let grid = grid_1x4();
        let grabbed = handle_at(&grid, 0, 0);
        let mut session = DragSession::arm(&grid, grabbed, (0, 0));

        session.drag_to((40, 0), &identity());
        session.drag_to((-25, 0), &identity());
        session.drag_to((0, 0), &identity());

        assert_eq!(session.working(), &grid);
    }

    #[test]
    fn test_commit_returns_working_grid() {
        let grid = grid_1x4();
        let grabbed = handle_at(&grid, 0, 0);
        let mut session = DragSession::arm(&grid, grabbed, (0, 0));
        session.drag_to((10, 0), &identity());

        let expected = session.working().clone();
        assert_eq!(session.commit(), expected);
    }

    #[test]
    fn test_armed_session_is_inert_until_first_move() {
        let grid = grid_1x4();
        let grabbed = handle_at(&grid, 0, 0);
        let session = DragSession::arm(&grid, grabbed, (0, 0));

        assert!(!session.is_active());
        assert_eq!(session.working(), &grid);
    }

    #[test]
    fn test_degenerate_span_skips_redistribution() {
        // Collapse the top border onto one x coordinate, then grab its
        // left corner: the horizontal preserve line has zero span and is
        // skipped rather than dividing by zero.
        let mut grid = Grid::uniform(100, 50, 1, 4).unwrap();
        for col in 0..=4 {
            let mut p = grid.get(0, col).unwrap();
            p.x = 0;
            grid.set(0, col, p);
        }
        let grabbed = handle_at(&grid, 0, 0);
        let mut session = DragSession::arm(&grid, grabbed, (0, 0));
        session.drag_to((10, 0), &identity());

        // The left border still translates; the collapsed interior points
        // stay at their (degenerate) positions.
        assert_eq!(session.working().get(0, 0).unwrap().x, 10);
        assert_eq!(session.working().get(0, 2).unwrap().x, 0);
    }

    #[test]
    fn test_opposite_corner_drag() {
        let grid = grid_1x4();
        let grabbed = handle_at(&grid, 0, 4); // top-right
        let mut session = DragSession::arm(&grid, grabbed, (100, 0));

        session.drag_to((90, 0), &identity());
        let w = session.working();

        // Fixed end is now the top-left corner; span shrinks to 90.
        assert_eq!(w.get(0, 0), Some(GridPoint::new(0, 0)));
        assert_eq!(w.get(0, 1).unwrap().x, 23); // 0.25 * 90 = 22.5
        assert_eq!(w.get(0, 2).unwrap().x, 45);
        assert_eq!(w.get(0, 3).unwrap().x, 68); // 0.75 * 90 = 67.5
        assert_eq!(w.get(0, 4), Some(GridPoint::new(90, 0)));
        // Right border translated with the grabbed corner.
        assert_eq!(w.get(1, 4), Some(GridPoint::new(90, 50)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::handle::derive_handles;
    use proptest::prelude::*;

    fn identity() -> ViewTransform {
        ViewTransform::new(1.0, 0)
    }

    proptest! {
        /// Property: the spacing ratio along a border line is invariant
        /// under a corner drag, regardless of how the drag is chopped into
        /// move events.
        #[test]
        fn prop_spacing_ratio_invariant(
            cols in 2usize..=10,
            shift in -40i32..=40,
            chunks in 1usize..=8,
        ) {
            let grid = Grid::uniform(1_000, 100, 1, cols).unwrap();
            let grabbed = crate::handle::Handle::at(0, 0, &grid).unwrap();
            let mut session = DragSession::arm(&grid, grabbed, (0, 0));

            // Chop the shift into uneven pointer events.
            let mut pos = 0i32;
            for i in 1..=chunks {
                pos = shift * i as i32 / chunks as i32;
                session.drag_to((pos, 0), &identity());
            }
            prop_assert_eq!(pos, shift);

            let w = session.working();
            let fixed = w.get(0, cols).unwrap().x as f64;
            let moved = w.get(0, 0).unwrap().x as f64;
            for col in 1..cols {
                let before = grid.get(0, col).unwrap().x as f64 / 1_000.0;
                let after = (w.get(0, col).unwrap().x as f64 - fixed) / (moved - fixed);
                // One pixel of rounding on a span of ~1000
                prop_assert!((after - (1.0 - before)).abs() < 2.0 / (moved - fixed).abs());
            }
        }

        /// Property: a drag only ever moves perimeter points.
        #[test]
        fn prop_interior_lattice_never_moves(
            rows in 2usize..=8,
            cols in 2usize..=8,
            dx in -30i32..=30,
            dy in -30i32..=30,
        ) {
            let grid = Grid::uniform(500, 500, rows, cols).unwrap();
            for grabbed in derive_handles(&grid) {
                let mut session = DragSession::arm(&grid, grabbed, (0, 0));
                session.drag_to((dx, dy), &identity());
                let w = session.working();
                for row in 1..rows {
                    for col in 1..cols {
                        prop_assert_eq!(w.get(row, col), grid.get(row, col));
                    }
                }
            }
        }

        /// Property: handles not sharing a border with the grabbed one
        /// never move.
        #[test]
        fn prop_unrelated_handles_fixed(
            rows in 2usize..=8,
            cols in 2usize..=8,
            dx in -30i32..=30,
            dy in -30i32..=30,
        ) {
            let grid = Grid::uniform(500, 500, rows, cols).unwrap();
            let handles = derive_handles(&grid);
            for grabbed in &handles {
                let mut session = DragSession::arm(&grid, *grabbed, (0, 0));
                session.drag_to((dx, dy), &identity());
                let w = session.working();
                for other in &handles {
                    // Redistribution touches the borders the grabbed corner
                    // terminates, so restrict to fully unrelated handles.
                    let on_grabbed_row = grabbed.is_corner() && other.row == grabbed.row;
                    let on_grabbed_col = grabbed.is_corner() && other.col == grabbed.col;
                    if !grabbed.shares_edge(other) && !on_grabbed_row && !on_grabbed_col {
                        prop_assert_eq!(
                            w.get(other.row, other.col),
                            grid.get(other.row, other.col)
                        );
                    }
                }
            }
        }
    }
}
