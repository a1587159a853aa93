//! Crop-mode editor: the press/move/release/cancel state machine over a
//! grid, its derived handles, and an optional drag session.
//!
//! The editor owns the real grid. All in-progress edits happen on the
//! session's working copy; only a release commits it back, so cancel is a
//! plain drop and there is a single, well-defined mutation point.
//!
//! States: `Idle -> Armed -> Active -> {Committed | Cancelled}`. Pressing
//! where no handle is hit, or moving/releasing while idle, are no-ops.

use crate::drag::DragSession;
use crate::geometry::ViewTransform;
use crate::grid::Grid;
use crate::handle::{derive_handles, hit_test, Handle, HIT_TOLERANCE};

/// Interactive perimeter editor bound to one grid.
#[derive(Debug, Clone)]
pub struct CropEditor {
    grid: Grid,
    transform: ViewTransform,
    handles: Vec<Handle>,
    session: Option<DragSession>,
}

impl CropEditor {
    /// Enter crop mode on a grid: derive the perimeter handles and start
    /// idle.
    pub fn new(grid: Grid, transform: ViewTransform) -> Self {
        let handles = derive_handles(&grid);
        Self {
            grid,
            transform,
            handles,
            session: None,
        }
    }

    /// The committed grid. Unchanged while a drag is in progress.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The grid to render: the session's working copy during a drag,
    /// otherwise the committed grid.
    pub fn visible_grid(&self) -> &Grid {
        match &self.session {
            Some(session) => session.working(),
            None => &self.grid,
        }
    }

    /// Current perimeter handles.
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// Handle positions in display space for rendering, read from the
    /// visible grid.
    pub fn display_handles(&self) -> Vec<(Handle, (i32, i32))> {
        let grid = self.visible_grid();
        self.handles
            .iter()
            .filter_map(|&h| {
                grid.get(h.row, h.col)
                    .map(|p| (h, self.transform.to_display(p)))
            })
            .collect()
    }

    /// True while a drag session is armed or active.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Update the view transform (zoom or padding change).
    ///
    /// Ignored during a drag: the session's accumulated deltas are relative
    /// to the transform they were captured under.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        if self.session.is_none() {
            self.transform = transform;
        }
    }

    /// Current view transform.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Pointer press: hit-test the handles and arm a session on a hit.
    ///
    /// Returns the grabbed handle, or `None` (and stays idle) when nothing
    /// was hit.
    pub fn press(&mut self, display_point: (i32, i32)) -> Option<Handle> {
        if self.session.is_some() {
            return None;
        }
        let grabbed = hit_test(
            &self.handles,
            &self.grid,
            &self.transform,
            display_point,
            HIT_TOLERANCE,
        )?;
        self.session = Some(DragSession::arm(&self.grid, grabbed, display_point));
        Some(grabbed)
    }

    /// Pointer move while the button is held. No-op when idle.
    pub fn drag_to(&mut self, display_point: (i32, i32)) -> bool {
        match &mut self.session {
            Some(session) => {
                session.drag_to(display_point, &self.transform);
                true
            }
            None => false,
        }
    }

    /// Pointer release: commit the working grid atomically and rebuild the
    /// handles. No-op when idle. Crop mode stays active.
    pub fn release(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                self.grid = session.commit();
                self.handles = derive_handles(&self.grid);
                true
            }
            None => false,
        }
    }

    /// Cancel signal: discard all scratch state without touching the grid
    /// and rebuild the handles from it.
    pub fn cancel(&mut self) {
        self.session = None;
        self.handles = derive_handles(&self.grid);
    }

    /// Leave crop mode, handing the grid back to the caller.
    pub fn into_grid(mut self) -> Grid {
        // An in-flight session is implicitly cancelled.
        self.session = None;
        self.grid
    }
}
