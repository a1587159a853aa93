//! WASM-compatible wrapper types for the grid model.
//!
//! This module provides JavaScript-friendly views over the core Warpgrid
//! types, handled through `serde-wasm-bindgen` so the frontend receives
//! plain objects and nested arrays instead of opaque handles.

use serde::Serialize;
use warpgrid_core::{Grid, Handle, ViewTransform};

/// A handle with its display-space position, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct HandleView {
    /// Point row index in the grid.
    pub row: usize,
    /// Point column index in the grid.
    pub col: usize,
    /// Display-space x position.
    pub x: i32,
    /// Display-space y position.
    pub y: i32,
    pub on_left: bool,
    pub on_right: bool,
    pub on_top: bool,
    pub on_bottom: bool,
}

impl HandleView {
    /// Build the view for one handle, or `None` if its grid point is gone.
    pub(crate) fn from_handle(
        handle: Handle,
        grid: &Grid,
        transform: &ViewTransform,
    ) -> Option<Self> {
        grid.get(handle.row, handle.col).map(|p| {
            let (x, y) = transform.to_display(p);
            Self {
                row: handle.row,
                col: handle.col,
                x,
                y,
                on_left: handle.on_left,
                on_right: handle.on_right,
                on_top: handle.on_top,
                on_bottom: handle.on_bottom,
            }
        })
    }
}
