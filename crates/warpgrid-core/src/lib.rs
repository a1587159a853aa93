//! Warpgrid Core - Deformable puzzle-grid mesh model
//!
//! This crate provides the core mesh model for Warpgrid: a rectangular grid
//! overlaid on an image whose outer perimeter can be dragged into a
//! non-rectangular shape to define cut lines for physical puzzle pieces.
//!
//! The crate is pure and single-threaded: it owns the grid lattice, the
//! coordinate-space transforms, perimeter handle derivation, the drag state
//! machine with spacing preservation, and the persisted document format.
//! Rendering, dialogs, image decoding, and file I/O belong to the
//! surrounding application.

pub mod document;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod grid;
pub mod handle;

pub use document::{normalize_image_path, Document};
pub use drag::DragSession;
pub use editor::CropEditor;
pub use geometry::{
    fit_zoom, zoom_in_step, zoom_out_step, GridPoint, ViewTransform, ZOOM_MAX, ZOOM_MIN,
};
pub use grid::{Grid, GridError};
pub use handle::{derive_handles, hit_test, Handle, HIT_TOLERANCE};
