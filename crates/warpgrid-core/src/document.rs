//! The persisted puzzle document.
//!
//! Documents are JSON on disk. Field names match the established document
//! format (`grid_x`/`grid_y` are the division counts, `image_path` an
//! opaque forward-slash-normalized reference); older documents without
//! `grid_points` or window placement still load, in which case the grid is
//! rebuilt uniformly from the image dimensions.
//!
//! The core's obligations at this boundary:
//!
//! - On save, emit `grid_points` exactly as held in the grid, preserving
//!   any perimeter deformation.
//! - On load, validate the shape of `grid_points` against the division
//!   counts before accepting it.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridError};

fn default_zoom() -> f64 {
    1.0
}

/// Persisted document: grid dimensions, image reference, zoom, the full
/// lattice, and window placement (owned by the surrounding app, carried
/// opaquely).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Grid divisions along the horizontal axis (columns).
    pub grid_x: usize,
    /// Grid divisions along the vertical axis (rows).
    pub grid_y: usize,
    /// Opaque image reference, forward-slash normalized.
    pub image_path: String,
    /// Zoom factor at save time. Older documents default to 1.0.
    #[serde(default = "default_zoom")]
    pub zoom_value: f64,
    /// The full lattice as nested `[x, y]` pairs, shape
    /// `(grid_y+1) x (grid_x+1)`. Absent means "derive uniformly on load".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_points: Option<Vec<Vec<[i32; 2]>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_height: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_y: Option<i32>,
}

impl Document {
    /// Create a document for a freshly gridded image. The image path is
    /// normalized; the lattice is left absent until a grid is stored.
    pub fn new(image_path: &str, grid_x: usize, grid_y: usize) -> Self {
        Self {
            grid_x,
            grid_y,
            image_path: normalize_image_path(image_path),
            zoom_value: 1.0,
            grid_points: None,
            window_width: None,
            window_height: None,
            window_x: None,
            window_y: None,
        }
    }

    /// Store a grid into the document exactly as held, with no
    /// re-derivation, and sync the division counts.
    pub fn store_grid(&mut self, grid: &Grid) {
        self.grid_x = grid.col_count();
        self.grid_y = grid.row_count();
        self.grid_points = Some(grid.to_rows());
    }

    /// Materialize the document's grid.
    ///
    /// If `grid_points` is present its shape is validated against the
    /// division counts; otherwise a uniform grid is rebuilt from the image
    /// dimensions supplied by the caller.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidDimensions`] for non-positive counts or image
    /// dimensions, [`GridError::MalformedGrid`] for a shape mismatch. On
    /// error no grid is produced; the caller's state is untouched.
    pub fn load_grid(&self, image_width: u32, image_height: u32) -> Result<Grid, GridError> {
        if self.grid_x < 1 || self.grid_y < 1 {
            return Err(GridError::InvalidDimensions {
                image_width,
                image_height,
                rows: self.grid_y,
                cols: self.grid_x,
            });
        }

        match &self.grid_points {
            Some(rows) => {
                if rows.len() != self.grid_y + 1 {
                    return Err(GridError::MalformedGrid(format!(
                        "expected {} point rows for a {}x{} grid, got {}",
                        self.grid_y + 1,
                        self.grid_x,
                        self.grid_y,
                        rows.len()
                    )));
                }
                if let Some(row) = rows.iter().find(|row| row.len() != self.grid_x + 1) {
                    return Err(GridError::MalformedGrid(format!(
                        "expected {} point columns for a {}x{} grid, got {}",
                        self.grid_x + 1,
                        self.grid_x,
                        self.grid_y,
                        row.len()
                    )));
                }
                Grid::from_rows(rows)
            }
            None => Grid::uniform(image_width, image_height, self.grid_y, self.grid_x),
        }
    }

    /// Serialize to pretty-printed JSON (the on-disk format).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document from JSON. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Normalize an image reference to forward slashes for cross-platform
/// documents.
pub fn normalize_image_path(path: &str) -> String {
    path.replace('\\', "/")
}
