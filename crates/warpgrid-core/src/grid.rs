//! The grid lattice: a `(rows+1) x (cols+1)` array of points in original
//! image space.
//!
//! A grid is created either by uniform subdivision of the image dimensions
//! ([`Grid::uniform`]) or restored from a persisted document
//! ([`Grid::from_rows`]). During an active drag the editor mutates a scratch
//! copy; the real grid changes only when that copy is committed back.
//!
//! # Monotonicity
//!
//! For drawing to produce a non-self-intersecting mesh, `x` should be
//! non-decreasing along each row and `y` non-decreasing along each column.
//! The model does not enforce this: dragging a perimeter point past a
//! neighbor is a tolerated, user-correctable state, not an error.

use thiserror::Error;

use crate::geometry::GridPoint;

/// Error types for grid construction and persistence.
#[derive(Debug, Error)]
pub enum GridError {
    /// Non-positive image size or grid division counts.
    #[error("Invalid dimensions: {image_width}x{image_height} image with {rows}x{cols} grid")]
    InvalidDimensions {
        image_width: u32,
        image_height: u32,
        rows: usize,
        cols: usize,
    },

    /// Persisted grid data has the wrong shape or inconsistent row lengths.
    #[error("Malformed grid: {0}")]
    MalformedGrid(String),
}

/// A two-dimensional ordered lattice of grid points.
///
/// Row/column *counts* are the user-chosen grid divisions; the point array
/// holds one more row and column than the division counts, so a `rows x
/// cols` grid stores `(rows+1) * (cols+1)` points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    row_count: usize,
    col_count: usize,
    /// Row-major point storage, length `(row_count+1) * (col_count+1)`.
    points: Vec<GridPoint>,
}

impl Grid {
    /// Build a uniform grid by subdividing the image dimensions.
    ///
    /// Point `(row, col)` is placed at
    /// `(round(col * width / cols), round(row * height / rows))`, which puts
    /// the four extreme indices exactly on the image corners.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either division count is
    /// zero or either image dimension is zero.
    pub fn uniform(
        image_width: u32,
        image_height: u32,
        row_count: usize,
        col_count: usize,
    ) -> Result<Self, GridError> {
        if row_count < 1 || col_count < 1 || image_width == 0 || image_height == 0 {
            return Err(GridError::InvalidDimensions {
                image_width,
                image_height,
                rows: row_count,
                cols: col_count,
            });
        }

        let mut points = Vec::with_capacity((row_count + 1) * (col_count + 1));
        for row in 0..=row_count {
            let y = (row as f64 * image_height as f64 / row_count as f64).round() as i32;
            for col in 0..=col_count {
                let x = (col as f64 * image_width as f64 / col_count as f64).round() as i32;
                points.push(GridPoint::new(x, y));
            }
        }

        Ok(Self {
            row_count,
            col_count,
            points,
        })
    }

    /// Number of grid divisions along the vertical axis (point rows - 1).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of grid divisions along the horizontal axis (point cols - 1).
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Look up the point at `(row, col)`, or `None` if out of bounds.
    ///
    /// Never panics; callers in the drag algorithm treat `None` as "skip".
    pub fn get(&self, row: usize, col: usize) -> Option<GridPoint> {
        if row > self.row_count || col > self.col_count {
            return None;
        }
        Some(self.points[row * (self.col_count + 1) + col])
    }

    /// Replace the point at `(row, col)`. Returns `false` (and does
    /// nothing) if the index is out of bounds.
    ///
    /// Lattice monotonicity is the caller's responsibility (see module
    /// docs).
    pub fn set(&mut self, row: usize, col: usize, point: GridPoint) -> bool {
        if row > self.row_count || col > self.col_count {
            return false;
        }
        self.points[row * (self.col_count + 1) + col] = point;
        true
    }

    /// Export the lattice as nested `[x, y]` pairs for persistence.
    pub fn to_rows(&self) -> Vec<Vec<[i32; 2]>> {
        (0..=self.row_count)
            .map(|row| {
                (0..=self.col_count)
                    .map(|col| {
                        let p = self.points[row * (self.col_count + 1) + col];
                        [p.x, p.y]
                    })
                    .collect()
            })
            .collect()
    }

    /// Rebuild a lattice from persisted nested `[x, y]` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MalformedGrid`] if there are fewer than two
    /// point rows or columns (a grid needs at least one division each way)
    /// or if the rows have inconsistent lengths.
    pub fn from_rows(rows: &[Vec<[i32; 2]>]) -> Result<Self, GridError> {
        if rows.len() < 2 {
            return Err(GridError::MalformedGrid(format!(
                "expected at least 2 point rows, got {}",
                rows.len()
            )));
        }
        let width = rows[0].len();
        if width < 2 {
            return Err(GridError::MalformedGrid(format!(
                "expected at least 2 point columns, got {width}"
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::MalformedGrid(format!(
                    "row {i} has {} points, expected {width}",
                    row.len()
                )));
            }
        }

        let points = rows
            .iter()
            .flat_map(|row| row.iter().map(|&[x, y]| GridPoint::new(x, y)))
            .collect();

        Ok(Self {
            row_count: rows.len() - 1,
            col_count: width - 1,
            points,
        })
    }
}
