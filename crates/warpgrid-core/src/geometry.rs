//! Coordinate spaces and the transforms between them.
//!
//! The mesh model works in three spaces:
//!
//! - **Original space**: unscaled, unpadded pixel coordinates of the source
//!   image. Grid points live here, so the mesh is stable across zoom changes.
//! - **Scaled space**: original coordinates multiplied by the zoom factor.
//! - **Display space**: scaled coordinates offset by a constant pixel
//!   padding around the image. Pointer events arrive here.
//!
//! # Rounding
//!
//! Display coordinates are integer pixels, so `to_display` followed by
//! `to_original` is only guaranteed to round-trip within one pixel. This is
//! expected lossy behavior, not an error. Code that accumulates many small
//! pointer deltas should use [`ViewTransform::to_original_f64`] and round
//! once, not per event.

/// Minimum zoom factor (10%).
pub const ZOOM_MIN: f64 = 0.1;
/// Maximum zoom factor (500%).
pub const ZOOM_MAX: f64 = 5.0;
/// Multiplicative step used by zoom in/out controls.
pub const ZOOM_STEP: f64 = 1.1;

/// A single lattice coordinate in original image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate.
    pub y: i32,
}

impl GridPoint {
    /// Create a new grid point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Mapping between original image space and padded display space.
///
/// Stateless value type: construct one per render/interaction pass from the
/// current zoom factor and viewport padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Zoom factor applied to original coordinates. Must be positive.
    pub zoom: f64,
    /// Constant pixel margin around the scaled image. Must be non-negative.
    pub padding: i32,
}

impl ViewTransform {
    /// Create a transform from a zoom factor and display padding.
    pub fn new(zoom: f64, padding: i32) -> Self {
        debug_assert!(zoom > 0.0, "Zoom factor must be positive");
        debug_assert!(padding >= 0, "Padding must be non-negative");
        Self { zoom, padding }
    }

    /// Map a grid point from original space to display space.
    pub fn to_display(&self, p: GridPoint) -> (i32, i32) {
        (
            (p.x as f64 * self.zoom).round() as i32 + self.padding,
            (p.y as f64 * self.zoom).round() as i32 + self.padding,
        )
    }

    /// Map a display-space point back to original space, rounded to the
    /// integer pixel grid.
    ///
    /// Inverse of [`to_display`](Self::to_display) up to one pixel of
    /// rounding.
    pub fn to_original(&self, display: (i32, i32)) -> GridPoint {
        let (x, y) = self.to_original_f64(display);
        GridPoint::new(x.round() as i32, y.round() as i32)
    }

    /// Map a display-space point back to original space without rounding.
    ///
    /// Used by the drag algorithm, which accumulates fractional deltas over
    /// a whole session and rounds once per applied position.
    pub fn to_original_f64(&self, display: (i32, i32)) -> (f64, f64) {
        (
            (display.0 - self.padding) as f64 / self.zoom,
            (display.1 - self.padding) as f64 / self.zoom,
        )
    }
}

/// Step the zoom factor up by one notch, clamped to [`ZOOM_MAX`].
pub fn zoom_in_step(zoom: f64) -> f64 {
    (zoom * ZOOM_STEP).min(ZOOM_MAX)
}

/// Step the zoom factor down by one notch, clamped to [`ZOOM_MIN`].
pub fn zoom_out_step(zoom: f64) -> f64 {
    (zoom / ZOOM_STEP).max(ZOOM_MIN)
}

/// Compute the zoom factor that fits an image inside a viewport.
///
/// Picks the smaller of the per-axis ratios so the whole image is visible,
/// then clamps to the valid zoom range. Returns 1.0 for degenerate (zero)
/// image dimensions.
pub fn fit_zoom(
    image_width: u32,
    image_height: u32,
    viewport_width: u32,
    viewport_height: u32,
) -> f64 {
    if image_width == 0 || image_height == 0 {
        return 1.0;
    }

    let width_zoom = viewport_width as f64 / image_width as f64;
    let height_zoom = viewport_height as f64 / image_height as f64;

    width_zoom.min(height_zoom).clamp(ZOOM_MIN, ZOOM_MAX)
}
