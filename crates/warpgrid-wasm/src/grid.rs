//! Grid construction and zoom-helper WASM bindings.

use wasm_bindgen::prelude::*;
use warpgrid_core::{self as core, Grid};

/// Build a uniform grid over an image and return it as nested `[x, y]`
/// pairs.
///
/// # Arguments
///
/// * `image_width` / `image_height` - Image dimensions in pixels
/// * `rows` / `cols` - Grid division counts (both at least 1)
///
/// # Errors
///
/// Returns an error string if any dimension or count is zero.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const points = uniform_grid(800, 600, 4, 6);
/// console.log(points[0][0]); // [0, 0]
/// ```
#[wasm_bindgen]
pub fn uniform_grid(
    image_width: u32,
    image_height: u32,
    rows: usize,
    cols: usize,
) -> Result<JsValue, JsValue> {
    let grid = Grid::uniform(image_width, image_height, rows, cols)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&grid.to_rows()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Step a zoom factor up one notch (x1.1, clamped to 500%).
#[wasm_bindgen]
pub fn zoom_in_step(zoom: f64) -> f64 {
    core::zoom_in_step(zoom)
}

/// Step a zoom factor down one notch (/1.1, clamped to 10%).
#[wasm_bindgen]
pub fn zoom_out_step(zoom: f64) -> f64 {
    core::zoom_out_step(zoom)
}

/// Compute the zoom factor that fits an image inside a viewport.
#[wasm_bindgen]
pub fn fit_zoom(
    image_width: u32,
    image_height: u32,
    viewport_width: u32,
    viewport_height: u32,
) -> f64 {
    core::fit_zoom(image_width, image_height, viewport_width, viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_steps_round_trip() {
        let z = zoom_in_step(1.0);
        assert!((zoom_out_step(z) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fit_zoom_limits() {
        assert_eq!(fit_zoom(10, 10, 100_000, 100_000), core::ZOOM_MAX);
    }
}
