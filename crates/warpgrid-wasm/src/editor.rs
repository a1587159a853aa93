//! Crop editor WASM bindings.
//!
//! `JsCropEditor` wraps the core `CropEditor` and is driven directly from
//! JavaScript pointer events: `press` on pointerdown, `drag_to` on
//! pointermove, `release` on pointerup, `cancel` on Escape. Between events
//! the frontend reads `grid_rows` and `handle_views` to draw the mesh.

use wasm_bindgen::prelude::*;
use warpgrid_core::{CropEditor, Document, Grid, ViewTransform};

use crate::types::HandleView;

/// Interactive perimeter editor exposed to JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const editor = new JsCropEditor(800, 600, 4, 6, 1.0, 10);
/// canvas.onpointerdown = (e) => editor.press(e.offsetX, e.offsetY);
/// canvas.onpointermove = (e) => { if (editor.drag_to(e.offsetX, e.offsetY)) redraw(); };
/// canvas.onpointerup = () => editor.release();
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: CropEditor,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor over a fresh uniform grid.
    ///
    /// # Errors
    ///
    /// Returns an error string for zero image dimensions or grid counts.
    #[wasm_bindgen(constructor)]
    pub fn new(
        image_width: u32,
        image_height: u32,
        rows: usize,
        cols: usize,
        zoom: f64,
        padding: i32,
    ) -> Result<JsCropEditor, JsValue> {
        let grid = Grid::uniform(image_width, image_height, rows, cols)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsCropEditor {
            inner: CropEditor::new(grid, ViewTransform::new(zoom, padding)),
        })
    }

    /// Create an editor from a persisted document object.
    ///
    /// The document's grid points are validated against its division
    /// counts; when absent, a uniform grid is rebuilt from the image
    /// dimensions. The document's saved zoom becomes the view zoom.
    pub fn from_document(
        document: JsValue,
        image_width: u32,
        image_height: u32,
        padding: i32,
    ) -> Result<JsCropEditor, JsValue> {
        let document: Document = serde_wasm_bindgen::from_value(document)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let grid = document
            .load_grid(image_width, image_height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsCropEditor {
            inner: CropEditor::new(grid, ViewTransform::new(document.zoom_value, padding)),
        })
    }

    /// Pointer press in display space. Returns true when a handle was
    /// grabbed.
    pub fn press(&mut self, x: i32, y: i32) -> bool {
        self.inner.press((x, y)).is_some()
    }

    /// Pointer move in display space. Returns true when a drag is in
    /// progress (the caller should redraw from `grid_rows`).
    pub fn drag_to(&mut self, x: i32, y: i32) -> bool {
        self.inner.drag_to((x, y))
    }

    /// Pointer release: commit the in-progress drag. Returns true when a
    /// drag was committed.
    pub fn release(&mut self) -> bool {
        self.inner.release()
    }

    /// Cancel the in-progress drag, restoring the pre-drag grid.
    pub fn cancel(&mut self) {
        self.inner.cancel()
    }

    /// True while a drag is armed or active.
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    /// Update zoom/padding. Ignored while a drag is in progress.
    pub fn set_view(&mut self, zoom: f64, padding: i32) {
        self.inner.set_transform(ViewTransform::new(zoom, padding));
    }

    /// The grid to render, as nested `[x, y]` pairs in original space:
    /// the working copy during a drag, the committed grid otherwise.
    pub fn grid_rows(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.visible_grid().to_rows())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Perimeter handles with display-space positions, for drawing the
    /// drag rectangles.
    pub fn handle_views(&self) -> Result<JsValue, JsValue> {
        let grid = self.inner.visible_grid();
        let transform = self.inner.transform();
        let views: Vec<HandleView> = self
            .inner
            .handles()
            .iter()
            .filter_map(|&h| HandleView::from_handle(h, grid, &transform))
            .collect();
        serde_wasm_bindgen::to_value(&views).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Snapshot the committed grid into a document object for saving.
    pub fn save_document(&self, image_path: &str) -> Result<JsValue, JsValue> {
        let grid = self.inner.grid();
        let mut document = Document::new(image_path, grid.col_count(), grid.row_count());
        document.zoom_value = self.inner.transform().zoom;
        document.store_grid(grid);
        serde_wasm_bindgen::to_value(&document).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
