//! Document persistence WASM bindings.
//!
//! The frontend owns file dialogs and disk I/O; these bindings only
//! translate between the JSON document format and plain JavaScript
//! objects.

use wasm_bindgen::prelude::*;
use warpgrid_core::{self as core, Document};

/// Parse a `.puz.json` document string into a document object.
///
/// Unknown fields are ignored; documents from older versions without
/// `grid_points` or window placement load with those fields absent.
///
/// # Errors
///
/// Returns an error string when the JSON is not a valid document.
#[wasm_bindgen]
pub fn document_from_json(json: &str) -> Result<JsValue, JsValue> {
    let document = Document::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&document).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Serialize a document object to pretty-printed JSON for saving.
#[wasm_bindgen]
pub fn document_to_json(document: JsValue) -> Result<String, JsValue> {
    let document: Document =
        serde_wasm_bindgen::from_value(document).map_err(|e| JsValue::from_str(&e.to_string()))?;
    document
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Normalize an image path to forward slashes for cross-platform
/// documents.
#[wasm_bindgen]
pub fn normalize_image_path(path: &str) -> String {
    core::normalize_image_path(path)
}
