//! Warpgrid WASM - WebAssembly bindings for Warpgrid
//!
//! This crate exposes the warpgrid-core mesh model to JavaScript/TypeScript
//! applications. The frontend owns rendering, dialogs, image decoding, and
//! file I/O; these bindings cover grid construction, the crop editor's
//! pointer-event state machine, and document round-tripping.
//!
//! # Module Structure
//!
//! - `grid` - Uniform grid construction and zoom helpers
//! - `editor` - `JsCropEditor`: press/drag/release/cancel over the mesh
//! - `document` - `.puz.json` document parsing and serialization
//! - `types` - Plain-object views handed to the frontend
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, document_from_json } from '@warpgrid/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsCropEditor(image.width, image.height, 4, 6, 1.0, 10);
//! canvas.onpointerdown = (e) => editor.press(e.offsetX, e.offsetY);
//! ```

use wasm_bindgen::prelude::*;

mod document;
mod editor;
mod grid;
mod types;

// Re-export public types
pub use document::{document_from_json, document_to_json, normalize_image_path};
pub use editor::JsCropEditor;
pub use grid::{fit_zoom, uniform_grid, zoom_in_step, zoom_out_step};
pub use types::HandleView;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
