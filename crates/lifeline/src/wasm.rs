//! WebAssembly bindings for Lifeline
//!
//! Browser-facing wrappers around the description pipeline. Errors are
//! returned to JavaScript as thrown strings, never as panics.

use wasm_bindgen::prelude::*;

use crate::primitives::{Catalog, Orchestrator};

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // Logs go to the browser console
    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Render a JSON diagram description to SVG or HTML markup
///
/// # Arguments
/// * `json` - Sequence description or `"type"`-tagged primitive tree
///
/// # Returns
/// * The markup as a String
/// * Throws a JavaScript error if parsing, validation or rendering fails
#[wasm_bindgen]
pub fn render_description(json: &str) -> Result<String, JsValue> {
    Orchestrator::new()
        .process(json)
        .map_err(|e| JsValue::from_str(&format!("{}", e)))
}

/// Validate a JSON diagram description
///
/// # Returns
/// * JSON string with fields: valid, kind, error
#[wasm_bindgen]
pub fn validate_description(json: &str) -> String {
    let orchestrator = Orchestrator::new();
    let result = orchestrator
        .parse(json)
        .and_then(|description| orchestrator.validate(&description).map(|_| description));

    match result {
        Ok(description) => serde_json::json!({
            "valid": true,
            "kind": description.kind(),
            "error": null
        })
        .to_string(),
        Err(e) => serde_json::json!({
            "valid": false,
            "kind": null,
            "error": format!("{}", e)
        })
        .to_string(),
    }
}

/// List description kinds and enum values as JSON
#[wasm_bindgen]
pub fn description_kinds() -> Result<String, JsValue> {
    serde_json::to_string(&Catalog::new()).map_err(|e| JsValue::from_str(&format!("{}", e)))
}
