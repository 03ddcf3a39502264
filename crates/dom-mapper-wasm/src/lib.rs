//! WASM bindings for dom-mapper.
//!
//! Exposes `encode` and `decode` as `#[wasm_bindgen]` functions that can be
//! called from JavaScript/TypeScript. Built with `wasm-bindgen-cli`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p dom-mapper-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/dom_mapper_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Encode a JSON string as data-attributed HTML.
///
/// Returns the markup, or throws a JS error if the input is not valid JSON or
/// holds a value that cannot be encoded.
#[wasm_bindgen]
pub fn encode(json: &str) -> std::result::Result<String, JsValue> {
    dom_mapper::encode(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode data-attributed HTML into compact JSON.
///
/// Returns the JSON string, or throws a JS error if the markup cannot be parsed.
#[wasm_bindgen]
pub fn decode(markup: &str) -> std::result::Result<String, JsValue> {
    dom_mapper::decode(markup).map_err(|e| JsValue::from_str(&e.to_string()))
}
