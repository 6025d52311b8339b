//! WASM bindings for the flowmark compiler.
//!
//! Exposes `compile()` to JavaScript via wasm-bindgen.
//! Returns a JS object `{ lines, document }` or throws on error.

use wasm_bindgen::prelude::*;

/// Compile flowmark source to a Mermaid flowchart.
///
/// Returns a JS object with `{ lines: string[], document: string }`, where
/// `document` is the fenced markdown block.
/// Throws a JS error carrying the first parse error (with its line number).
#[wasm_bindgen]
pub fn compile(source: &str) -> Result<JsValue, JsError> {
    let output = native_compile(source).map_err(|e| JsError::new(&e.to_string()))?;

    let lines = js_sys::Array::new();
    for line in &output.lines {
        lines.push(&JsValue::from_str(line));
    }

    // Serialize to a plain JS object { lines, document }
    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"lines".into(), &lines.into())
        .map_err(|_| JsError::new("Failed to set lines property"))?;
    js_sys::Reflect::set(&js_obj, &"document".into(), &output.document.into())
        .map_err(|_| JsError::new("Failed to set document property"))?;

    Ok(js_obj.into())
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn native_compile(
    source: &str,
) -> Result<flowmark_codegen::CompilerOutput, flowmark_parser::ParseError> {
    let program = flowmark_parser::Parser::parse(source)?;
    Ok(flowmark_codegen::compile(&program))
}
