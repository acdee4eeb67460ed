//! WASM bindings for the embed generators and the date formatter.
//!
//! Build with: `wasm-pack build --target web --features wasm`

use wasm_bindgen::prelude::*;

use crate::embed::UrlGenerator;
use crate::form::FormState;

fn parse_form(form_json: &str) -> Result<FormState, JsError> {
    serde_json::from_str(form_json).map_err(|e| JsError::new(&e.to_string()))
}

/// Widget URL for a form, resolved against the configurator page URL.
///
/// `form_json` uses the same camelCase field names as the page form.
#[wasm_bindgen]
pub fn generate_url(page_url: &str, form_json: &str) -> Result<String, JsError> {
    let form = parse_form(form_json)?;
    let urls = UrlGenerator::new(page_url).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(urls.generate_url(&form))
}

/// Custom CSS block for a form; empty when there is nothing to override.
#[wasm_bindgen]
pub fn generate_css(form_json: &str) -> Result<String, JsError> {
    Ok(crate::stylesheet::generate_css(&parse_form(form_json)?))
}

/// Format an RFC 3339 timestamp with a token string.
#[wasm_bindgen]
pub fn format_date(rfc3339: &str, tokens: &str) -> Result<String, JsError> {
    let instant = chrono::DateTime::parse_from_rfc3339(rfc3339)
        .map_err(|_| JsError::new(&crate::error::WidgetError::InvalidDate(rfc3339.to_string()).to_string()))?;
    Ok(crate::datefmt::format(&instant, tokens))
}
