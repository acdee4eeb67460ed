//! Custom-property CSS block generation.

use crate::form::{FormState, StylingOptions, DEFAULT_PICKER_COLOR, FONT_WEIGHT_PLACEHOLDER};
use crate::params::Param;

/// One surviving styling value: which parameter it came from and the custom
/// property it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry<'a> {
    pub param: Param,
    pub property: &'static str,
    pub value: &'a str,
}

/// Custom property name for a styling parameter.
pub fn property_name(param: Param) -> Option<&'static str> {
    match param {
        Param::FontSize => Some("font-size"),
        Param::FontWeight => Some("font-weight"),
        Param::Color => Some("text-color"),
        Param::LetterSpacing => Some("letter-spacing"),
        Param::TextTransform => Some("text-transform"),
        Param::TextShadow => Some("text-shadow"),
        Param::DateFormat | Param::FontFamily => None,
    }
}

/// Whether a value is a form placeholder rather than a real override.
fn is_placeholder(param: Param, value: &str) -> bool {
    match param {
        Param::Color => value == DEFAULT_PICKER_COLOR,
        Param::FontWeight => value == FONT_WEIGHT_PLACEHOLDER,
        Param::TextTransform => value == "none",
        _ => false,
    }
}

/// Styling values that survive filtering, in fixed property order.
pub fn style_entries<'a>(opts: &StylingOptions<'a>) -> Vec<StyleEntry<'a>> {
    let candidates = [
        (Param::FontSize, opts.font_size),
        (Param::FontWeight, opts.font_weight),
        (Param::Color, opts.color),
        (Param::LetterSpacing, opts.letter_spacing),
        (Param::TextTransform, opts.text_transform),
        (Param::TextShadow, opts.text_shadow),
    ];

    candidates
        .into_iter()
        .filter_map(|(param, value)| {
            let value = value.filter(|v| !v.is_empty())?;
            if is_placeholder(param, value) {
                return None;
            }
            Some(StyleEntry {
                param,
                property: property_name(param)?,
                value,
            })
        })
        .collect()
}

/// Render `(property, value)` pairs as a `:root` block, or nothing at all.
pub fn render_root_block<'a>(props: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let lines: Vec<String> = props
        .into_iter()
        .map(|(prop, value)| format!("  --{prop}: {value};"))
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    format!(":root {{\n{}\n}}", lines.join("\n"))
}

/// Generate the custom CSS block for the form.
///
/// Empty when custom styling is off or when every value was filtered out.
pub fn generate_css(form: &FormState) -> String {
    let Some(opts) = form.styling() else {
        return String::new();
    };
    render_root_block(style_entries(&opts).into_iter().map(|e| (e.property, e.value)))
}
