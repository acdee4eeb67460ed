use crate::form::{CUSTOM_PRESET, DATE_PRESETS, DEFAULT_PICKER_COLOR, FONT_WEIGHT_PLACEHOLDER};
use crate::params::DEFAULT_DATE_FORMAT;
use crate::view::ElementId;

use super::css::build_css;
use super::inline_js::build_configurator_js;
use super::util::{html_escape, json_inline};

const WEIGHT_CHOICES: [(&str, &str); 6] = [
    ("100", "Thin"),
    ("300", "Light"),
    ("400", "Regular"),
    ("500", "Medium"),
    ("700", "Bold"),
    ("900", "Black"),
];

const TEXT_TRANSFORMS: [&str; 4] = ["none", "uppercase", "lowercase", "capitalize"];

fn build_preset_options() -> String {
    let mut html = String::new();
    for preset in DATE_PRESETS {
        let selected = if preset.format == DEFAULT_DATE_FORMAT { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            html_escape(preset.format),
            html_escape(preset.label),
        ));
    }
    html.push_str(&format!("<option value=\"{CUSTOM_PRESET}\">Custom…</option>"));
    html
}

fn build_weight_options() -> String {
    let mut html = format!("<option>{FONT_WEIGHT_PLACEHOLDER}</option>\n");
    for (value, name) in WEIGHT_CHOICES {
        html.push_str(&format!("<option value=\"{value}\">{value} {name}</option>\n"));
    }
    html
}

fn build_transform_options() -> String {
    TEXT_TRANSFORMS
        .iter()
        .map(|t| format!("<option value=\"{t}\">{t}</option>"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The configurator page. Every id here is an [`ElementId`].
pub(super) fn build_configurator_page() -> String {
    let css = build_css();
    let ids: Vec<&str> = ElementId::ALL.iter().map(|id| id.as_str()).collect();
    let js = build_configurator_js(&json_inline(&ids));
    let preset_options = build_preset_options();
    let weight_options = build_weight_options();
    let transform_options = build_transform_options();
    let default_format = html_escape(DEFAULT_DATE_FORMAT);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Clock Widget</title>
<style>
{css}
</style>
</head>
<body>
<div class="header">
  <span class="title">clock widget</span>
  <span class="sep">/</span>
  <span>configurator</span>
</div>
<div class="alerts" id="alerts" aria-live="polite"></div>
<div class="layout">
  <form class="card" id="widgetForm" autocomplete="off">
    <div class="card-label">settings</div>

    <div class="field">
      <label for="dateFormatPreset">Date format</label>
      <select id="dateFormatPreset" name="dateFormatPreset">
{preset_options}
      </select>
    </div>
    <div class="field" id="customFormatSection" hidden>
      <label for="dateFormat">Custom format</label>
      <input type="text" id="dateFormat" name="dateFormat" value="{default_format}">
      <span class="hint">Tokens like YYYY MM DD HH mm ss A; [text] is literal.</span>
    </div>

    <div class="field">
      <label for="fontFamily">Font</label>
      <select id="fontFamily" name="fontFamily">
        <option value="">Default (Roboto)</option>
      </select>
    </div>

    <label class="check">
      <input type="checkbox" id="customStyling" name="customStyling" aria-controls="stylingSettings">
      Custom styling
    </label>
    <div class="styling-settings" id="stylingSettings" hidden aria-expanded="false">
      <div class="field">
        <label for="fontSize">Font size</label>
        <input type="text" id="fontSize" name="fontSize" placeholder="48px">
      </div>
      <div class="field">
        <label for="fontWeight">Font weight</label>
        <select id="fontWeight" name="fontWeight">
{weight_options}
        </select>
      </div>
      <div class="field">
        <label for="color">Text color</label>
        <input type="color" id="color" name="color" value="{DEFAULT_PICKER_COLOR}">
      </div>
      <div class="field">
        <label for="letterSpacing">Letter spacing</label>
        <input type="text" id="letterSpacing" name="letterSpacing" placeholder="normal">
      </div>
      <div class="field">
        <label for="textTransform">Text transform</label>
        <select id="textTransform" name="textTransform">
{transform_options}
        </select>
      </div>
      <div class="field">
        <label for="textShadow">Text shadow</label>
        <input type="text" id="textShadow" name="textShadow" placeholder="2px 2px 4px rgba(0,0,0,0.5)">
      </div>
    </div>
  </form>

  <div class="card result-section" id="resultSection" hidden>
    <div class="card-label">preview</div>
    <div class="preview"><iframe id="previewFrame" title="Clock preview"></iframe></div>
    <div class="card-label">widget url</div>
    <div class="output">
      <pre id="generatedUrl"></pre>
      <button type="button" data-copy="generatedUrl">copy</button>
    </div>
    <div class="card-label">custom css</div>
    <div class="output">
      <pre id="generatedCSS"></pre>
      <button type="button" data-copy="generatedCSS">copy</button>
    </div>
  </div>
</div>
<script>
{js}
</script>
</body>
</html>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_contains_every_element() {
        let page = build_configurator_page();
        for id in ElementId::ALL {
            assert!(
                page.contains(&format!("id=\"{}\"", id.as_str())),
                "missing #{}",
                id.as_str()
            );
        }
    }

    #[test]
    fn presets_and_placeholders() {
        let page = build_configurator_page();
        assert!(page.contains("<option value=\"custom\">"));
        assert!(page.contains("<option value=\"ddd DD MMM yyyy hh:mm:ss A\" selected>"));
        assert!(page.contains("<option>Select Weight</option>"));
        assert!(page.contains("value=\"#ffffff\""));
    }
}
