use crate::clock::CLOCK_ERROR_TEXT;
use crate::fonts::{stylesheet_url, LOAD_REFERENCE_SIZE};
use crate::params::WidgetConfig;
use crate::stylesheet::render_root_block;

use super::inline_js::build_widget_js;
use super::stream::UTC_OFFSET_KEY;
use super::util::{css_value, html_escape, json_inline};

/// DOM id of the element the clock renders into.
const CLOCK_LABEL_ID: &str = "clockLabel";

fn build_widget_css(config: &WidgetConfig) -> String {
    let family = css_value(&config.font_family);
    let mut props: Vec<(&str, String)> = vec![("font-family", family)];
    props.extend(
        config
            .custom_properties()
            .into_iter()
            .map(|(prop, value)| (prop, css_value(value))),
    );
    let root = render_root_block(props.iter().map(|(p, v)| (*p, v.as_str())));

    format!(
        r#"{root}
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
html, body {{ width: 100%; height: 100%; background: transparent; overflow: hidden; }}
body {{ display: flex; align-items: center; justify-content: center; }}
#{CLOCK_LABEL_ID} {{
  font-family: var(--font-family);
  font-size: var(--font-size, 48px);
  font-weight: var(--font-weight, 400);
  color: var(--text-color, #fff);
  letter-spacing: var(--letter-spacing, normal);
  text-transform: var(--text-transform, none);
  text-shadow: var(--text-shadow, none);
  white-space: nowrap;
}}"#
    )
}

/// The embeddable widget page for `config`.
///
/// The label starts empty; ticks arrive from `clock/stream`, resolved
/// against the page URL so the query string travels along.
pub(super) fn build_widget_page(config: &WidgetConfig) -> String {
    let css = build_widget_css(config);
    let font_link = stylesheet_url(&config.font_family)
        .map(|href| format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(&href)))
        .unwrap_or_default();
    let font_spec = json_inline(&format!("{LOAD_REFERENCE_SIZE} {}", config.font_family));
    let error_text = json_inline(CLOCK_ERROR_TEXT);
    let js = build_widget_js(CLOCK_LABEL_ID, UTC_OFFSET_KEY, &font_spec, &error_text);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Clock</title>
{font_link}
<style>
{css}
</style>
</head>
<body>
<div id="{CLOCK_LABEL_ID}"></div>
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
    fn page_carries_font_and_overrides() {
        let config = WidgetConfig::from_query("fontFamily=Lobster&fontSize=3rem&color=%23ff0000");
        let page = build_widget_page(&config);
        assert!(page.contains(
            r#"<link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Lobster:100,300,400,500,700,900">"#
        ));
        assert!(page.contains("  --font-family: Lobster;"));
        assert!(page.contains("  --font-size: 3rem;"));
        assert!(page.contains("  --text-color: #ff0000;"));
        assert!(page.contains(r#"<div id="clockLabel"></div>"#));
    }

    #[test]
    fn default_color_is_not_overridden() {
        let page = build_widget_page(&WidgetConfig::default());
        assert!(!page.contains("--text-color:"));
        assert!(page.contains("--font-family: Roboto, sans-serif;"));
    }

    #[test]
    fn stream_reopens_when_utc_offset_changes() {
        let page = build_widget_page(&WidgetConfig::default());
        assert!(page.contains("'clock/stream' + query + 'utcOffset=' + offset"));
        assert!(page.contains("if (currentOffset() !== offset) connect();"));
    }

    #[test]
    fn hostile_values_cannot_escape_style() {
        let config = WidgetConfig::from_query("textShadow=%3C%2Fstyle%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        let page = build_widget_page(&config);
        assert!(!page.contains("</style><script>alert"));
    }
}
