use serde::Serialize;

pub(super) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// JSON for embedding in an inline `<script>`. `</` becomes `<\/` so the
/// HTML parser cannot see a closing tag inside a string.
pub(super) fn json_inline<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

/// A value safe to place inside a declaration of a `<style>` block.
///
/// Characters that could close the declaration, the rule or the element are
/// dropped.
pub(super) fn css_value(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';' | '\\'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_inline_breaks_script_close() {
        assert_eq!(json_inline("a</script>b"), r#""a<\/script>b""#);
        assert_eq!(json_inline(&["x"]), r#"["x"]"#);
    }

    #[test]
    fn css_value_strips_breakout_characters() {
        assert_eq!(css_value("2px 2px 4px rgba(0,0,0,.5)"), "2px 2px 4px rgba(0,0,0,.5)");
        assert_eq!(css_value("red;}</style><script>"), "red/stylescript");
    }

    #[test]
    fn html_escape_quotes() {
        assert_eq!(html_escape(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }
}
