//! Font list and web font stylesheet helpers.

use serde::{Deserialize, Serialize};

/// Default font list endpoint: a JSON document `{ "fonts": [...] }`.
pub const FONT_LIST_URL: &str = "https://gist.githubusercontent.com/blushell/cf1e432b65f5c3a3eb1e30508fb584a4/raw/59f99da9d53aac79da742ebca7aab7121dca66cf/fonts.json";

/// Web font stylesheet service.
pub const FONT_CSS_API: &str = "https://fonts.googleapis.com/css2";

/// Weights requested for every family.
pub const FONT_WEIGHTS: &str = "100,300,400,500,700,900";

/// Size used when asking the browser to confirm a font is usable.
pub const LOAD_REFERENCE_SIZE: &str = "16px";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontList {
    pub fonts: Vec<String>,
}

/// First family of a CSS font stack, trimmed and unquoted.
pub fn primary_family(stack: &str) -> Option<&str> {
    let first = stack.split(',').next()?.trim();
    let unquoted = first.trim_matches(|c| c == '\'' || c == '"').trim();
    (!unquoted.is_empty()).then_some(unquoted)
}

/// Stylesheet URL for the first family of `stack`, if there is one.
pub fn stylesheet_url(stack: &str) -> Option<String> {
    let family = primary_family(stack)?;
    Some(format!(
        "{FONT_CSS_API}?family={}:{FONT_WEIGHTS}",
        urlencoding::encode(family)
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::remote::fetch_font_list;

#[cfg(not(target_arch = "wasm32"))]
mod remote {
    use tracing::debug;

    use super::FontList;
    use crate::error::{Result, WidgetError};

    /// Fetch the font choices. No retries; the caller reports failure.
    pub async fn fetch_font_list(client: &reqwest::Client, url: &str) -> Result<Vec<String>> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(WidgetError::font_list)?;
        if !response.status().is_success() {
            return Err(WidgetError::font_list(format!(
                "{url} returned {}",
                response.status()
            )));
        }
        let list: FontList = response.json().await.map_err(WidgetError::font_list)?;
        debug!(count = list.fonts.len(), "font list fetched");
        Ok(list.fonts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_family_of_stack() {
        assert_eq!(primary_family("Roboto, sans-serif"), Some("Roboto"));
        assert_eq!(primary_family("  'Open Sans' , Arial"), Some("Open Sans"));
        assert_eq!(primary_family(""), None);
        assert_eq!(primary_family(", serif"), None);
    }

    #[test]
    fn stylesheet_url_encodes_family() {
        assert_eq!(
            stylesheet_url("Open Sans, sans-serif").as_deref(),
            Some("https://fonts.googleapis.com/css2?family=Open%20Sans:100,300,400,500,700,900")
        );
        assert_eq!(stylesheet_url("   "), None);
    }

    #[test]
    fn font_list_shape() {
        let list: FontList = serde_json::from_str(r#"{"fonts":["Roboto","Lato"]}"#).unwrap();
        assert_eq!(list.fonts, vec!["Roboto", "Lato"]);
    }
}
