//! Embed URL generation.

use url::Url;

use crate::error::{Result, WidgetError};
use crate::form::FormState;
use crate::params::{Param, ParameterSet};
use crate::stylesheet::style_entries;

/// Widget page path, relative to the configurator page.
pub const WIDGET_PATH: &str = "widget/clock.html";

/// Builds widget URLs from form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlGenerator {
    base_url: Url,
}

impl UrlGenerator {
    /// Resolve the widget page against the configurator page URL.
    ///
    /// Only origin and path of `page_url` matter; its query and fragment
    /// are dropped.
    pub fn new(page_url: &str) -> Result<Self> {
        let invalid = |source| WidgetError::InvalidBaseUrl {
            url: page_url.to_string(),
            source,
        };
        let mut page = Url::parse(page_url).map_err(invalid)?;
        page.set_query(None);
        page.set_fragment(None);
        let base_url = page.join(WIDGET_PATH).map_err(invalid)?;
        Ok(Self { base_url })
    }

    /// Use `url` as the widget page directly.
    pub fn with_widget_url(url: Url) -> Self {
        Self { base_url: url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Parameters the form produces, empty values omitted.
    ///
    /// Styling parameters ride along when custom styling is on, filtered the
    /// same way as the CSS block so placeholders never reach the URL.
    pub fn generate_params(&self, form: &FormState) -> ParameterSet {
        let mut params = ParameterSet::new();
        if let Some(format) = form.resolved_date_format() {
            params.set(Param::DateFormat, format);
        }
        if let Some(family) = form.font_family() {
            params.set(Param::FontFamily, family);
        }
        if let Some(opts) = form.styling() {
            for entry in style_entries(&opts) {
                params.set(entry.param, entry.value);
            }
        }
        params
    }

    /// Full widget URL for the form.
    pub fn generate_url(&self, form: &FormState) -> String {
        self.url_for(&self.generate_params(form))
    }

    /// Widget URL for an explicit parameter set.
    pub fn url_for(&self, params: &ParameterSet) -> String {
        format!("{}?{}", self.base_url, params.to_query())
    }
}
