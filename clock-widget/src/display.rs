//! Display coordination: generated URL and CSS onto the page, preview frame
//! navigation, and CSS injection once the frame has loaded.

use tracing::{debug, error, warn};
use url::Url;

use crate::embed::UrlGenerator;
use crate::error::Result;
use crate::form::FormState;
use crate::notify::Notification;
use crate::stylesheet::generate_css;
use crate::view::{require, ConfiguratorView, ElementId, ViewOp, INJECTED_STYLE_ID};

/// URL and CSS generated for one form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub url: String,
    pub css: String,
}

/// Pushes generated output to the page.
#[derive(Debug, Clone)]
pub struct DisplayCoordinator {
    urls: UrlGenerator,
    /// URL the preview frame was last pointed at.
    navigated: Option<String>,
    /// CSS waiting for the frame to finish loading `navigated`.
    pending_css: Option<String>,
}

impl DisplayCoordinator {
    pub fn new(urls: UrlGenerator) -> Self {
        Self {
            urls,
            navigated: None,
            pending_css: None,
        }
    }

    pub fn url_generator(&self) -> &UrlGenerator {
        &self.urls
    }

    pub fn render(&self, form: &FormState) -> Rendered {
        Rendered {
            url: self.urls.generate_url(form),
            css: generate_css(form),
        }
    }

    /// Recompute and show. Failures are logged and surfaced as a
    /// notification; they never propagate.
    pub fn update<V: ConfiguratorView + ?Sized>(
        &mut self,
        form: &FormState,
        view: &mut V,
    ) -> Option<Rendered> {
        match self.try_update(form, view) {
            Ok(rendered) => Some(rendered),
            Err(e) => {
                error!("Error updating widget display: {e}");
                view.notify(Notification::danger("Failed to update widget display"));
                None
            }
        }
    }

    fn try_update<V: ConfiguratorView + ?Sized>(
        &mut self,
        form: &FormState,
        view: &mut V,
    ) -> Result<Rendered> {
        let rendered = self.render(form);
        let frame = require(view, ElementId::PreviewFrame)?;

        view.apply(ViewOp::SetText {
            id: ElementId::GeneratedUrl,
            text: rendered.url.clone(),
        })?;
        view.apply(ViewOp::SetText {
            id: ElementId::GeneratedCss,
            text: rendered.css.clone(),
        })?;
        view.apply(ViewOp::SetVisible {
            id: ElementId::ResultSection,
            visible: true,
            expanded: None,
        })?;

        // Injection must wait for this navigation's load event; a style
        // element added earlier would be discarded with the old document.
        self.pending_css = form.custom_styling.then(|| rendered.css.clone());
        self.navigated = Some(rendered.url.clone());
        view.apply(ViewOp::Navigate {
            id: frame,
            url: rendered.url.clone(),
        })?;

        debug!(url = %rendered.url, css_len = rendered.css.len(), "display updated");
        Ok(rendered)
    }

    /// The preview frame finished loading `loaded_url` (when the page could
    /// tell). Injects the pending CSS if the load belongs to the latest
    /// navigation.
    pub fn frame_loaded<V: ConfiguratorView + ?Sized>(
        &mut self,
        loaded_url: Option<&str>,
        view: &mut V,
    ) {
        let Some(navigated) = self.navigated.as_deref() else {
            return;
        };
        if let Some(loaded) = loaded_url {
            if !same_url(loaded, navigated) {
                debug!(loaded, navigated, "ignoring load of a superseded document");
                return;
            }
        }
        let Some(css) = self.pending_css.clone() else {
            return;
        };

        let result = view.apply(ViewOp::InjectCss {
            id: ElementId::PreviewFrame,
            style_id: INJECTED_STYLE_ID,
            css,
        });
        if let Err(e) = result {
            self.injection_failed(&e.to_string(), view);
        }
    }

    /// The page could not inject the styles into the frame document.
    pub fn injection_failed<V: ConfiguratorView + ?Sized>(&self, reason: &str, view: &mut V) {
        warn!("Error injecting CSS: {reason}");
        view.notify(Notification::warning("Failed to apply custom styles"));
    }
}

fn same_url(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
