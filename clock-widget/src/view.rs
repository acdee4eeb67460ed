//! The configurator page as seen from Rust.
//!
//! The page tells the session which elements it actually contains. Every
//! operation names its target, and a view refuses operations on elements it
//! does not have, so "not present" is an error value the caller handles
//! instead of a silent no-op.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};
use crate::notify::Notification;

/// Id of the style element injected into the preview frame.
pub const INJECTED_STYLE_ID: &str = "injectedStyles";

/// Elements of the configurator page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementId {
    WidgetForm,
    DateFormatPreset,
    CustomFormatSection,
    DateFormat,
    FontFamily,
    CustomStyling,
    StylingSettings,
    ResultSection,
    GeneratedUrl,
    #[serde(rename = "generatedCSS")]
    GeneratedCss,
    PreviewFrame,
}

impl ElementId {
    pub const ALL: [ElementId; 11] = [
        ElementId::WidgetForm,
        ElementId::DateFormatPreset,
        ElementId::CustomFormatSection,
        ElementId::DateFormat,
        ElementId::FontFamily,
        ElementId::CustomStyling,
        ElementId::StylingSettings,
        ElementId::ResultSection,
        ElementId::GeneratedUrl,
        ElementId::GeneratedCss,
        ElementId::PreviewFrame,
    ];

    /// DOM id on the page.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::WidgetForm => "widgetForm",
            ElementId::DateFormatPreset => "dateFormatPreset",
            ElementId::CustomFormatSection => "customFormatSection",
            ElementId::DateFormat => "dateFormat",
            ElementId::FontFamily => "fontFamily",
            ElementId::CustomStyling => "customStyling",
            ElementId::StylingSettings => "stylingSettings",
            ElementId::ResultSection => "resultSection",
            ElementId::GeneratedUrl => "generatedUrl",
            ElementId::GeneratedCss => "generatedCSS",
            ElementId::PreviewFrame => "previewFrame",
        }
    }
}

/// One mutation of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewOp {
    /// Replace an element's text content (never parsed as markup or style).
    SetText { id: ElementId, text: String },
    /// Set a form control's value.
    SetValue { id: ElementId, value: String },
    /// Show or hide a section, optionally mirroring `aria-expanded`.
    SetVisible {
        id: ElementId,
        visible: bool,
        expanded: Option<bool>,
    },
    /// Point a frame at a new document.
    Navigate { id: ElementId, url: String },
    /// Replace the text of the frame document's dedicated style element,
    /// creating it if needed.
    #[serde(rename_all = "camelCase")]
    InjectCss {
        id: ElementId,
        style_id: &'static str,
        css: String,
    },
    /// Append choices to a select element.
    AppendOptions { id: ElementId, options: Vec<String> },
}

impl ViewOp {
    pub fn target(&self) -> ElementId {
        match self {
            ViewOp::SetText { id, .. }
            | ViewOp::SetValue { id, .. }
            | ViewOp::SetVisible { id, .. }
            | ViewOp::Navigate { id, .. }
            | ViewOp::InjectCss { id, .. }
            | ViewOp::AppendOptions { id, .. } => *id,
        }
    }
}

/// Something that can show the configurator.
pub trait ConfiguratorView {
    /// Whether the page contains `id`.
    fn has(&self, id: ElementId) -> bool;

    /// Apply one operation. Fails with [`WidgetError::MissingElement`] when
    /// the target is absent.
    fn apply(&mut self, op: ViewOp) -> Result<()>;

    /// Show a transient notification. Best effort; never fails.
    fn notify(&mut self, notification: Notification);
}

/// Typed lookup: `Ok(id)` when present, `MissingElement` otherwise.
pub fn require<V: ConfiguratorView + ?Sized>(view: &V, id: ElementId) -> Result<ElementId> {
    if view.has(id) {
        Ok(id)
    } else {
        Err(WidgetError::missing(id.as_str()))
    }
}

/// In-memory view that records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    present: HashSet<ElementId>,
    pub ops: Vec<ViewOp>,
    pub notifications: Vec<Notification>,
}

impl MemoryView {
    /// A view with every known element present.
    pub fn full() -> Self {
        Self::with_elements(ElementId::ALL)
    }

    pub fn with_elements(elements: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            present: elements.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remove(&mut self, id: ElementId) {
        self.present.remove(&id);
    }

    /// Most recent text written to `id`.
    pub fn text_of(&self, id: ElementId) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::SetText { id: target, text } if *target == id => Some(text.as_str()),
            _ => None,
        })
    }

    /// Most recent visibility of `id`.
    pub fn visible(&self, id: ElementId) -> Option<bool> {
        self.ops.iter().rev().find_map(|op| match op {
            ViewOp::SetVisible { id: target, visible, .. } if *target == id => Some(*visible),
            _ => None,
        })
    }

    pub fn take_ops(&mut self) -> Vec<ViewOp> {
        std::mem::take(&mut self.ops)
    }
}

impl ConfiguratorView for MemoryView {
    fn has(&self, id: ElementId) -> bool {
        self.present.contains(&id)
    }

    fn apply(&mut self, op: ViewOp) -> Result<()> {
        require(self, op.target())?;
        self.ops.push(op);
        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_serialize_with_page_ids() {
        let op = ViewOp::InjectCss {
            id: ElementId::PreviewFrame,
            style_id: INJECTED_STYLE_ID,
            css: ":root {}".into(),
        };
        assert_eq!(
            serde_json::to_string(&op).unwrap(),
            r#"{"type":"injectCss","id":"previewFrame","styleId":"injectedStyles","css":":root {}"}"#
        );
        let op = ViewOp::SetText {
            id: ElementId::GeneratedCss,
            text: String::new(),
        };
        assert_eq!(
            serde_json::to_string(&op).unwrap(),
            r#"{"type":"setText","id":"generatedCSS","text":""}"#
        );
    }

    #[test]
    fn element_ids_match_serde_names() {
        for id in ElementId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn missing_element_is_an_error() {
        let mut view = MemoryView::with_elements([ElementId::GeneratedUrl]);
        let err = view
            .apply(ViewOp::Navigate {
                id: ElementId::PreviewFrame,
                url: "http://x/".into(),
            })
            .unwrap_err();
        assert!(matches!(err, WidgetError::MissingElement(id) if id == "previewFrame"));
        assert!(view.ops.is_empty());
    }
}
