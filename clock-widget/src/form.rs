//! Configurator form model.

use serde::{Deserialize, Serialize};

use crate::params::DEFAULT_DATE_FORMAT;

/// Preset selector value that switches to the free-text date format input.
pub const CUSTOM_PRESET: &str = "custom";

/// Font weight select placeholder; never a real weight.
pub const FONT_WEIGHT_PLACEHOLDER: &str = "Select Weight";

/// Color picker default; matches the widget's own default text color.
pub const DEFAULT_PICKER_COLOR: &str = "#ffffff";

/// A named date format offered in the preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatePreset {
    pub label: &'static str,
    pub format: &'static str,
}

pub const DATE_PRESETS: &[DatePreset] = &[
    DatePreset { label: "Full (Mon 01 Jan 2024 09:30:00 AM)", format: DEFAULT_DATE_FORMAT },
    DatePreset { label: "Time, 24 hour (21:30:00)", format: "HH:mm:ss" },
    DatePreset { label: "Time, 12 hour (9:30 PM)", format: "h:mm A" },
    DatePreset { label: "Long date (Monday, January 1st 2024)", format: "dddd, MMMM Do YYYY" },
    DatePreset { label: "ISO (2024-01-01 21:30:00)", format: "YYYY-MM-DD HH:mm:ss" },
    DatePreset { label: "Short date (01/01/2024)", format: "DD/MM/YYYY" },
];

pub fn find_preset(format: &str) -> Option<&'static DatePreset> {
    DATE_PRESETS.iter().find(|p| p.format == format)
}

/// Current values of the configurator form.
///
/// Every field is optional on the wire; the page only sends the controls it
/// actually has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub date_format_preset: Option<String>,
    /// Free-text date format, used when the preset is [`CUSTOM_PRESET`].
    pub date_format: Option<String>,
    pub font_family: Option<String>,
    pub custom_styling: bool,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub letter_spacing: Option<String>,
    pub text_transform: Option<String>,
    pub text_shadow: Option<String>,
}

impl FormState {
    /// The form as first rendered: default preset, free-text seeded with it.
    pub fn initial() -> Self {
        Self {
            date_format_preset: Some(DEFAULT_DATE_FORMAT.to_string()),
            date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            ..Self::default()
        }
    }

    /// Date format the widget should use: the free-text value when the
    /// preset selector says `custom`, otherwise the preset verbatim.
    pub fn resolved_date_format(&self) -> Option<&str> {
        let preset = self.date_format_preset.as_deref();
        let value = if preset == Some(CUSTOM_PRESET) {
            self.date_format.as_deref()
        } else {
            preset
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref().filter(|v| !v.is_empty())
    }

    /// Styling subset, or `None` when custom styling is switched off.
    pub fn styling(&self) -> Option<StylingOptions<'_>> {
        self.custom_styling.then(|| StylingOptions {
            font_size: self.font_size.as_deref(),
            font_weight: self.font_weight.as_deref(),
            color: self.color.as_deref(),
            letter_spacing: self.letter_spacing.as_deref(),
            text_transform: self.text_transform.as_deref(),
            text_shadow: self.text_shadow.as_deref(),
        })
    }
}

/// Styling fields of an enabled custom-styling section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StylingOptions<'a> {
    pub font_size: Option<&'a str>,
    pub font_weight: Option<&'a str>,
    pub color: Option<&'a str>,
    pub letter_spacing: Option<&'a str>,
    pub text_transform: Option<&'a str>,
    pub text_shadow: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_is_used_verbatim() {
        let form = FormState {
            date_format_preset: Some("HH:mm:ss".into()),
            date_format: Some("ignored".into()),
            ..FormState::default()
        };
        assert_eq!(form.resolved_date_format(), Some("HH:mm:ss"));
    }

    #[test]
    fn custom_preset_reads_free_text() {
        let form = FormState {
            date_format_preset: Some(CUSTOM_PRESET.into()),
            date_format: Some("YYYY-MM-DD".into()),
            ..FormState::default()
        };
        assert_eq!(form.resolved_date_format(), Some("YYYY-MM-DD"));
    }

    #[test]
    fn custom_preset_with_empty_text_is_absent() {
        let form = FormState {
            date_format_preset: Some(CUSTOM_PRESET.into()),
            date_format: Some(String::new()),
            ..FormState::default()
        };
        assert_eq!(form.resolved_date_format(), None);
    }

    #[test]
    fn deserializes_partial_camel_case_payload() {
        let form: FormState = serde_json::from_str(
            r#"{"dateFormatPreset":"custom","dateFormat":"HH","customStyling":true,"fontWeight":"700"}"#,
        )
        .unwrap();
        assert!(form.custom_styling);
        assert_eq!(form.font_weight.as_deref(), Some("700"));
        assert_eq!(form.font_family, None);
    }

    #[test]
    fn styling_gated_by_checkbox() {
        let mut form = FormState {
            font_size: Some("2rem".into()),
            ..FormState::default()
        };
        assert!(form.styling().is_none());
        form.custom_styling = true;
        assert_eq!(form.styling().unwrap().font_size, Some("2rem"));
    }

    #[test]
    fn initial_form_uses_default_preset() {
        let form = FormState::initial();
        assert_eq!(form.resolved_date_format(), Some(DEFAULT_DATE_FORMAT));
        assert!(find_preset(DEFAULT_DATE_FORMAT).is_some());
    }
}
