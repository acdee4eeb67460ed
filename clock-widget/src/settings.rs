//! Settings visibility: checkbox-gated sections and the date format preset
//! selector.

use tracing::debug;

use crate::error::Result;
use crate::form::{FormState, CUSTOM_PRESET};
use crate::params::DEFAULT_DATE_FORMAT;
use crate::view::{ConfiguratorView, ElementId, ViewOp};

/// A section shown iff its checkbox is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityBinding {
    pub checkbox: ElementId,
    pub section: ElementId,
}

pub const SETTINGS_BINDINGS: &[VisibilityBinding] = &[VisibilityBinding {
    checkbox: ElementId::CustomStyling,
    section: ElementId::StylingSettings,
}];

fn is_checked(form: &FormState, checkbox: ElementId) -> bool {
    match checkbox {
        ElementId::CustomStyling => form.custom_styling,
        _ => false,
    }
}

/// State of the date format preset selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetState {
    Preset(String),
    Custom,
}

/// The preset selector plus its free-text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSelector {
    state: PresetState,
    custom_input: String,
}

impl PresetSelector {
    pub fn new() -> Self {
        Self {
            state: PresetState::Preset(DEFAULT_DATE_FORMAT.to_string()),
            custom_input: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn state(&self) -> &PresetState {
        &self.state
    }

    /// Current free-text value. Seeded by the last non-custom preset.
    pub fn custom_input(&self) -> &str {
        &self.custom_input
    }

    /// Operations that put the page in this selector's state.
    pub fn initial_ops(&self) -> Vec<ViewOp> {
        let preset = match &self.state {
            PresetState::Preset(literal) => literal.clone(),
            PresetState::Custom => CUSTOM_PRESET.to_string(),
        };
        vec![
            ViewOp::SetValue {
                id: ElementId::DateFormatPreset,
                value: preset,
            },
            ViewOp::SetValue {
                id: ElementId::DateFormat,
                value: self.custom_input.clone(),
            },
            ViewOp::SetVisible {
                id: ElementId::CustomFormatSection,
                visible: self.state == PresetState::Custom,
                expanded: None,
            },
        ]
    }

    /// Select `value`. Returns the page operations, empty when nothing
    /// changed.
    ///
    /// Picking `custom` only reveals the free-text input, which still holds
    /// the previous preset. Picking a preset copies its literal into the
    /// input and hides it again.
    pub fn select(&mut self, value: &str) -> Vec<ViewOp> {
        if value == CUSTOM_PRESET {
            if self.state == PresetState::Custom {
                return Vec::new();
            }
            self.state = PresetState::Custom;
            return vec![ViewOp::SetVisible {
                id: ElementId::CustomFormatSection,
                visible: true,
                expanded: None,
            }];
        }

        if self.state == PresetState::Preset(value.to_string()) {
            return Vec::new();
        }
        self.state = PresetState::Preset(value.to_string());
        self.custom_input = value.to_string();
        vec![
            ViewOp::SetVisible {
                id: ElementId::CustomFormatSection,
                visible: false,
                expanded: None,
            },
            ViewOp::SetValue {
                id: ElementId::DateFormat,
                value: value.to_string(),
            },
        ]
    }
}

impl Default for PresetSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps section visibility in step with the form.
///
/// Bindings whose elements the page lacks are dropped when wiring, and the
/// preset selector is only managed when all three of its elements exist.
#[derive(Debug, Clone)]
pub struct SettingsController {
    bindings: Vec<VisibilityBinding>,
    preset: Option<PresetSelector>,
}

impl SettingsController {
    pub fn wire<V: ConfiguratorView + ?Sized>(view: &V) -> Self {
        let bindings = SETTINGS_BINDINGS
            .iter()
            .copied()
            .filter(|b| {
                let wired = view.has(b.checkbox) && view.has(b.section);
                if !wired {
                    debug!(
                        checkbox = b.checkbox.as_str(),
                        section = b.section.as_str(),
                        "skipping visibility binding, element missing"
                    );
                }
                wired
            })
            .collect();

        let preset_elements = [
            ElementId::DateFormatPreset,
            ElementId::CustomFormatSection,
            ElementId::DateFormat,
        ];
        let preset = if preset_elements.iter().all(|id| view.has(*id)) {
            Some(PresetSelector::new())
        } else {
            debug!("skipping date format preset, element missing");
            None
        };

        Self { bindings, preset }
    }

    pub fn bindings(&self) -> &[VisibilityBinding] {
        &self.bindings
    }

    pub fn preset(&self) -> Option<&PresetSelector> {
        self.preset.as_ref()
    }

    /// Initial sync. Also seeds `form` with the selector's starting values.
    pub fn initialize<V: ConfiguratorView + ?Sized>(
        &mut self,
        form: &mut FormState,
        view: &mut V,
    ) -> Result<()> {
        if let Some(preset) = &self.preset {
            let literal = preset.custom_input().to_string();
            form.date_format_preset = Some(literal.clone());
            form.date_format = Some(literal);
            for op in preset.initial_ops() {
                view.apply(op)?;
            }
        }
        self.sync_sections(form, view)
    }

    /// Handle a `change` event.
    pub fn on_change<V: ConfiguratorView + ?Sized>(
        &mut self,
        form: &mut FormState,
        view: &mut V,
    ) -> Result<()> {
        if let (Some(preset), Some(value)) = (&mut self.preset, form.date_format_preset.clone()) {
            let ops = preset.select(&value);
            if preset.state() != &PresetState::Custom {
                form.date_format = Some(preset.custom_input().to_string());
            }
            for op in ops {
                view.apply(op)?;
            }
        }
        self.sync_sections(form, view)
    }

    fn sync_sections<V: ConfiguratorView + ?Sized>(&self, form: &FormState, view: &mut V) -> Result<()> {
        for binding in &self.bindings {
            let checked = is_checked(form, binding.checkbox);
            view.apply(ViewOp::SetVisible {
                id: binding.section,
                visible: checked,
                expanded: Some(checked),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;

    #[test]
    fn section_follows_checkbox() {
        let mut view = MemoryView::full();
        let mut controller = SettingsController::wire(&view);
        let mut form = FormState::default();

        controller.initialize(&mut form, &mut view).unwrap();
        assert_eq!(view.visible(ElementId::StylingSettings), Some(false));

        form.custom_styling = true;
        controller.on_change(&mut form, &mut view).unwrap();
        assert_eq!(view.visible(ElementId::StylingSettings), Some(true));
        assert!(view.ops.contains(&ViewOp::SetVisible {
            id: ElementId::StylingSettings,
            visible: true,
            expanded: Some(true),
        }));
    }

    #[test]
    fn missing_section_skips_binding() {
        let mut view = MemoryView::full();
        view.remove(ElementId::StylingSettings);
        let mut controller = SettingsController::wire(&view);
        assert!(controller.bindings().is_empty());

        let mut form = FormState {
            custom_styling: true,
            ..FormState::default()
        };
        controller.on_change(&mut form, &mut view).unwrap();
        assert_eq!(view.visible(ElementId::StylingSettings), None);
    }

    #[test]
    fn initialize_seeds_default_preset() {
        let mut view = MemoryView::full();
        let mut controller = SettingsController::wire(&view);
        let mut form = FormState::default();
        controller.initialize(&mut form, &mut view).unwrap();

        assert_eq!(form.date_format_preset.as_deref(), Some(DEFAULT_DATE_FORMAT));
        assert_eq!(form.date_format.as_deref(), Some(DEFAULT_DATE_FORMAT));
        assert_eq!(view.visible(ElementId::CustomFormatSection), Some(false));
    }

    #[test]
    fn custom_keeps_previous_preset_in_input() {
        let mut selector = PresetSelector::new();
        selector.select("HH:mm:ss");
        assert_eq!(selector.custom_input(), "HH:mm:ss");

        let ops = selector.select(CUSTOM_PRESET);
        assert_eq!(selector.state(), &PresetState::Custom);
        assert_eq!(selector.custom_input(), "HH:mm:ss");
        assert_eq!(
            ops,
            vec![ViewOp::SetVisible {
                id: ElementId::CustomFormatSection,
                visible: true,
                expanded: None,
            }]
        );

        assert!(selector.select(CUSTOM_PRESET).is_empty());
    }

    #[test]
    fn leaving_custom_copies_new_preset() {
        let mut selector = PresetSelector::new();
        selector.select(CUSTOM_PRESET);
        let ops = selector.select("YYYY-MM-DD HH:mm:ss");
        assert_eq!(selector.custom_input(), "YYYY-MM-DD HH:mm:ss");
        assert!(ops.contains(&ViewOp::SetValue {
            id: ElementId::DateFormat,
            value: "YYYY-MM-DD HH:mm:ss".into(),
        }));
    }

    #[test]
    fn change_event_updates_form_free_text() {
        let mut view = MemoryView::full();
        let mut controller = SettingsController::wire(&view);
        let mut form = FormState::default();
        controller.initialize(&mut form, &mut view).unwrap();

        form.date_format_preset = Some("h:mm A".into());
        controller.on_change(&mut form, &mut view).unwrap();
        assert_eq!(form.date_format.as_deref(), Some("h:mm A"));

        form.date_format_preset = Some(CUSTOM_PRESET.into());
        form.date_format = Some("[custom] HH".into());
        controller.on_change(&mut form, &mut view).unwrap();
        assert_eq!(form.date_format.as_deref(), Some("[custom] HH"));
        assert_eq!(view.visible(ElementId::CustomFormatSection), Some(true));
    }
}
