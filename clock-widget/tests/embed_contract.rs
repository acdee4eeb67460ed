use clock_widget::form::{CUSTOM_PRESET, DEFAULT_PICKER_COLOR, FONT_WEIGHT_PLACEHOLDER};
use clock_widget::params::DEFAULT_DATE_FORMAT;
use clock_widget::{generate_css, FormState, Param, ParameterSet, UrlGenerator, WidgetConfig};

fn generator() -> UrlGenerator {
    UrlGenerator::new("http://localhost:3333/").unwrap()
}

fn all_styling(custom_styling: bool) -> FormState {
    FormState {
        custom_styling,
        font_size: Some("64px".into()),
        font_weight: Some("900".into()),
        color: Some("#00FF00".into()),
        letter_spacing: Some("0.1em".into()),
        text_transform: Some("capitalize".into()),
        text_shadow: Some("0 0 8px rgba(0, 0, 0, 0.8)".into()),
        ..FormState::initial()
    }
}

#[test]
fn format_and_font_survive_the_url() {
    let cases = [
        ("dddd, MMMM Do YYYY, h:mm:ss a", "'Open Sans', Arial, sans-serif"),
        ("[Today is] dddd [at] HH:mm", "\"Fira Code\", monospace"),
        ("YYYY-MM-DD\\THH:mm:ssZ", "Noto Sans JP, sans-serif"),
        ("h:mm A · ddd", "Ubuntu Mono"),
        ("Q/YYYY #w 100% & more", "Lobster, cursive"),
    ];
    let gen = generator();
    for (format, family) in cases {
        let form = FormState {
            date_format_preset: Some(CUSTOM_PRESET.into()),
            date_format: Some(format.into()),
            font_family: Some(family.into()),
            ..FormState::default()
        };
        let url = url::Url::parse(&gen.generate_url(&form)).unwrap();
        let params = ParameterSet::from_url(&url);
        assert_eq!(params.get(Param::DateFormat), Some(format));
        assert_eq!(params.get(Param::FontFamily), Some(family));
    }
}

#[test]
fn styling_disabled_means_no_css() {
    assert_eq!(generate_css(&all_styling(false)), "");
    assert!(!generate_css(&all_styling(true)).is_empty());
}

#[test]
fn text_color_dropped_only_for_exact_default() {
    let mut form = all_styling(true);
    form.color = Some(DEFAULT_PICKER_COLOR.into());
    assert!(!generate_css(&form).contains("--text-color"));

    for near_miss in ["#FFFFFF", "#fff", "#fffffe", "white"] {
        form.color = Some(near_miss.into());
        assert!(
            generate_css(&form).contains(&format!("  --text-color: {near_miss};")),
            "{near_miss} should be kept"
        );
    }
}

#[test]
fn font_weight_dropped_only_for_placeholder() {
    let mut form = all_styling(true);
    form.font_weight = Some(FONT_WEIGHT_PLACEHOLDER.into());
    assert!(!generate_css(&form).contains("--font-weight"));

    form.font_weight = Some("select weight".into());
    assert!(generate_css(&form).contains("  --font-weight: select weight;"));
}

#[test]
fn custom_preset_uses_free_text() {
    let form = FormState {
        date_format_preset: Some(CUSTOM_PRESET.into()),
        date_format: Some("YYYY-MM-DD".into()),
        ..FormState::default()
    };
    let url = generator().generate_url(&form);
    assert!(url.contains("dateFormat=YYYY-MM-DD"));
    let encoded_default: String =
        url::form_urlencoded::byte_serialize(DEFAULT_DATE_FORMAT.as_bytes()).collect();
    assert!(!url.contains(&encoded_default));
}

#[test]
fn widget_defaults_font_family() {
    let url = url::Url::parse("http://localhost:3333/widget/clock.html?dateFormat=HH").unwrap();
    assert_eq!(WidgetConfig::from_url(&url).font_family, "Roboto, sans-serif");
}

#[test]
fn toggling_styling_reproduces_css() {
    let mut form = all_styling(true);
    let before = generate_css(&form);
    form.custom_styling = false;
    assert_eq!(generate_css(&form), "");
    form.custom_styling = true;
    assert_eq!(generate_css(&form), before);
}

#[test]
fn styled_url_carries_styling_to_widget() {
    let form = all_styling(true);
    let url = url::Url::parse(&generator().generate_url(&form)).unwrap();
    let config = WidgetConfig::from_url(&url);
    assert_eq!(config.font_size.as_deref(), Some("64px"));
    assert_eq!(config.color, "#00FF00");
    assert_eq!(config.text_shadow.as_deref(), Some("0 0 8px rgba(0, 0, 0, 0.8)"));

    let unstyled = url::Url::parse(&generator().generate_url(&all_styling(false))).unwrap();
    assert!(WidgetConfig::from_url(&unstyled).custom_properties().is_empty());
}
