//! The parameter set shared by the configurator and the widget.
//!
//! Every option travels as a named string in the widget URL's query string.
//! Names and defaults are part of the embed contract: URLs generated by older
//! configurators must keep rendering the same way.

use std::fmt;

use url::form_urlencoded;
use url::Url;

/// Token string used when `dateFormat` is absent.
pub const DEFAULT_DATE_FORMAT: &str = "ddd DD MMM yyyy hh:mm:ss A";
/// Font stack used when `fontFamily` is absent.
pub const DEFAULT_FONT_FAMILY: &str = "Roboto, sans-serif";
/// Text color the widget page falls back to.
pub const DEFAULT_TEXT_COLOR: &str = "#fff";

/// A named widget parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    DateFormat,
    FontFamily,
    FontSize,
    FontWeight,
    Color,
    LetterSpacing,
    TextTransform,
    TextShadow,
}

impl Param {
    /// All parameters, in query string order.
    pub const ALL: [Param; 8] = [
        Param::DateFormat,
        Param::FontFamily,
        Param::FontSize,
        Param::FontWeight,
        Param::Color,
        Param::LetterSpacing,
        Param::TextTransform,
        Param::TextShadow,
    ];

    /// The styling parameters, in CSS property order.
    pub const STYLING: [Param; 6] = [
        Param::FontSize,
        Param::FontWeight,
        Param::Color,
        Param::LetterSpacing,
        Param::TextTransform,
        Param::TextShadow,
    ];

    /// Query string key.
    pub fn as_str(self) -> &'static str {
        match self {
            Param::DateFormat => "dateFormat",
            Param::FontFamily => "fontFamily",
            Param::FontSize => "fontSize",
            Param::FontWeight => "fontWeight",
            Param::Color => "color",
            Param::LetterSpacing => "letterSpacing",
            Param::TextTransform => "textTransform",
            Param::TextShadow => "textShadow",
        }
    }

    pub fn from_name(name: &str) -> Option<Param> {
        Param::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Hard-coded default, if the parameter has one.
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            Param::DateFormat => Some(DEFAULT_DATE_FORMAT),
            Param::FontFamily => Some(DEFAULT_FONT_FAMILY),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat set of optional string parameters.
///
/// An empty string is never stored: setting a parameter to `""` removes it,
/// which matches how the widget treats empty query values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: [Option<String>; 8],
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, param: Param) -> Option<&str> {
        self.values[param.index()].as_deref()
    }

    /// Value of `param`, or its hard-coded default.
    pub fn get_or_default(&self, param: Param) -> Option<&str> {
        self.get(param).or_else(|| param.default_value())
    }

    pub fn set(&mut self, param: Param, value: impl Into<String>) {
        let value = value.into();
        self.values[param.index()] = if value.is_empty() { None } else { Some(value) };
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, param: Param, value: impl Into<String>) -> Self {
        self.set(param, value);
        self
    }

    pub fn remove(&mut self, param: Param) -> Option<String> {
        self.values[param.index()].take()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Present parameters in query string order.
    pub fn iter(&self) -> impl Iterator<Item = (Param, &str)> + '_ {
        Param::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|v| (p, v)))
    }

    /// Decode a query string. A leading `?` is accepted, unknown keys are
    /// ignored and the first occurrence of a repeated key wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut set = Self::new();
        let mut seen = [false; 8];
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let Some(param) = Param::from_name(&key) else {
                continue;
            };
            if seen[param.index()] {
                continue;
            }
            seen[param.index()] = true;
            set.set(param, value.into_owned());
        }
        set
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }

    /// Encode present parameters as `application/x-www-form-urlencoded`.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (param, value) in self.iter() {
            serializer.append_pair(param.as_str(), value);
        }
        serializer.finish()
    }
}

/// Widget configuration resolved once from a [`ParameterSet`].
///
/// Immutable for the lifetime of a widget instance; a different font or
/// format means a new URL and a new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub date_format: String,
    pub font_family: String,
    pub color: String,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub letter_spacing: Option<String>,
    pub text_transform: Option<String>,
    pub text_shadow: Option<String>,
}

impl WidgetConfig {
    pub fn from_params(params: &ParameterSet) -> Self {
        let owned = |p: Param| params.get(p).map(str::to_string);
        Self {
            date_format: params
                .get_or_default(Param::DateFormat)
                .unwrap_or(DEFAULT_DATE_FORMAT)
                .to_string(),
            font_family: params
                .get_or_default(Param::FontFamily)
                .unwrap_or(DEFAULT_FONT_FAMILY)
                .to_string(),
            color: params
                .get(Param::Color)
                .unwrap_or(DEFAULT_TEXT_COLOR)
                .to_string(),
            font_size: owned(Param::FontSize),
            font_weight: owned(Param::FontWeight),
            letter_spacing: owned(Param::LetterSpacing),
            text_transform: owned(Param::TextTransform),
            text_shadow: owned(Param::TextShadow),
        }
    }

    pub fn from_query(query: &str) -> Self {
        Self::from_params(&ParameterSet::from_query(query))
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_params(&ParameterSet::from_url(url))
    }

    /// CSS custom properties carried by the URL itself, in stylesheet order.
    ///
    /// Color is only listed when it differs from the page default.
    pub fn custom_properties(&self) -> Vec<(&'static str, &str)> {
        let mut props = Vec::new();
        if let Some(v) = &self.font_size {
            props.push(("font-size", v.as_str()));
        }
        if let Some(v) = &self.font_weight {
            props.push(("font-weight", v.as_str()));
        }
        if self.color != DEFAULT_TEXT_COLOR {
            props.push(("text-color", self.color.as_str()));
        }
        if let Some(v) = &self.letter_spacing {
            props.push(("letter-spacing", v.as_str()));
        }
        if let Some(v) = &self.text_transform {
            props.push(("text-transform", v.as_str()));
        }
        if let Some(v) = &self.text_shadow {
            props.push(("text-shadow", v.as_str()));
        }
        props
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from_params(&ParameterSet::new())
    }
}
