use thiserror::Error;

/// All errors produced by the clock widget crate.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// An element the page is expected to contain was not found.
    #[error("element not found: #{0}")]
    MissingElement(String),

    /// The widget has no label to render the clock into.
    #[error("clock element not found")]
    MissingClockLabel,

    /// The view rejected an operation (socket closed, frame gone, ...).
    #[error("view unavailable: {0}")]
    View(String),

    /// The widget base URL could not be parsed or resolved.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The font list endpoint failed or returned something unexpected.
    #[error("failed to fetch fonts: {0}")]
    FontList(String),

    /// The outgoing HTTP client could not be set up.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    /// The font stylesheet could not be loaded.
    #[error("failed to load font '{family}': {reason}")]
    FontLoad { family: String, reason: String },

    /// A timestamp could not be parsed.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WidgetError>;

/// Shorthand constructors.
impl WidgetError {
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement(id.into())
    }

    pub fn font_list(msg: impl std::fmt::Display) -> Self {
        Self::FontList(msg.to_string())
    }
}
