//! Embeddable clock widget.
//!
//! The configurator turns form values into a [`params::ParameterSet`], an
//! embed URL ([`embed`]) and an optional custom-property CSS block
//! ([`stylesheet`]). The widget reads the same parameters back from its URL
//! and renders the time once per second ([`clock`], [`datefmt`]).

pub mod datefmt;
pub mod display;
pub mod embed;
pub mod error;
pub mod fonts;
pub mod form;
pub mod notify;
pub mod params;
pub mod settings;
pub mod stylesheet;
pub mod view;

#[cfg(not(target_arch = "wasm32"))]
pub mod clock;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod debounce;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
#[cfg(not(target_arch = "wasm32"))]
pub mod session;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use embed::UrlGenerator;
pub use error::{Result, WidgetError};
pub use form::FormState;
pub use params::{Param, ParameterSet, WidgetConfig};
pub use stylesheet::generate_css;
