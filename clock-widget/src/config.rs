//! Server configuration, resolved once at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::clock::DEFAULT_FONT_TIMEOUT;
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::fonts::FONT_LIST_URL;
use crate::notify::DEFAULT_LIFETIME;
use crate::session::SessionOptions;

pub const DEFAULT_PORT: u16 = 3333;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub font_list_url: String,
    pub debounce: Duration,
    pub notification_lifetime: Duration,
    /// Upper bound on outgoing font requests, the font list included.
    pub font_timeout: Duration,
}

impl AppConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            debounce: self.debounce,
            notification_lifetime: self.notification_lifetime,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            font_list_url: FONT_LIST_URL.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            notification_lifetime: DEFAULT_LIFETIME,
            font_timeout: DEFAULT_FONT_TIMEOUT,
        }
    }
}
