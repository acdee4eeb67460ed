//! Transient on-screen notifications.

use std::time::Duration;

use serde::{Serialize, Serializer};

/// How long a notification stays on screen unless configured otherwise.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(3);

/// Alert style, named after the page's `alert-*` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

/// A message shown briefly and then removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub level: Level,
    #[serde(rename = "ttlMs", serialize_with = "as_millis")]
    pub lifetime: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
            lifetime: DEFAULT_LIFETIME,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Level::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Level::Warning)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, Level::Danger)
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

fn as_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_for_the_page() {
        let n = Notification::danger("Failed to copy to clipboard");
        assert_eq!(
            serde_json::to_string(&n).unwrap(),
            r#"{"message":"Failed to copy to clipboard","level":"danger","ttlMs":3000}"#
        );
    }
}
