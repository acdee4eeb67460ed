//! Clock ticks as server-sent events, one renderer per subscriber.

use std::sync::Arc;

use axum::extract::RawQuery;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;
use url::form_urlencoded;

use crate::clock::{
    run_or_report, ChannelLabel, PreloadedFonts, SystemClock, DEFAULT_FONT_TIMEOUT,
};
use crate::params::WidgetConfig;

/// Query key carrying the page's offset from UTC, in minutes east.
pub(super) const UTC_OFFSET_KEY: &str = "utcOffset";

fn utc_offset_minutes(query: &str) -> Option<i32> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == UTC_OFFSET_KEY)
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// The page has already waited for its font, so ticks start at once.
pub(super) async fn serve_stream(
    RawQuery(query): RawQuery,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let query = query.unwrap_or_default();
    let config = Arc::new(WidgetConfig::from_query(&query));
    let time = utc_offset_minutes(&query)
        .map_or(SystemClock::Local, SystemClock::from_utc_offset_minutes);

    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        let mut fallback = ChannelLabel::new(tx.clone());
        let label = Some(ChannelLabel::new(tx));
        if let Err(e) = run_or_report(
            config,
            label,
            time,
            &PreloadedFonts,
            DEFAULT_FONT_TIMEOUT,
            &mut fallback,
        )
        .await
        {
            debug!("clock stream ended: {e}");
        }
    });

    let ticks = ReceiverStream::new(rx).map(|text| Event::default().json_data(text));
    Sse::new(ticks).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_from_query() {
        assert_eq!(utc_offset_minutes("dateFormat=HH&utcOffset=-300"), Some(-300));
        assert_eq!(utc_offset_minutes("utcOffset=330"), Some(330));
        assert_eq!(utc_offset_minutes("utcOffset=abc"), None);
        assert_eq!(utc_offset_minutes(""), None);
    }
}
