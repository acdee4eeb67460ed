use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tokio::sync::mpsc;
use tokio::time::Instant;

use clock_widget::clock::{ChannelLabel, ClockRenderer, FontLoader, TimeSource, TICK};
use clock_widget::datefmt;
use clock_widget::error::Result;
use clock_widget::WidgetConfig;

/// Paused-time wall clock: tokio's virtual elapsed time added to a fixed epoch.
struct VirtualClock {
    start: Instant,
    epoch: i64,
}

impl TimeSource for VirtualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let elapsed = self.start.elapsed().as_millis() as i64;
        Utc.timestamp_millis_opt(self.epoch * 1000 + elapsed)
            .unwrap()
            .with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap())
    }
}

struct InstantFonts;

impl FontLoader for InstantFonts {
    async fn load(&self, _font_family: &str) -> Result<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn label_changes_every_second_and_matches_format() {
    let format = "dddd HH:mm:ss";
    let config = Arc::new(WidgetConfig::from_query(&format!(
        "dateFormat={}",
        urlencoding::encode(format)
    )));
    let epoch = 1_717_416_000; // 2024-06-03T12:00:00Z, a Monday
    let start = Instant::now();
    let clock = VirtualClock {
        start,
        epoch,
    };

    let (tx, mut rx) = mpsc::channel(16);
    let renderer = ClockRenderer::new(config, Some(ChannelLabel::new(tx)), clock).unwrap();
    let task = tokio::spawn(renderer.start(&InstantFonts, Duration::from_secs(3)));

    let mut previous = None;
    for n in 0..5u32 {
        let text = rx.recv().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed < TICK * (n + 1), "tick {n} late: {elapsed:?}");

        let expected_instant = Utc
            .timestamp_opt(epoch + i64::from(n), 0)
            .unwrap()
            .with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(text, datefmt::format(&expected_instant, format));
        assert_ne!(previous.as_ref(), Some(&text));
        previous = Some(text);
    }
    assert_eq!(previous.as_deref(), Some("Monday 14:00:04"));

    drop(rx);
    assert!(task.await.unwrap().is_err());
}
