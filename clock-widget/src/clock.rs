//! The widget's clock loop.
//!
//! A renderer starts in [`ClockState::Loading`] while the font is requested,
//! then switches to [`ClockState::Running`]: it renders once straight away and
//! then once per tick for as long as its label accepts text.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Utc};
use tokio::sync::mpsc;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::datefmt::DateFormat;
use crate::error::{Result, WidgetError};
use crate::params::WidgetConfig;

/// Re-render period.
pub const TICK: Duration = Duration::from_secs(1);

/// Shown in place of the clock when it cannot start.
pub const CLOCK_ERROR_TEXT: &str = "Error loading clock";

/// How long to wait for font confirmation before rendering anyway.
pub const DEFAULT_FONT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Loading,
    Running,
}

/// Where the formatted time goes.
pub trait Label: Send {
    /// Replace the label text. An error means the label is gone for good.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Source of "now".
pub trait TimeSource: Send {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Requests a web font and resolves once it is usable.
pub trait FontLoader {
    fn load(&self, font_family: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Font already in place where the text is drawn: a terminal's own font, or
/// a browser page that loaded the family before subscribing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreloadedFonts;

impl FontLoader for PreloadedFonts {
    async fn load(&self, font_family: &str) -> Result<()> {
        debug!(font = font_family, "font loaded by the display");
        Ok(())
    }
}

/// Wall clock in a chosen zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemClock {
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl SystemClock {
    /// Zone `minutes` east of UTC, or local time when out of range.
    pub fn from_utc_offset_minutes(minutes: i32) -> Self {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map_or(SystemClock::Local, SystemClock::Fixed)
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self {
            SystemClock::Local => Local::now().fixed_offset(),
            SystemClock::Utc => Utc::now().fixed_offset(),
            SystemClock::Fixed(offset) => Utc::now().with_timezone(offset),
        }
    }
}

/// Label backed by a channel, for streaming ticks to a remote page.
///
/// A full channel drops the tick; a closed one ends the clock.
#[derive(Debug, Clone)]
pub struct ChannelLabel {
    tx: mpsc::Sender<String>,
}

impl ChannelLabel {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

impl Label for ChannelLabel {
    fn set_text(&mut self, text: &str) -> Result<()> {
        match self.tx.try_send(text.to_string()) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("label channel full, dropping tick");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                Err(WidgetError::View("label closed".to_string()))
            }
        }
    }
}

/// Renders the configured format into a label.
pub struct ClockRenderer<L, T> {
    config: Arc<WidgetConfig>,
    format: DateFormat,
    label: L,
    time: T,
    state: ClockState,
    tick: Duration,
}

impl<L: Label, T: TimeSource> ClockRenderer<L, T> {
    /// Fails when there is no label to render into.
    pub fn new(config: Arc<WidgetConfig>, label: Option<L>, time: T) -> Result<Self> {
        let label = label.ok_or(WidgetError::MissingClockLabel)?;
        let format = DateFormat::parse(&config.date_format);
        Ok(Self {
            config,
            format,
            label,
            time,
            state: ClockState::Loading,
            tick: TICK,
        })
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Current time in the configured format.
    pub fn formatted_now(&self) -> String {
        self.format.format(&self.time.now())
    }

    /// Render once.
    pub fn render(&mut self) -> Result<()> {
        let text = self.formatted_now();
        self.label.set_text(&text)
    }

    /// Loading state: request the font and wait for it, at most `limit`.
    /// Failure only costs a warning.
    pub async fn load_font<F: FontLoader>(&mut self, loader: &F, limit: Duration) {
        self.state = ClockState::Loading;
        let family = self.config.font_family.clone();
        match timeout(limit, loader.load(&family)).await {
            Ok(Ok(())) => debug!(font = %family, "font loaded"),
            Ok(Err(e)) => warn!("Failed to load font: {family}: {e}"),
            Err(_) => warn!("Failed to load font: {family}: timed out after {limit:?}"),
        }
    }

    /// Running state: render now and on every tick. Returns only when the
    /// label stops accepting text.
    pub async fn run(mut self) -> Result<()> {
        self.state = ClockState::Running;
        let mut ticks = interval(self.tick);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            self.render()?;
        }
    }

    /// Load the font, then run.
    pub async fn start<F: FontLoader>(mut self, loader: &F, font_timeout: Duration) -> Result<()> {
        self.load_font(loader, font_timeout).await;
        self.run().await
    }
}

/// Start a clock, or put [`CLOCK_ERROR_TEXT`] into `fallback` when it cannot
/// be created.
pub async fn run_or_report<L, T, F, E>(
    config: Arc<WidgetConfig>,
    label: Option<L>,
    time: T,
    loader: &F,
    font_timeout: Duration,
    fallback: &mut E,
) -> Result<()>
where
    L: Label,
    T: TimeSource,
    F: FontLoader,
    E: Label + ?Sized,
{
    match ClockRenderer::new(config, label, time) {
        Ok(renderer) => renderer.start(loader, font_timeout).await,
        Err(e) => {
            error!("Failed to initialize clock: {e}");
            fallback.set_text(CLOCK_ERROR_TEXT)?;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicI64, Ordering};
    use tokio::time::Instant;

    /// Starts at a fixed instant and moves one second per call.
    struct SteppingClock {
        secs: Arc<AtomicI64>,
    }

    impl TimeSource for SteppingClock {
        fn now(&self) -> DateTime<FixedOffset> {
            let s = self.secs.fetch_add(1, Ordering::SeqCst);
            Utc.timestamp_opt(1_700_000_000 + s, 0).unwrap().fixed_offset()
        }
    }

    fn stepping() -> SteppingClock {
        SteppingClock {
            secs: Arc::new(AtomicI64::new(0)),
        }
    }

    struct NeverLoads;

    impl FontLoader for NeverLoads {
        async fn load(&self, _font_family: &str) -> Result<()> {
            std::future::pending().await
        }
    }

    struct FailsToLoad;

    impl FontLoader for FailsToLoad {
        async fn load(&self, font_family: &str) -> Result<()> {
            Err(WidgetError::FontLoad {
                family: font_family.to_string(),
                reason: "offline".to_string(),
            })
        }
    }

    struct VecLabel(Vec<String>);

    impl Label for VecLabel {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    fn config(format: &str) -> Arc<WidgetConfig> {
        Arc::new(WidgetConfig::from_query(&format!("dateFormat={format}")))
    }

    #[tokio::test(start_paused = true)]
    async fn preloaded_font_renders_without_waiting() {
        let (tx, mut rx) = mpsc::channel(4);
        let renderer =
            ClockRenderer::new(config("HH"), Some(ChannelLabel::new(tx)), SystemClock::Utc).unwrap();
        let start = Instant::now();
        let task = tokio::spawn(renderer.start(&PreloadedFonts, DEFAULT_FONT_TIMEOUT));
        assert!(rx.recv().await.is_some());
        assert!(start.elapsed() < Duration::from_millis(1));
        task.abort();
    }

    #[test]
    fn missing_label_is_fatal() {
        let result = ClockRenderer::<ChannelLabel, _>::new(config("HH"), None, SystemClock::Utc);
        assert!(matches!(result, Err(WidgetError::MissingClockLabel)));
    }

    #[tokio::test]
    async fn missing_label_reports_error_text() {
        let mut fallback = VecLabel(Vec::new());
        let result = run_or_report::<ChannelLabel, _, _, _>(
            config("HH"),
            None,
            SystemClock::Utc,
            &FailsToLoad,
            DEFAULT_FONT_TIMEOUT,
            &mut fallback,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(fallback.0, vec![CLOCK_ERROR_TEXT.to_string()]);
    }

    #[test]
    fn formats_with_configured_tokens() {
        let (tx, _rx) = mpsc::channel(1);
        let renderer =
            ClockRenderer::new(config("YYYY-MM-DD HH:mm:ss"), Some(ChannelLabel::new(tx)), stepping())
                .unwrap();
        assert_eq!(renderer.state(), ClockState::Loading);
        // 1_700_000_000 is 2023-11-14T22:13:20Z.
        assert_eq!(renderer.formatted_now(), "2023-11-14 22:13:20");
        assert_eq!(renderer.formatted_now(), "2023-11-14 22:13:21");
    }

    #[tokio::test(start_paused = true)]
    async fn renders_immediately_then_every_second() {
        let (tx, mut rx) = mpsc::channel(8);
        let renderer =
            ClockRenderer::new(config("HH:mm:ss"), Some(ChannelLabel::new(tx)), stepping()).unwrap();
        let start = Instant::now();
        let task = tokio::spawn(renderer.start(&FailsToLoad, DEFAULT_FONT_TIMEOUT));

        let first = rx.recv().await.unwrap();
        assert_eq!(first, "22:13:20");
        assert!(start.elapsed() < Duration::from_millis(5));

        let second = rx.recv().await.unwrap();
        assert_eq!(second, "22:13:21");
        let elapsed = start.elapsed();
        assert!(elapsed >= TICK && elapsed < TICK + Duration::from_millis(5));

        drop(rx);
        let result = task.await.unwrap();
        assert!(matches!(result, Err(WidgetError::View(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_font_does_not_block_forever() {
        let (tx, mut rx) = mpsc::channel(8);
        let renderer =
            ClockRenderer::new(config("ss"), Some(ChannelLabel::new(tx)), stepping()).unwrap();
        let start = Instant::now();
        let limit = Duration::from_millis(1500);
        tokio::spawn(async move { renderer.start(&NeverLoads, limit).await });

        rx.recv().await.unwrap();
        assert!(start.elapsed() >= limit);
    }
}
