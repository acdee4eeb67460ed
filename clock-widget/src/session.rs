//! One configurator page, driven by its events.

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::debounce::Debouncer;
use crate::display::DisplayCoordinator;
use crate::embed::UrlGenerator;
use crate::form::FormState;
use crate::notify::{Notification, DEFAULT_LIFETIME};
use crate::settings::SettingsController;
use crate::view::{ConfiguratorView, ElementId, ViewOp};

/// First message from a page: what it contains and how its form starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ready {
    /// Origin plus path of the configurator page.
    pub page_url: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementId>,
    #[serde(default)]
    pub form: FormState,
}

/// Events a page sends after [`Ready`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    Input { form: FormState },
    Change { form: FormState },
    FrameLoaded { url: Option<String> },
    InjectFailed { error: String },
    Copied { ok: bool, error: Option<String> },
}

/// Everything the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Client(ClientEvent),
    /// Outcome of the font list fetch.
    FontsLoaded(Result<Vec<String>, String>),
}

impl From<ClientEvent> for SessionEvent {
    fn from(event: ClientEvent) -> Self {
        SessionEvent::Client(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub debounce: Duration,
    pub notification_lifetime: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: crate::debounce::DEFAULT_DEBOUNCE,
            notification_lifetime: DEFAULT_LIFETIME,
        }
    }
}

/// State of one configurator page.
pub struct ConfiguratorSession<V> {
    view: V,
    form: FormState,
    settings: SettingsController,
    display: DisplayCoordinator,
    options: SessionOptions,
}

impl<V: ConfiguratorView> ConfiguratorSession<V> {
    /// Wire the page and show the initial output.
    pub fn start(mut view: V, urls: UrlGenerator, form: FormState, options: SessionOptions) -> Self {
        let mut settings = SettingsController::wire(&view);
        let mut form = form;
        if let Err(e) = settings.initialize(&mut form, &mut view) {
            error!("Error initializing settings: {e}");
        }
        let mut session = Self {
            view,
            form,
            settings,
            display: DisplayCoordinator::new(urls),
            options,
        };
        session.recompute();
        session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Handle one event. Returns whether a recompute is due.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Client(ClientEvent::Input { form }) => {
                self.form = form;
                true
            }
            SessionEvent::Client(ClientEvent::Change { form }) => {
                self.form = form;
                if let Err(e) = self.settings.on_change(&mut self.form, &mut self.view) {
                    error!("Error updating settings visibility: {e}");
                }
                true
            }
            SessionEvent::Client(ClientEvent::FrameLoaded { url }) => {
                self.display.frame_loaded(url.as_deref(), &mut self.view);
                false
            }
            SessionEvent::Client(ClientEvent::InjectFailed { error }) => {
                self.display.injection_failed(&error, &mut self.view);
                false
            }
            SessionEvent::Client(ClientEvent::Copied { ok, error }) => {
                self.copied(ok, error.as_deref());
                false
            }
            SessionEvent::FontsLoaded(result) => {
                self.fonts_loaded(result);
                false
            }
        }
    }

    /// Push the current form through the display coordinator.
    pub fn recompute(&mut self) {
        self.display.update(&self.form, &mut self.view);
    }

    /// Process events until the channel closes, debouncing recomputes.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) -> V {
        let mut debounce = Debouncer::new(self.options.debounce);
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        if self.handle(event) {
                            debounce.schedule();
                        }
                    }
                    None => break,
                },
                _ = debounce.fired() => self.recompute(),
            }
        }
        debug!("configurator session ended");
        self.view
    }

    fn notify(&mut self, notification: Notification) {
        self.view
            .notify(notification.with_lifetime(self.options.notification_lifetime));
    }

    fn copied(&mut self, ok: bool, reason: Option<&str>) {
        if ok {
            self.notify(Notification::success("Copied to clipboard!"));
        } else {
            error!("Failed to copy: {}", reason.unwrap_or("unknown error"));
            self.notify(Notification::danger("Failed to copy to clipboard"));
        }
    }

    fn fonts_loaded(&mut self, result: Result<Vec<String>, String>) {
        match result {
            Ok(fonts) => {
                if !self.view.has(ElementId::FontFamily) {
                    debug!("no font selector, dropping {} fonts", fonts.len());
                    return;
                }
                let op = ViewOp::AppendOptions {
                    id: ElementId::FontFamily,
                    options: fonts,
                };
                if let Err(e) = self.view.apply(op) {
                    error!("Error loading fonts: {e}");
                }
            }
            Err(e) => {
                error!("Error loading fonts: {e}");
                self.notify(Notification::danger(
                    "Failed to load fonts. Please try again later.",
                ));
            }
        }
    }
}
