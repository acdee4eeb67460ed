//! Configurator socket: one [`ConfiguratorSession`] per connection.

use std::collections::HashSet;
use std::future::Future;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::embed::UrlGenerator;
use crate::error::{Result, WidgetError};
use crate::fonts::fetch_font_list;
use crate::notify::Notification;
use crate::form::FormState;
use crate::session::{ClientEvent, ConfiguratorSession, Ready, SessionEvent, SessionOptions};
use crate::view::{require, ConfiguratorView, ElementId, ViewOp};

use super::AppState;

/// Page view whose operations are serialized onto the socket.
struct ChannelView {
    present: HashSet<ElementId>,
    tx: mpsc::UnboundedSender<String>,
}

#[derive(Serialize)]
struct NotifyMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    notification: &'a Notification,
}

impl ChannelView {
    fn new(
        elements: impl IntoIterator<Item = ElementId>,
        tx: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self {
            present: elements.into_iter().collect(),
            tx,
        }
    }

    fn send<T: Serialize>(&self, msg: &T) -> Result<()> {
        let text = serde_json::to_string(msg).map_err(|e| WidgetError::View(e.to_string()))?;
        self.tx
            .send(text)
            .map_err(|_| WidgetError::View("socket closed".to_string()))
    }
}

impl ConfiguratorView for ChannelView {
    fn has(&self, id: ElementId) -> bool {
        self.present.contains(&id)
    }

    fn apply(&mut self, op: ViewOp) -> Result<()> {
        require(self, op.target())?;
        self.send(&op)
    }

    fn notify(&mut self, notification: Notification) {
        let msg = NotifyMessage {
            kind: "notify",
            notification: &notification,
        };
        if let Err(e) = self.send(&msg) {
            debug!("dropping notification: {e}");
        }
    }
}

pub(super) async fn serve_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Wait for the page's `ready` message.
async fn await_ready(socket: &mut WebSocket) -> Option<Ready> {
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<Ready>(text.as_str()) {
                Ok(ready) => return Some(ready),
                Err(e) => debug!("ignoring message before ready: {e}"),
            },
            Message::Close(_) => return None,
            _ => {}
        }
    }
    None
}

fn url_generator(ready: &Ready, state: &AppState) -> Result<UrlGenerator> {
    let fallback = format!("http://{}/", state.config.addr());
    match ready.page_url.as_deref() {
        Some(page_url) => UrlGenerator::new(page_url).or_else(|e| {
            warn!("{e}, using {fallback}");
            UrlGenerator::new(&fallback)
        }),
        None => UrlGenerator::new(&fallback),
    }
}

/// Work spawned for one connection: the session loop and the font list
/// fetch feeding it.
struct SessionTasks {
    events: mpsc::Sender<SessionEvent>,
    session: JoinHandle<ChannelView>,
    fonts: JoinHandle<()>,
}

impl SessionTasks {
    fn spawn<F>(
        view: ChannelView,
        urls: UrlGenerator,
        form: FormState,
        options: SessionOptions,
        font_list: F,
    ) -> Self
    where
        F: Future<Output = Result<Vec<String>>> + Send + 'static,
    {
        let (events, event_rx) = mpsc::channel(64);

        let fonts_tx = events.clone();
        let fonts = tokio::spawn(async move {
            let result = font_list.await.map_err(|e| e.to_string());
            let _ = fonts_tx.send(SessionEvent::FontsLoaded(result)).await;
        });

        let session = ConfiguratorSession::start(view, urls, form, options);
        let session = tokio::spawn(session.run(event_rx));

        Self {
            events,
            session,
            fonts,
        }
    }

    /// Forward a client event; false once the session is gone.
    async fn send(&self, event: ClientEvent) -> bool {
        self.events.send(event.into()).await.is_ok()
    }

    /// Stop feeding the session and wait for it to wind down.
    async fn finish(self) {
        self.fonts.abort();
        drop(self.events);
        if let Err(e) = self.session.await {
            warn!("configurator session task failed: {e}");
        }
    }
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let Some(ready) = await_ready(&mut socket).await else {
        debug!("socket closed before ready");
        return;
    };
    debug!(elements = ready.elements.len(), "configurator connected");

    let urls = match url_generator(&ready, &state) {
        Ok(urls) => urls,
        Err(e) => {
            error!("Error resolving widget URL: {e}");
            return;
        }
    };
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();

    let http = state.http.clone();
    let font_list_url = state.config.font_list_url.clone();
    let tasks = SessionTasks::spawn(
        ChannelView::new(ready.elements, out_tx),
        urls,
        ready.form,
        state.config.session_options(),
        async move { fetch_font_list(&http, &font_list_url).await },
    );

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(event) => {
                            if !tasks.send(event).await {
                                break;
                            }
                        }
                        Err(e) => debug!("ignoring client message: {e}"),
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("socket error: {e}");
                    break;
                }
            },
            outgoing = out_rx.recv() => match outgoing {
                Some(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    tasks.finish().await;
    debug!("configurator disconnected");
}
