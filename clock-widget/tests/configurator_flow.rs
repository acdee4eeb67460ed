use std::time::Duration;

use tokio::sync::mpsc;

use clock_widget::notify::Level;
use clock_widget::session::{ClientEvent, ConfiguratorSession, SessionEvent, SessionOptions};
use clock_widget::view::{ElementId, MemoryView, ViewOp, INJECTED_STYLE_ID};
use clock_widget::{FormState, UrlGenerator};

fn last_navigation(view: &MemoryView) -> Option<String> {
    view.ops.iter().rev().find_map(|op| match op {
        ViewOp::Navigate { url, .. } => Some(url.clone()),
        _ => None,
    })
}

fn injected(view: &MemoryView) -> Vec<String> {
    view.ops
        .iter()
        .filter_map(|op| match op {
            ViewOp::InjectCss { css, style_id, .. } => {
                assert_eq!(*style_id, INJECTED_STYLE_ID);
                Some(css.clone())
            }
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn styling_reaches_preview_after_frame_load() {
    let urls = UrlGenerator::new("http://localhost:3333/").unwrap();
    let session = ConfiguratorSession::start(
        MemoryView::full(),
        urls.clone(),
        FormState::default(),
        SessionOptions {
            debounce: Duration::from_millis(300),
            notification_lifetime: Duration::from_secs(5),
        },
    );
    let first_url = last_navigation(session.view()).unwrap();

    let (tx, rx) = mpsc::channel(16);
    let task = tokio::spawn(session.run(rx));

    let styled = FormState {
        custom_styling: true,
        color: Some("#ff0000".into()),
        text_transform: Some("uppercase".into()),
        ..FormState::initial()
    };
    let styled_url = urls.generate_url(&styled);
    tx.send(ClientEvent::Change { form: styled }.into()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(350)).await;

    // The superseded document finishing late must not receive the styles.
    tx.send(ClientEvent::FrameLoaded { url: Some(first_url) }.into())
        .await
        .unwrap();
    tx.send(SessionEvent::FontsLoaded(Err("upstream 503".into())))
        .await
        .unwrap();
    tx.send(
        ClientEvent::Copied {
            ok: true,
            error: None,
        }
        .into(),
    )
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    tx.send(ClientEvent::FrameLoaded { url: Some(styled_url.clone()) }.into())
        .await
        .unwrap();
    drop(tx);
    let view = task.await.unwrap();

    assert_eq!(last_navigation(&view), Some(styled_url.clone()));
    assert!(styled_url.contains("color=%23ff0000"));
    assert!(styled_url.contains("textTransform=uppercase"));
    assert_eq!(view.visible(ElementId::StylingSettings), Some(true));
    assert_eq!(
        injected(&view),
        vec![":root {\n  --text-color: #ff0000;\n  --text-transform: uppercase;\n}".to_string()]
    );

    let levels: Vec<_> = view.notifications.iter().map(|n| (n.level, n.lifetime)).collect();
    assert_eq!(
        levels,
        vec![
            (Level::Danger, Duration::from_secs(5)),
            (Level::Success, Duration::from_secs(5)),
        ]
    );
}
