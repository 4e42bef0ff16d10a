//! End-to-end page loads: URL in, visible document out, then the visitor
//! filters and uses the sidebar.

use menuboard::filter::{ACTIVE_CLASS, HIDDEN_CLASS, OPEN_CLASS, OVERLAY_ID, TOGGLE_ID};
use menuboard::render::{CATEGORY_ATTR, SIDEBAR_CLASS};
use menuboard::{
    Config, Document, HeadlessViewport, LoadFailure, MenuDocument, MenuSource,
    PageController, Shell, UiEvent,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HASH: &str = "q1W2e3R4t5Y6u7I8o9P0";

fn controller(base: &str) -> PageController {
    let config = Config::resolve(None, |_| None, Some(base))
        .unwrap()
        .with_timeout(Duration::from_millis(500));
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    PageController::new(config).with_http_client(http)
}

async fn menu_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/user/{HASH}/menu.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [
                {"id": "breakfast", "name": "Breakfast", "items": [
                    {"name": "Eggs <Benedict>", "price": 11.25}
                ]},
                {"id": "lunch", "name": "Lunch", "description": "From noon", "items": [
                    {"name": "Club sandwich", "price": 12}
                ]}
            ]
        })))
        .mount(&server)
        .await;
    server
}

fn visible_sections(doc: &Document, loaded: &menuboard::LoadedPage) -> Vec<String> {
    loaded
        .view
        .sections()
        .iter()
        .filter(|s| !doc.has_class(**s, HIDDEN_CLASS))
        .map(|s| doc.attr(*s, CATEGORY_ATTR).unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn every_url_shape_loads_the_personalized_menu() {
    let server = menu_server().await;
    let urls = [
        format!("https://bistro.example.com/?hash={HASH}"),
        format!("https://bistro.example.com/menu/{HASH}"),
        format!("https://bistro.example.com/fr/menu/{HASH}/"),
    ];

    for url in urls {
        let mut doc = Document::new();
        let shell = Shell::build(&mut doc, None);
        let loaded = controller(&server.uri()).load(&mut doc, shell, &url).await;
        assert_eq!(
            loaded.source,
            MenuSource::Dynamic {
                hash: HASH.to_string()
            },
            "url {url}"
        );
        assert_eq!(visible_sections(&doc, &loaded), vec!["breakfast", "lunch"]);
    }
}

#[tokio::test]
async fn visitor_filters_and_uses_sidebar() {
    let server = menu_server().await;
    let mut doc = Document::new();
    let shell = Shell::build(&mut doc, None);
    let url = format!("https://bistro.example.com/menu/{HASH}");
    let loaded = controller(&server.uri()).load(&mut doc, shell, &url).await;

    let html = doc.to_html(shell.dynamic_menu);
    assert!(html.contains("Eggs &lt;Benedict&gt;"));
    assert!(html.contains("11.25"));
    assert!(html.contains("12.00"));

    let mut viewport = HeadlessViewport::new(390);
    let toggle = doc.get_by_id(TOGGLE_ID).unwrap();
    let overlay = doc.get_by_id(OVERLAY_ID).unwrap();
    let sidebar = doc.first_by_class(shell.dynamic_menu, SIDEBAR_CLASS).unwrap();

    loaded.view.handle(&mut doc, &mut viewport, UiEvent::Click(toggle));
    assert!(doc.has_class(sidebar, OPEN_CLASS));
    assert!(doc.has_class(overlay, ACTIVE_CLASS));
    assert!(viewport.scroll_locked);

    let lunch = loaded.view.buttons()[2];
    loaded.view.handle(&mut doc, &mut viewport, UiEvent::Click(lunch));
    assert_eq!(visible_sections(&doc, &loaded), vec!["lunch"]);
    assert!(!doc.has_class(sidebar, OPEN_CLASS));
    assert!(!doc.has_class(overlay, ACTIVE_CLASS));
    assert!(!viewport.scroll_locked);

    let all = loaded.view.buttons()[0];
    loaded.view.handle(&mut doc, &mut viewport, UiEvent::Click(all));
    assert_eq!(visible_sections(&doc, &loaded), vec!["breakfast", "lunch"]);
    let active: Vec<_> = loaded
        .view
        .buttons()
        .iter()
        .filter(|b| doc.has_class(**b, ACTIVE_CLASS))
        .collect();
    assert_eq!(active, vec![&all]);
}

#[tokio::test]
async fn failure_keeps_static_menu_usable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let static_menu: MenuDocument = serde_json::from_value(json!({
        "categories": [
            {"id": "pizza", "name": "Pizza", "items": [{"name": "Margherita", "price": 9}]},
            {"id": "salads", "name": "Salads", "items": [{"name": "Caesar", "price": 8.5}]}
        ]
    }))
    .unwrap();

    let mut doc = Document::new();
    let shell = Shell::build(&mut doc, Some(&static_menu));
    let url = format!("https://bistro.example.com/menu/{HASH}");
    let loaded = controller(&server.uri()).load(&mut doc, shell, &url).await;

    match &loaded.source {
        MenuSource::Failed {
            failure: LoadFailure::ServerError(status),
            ..
        } => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected source {other:?}"),
    }
    assert!(!doc.has_class(shell.error, HIDDEN_CLASS));
    assert!(!doc.text_content(shell.error_message).contains("500"));

    let mut viewport = HeadlessViewport::new(1280);
    assert!(loaded.view.select(&mut doc, &mut viewport, "salads"));
    assert_eq!(visible_sections(&doc, &loaded), vec!["salads"]);
}
