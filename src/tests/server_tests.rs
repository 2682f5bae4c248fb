/// Routes served over a real socket.
use std::sync::Arc;
use std::time::Duration;

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::{json, Value};

use super::test_state;
use crate::server::build_router;
use crate::state::AppState;
use crate::store::KeyValueStore;
use crate::tab::TabId;

const FORM_BODY: &str = "loteria=lotomania&count=5&window=50&aba=tabAAAAA";

/// Serve the router on an ephemeral loopback port, returning its base URL.
async fn serve(state: Arc<AppState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn generation_body() -> Value {
    json!({
        "session_id": "late",
        "bets": [{ "index": 1, "numbers": ["04"], "audit": {} }]
    })
}

#[tokio::test]
async fn submit_redirects_to_the_tab_result() {
    let api = MockServer::start_async().await;
    api.mock_async(|when, then| {
        when.method(POST).path("/generate");
        then.status(200).json_body(generation_body());
    })
    .await;

    let state = test_state(&api.base_url(), None);
    let base = serve(state).await;

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let resp = client
        .post(format!("{base}/gerar"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(FORM_BODY)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(
        resp.headers()["location"].to_str().unwrap(),
        "/resultado?aba=tabAAAAA"
    );

    let html = client
        .get(format!("{base}/resultado?aba=tabAAAAA"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<b>Sessão:</b> late"));
}

#[tokio::test]
async fn generation_finishes_after_the_browser_disconnects() {
    let api = MockServer::start_async().await;
    let mock = api
        .mock_async(|when, then| {
            when.method(POST).path("/generate");
            then.status(200)
                .delay(Duration::from_millis(800))
                .json_body(generation_body());
        })
        .await;

    let state = test_state(&api.base_url(), None);
    let base = serve(state.clone()).await;

    // the browser gives up long before the service answers
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client
        .post(format!("{base}/gerar"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(FORM_BODY)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_timeout());

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let tab = TabId::parse("tabAAAAA").unwrap();
    let stored = state
        .results
        .get(&tab.result_key())
        .expect("result stored after disconnect");
    let stored: Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(stored, generation_body());
    assert!(!state.generation.is_submitting(&tab));
    assert_eq!(mock.hits_async().await, 1);
}
