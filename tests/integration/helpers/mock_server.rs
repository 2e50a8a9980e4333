//! Prismic API のモック
//!
//! `/api/v2` returns a master ref and `/api/v2/documents/search` serves a
//! fixed set of posts, paginated by `pageSize`/`page` with absolute
//! `next_page` URLs the way the real API does.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

pub const MASTER_REF: &str = "master-ref";

/// (uid, first_publication_date, title, body words)
pub const POSTS: &[(&str, &str, &str, usize)] = &[
    ("como-utilizar-hooks", "2021-03-15T19:25:28+0000", "Como utilizar Hooks", 197),
    ("criando-um-app-cra-do-zero", "2021-03-25T19:27:35+0000", "Criando um app CRA do zero", 198),
    ("viagem-a-marte", "2021-04-02T08:00:00+0000", "Viagem a Marte", 10),
];

/// Only reachable by uid. Its date is missing.
pub const BROKEN_UID: &str = "sem-data";

#[derive(Default)]
pub struct MockState {
    base_url: String,
    pub search_calls: AtomicUsize,
    pub failing: AtomicBool,
}

pub struct MockServer {
    pub port: u16,
    pub state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(MockState {
            base_url: format!("http://127.0.0.1:{}", port),
            ..Default::default()
        });

        let app = Router::new()
            .route("/api/v2", get(handle_api))
            .route("/api/v2/documents/search", get(handle_search))
            .with_state(state.clone());

        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    rx.await.ok();
                })
                .await
                .unwrap();
        });

        MockServer {
            port,
            state,
            shutdown_tx: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/v2", self.base_url())
    }

    pub fn search_calls(&self) -> usize {
        self.state.search_calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_api(State(state): State<Arc<MockState>>) -> Result<Json<Value>, StatusCode> {
    if state.failing.load(Ordering::SeqCst) {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(json!({
        "refs": [{ "id": "master", "ref": MASTER_REF, "label": "Master", "isMasterRef": true }]
    })))
}

fn post_json(uid: &str, date: Option<&str>, title: &str, words: usize) -> Value {
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "first_publication_date": date,
        "data": {
            "title": title,
            "subtitle": format!("Subtítulo de {}", title),
            "author": "Joseph Oliveira",
            "banner": { "url": format!("https://images.prismic.io/{}.png", uid) },
            "content": [{
                "heading": "Proin et varius",
                "body": [
                    { "type": "paragraph", "text": vec!["lorem"; words].join(" "), "spans": [] },
                    { "type": "image", "url": "https://images.prismic.io/inline.png" }
                ]
            }]
        }
    })
}

async fn handle_search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    state.search_calls.fetch_add(1, Ordering::SeqCst);

    if state.failing.load(Ordering::SeqCst) {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    if params.get("ref").map(String::as_str) != Some(MASTER_REF) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let q = params.get("q").cloned().unwrap_or_default();

    if let Some(rest) = q.strip_prefix("[[at(my.posts.uid,\"") {
        let uid = rest.trim_end_matches("\")]]");
        let results: Vec<Value> = if uid == BROKEN_UID {
            vec![post_json(uid, None, "Sem data", 5)]
        } else {
            POSTS
                .iter()
                .filter(|(u, ..)| *u == uid)
                .map(|(u, date, title, words)| post_json(u, Some(date), title, *words))
                .collect()
        };
        return Ok(Json(json!({ "page": 1, "next_page": null, "results": results })));
    }

    if q != "[[at(document.type,\"posts\")]]" {
        return Err(StatusCode::BAD_REQUEST);
    }

    let page_size: usize = params
        .get("pageSize")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let page: usize = params.get("page").and_then(|s| s.parse().ok()).unwrap_or(1);

    let start = (page - 1) * page_size;
    let results: Vec<Value> = POSTS
        .iter()
        .skip(start)
        .take(page_size)
        .map(|(u, date, title, words)| post_json(u, Some(date), title, *words))
        .collect();

    let next_page = (start + page_size < POSTS.len()).then(|| {
        Url::parse_with_params(
            &format!("{}/api/v2/documents/search", state.base_url),
            &[
                ("ref", MASTER_REF.to_string()),
                ("q", q.clone()),
                ("pageSize", page_size.to_string()),
                ("page", (page + 1).to_string()),
            ],
        )
        .unwrap()
        .to_string()
    });

    Ok(Json(json!({
        "page": page,
        "results_per_page": page_size,
        "next_page": next_page,
        "results": results,
    })))
}
