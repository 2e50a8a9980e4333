use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use posts::Locale;
use prismic::PrismicConfig;
use reqwest::Url;
use spacetraveling::{
    app,
    config::AppConfig,
    state::{AppState, SharedState},
};
use tower::ServiceExt; // for oneshot

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub struct TestClient {
    pub router: Router,
    pub state: SharedState,
}

impl TestClient {
    pub fn new(prismic_endpoint: &str) -> Self {
        let state = create_test_state(prismic_endpoint);
        let router = app(state.clone());
        Self { router, state }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();

        // Router is cheap to clone.
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body: serde_json::Value = if body_bytes.is_empty() {
            serde_json::json!(null)
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or_else(
                |_| serde_json::json!({ "raw": String::from_utf8_lossy(&body_bytes) }),
            )
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get_home(&self) -> TestResponse {
        self.get("/api/home").await
    }

    pub async fn get_post(&self, slug: &str) -> TestResponse {
        self.get(&format!("/api/post/{}", slug)).await
    }

    pub async fn get_next_page(&self, cursor: &str) -> TestResponse {
        let url =
            Url::parse_with_params("http://localhost/api/posts/next", &[("cursor", cursor)])
                .unwrap();
        self.get(&format!("{}?{}", url.path(), url.query().unwrap_or_default()))
            .await
    }
}

pub fn test_config(prismic_endpoint: &str) -> AppConfig {
    AppConfig {
        prismic: PrismicConfig {
            endpoint: prismic_endpoint.to_string(),
            access_token: None,
        },
        locale: Locale::PtBr,
        home_page_size: 1,
        static_paths_page_size: 2,
        home_revalidate_secs: 60,
        post_revalidate_secs: 300,
        port: 0,
    }
}

fn create_test_state(prismic_endpoint: &str) -> SharedState {
    AppState::new(test_config(prismic_endpoint), reqwest::Client::new())
}
