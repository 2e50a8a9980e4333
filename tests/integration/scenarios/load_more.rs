use crate::helpers::{
    client::{test_config, TestClient},
    mock_server::{MockServer, POSTS},
};
use axum::http::StatusCode;
use posts::{LoadOutcome, LocaleDateFormatter, PaginationController};
use prismic::PrismicClient;

/// 観点: nextPage を辿ると全件を順番通りに取得できる
#[tokio::test]
async fn test_follow_cursor_until_exhausted() {
    let server = MockServer::start().await;
    let client = TestClient::new(&server.endpoint());

    let home = client.get_home().await;
    let mut uids: Vec<String> = home.body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["uid"].as_str().unwrap().to_string())
        .collect();
    let mut cursor = home.body["nextPage"].as_str().map(str::to_string);

    while let Some(next) = cursor {
        let res = client.get_next_page(&next).await;
        assert_eq!(res.status, StatusCode::OK);
        for post in res.body["results"].as_array().unwrap() {
            uids.push(post["uid"].as_str().unwrap().to_string());
        }
        cursor = res.body["nextPage"].as_str().map(str::to_string);
    }

    let expected: Vec<String> = POSTS.iter().map(|(uid, ..)| uid.to_string()).collect();
    assert_eq!(uids, expected);
}

/// 観点: 別ホストを指すカーソルは取得せずに 400
#[tokio::test]
async fn test_foreign_cursor_is_rejected() {
    let server = MockServer::start().await;
    let client = TestClient::new(&server.endpoint());

    let res = client
        .get_next_page("https://evil.example.com/api/v2/documents/search?page=2")
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(server.search_calls(), 0);
}

#[tokio::test]
async fn test_missing_cursor_is_bad_request() {
    let server = MockServer::start().await;
    let client = TestClient::new(&server.endpoint());

    let res = client.get("/api/posts/next").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

/// 観点: 上流エラー時は 502 を返す
#[tokio::test]
async fn test_next_page_upstream_failure() {
    let server = MockServer::start().await;
    let client = TestClient::new(&server.endpoint());

    let home = client.get_home().await;
    let next = home.body["nextPage"].as_str().unwrap().to_string();

    server.set_failing(true);
    let res = client.get_next_page(&next).await;
    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
}

/// 観点: PaginationController を実際の HTTP クライアントで動かす
#[tokio::test]
async fn test_pagination_controller_against_mock_api() {
    let server = MockServer::start().await;
    let config = test_config(&server.endpoint());
    let prismic = PrismicClient::new(reqwest::Client::new(), config.prismic.clone());
    let formatter = LocaleDateFormatter::new(config.locale);

    let first = posts::home_page(&prismic, &formatter, 2).await.unwrap();
    assert_eq!(first.results.len(), 2);

    let controller = PaginationController::new(prismic, formatter, first);
    assert_eq!(
        controller.load_more().await.unwrap(),
        LoadOutcome::Appended(1)
    );
    assert_eq!(controller.next_page().await, None);

    let calls = server.search_calls();
    assert_eq!(controller.load_more().await.unwrap(), LoadOutcome::Exhausted);
    assert_eq!(server.search_calls(), calls);

    let titles: Vec<String> = controller
        .posts()
        .await
        .into_iter()
        .map(|p| p.title)
        .collect();
    let expected: Vec<String> = POSTS.iter().map(|(_, _, title, _)| title.to_string()).collect();
    assert_eq!(titles, expected);
}
