// Tests for the Skylight chores client against a mocked API.
use chorebridge::client::{SkylightClient, SkylightError};
use chorebridge::config::Config;
use chrono::NaiveDate;
use mockito::{Matcher, Server};

const CHORES_BODY: &str = r#"{
    "data": [
        {
            "id": "101",
            "type": "chore",
            "attributes": {"summary": "Unload dishwasher", "status": "pending", "scheduled_at": "2025-01-16T07:30:00.000-05:00"},
            "relationships": {"category": {"data": {"id": "c1", "type": "category"}}}
        },
        {
            "id": "102",
            "type": "chore",
            "attributes": {"summary": "Feed the cat", "status": "complete", "scheduled_at": ""},
            "relationships": {"category": {"data": {"id": "c2", "type": "category"}}}
        }
    ],
    "included": [
        {"id": "c1", "type": "category", "attributes": {"label": "Miles"}},
        {"id": "c2", "type": "category", "attributes": {"label": "Sophia"}}
    ]
}"#;

fn test_config(url: &str) -> Config {
    Config {
        skylight_token: "Token token=abc".to_string(),
        frame_id: "4242".to_string(),
        base_url: url.to_string(),
        ..Config::default()
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_day_window_and_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/frames/4242/chores")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("after".into(), "2025-01-16".into()),
            Matcher::UrlEncoded("before".into(), "2025-01-16".into()),
            Matcher::UrlEncoded("include_late".into(), "true".into()),
        ]))
        .match_header("authorization", "Token token=abc")
        .match_header("accept", "application/json")
        .match_header("user-agent", "SkylightMobile/1.95.2 (ios 26.2)")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHORES_BODY)
        .create_async()
        .await;

    let client = SkylightClient::new(&test_config(&server.url())).unwrap();
    let chores = client.get_chores_for(day()).await.unwrap();
    mock.assert_async().await;

    assert_eq!(chores.len(), 2);
    assert_eq!(chores[0].id, "101");
    assert_eq!(chores[0].name, "Unload dishwasher");
    assert_eq!(chores[0].assigned_to, "Miles");
    assert_eq!(chores[0].hour, Some(7));
    assert!(!chores[0].is_done());

    assert_eq!(chores[1].assigned_to, "Sophia");
    assert_eq!(chores[1].hour, None);
    assert!(chores[1].is_done());
}

#[tokio::test]
async fn test_fetch_non_200_is_an_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/frames/4242/chores")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = SkylightClient::new(&test_config(&server.url())).unwrap();
    let err = client.get_chores_for(day()).await.unwrap_err();
    assert!(matches!(err, SkylightError::Status(s) if s.as_u16() == 401));
}

#[tokio::test]
async fn test_fetch_other_2xx_is_still_an_error() {
    // Only a plain 200 carries a chores payload.
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/frames/4242/chores")
        .match_query(Matcher::Any)
        .with_status(204)
        .create_async()
        .await;

    let client = SkylightClient::new(&test_config(&server.url())).unwrap();
    assert!(client.get_chores_for(day()).await.is_err());
}

#[tokio::test]
async fn test_fetch_garbage_body_is_an_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/frames/4242/chores")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = SkylightClient::new(&test_config(&server.url())).unwrap();
    let err = client.get_chores_for(day()).await.unwrap_err();
    assert!(matches!(err, SkylightError::Transport(_)));
}

#[tokio::test]
async fn test_complete_puts_status_and_is_repeatable() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/frames/4242/chores/101")
        .match_header("authorization", "Token token=abc")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"status": "complete"})))
        .with_status(200)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let client = SkylightClient::new(&test_config(&server.url())).unwrap();
    client.complete_chore("101").await.unwrap();
    client.complete_chore("101").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_complete_accepts_any_2xx() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/api/frames/4242/chores/7")
        .with_status(204)
        .create_async()
        .await;

    let client = SkylightClient::new(&test_config(&server.url())).unwrap();
    assert!(client.complete_chore("7").await.is_ok());
}

#[tokio::test]
async fn test_complete_failure_is_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/api/frames/4242/chores/7")
        .with_status(500)
        .create_async()
        .await;

    let client = SkylightClient::new(&test_config(&server.url())).unwrap();
    let err = client.complete_chore("7").await.unwrap_err();
    assert!(matches!(err, SkylightError::Status(s) if s.is_server_error()));
}
