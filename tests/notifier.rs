use mcborder::config::ApiConfig;
use mcborder::events::{self, Event};
use mcborder::notifier::{BorderUpdate, HttpNotifier, Reporter};
use std::time::Duration;
use tokio::runtime::Handle;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPDATE: BorderUpdate = BorderUpdate { old_size: 1000.0, new_size: 16.0, duration_secs: 30 };

fn api(url: Option<String>, secret: Option<&str>) -> ApiConfig {
    ApiConfig { url, secret: secret.map(str::to_owned) }
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_border_updates_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/border"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"secret":"s","old_size":1000.00000,"new_size":16.00000,"duration":30}"#))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (mailbox, mut events) = events::channel();
    let mut notifier = HttpNotifier::new(
        &api(Some(format!("{}/api/border", server.uri())), Some("s")),
        Handle::current(),
        mailbox,
    )
    .unwrap();
    notifier.report(UPDATE);

    let event = tokio::time::timeout(Duration::from_secs(10), events.next()).await.unwrap();
    assert_eq!(event, Some(Event::Reported(Ok(204))));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_reports_still_come_back_with_their_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (mailbox, mut events) = events::channel();
    let mut notifier = HttpNotifier::new(&api(Some(server.uri()), None), Handle::current(), mailbox).unwrap();
    notifier.report(UPDATE);

    let event = tokio::time::timeout(Duration::from_secs(10), events.next()).await.unwrap();
    assert_eq!(event, Some(Event::Reported(Ok(500))));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["secret"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_endpoint_reports_an_error() {
    // nothing listens on port 1
    let url = "http://127.0.0.1:1/api/border".to_owned();
    let (mailbox, mut events) = events::channel();
    let mut notifier = HttpNotifier::new(&api(Some(url), Some("s")), Handle::current(), mailbox).unwrap();
    notifier.report(UPDATE);

    let event = tokio::time::timeout(Duration::from_secs(20), events.next()).await.unwrap();
    assert!(matches!(event, Some(Event::Reported(Err(_)))), "{event:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn nothing_is_sent_without_a_url() {
    let (mailbox, mut events) = events::channel();
    let mut notifier = HttpNotifier::new(&api(None, Some("s")), Handle::current(), mailbox).unwrap();
    notifier.report(UPDATE);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(events.try_next(), None);
}
