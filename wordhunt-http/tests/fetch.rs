use std::time::Duration;

use reqwest::StatusCode;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordhunt_http::{HttpClient, HttpError, PageFetcher};

async fn serve(route: &str, template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn returns_the_body_of_a_successful_get() {
    let server = serve(
        "/page",
        ResponseTemplate::new(200).set_body_string("<p>Hello, world!</p>"),
    )
    .await;

    let client = HttpClient::new().unwrap();
    let page = client
        .get(&format!("{}/page", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.text(), "<p>Hello, world!</p>");
}

#[tokio::test]
async fn non_success_status_still_yields_the_body() {
    let server = serve(
        "/missing",
        ResponseTemplate::new(404).set_body_string("<h1>Not Found</h1>"),
    )
    .await;

    let client = HttpClient::new().unwrap();
    let html = client
        .fetch_page(&format!("{}/missing", server.uri()))
        .await
        .unwrap();

    assert_eq!(html, "<h1>Not Found</h1>");
}

#[tokio::test]
async fn sends_a_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let html = client
        .fetch_page(&format!("{}/ua", server.uri()))
        .await
        .unwrap();
    assert_eq!(html, "ok");
}

#[tokio::test]
async fn invalid_bytes_are_replaced_not_rejected() {
    let server = serve(
        "/latin1",
        ResponseTemplate::new(200).set_body_bytes(vec![b'c', b'a', b'f', 0xE9]),
    )
    .await;

    let client = HttpClient::new().unwrap();
    let html = client
        .fetch_page(&format!("{}/latin1", server.uri()))
        .await
        .unwrap();

    assert_eq!(html, "caf\u{FFFD}");
}

#[tokio::test]
async fn malformed_url_is_rejected_before_any_request() {
    let client = HttpClient::new().unwrap();
    let err = client.fetch_page("not a url").await.unwrap_err();
    assert!(matches!(err, HttpError::Url(_)), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = HttpClient::new().unwrap();
    let err = client
        .fetch_page(&format!("http://127.0.0.1:{port}/"))
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new()
        .unwrap()
        .with_timeout(Duration::from_millis(100));
    let err = client
        .fetch_page(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn works_through_the_trait_object() {
    let server = serve("/dyn", ResponseTemplate::new(200).set_body_string("dyn")).await;

    let fetcher: Box<dyn PageFetcher> = Box::new(HttpClient::new().unwrap());
    let html = fetcher
        .fetch_page(&format!("{}/dyn", server.uri()))
        .await
        .unwrap();
    assert_eq!(html, "dyn");
}
