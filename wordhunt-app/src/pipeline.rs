use std::time::Instant;

use wordhunt_common::Result;
use wordhunt_http::PageFetcher;
use wordhunt_text::FrequencyIndex;

/// Fetch `url` and count its words. Any fetch failure is returned as-is;
/// nothing is indexed from a partial document.
pub async fn fetch_and_index(fetcher: &dyn PageFetcher, url: &str) -> Result<FrequencyIndex> {
    let started = Instant::now();
    let raw = fetcher.fetch_page(url).await?;
    let index = wordhunt_text::analyze(&raw);

    tracing::info!(
        %url,
        bytes = raw.len(),
        distinct = index.len(),
        total = index.total(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pipeline.indexed"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wordhunt_common::WordhuntError;
    use wordhunt_http::{HttpClient, HttpError};

    enum Stub {
        Body(&'static str),
        Refused,
        Truncated,
    }

    #[async_trait]
    impl PageFetcher for Stub {
        async fn fetch_page(&self, _url: &str) -> std::result::Result<String, HttpError> {
            match self {
                Stub::Body(body) => Ok((*body).to_string()),
                Stub::Refused => Err(HttpError::Network("connection refused".into())),
                Stub::Truncated => Err(HttpError::Body("unexpected EOF".into())),
            }
        }
    }

    #[tokio::test]
    async fn indexes_the_fetched_body() {
        let stub = Stub::Body("<html><body>Hello, world! Hello.</body></html>");
        let index = fetch_and_index(&stub, "http://example.test/").await.unwrap();
        assert_eq!(index.count("Hello"), 2);
        assert_eq!(index.count("world"), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_fatal() {
        let err = fetch_and_index(&Stub::Refused, "http://example.test/")
            .await
            .unwrap_err();
        assert!(matches!(err, WordhuntError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn body_failure_is_a_read_error() {
        let err = fetch_and_index(&Stub::Truncated, "http://example.test/")
            .await
            .unwrap_err();
        assert!(matches!(err, WordhuntError::Read(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn error_pages_are_still_counted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(
                ResponseTemplate::new(410)
                    .set_body_string("<html>\n<body>Gone, gone, gone.</body>\n</html>\n"),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let index = fetch_and_index(&client, &format!("{}/gone", server.uri()))
            .await
            .unwrap();
        assert_eq!(index.count("Gone"), 1);
        assert_eq!(index.count("gone"), 2);
    }
}
