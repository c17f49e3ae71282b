use std::time::Duration;

use wall_engine::{Accept, FailureKind, FetchRequest, FetchSettings, Fetcher, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(url: String, accept: Accept) -> FetchRequest {
    FetchRequest {
        url,
        max_bytes: 1024,
        accept,
    }
}

#[tokio::test]
async fn fetcher_returns_body_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"uri":"http://i/a.png"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(&FetchSettings::default()).expect("client");
    let url = format!("{}/get", server.uri());

    let output = fetcher
        .fetch(&request(url.clone(), Accept::Any))
        .await
        .expect("fetch ok");
    assert_eq!(output.metadata.url, url);
    assert_eq!(output.metadata.final_url, url);
    assert_eq!(output.metadata.byte_len, 24);
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(&output.bytes[..], br#"{"uri":"http://i/a.png"}"#);
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(&FetchSettings::default()).expect("client");
    let url = format!("{}/missing", server.uri());

    let err = fetcher
        .fetch(&request(url, Accept::Any))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(&settings).expect("client");
    let url = format!("{}/slow", server.uri());

    let err = fetcher
        .fetch(&request(url, Accept::Any))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(&FetchSettings::default()).expect("client");
    let url = format!("{}/large", server.uri());

    let err = fetcher
        .fetch(&FetchRequest {
            url,
            max_bytes: 10,
            accept: Accept::Any,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn image_requests_reject_non_image_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/not-an-image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html/>", "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cat.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(&FetchSettings::default()).expect("client");

    let err = fetcher
        .fetch(&request(format!("{}/not-an-image", server.uri()), Accept::Images))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "text/html".to_string()
        }
    );

    let output = fetcher
        .fetch(&request(format!("{}/cat.png", server.uri()), Accept::Images))
        .await
        .expect("image ok");
    assert_eq!(output.metadata.byte_len, 4);
}

#[tokio::test]
async fn invalid_url_is_reported() {
    let fetcher = ReqwestFetcher::new(&FetchSettings::default()).expect("client");
    let err = fetcher
        .fetch(&request("not a url".to_string(), Accept::Any))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
