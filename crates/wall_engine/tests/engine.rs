use std::sync::{mpsc, Arc};
use std::time::Duration;

use pretty_assertions::assert_eq;
use url::Url;
use wall_engine::{
    ChannelEventSink, ControlEndpoint, EngineEvent, EngineHandle, FailureKind, FetchSettings,
    ImageRecord,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn engine_for(server: &MockServer) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let settings = FetchSettings::default().with_base_url(Url::parse(&server.uri()).unwrap());
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(settings, Arc::new(ChannelEventSink::new(tx))).expect("engine");
    (engine, rx)
}

async fn mount_body(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn content_fetch_decodes_json() {
    let server = MockServer::start().await;
    mount_body(
        &server,
        "/get",
        r#"{"uri":"http://i/a.png","is_generic":false,"crawler":{"type":"Echo"},"source":null}"#,
    )
    .await;
    let (engine, events) = engine_for(&server);

    engine.fetch_content(4);
    let event = events.recv_timeout(WAIT).expect("event");
    assert_eq!(
        event,
        EngineEvent::ContentFetched {
            ticket: 4,
            result: Ok(ImageRecord {
                uri: "http://i/a.png".to_string(),
                is_generic: false,
                crawler: "Echo".to_string(),
                source: None,
            }),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn content_fetch_accepts_legacy_text() {
    let server = MockServer::start().await;
    mount_body(&server, "/get", "http://i/b.gif#Giphy").await;
    let (engine, events) = engine_for(&server);

    engine.fetch_content(1);
    match events.recv_timeout(WAIT).expect("event") {
        EngineEvent::ContentFetched { result: Ok(record), .. } => {
            assert_eq!(record.uri, "http://i/b.gif");
            assert_eq!(record.crawler, "Giphy");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_content_is_an_error() {
    let server = MockServer::start().await;
    mount_body(&server, "/get", r#"{"uri": 12"#).await;
    let (engine, events) = engine_for(&server);

    engine.fetch_content(1);
    match events.recv_timeout(WAIT).expect("event") {
        EngineEvent::ContentFetched { result: Err(err), .. } => {
            assert_eq!(err.kind, FailureKind::Malformed);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn abort_cancels_in_flight_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_string("http://i/late.png#Dummy"),
        )
        .mount(&server)
        .await;
    let (engine, events) = engine_for(&server);

    engine.fetch_content(9);
    engine.abort_content(8);
    engine.abort_content(9);
    match events
        .recv_timeout(Duration::from_secs(2))
        .expect("cancel reported before the response")
    {
        EngineEvent::ContentFetched {
            ticket,
            result: Err(err),
        } => {
            assert_eq!(ticket, 9);
            assert_eq!(err.kind, FailureKind::Cancelled);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn control_endpoints_report_delay() {
    let server = MockServer::start().await;
    mount_body(&server, "/reset", r#"{"timeout": 2}"#).await;
    mount_body(&server, "/flush", "3000").await;
    let (engine, events) = engine_for(&server);

    engine.send_control(ControlEndpoint::Reset, 1);
    let first = events.recv_timeout(WAIT).expect("event");
    engine.send_control(ControlEndpoint::Flush, 1);
    let second = events.recv_timeout(WAIT).expect("event");

    assert_eq!(
        first,
        EngineEvent::ControlCompleted {
            endpoint: ControlEndpoint::Reset,
            ticket: 1,
            result: Ok(Some(Duration::from_secs(2))),
        }
    );
    assert_eq!(
        second,
        EngineEvent::ControlCompleted {
            endpoint: ControlEndpoint::Flush,
            ticket: 1,
            result: Ok(Some(Duration::from_secs(3))),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn asset_load_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;
    let (engine, events) = engine_for(&server);

    engine.load_asset(3, format!("{}/gone.png", server.uri()));
    match events.recv_timeout(WAIT).expect("event") {
        EngineEvent::AssetLoaded {
            image_id,
            result: Err(err),
        } => {
            assert_eq!(image_id, 3);
            assert_eq!(err.kind, FailureKind::HttpStatus(410));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
