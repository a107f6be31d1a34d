//! Request/response round trips through an in-memory transport

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use endpoint_client::codec::date;
use endpoint_client::{
    Authorization, BaseUrl, DateStrategy, Endpoint, EndpointClient, Error, JsonDecoder,
    JsonEncoder, Method, NoBody, NoContent, OutgoingRequest, PathComponent, PathParameters,
    ResponseMeta, Transport, TransportError, TransportResponse,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

type Handler = dyn Fn(&OutgoingRequest) -> Result<TransportResponse, TransportError> + Send + Sync;

#[derive(Clone)]
struct MockTransport {
    handler: Arc<Handler>,
}

impl MockTransport {
    fn new<F>(handler: F) -> Self
    where
        F: Fn(&OutgoingRequest) -> Result<TransportResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    fn returning<F>(handler: F) -> Self
    where
        F: Fn(&OutgoingRequest) -> Vec<u8> + Send + Sync + 'static,
    {
        Self::new(move |request| Ok(TransportResponse::ok(handler(request))))
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MockTransport")
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<TransportResponse, TransportError> {
        (self.handler)(&request)
    }
}

struct EndpointWithNoResponse;

impl Endpoint for EndpointWithNoResponse {
    type Body = NoBody;
    type Response = NoContent;

    const METHOD: Method = Method::GET;
    const PATH: &'static [PathComponent] = &[PathComponent::Constant("blank")];

    fn body(&self) -> &NoBody {
        &NoBody
    }
}

struct EndpointWithStringResponseAndPathComponent {
    body: String,
    id: String,
}

impl Endpoint for EndpointWithStringResponseAndPathComponent {
    type Body = String;
    type Response = String;

    const METHOD: Method = Method::POST;
    const PATH: &'static [PathComponent] = &[
        PathComponent::Constant("echo"),
        PathComponent::Parameter("id"),
    ];

    fn body(&self) -> &String {
        &self.body
    }

    fn path_parameters(&self) -> PathParameters {
        PathParameters::new().with("id", &self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Reminder {
    title: String,
    #[serde(with = "date")]
    due: DateTime<Utc>,
}

struct CreateReminder {
    reminder: Reminder,
    token: Option<String>,
}

impl Endpoint for CreateReminder {
    type Body = Reminder;
    type Response = Reminder;

    const METHOD: Method = Method::PUT;
    const PATH: &'static [PathComponent] = &[PathComponent::Constant("reminders")];

    fn body(&self) -> &Reminder {
        &self.reminder
    }

    fn authorization(&self) -> Option<Authorization> {
        self.token.clone().map(Authorization::Bearer)
    }
}

fn base_url() -> BaseUrl {
    BaseUrl::parse("https://api.shipyard.studio").expect("Valid base URL")
}

fn client(transport: MockTransport) -> EndpointClient {
    EndpointClient::builder(base_url())
        .transport(transport)
        .build()
        .expect("Transport is set")
}

fn reminder() -> Reminder {
    Reminder {
        title: "water the plants".to_string(),
        due: Utc
            .with_ymd_and_hms(2024, 5, 4, 9, 0, 0)
            .single()
            .expect("valid date"),
    }
}

#[tokio::test]
async fn test_endpoint_with_no_response() {
    let client = client(MockTransport::returning(|request| {
        assert_eq!(request.url.path(), "/blank");
        assert_eq!(request.method, Method::GET);
        assert!(request.body_bytes().is_empty());
        assert!(request.content_type().is_none());
        Vec::new()
    }));

    client
        .send(&EndpointWithNoResponse)
        .await
        .expect("Request should succeed");
}

#[tokio::test]
async fn test_endpoint_with_string_response() {
    let endpoint = EndpointWithStringResponseAndPathComponent {
        body: "hello".to_string(),
        id: "my-ids".to_string(),
    };
    let client = client(MockTransport::returning(|request| {
        assert_eq!(
            request.url.path_segments().map(|s| s.collect::<Vec<_>>()),
            Some(vec!["echo", "my-ids"])
        );
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.body.as_deref(),
            Some(serde_json::to_vec("hello").expect("encodable").as_slice())
        );
        assert_eq!(request.content_type(), Some("application/json"));
        serde_json::to_vec("world").expect("encodable")
    }));

    let response = client.request(&endpoint).await.expect("Request should succeed");
    assert_eq!(response, "world");
}

#[tokio::test]
async fn test_transport_failure() {
    let client = client(MockTransport::new(|_| {
        Err(TransportError::Connection("network is unreachable".into()))
    }));

    let result = client.send(&EndpointWithNoResponse).await;
    match result {
        Err(Error::Transport(TransportError::Connection(message))) => {
            assert_eq!(message.to_string(), "network is unreachable");
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_response_carries_bytes() {
    let endpoint = EndpointWithStringResponseAndPathComponent {
        body: "hello".to_string(),
        id: "my-ids".to_string(),
    };
    let client = client(MockTransport::new(|_| {
        Ok(TransportResponse::new(
            ResponseMeta::new(StatusCode::BAD_GATEWAY),
            b"<html>bad gateway</html>".to_vec(),
        ))
    }));

    let error = client
        .request(&endpoint)
        .await
        .expect_err("Body is not a JSON string");

    assert!(matches!(error, Error::Decoding { .. }));
    assert_eq!(error.response_data(), Some(&b"<html>bad gateway</html>"[..]));
    assert_eq!(
        error.response_meta().map(|meta| meta.status),
        Some(StatusCode::BAD_GATEWAY)
    );
}

#[tokio::test]
async fn test_request_with_meta() {
    let client = client(MockTransport::new(|_| {
        let mut meta = ResponseMeta::new(StatusCode::CREATED);
        meta.headers
            .insert("x-request-id", "42".parse().expect("Valid header"));
        Ok(TransportResponse::new(meta, b"\"world\"".to_vec()))
    }));

    let decoded = client
        .request_with_meta(&EndpointWithStringResponseAndPathComponent {
            body: "hello".to_string(),
            id: "my-ids".to_string(),
        })
        .await
        .expect("Request should succeed");

    assert_eq!(decoded.value, "world");
    assert_eq!(decoded.meta.status, StatusCode::CREATED);
    assert_eq!(
        decoded.meta.headers.get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"42"[..])
    );
}

#[tokio::test]
async fn test_authorization_header() {
    let client = client(MockTransport::returning(|request| {
        assert_eq!(request.authorization(), Some("Bearer secret-token"));
        assert_eq!(request.headers.get_all("authorization").iter().count(), 1);
        request.body_bytes().to_vec()
    }));

    let endpoint = CreateReminder {
        reminder: reminder(),
        token: Some("secret-token".to_string()),
    };
    let echoed = client.request(&endpoint).await.expect("Request should succeed");
    assert_eq!(echoed, reminder());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let client = client(MockTransport::returning(|request| {
        assert!(request.authorization().is_none());
        request.body_bytes().to_vec()
    }));

    let endpoint = CreateReminder {
        reminder: reminder(),
        token: None,
    };
    client.request(&endpoint).await.expect("Request should succeed");
}

#[tokio::test]
async fn test_custom_date_strategy_round_trip() {
    let client = EndpointClient::builder(base_url())
        .transport(MockTransport::returning(|request| {
            let body: serde_json::Value =
                serde_json::from_slice(request.body_bytes()).expect("JSON body");
            assert_eq!(body["due"], serde_json::json!(1_714_813_200));
            request.body_bytes().to_vec()
        }))
        .encoder(|| JsonEncoder::new().date_strategy(DateStrategy::SecondsSinceEpoch))
        .decoder(|| JsonDecoder::new().date_strategy(DateStrategy::SecondsSinceEpoch))
        .build()
        .expect("Transport is set");

    let endpoint = CreateReminder {
        reminder: reminder(),
        token: None,
    };
    let echoed = client.request(&endpoint).await.expect("Request should succeed");
    assert_eq!(echoed, reminder());
}

#[tokio::test]
async fn test_default_dates_are_iso8601() {
    let client = client(MockTransport::returning(|request| {
        let body: serde_json::Value =
            serde_json::from_slice(request.body_bytes()).expect("JSON body");
        assert_eq!(body["due"], "2024-05-04T09:00:00Z");
        request.body_bytes().to_vec()
    }));

    let endpoint = CreateReminder {
        reminder: reminder(),
        token: None,
    };
    client.request(&endpoint).await.expect("Request should succeed");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_client() {
    let client = client(MockTransport::returning(|request| {
        let id = request
            .url
            .path_segments()
            .and_then(|mut segments| segments.nth(1))
            .unwrap_or_default()
            .to_string();
        serde_json::to_vec(&id).expect("encodable")
    }));

    let tasks = (0..32).map(|i| {
        let client = client.clone();
        tokio::spawn(async move {
            let endpoint = EndpointWithStringResponseAndPathComponent {
                body: "hello".to_string(),
                id: format!("id-{i}"),
            };
            (i, client.request(&endpoint).await)
        })
    });

    for result in futures::future::join_all(tasks).await {
        let (i, response) = result.expect("Task should not panic");
        assert_eq!(response.expect("Request should succeed"), format!("id-{i}"));
    }
}
