//! wiremock helpers for the service's collaborators
//!
//! `MockLlm` serves queued streaming responses in order, one per model round-trip.
//! `MockPayments` answers the payments endpoints the executor calls.

use actix_web::http::StatusCode;
use actix_web::{test, web};
use bytes::Bytes;
use futures::StreamExt;
use paygent::config::Config;
use paygent::core::payments::API_SECRET_HEADER;
use paygent::core::streaming::ChatStreamPart;
use paygent::sdk::part_stream;
use paygent::server::{AppState, create_app};
use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::PAYMENTS_KEY;

/// Mocked LLM backend for both providers
pub struct MockLlm {
    server: MockServer,
}

impl MockLlm {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Queue one OpenAI Chat Completions stream
    pub async fn queue_openai(&self, body: String) {
        self.queue("/chat/completions", body).await;
    }

    /// Queue one Anthropic Messages stream
    pub async fn queue_anthropic(&self, body: String) {
        self.queue("/messages", body).await;
    }

    /// Fail the test if the backend is ever called
    pub async fn expect_no_calls(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request the backend received, in order
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }

    async fn queue(&self, route: &str, body: String) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(sse_response(body))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }
}

/// Mocked payments API
pub struct MockPayments {
    server: MockServer,
}

impl MockPayments {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer one endpoint, checking the payments key, and expect `times` calls
    pub async fn respond(&self, verb: &str, route: &str, status: u16, body: Value, times: u64) {
        Mock::given(method(verb))
            .and(path(route))
            .and(header(API_SECRET_HEADER, PAYMENTS_KEY))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Like `respond`, with a raw (possibly empty or non-JSON) body
    pub async fn respond_raw(&self, verb: &str, route: &str, status: u16, body: &str, times: u64) {
        Mock::given(method(verb))
            .and(path(route))
            .and(header(API_SECRET_HEADER, PAYMENTS_KEY))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request the API received, in order
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("cache-control", "no-cache")
        .set_body_raw(body.into_bytes(), "text/event-stream")
}

/// Post to `/api/chat` on a fresh app and return the status and full body
pub async fn post_chat(
    config: Config,
    body: Value,
    headers: &[(&str, &str)],
) -> (StatusCode, Bytes) {
    let app = test::init_service(create_app(web::Data::new(AppState::new(config)))).await;
    let mut req = test::TestRequest::post().uri("/api/chat").set_json(body);
    for (name, value) in headers {
        req = req.insert_header((*name, *value));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status();
    (status, test::read_body(resp).await)
}

/// Decode a complete SSE body into chat parts
pub async fn decode_parts(body: Bytes) -> Vec<ChatStreamPart> {
    part_stream(futures::stream::iter(vec![Ok::<_, reqwest::Error>(body)]))
        .map(|part| part.expect("valid chat part"))
        .collect()
        .await
}

/// Start the real server on an ephemeral port and return its base URL
pub fn spawn_server(config: Config) -> std::io::Result<String> {
    let state = web::Data::new(AppState::new(config));
    let server = actix_web::HttpServer::new(move || create_app(state.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    Ok(format!("http://{}", addr))
}
