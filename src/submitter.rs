// Booking submitters
// RemoteSubmitter posts the booking to the API; MockSubmitter simulates it locally

use crate::config::{BookingConfig, ConfigError};
use crate::confirmation::{confirmation_from_response, BookingConfirmation};
use crate::payload::BookingRequest;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Transport(String),

    // Displays exactly what the user is shown
    #[error("{message}")]
    Rejected { status_code: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait BookingSubmitter: Send + Sync + 'static {
    // One attempt, no retries
    async fn submit(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, SubmissionError>;
}

pub struct RemoteSubmitter {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    id_prefix: String,
}

impl RemoteSubmitter {
    pub fn new(config: &BookingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            id_prefix: config.booking_id_prefix.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingSubmitter for RemoteSubmitter {
    async fn submit(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, SubmissionError> {
        let payload = request.api_payload();
        tracing::info!("Submitting booking for hotel {} to {}", payload.hotel_id, self.endpoint);
        tracing::debug!("Booking payload: {:?}", payload);

        let mut http_request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload);
        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        tracing::debug!("Booking response: status={}, {} bytes", status, body.len());

        interpret_response(
            status.as_u16(),
            status.canonical_reason(),
            &body,
            request,
            &self.id_prefix,
        )
    }
}

// Turns an HTTP status and body into the submission outcome.
// Non-success statuses surface the body's `message` (or `error`) string
// when there is one, otherwise the status line. Success bodies go through
// the confirmation parser; an empty body yields a synthesized confirmation
// and a body that is not JSON is an error.
pub fn interpret_response(
    status_code: u16,
    reason: Option<&str>,
    body: &str,
    request: &BookingRequest,
    id_prefix: &str,
) -> Result<BookingConfirmation, SubmissionError> {
    if !(200..300).contains(&status_code) {
        let message = server_message(body).unwrap_or_else(|| status_text(status_code, reason));
        tracing::warn!("Booking rejected with status {}: {}", status_code, message);
        return Err(SubmissionError::Rejected {
            status_code,
            message,
        });
    }

    if body.trim().is_empty() {
        return Ok(confirmation_from_response(None, request, id_prefix));
    }

    let parsed: Value =
        serde_json::from_str(body).map_err(|e| SubmissionError::InvalidResponse(e.to_string()))?;
    Ok(confirmation_from_response(Some(&parsed), request, id_prefix))
}

fn server_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        parsed
            .get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    })
}

fn status_text(status_code: u16, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("{} {}", status_code, reason),
        None => status_code.to_string(),
    }
}

// Simulated booking: waits, then confirms with an id derived from the request
pub struct MockSubmitter {
    delay: Duration,
    id_prefix: String,
}

impl MockSubmitter {
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.mock_delay_ms),
            id_prefix: config.booking_id_prefix.clone(),
        }
    }

    pub fn booking_id_for(&self, request: &BookingRequest) -> String {
        let key = format!(
            "{}|{}|{}|{}|{}|{}|{}",
            request.hotel_id,
            request.draft.guest_name,
            request.draft.phone,
            request.draft.check_in,
            request.draft.check_out,
            request.draft.guests,
            request.quote.total
        );
        format!("{}{}", self.id_prefix, 10000 + fnv1a(key.as_bytes()) % 90000)
    }
}

#[async_trait]
impl BookingSubmitter for MockSubmitter {
    async fn submit(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, SubmissionError> {
        tracing::info!(
            "Simulating booking for hotel {} ({:?} delay)",
            request.hotel_id,
            self.delay
        );
        tokio::time::sleep(self.delay).await;

        let record = request.mock_record(self.booking_id_for(request));
        tracing::debug!("Mock booking record: {:?}", record);
        Ok(record.into())
    }
}

// Stable across runs, unlike std's RandomState
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirmation::ConfirmationOrigin;
    use crate::hotel::Hotel;
    use crate::validator::ValidatedDraft;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use test_case::test_case;

    const PATH: &str = "/bookings/create-booking";

    #[derive(Clone, Default)]
    struct Received {
        requests: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    }

    impl Received {
        fn count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    fn request() -> BookingRequest {
        let draft = ValidatedDraft {
            guest_name: "Asha Rao".to_string(),
            phone: "+91 9876543210".to_string(),
            email: Some("asha@example.com".to_string()),
            check_in: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 11, 4).unwrap(),
            guests: 2,
        };
        let hotel = Hotel::sayonara();
        let quote = hotel.quote(12).unwrap();
        BookingRequest::new(draft, &hotel, quote, 1)
    }

    // Local stand-in for the booking API that records what it receives
    async fn spawn_endpoint(status: StatusCode, reply: &'static str) -> (BookingConfig, Received) {
        let received = Received::default();
        let record = move |State(received): State<Received>,
                           headers: HeaderMap,
                           Json(body): Json<Value>| async move {
            received.requests.lock().unwrap().push((headers, body));
            (status, reply)
        };
        let router = Router::new()
            .route(PATH, post(record))
            .with_state(received.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = BookingConfig::default().with_endpoint(format!("http://{}{}", addr, PATH));
        (config, received)
    }

    #[tokio::test]
    async fn test_remote_posts_json_once() {
        let reply = r#"{"booking": {"bookingId": "BK-1"}}"#;
        let (mut config, received) = spawn_endpoint(StatusCode::OK, reply).await;
        config.api_key = Some("secret-token".to_string());
        let submitter = RemoteSubmitter::new(&config).unwrap();

        let confirmation = submitter.submit(&request()).await.unwrap();
        assert_eq!(confirmation.booking_id, "BK-1");
        assert_eq!(confirmation.origin, ConfirmationOrigin::Server);

        assert_eq!(received.count(), 1);
        let requests = received.requests.lock().unwrap();
        let (headers, body) = &requests[0];
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert_eq!(headers.get("authorization").unwrap(), "Bearer secret-token");
        assert_eq!(body["guestName"], "Asha Rao");
        assert_eq!(body["hotelId"], "Hotel Sayonara");
        assert_eq!(body["checkIn"], "2026-11-02T00:00:00.000Z");
        assert_eq!(body["numberOfGuests"], 2);
        assert_eq!(body["email"], "asha@example.com");
        assert_eq!(body["totalPrice"], 1679);
    }

    #[tokio::test]
    async fn test_remote_without_api_key_sends_no_auth() {
        let (config, received) = spawn_endpoint(StatusCode::CREATED, "").await;
        let submitter = RemoteSubmitter::new(&config).unwrap();

        let confirmation = submitter.submit(&request()).await.unwrap();
        assert_eq!(confirmation.origin, ConfirmationOrigin::Synthesized);
        assert!(confirmation.booking_id.starts_with("OYO"));

        let requests = received.requests.lock().unwrap();
        assert!(requests[0].0.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_remote_surfaces_server_message() {
        let reply = r#"{"message": "Room no longer available"}"#;
        let (config, received) = spawn_endpoint(StatusCode::CONFLICT, reply).await;
        let submitter = RemoteSubmitter::new(&config).unwrap();

        let err = submitter.submit(&request()).await.unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Rejected {
                status_code: 409,
                message: "Room no longer available".to_string(),
            }
        );
        assert_eq!(err.to_string(), "Room no longer available");
        assert_eq!(received.count(), 1);
    }

    #[tokio::test]
    async fn test_remote_connection_refused() {
        let config = BookingConfig::default().with_endpoint("http://127.0.0.1:1/bookings");
        let submitter = RemoteSubmitter::new(&config).unwrap();

        let result = submitter.submit(&request()).await;
        assert!(matches!(result, Err(SubmissionError::Transport(_))));
    }

    #[tokio::test]
    async fn test_remote_timeout_when_configured() {
        let router = Router::new().route(
            PATH,
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let mut config = BookingConfig::default().with_endpoint(format!("http://{}{}", addr, PATH));
        config.timeout_ms = Some(50);
        let submitter = RemoteSubmitter::new(&config).unwrap();

        let result = submitter.submit(&request()).await;
        assert!(matches!(result, Err(SubmissionError::Transport(_))));
    }

    #[test_case(
        500, Some("Internal Server Error"), r#"{"message": "Database down"}"#, "Database down";
        "message field"
    )]
    #[test_case(
        400, Some("Bad Request"), r#"{"error": "checkIn is required"}"#, "checkIn is required";
        "error field"
    )]
    #[test_case(
        502, Some("Bad Gateway"), "<html>upstream</html>", "502 Bad Gateway";
        "non json body"
    )]
    #[test_case(
        503, Some("Service Unavailable"), r#"{"code": 17}"#, "503 Service Unavailable";
        "json without message"
    )]
    #[test_case(404, Some("Not Found"), "", "404 Not Found"; "empty body")]
    #[test_case(599, None, r#"{"message": ""}"#, "599"; "unknown status")]
    fn test_rejection_message(status_code: u16, reason: Option<&str>, body: &str, expected: &str) {
        let err = interpret_response(status_code, reason, body, &request(), "OYO").unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Rejected {
                status_code,
                message: expected.to_string(),
            }
        );
    }

    #[test]
    fn test_success_with_invalid_json_is_an_error() {
        let result = interpret_response(200, Some("OK"), "booked!", &request(), "OYO");
        assert!(matches!(result, Err(SubmissionError::InvalidResponse(_))));
    }

    #[test]
    fn test_success_without_confirmation_is_synthesized() {
        let request = request();
        let confirmation =
            interpret_response(200, Some("OK"), r#"{"ok": true}"#, &request, "OYO").unwrap();
        assert_eq!(confirmation.origin, ConfirmationOrigin::Synthesized);
        assert_eq!(confirmation.guest_name, request.draft.guest_name);
        assert_eq!(confirmation.check_out, request.draft.check_out);
        assert_eq!(confirmation.total_price, request.quote.total);
    }

    #[tokio::test]
    async fn test_mock_is_deterministic() {
        let config = BookingConfig {
            mock_delay_ms: 10,
            ..BookingConfig::default()
        };
        let submitter = MockSubmitter::new(&config);

        let first = submitter.submit(&request()).await.unwrap();
        let second = submitter.submit(&request()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.origin, ConfirmationOrigin::Synthesized);
        assert_eq!(first.booking_id.len(), "OYO".len() + 5);
        assert_eq!(first.guest_name, "Asha Rao");
        assert_eq!(first.total_price, 1679);

        let mut other = request();
        other.draft.guest_name = "Vikram Shah".to_string();
        assert_eq!(submitter.booking_id_for(&other).len(), first.booking_id.len());
    }

    #[tokio::test]
    async fn test_mock_waits_for_delay() {
        let config = BookingConfig {
            mock_delay_ms: 40,
            ..BookingConfig::default()
        };
        let submitter = MockSubmitter::new(&config);

        let started = std::time::Instant::now();
        tokio_test::assert_ok!(submitter.submit(&request()).await);
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
