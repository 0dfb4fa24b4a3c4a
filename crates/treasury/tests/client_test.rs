//! Integration tests for the Treasury client against an in-process stub API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use purser_core::PurchaseError;
use purser_core::currency::{RateQuery, RateSource};
use purser_treasury::{BackoffPolicy, TreasuryClient, TreasuryConfig};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

struct Stub {
    throttle_first: usize,
    status: StatusCode,
    body: Value,
    latency: Duration,
    hits: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl Stub {
    fn new(throttle_first: usize, status: StatusCode, body: Value) -> Arc<Self> {
        Self::with_latency(throttle_first, status, body, Duration::ZERO)
    }

    /// Answers unthrottled requests only after `latency`.
    fn with_latency(
        throttle_first: usize,
        status: StatusCode,
        body: Value,
        latency: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            throttle_first,
            status,
            body,
            latency,
            hits: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn rates_handler(State(stub): State<Arc<Stub>>, RawQuery(query): RawQuery) -> Response {
    let hit = stub.hits.fetch_add(1, Ordering::SeqCst);
    stub.queries.lock().unwrap().push(query.unwrap_or_default());
    if hit < stub.throttle_first {
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }
    tokio::time::sleep(stub.latency).await;
    (stub.status, Json(stub.body.clone())).into_response()
}

async fn spawn_stub(stub: Arc<Stub>) -> String {
    let app = Router::new()
        .route("/rates_of_exchange", get(rates_handler))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/rates_of_exchange")
}

fn client(base_url: String, initial_ms: u64, budget: Duration) -> TreasuryClient {
    TreasuryClient::new(TreasuryConfig {
        base_url,
        request_timeout: Duration::from_secs(5),
        backoff: BackoffPolicy {
            initial_interval: Duration::from_millis(initial_ms),
            max_interval: Duration::from_millis(initial_ms * 4),
            max_elapsed: budget,
            multiplier_pct: 150,
            jitter_pct: 0,
        },
    })
    .unwrap()
}

fn nepal() -> RateQuery {
    RateQuery::new("Nepal", "Rupee", NaiveDate::from_ymd_opt(2023, 6, 30).unwrap())
}

fn one_row() -> Value {
    json!({
        "data": [{
            "country_currency_desc": "Nepal-Rupee",
            "exchange_rate": "130.5",
            "record_date": "2023-03-31"
        }],
        "meta": { "count": 1 }
    })
}

#[tokio::test]
async fn test_returns_single_row() {
    let stub = Stub::new(0, StatusCode::OK, one_row());
    let client = client(spawn_stub(Arc::clone(&stub)).await, 10, Duration::from_secs(2));

    let quote = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(quote.country_currency_desc, "Nepal-Rupee");
    assert_eq!(quote.exchange_rate, "130.5");
    assert_eq!(quote.record_date, NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_sends_filtered_query() {
    let stub = Stub::new(0, StatusCode::OK, one_row());
    let client = client(spawn_stub(Arc::clone(&stub)).await, 10, Duration::from_secs(2));
    let query = RateQuery::new(
        "\"Antigua & Barbuda\"",
        "East Caribbean Dollar",
        NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
    );

    client
        .latest_quote(&query, &CancellationToken::new())
        .await
        .unwrap();

    let queries = stub.queries.lock().unwrap();
    assert_eq!(
        queries[0],
        "filter=record_date:lte:2023-06-30,\
         country_currency_desc:eq:Antigua%20%26%20Barbuda-East%20Caribbean%20Dollar\
         &fields=country_currency_desc,exchange_rate,record_date\
         &sort=-record_date&page[size]=1"
    );
}

#[tokio::test]
async fn test_retries_rate_limited_requests() {
    let stub = Stub::new(3, StatusCode::OK, one_row());
    let client = client(spawn_stub(Arc::clone(&stub)).await, 10, Duration::from_secs(5));

    let quote = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(quote.exchange_rate, "130.5");
    assert_eq!(stub.hits(), 4);
}

#[tokio::test]
async fn test_gives_up_when_budget_exhausted() {
    let stub = Stub::new(usize::MAX, StatusCode::OK, one_row());
    let client = client(spawn_stub(Arc::clone(&stub)).await, 20, Duration::from_millis(200));

    let err = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PurchaseError::RateLookupFailed(_)), "{err:?}");
    assert!(stub.hits() > 1);
}

#[tokio::test]
async fn test_retry_timeout_is_capped_by_budget() {
    let stub = Stub::with_latency(1, StatusCode::OK, one_row(), Duration::from_secs(3));
    let client = client(spawn_stub(Arc::clone(&stub)).await, 50, Duration::from_millis(300));

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        client.latest_quote(&nepal(), &CancellationToken::new()),
    )
    .await
    .expect("retry outlived the backoff budget");

    let err = result.unwrap_err();
    assert!(matches!(err, PurchaseError::RateLookupFailed(_)), "{err:?}");
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let stub = Stub::new(0, StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"}));
    let client = client(spawn_stub(Arc::clone(&stub)).await, 10, Duration::from_secs(2));

    let err = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PurchaseError::RateLookupFailed(_)));
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_empty_data_is_rate_unavailable() {
    let stub = Stub::new(0, StatusCode::OK, json!({"data": [], "meta": {"count": 0}}));
    let client = client(spawn_stub(stub).await, 10, Duration::from_secs(2));

    let err = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PurchaseError::RateUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn test_malformed_body_is_lookup_failure() {
    let stub = Stub::new(0, StatusCode::OK, json!({"data": "not a list"}));
    let client = client(spawn_stub(stub).await, 10, Duration::from_secs(2));

    let err = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PurchaseError::RateLookupFailed(_)));
}

#[tokio::test]
async fn test_bad_record_date_is_lookup_failure() {
    let body = json!({"data": [{
        "country_currency_desc": "Nepal-Rupee",
        "exchange_rate": "130.5",
        "record_date": "March 31"
    }]});
    let client = client(spawn_stub(Stub::new(0, StatusCode::OK, body)).await, 10, Duration::from_secs(2));

    let err = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PurchaseError::RateLookupFailed(_)));
}

#[tokio::test]
async fn test_connection_refused_is_lookup_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client(format!("http://{addr}/rates_of_exchange"), 10, Duration::from_secs(2));

    let err = client
        .latest_quote(&nepal(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PurchaseError::RateLookupFailed(_)));
}

#[tokio::test]
async fn test_cancellation_aborts_backoff() {
    let stub = Stub::new(usize::MAX, StatusCode::OK, one_row());
    let client = client(spawn_stub(Arc::clone(&stub)).await, 5_000, Duration::from_secs(60));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(2),
        client.latest_quote(&nepal(), &cancel),
    )
    .await
    .expect("lookup should stop promptly once cancelled")
    .unwrap_err();

    assert_eq!(err, PurchaseError::lookup_failed("rate lookup cancelled"));
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_already_cancelled_sends_nothing() {
    let stub = Stub::new(0, StatusCode::OK, one_row());
    let client = client(spawn_stub(Arc::clone(&stub)).await, 10, Duration::from_secs(2));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client.latest_quote(&nepal(), &cancel).await.unwrap_err();

    assert_eq!(err, PurchaseError::lookup_failed("rate lookup cancelled"));
    assert_eq!(stub.hits(), 0);
}
