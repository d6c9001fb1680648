//! ApiClient against a real local server.

use std::net::SocketAddr;
use std::time::Duration;

use acquisition::RecordSource;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use radar_common::{GeoBounds, RadarRecord, RadarStatus};
use radar_viewer::{ApiClient, ClientError};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetches_live_record() {
    let app = Router::new().route(
        "/api/radar/latest",
        get(|| async {
            Json(RadarRecord::live(
                "https://mrms.example/rala.grib2.gz",
                "RALA",
                GeoBounds::conus(),
                Utc::now(),
                None,
            ))
        }),
    );
    let addr = serve(app).await;

    let record = client(addr).latest().await;
    assert_eq!(record.status(), RadarStatus::Live);
    assert_eq!(record.source_url(), Some("https://mrms.example/rala.grib2.gz"));
}

#[tokio::test]
async fn test_accepts_flag_only_payload() {
    let app = Router::new().route(
        "/api/radar/latest",
        get(|| async {
            Json(serde_json::json!({
                "sample": true,
                "timestamp": "2024-06-01T12:00:00Z",
                "product": "RALA",
                "bounds": {
                    "nw": [49.0, -125.0],
                    "ne": [49.0, -67.0],
                    "se": [25.0, -67.0],
                    "sw": [25.0, -125.0]
                },
                "message": "Using sample data"
            }))
        }),
    );
    let addr = serve(app).await;

    let record = client(addr).fetch().await.unwrap();
    assert_eq!(record.status(), RadarStatus::Sample);
}

#[tokio::test]
async fn test_server_error_becomes_error_record() {
    let app = Router::new().route(
        "/api/radar/latest",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let addr = serve(app).await;
    let client = client(addr);

    assert!(matches!(
        client.fetch().await,
        Err(ClientError::Status(503))
    ));

    let record = client.latest().await;
    assert_eq!(record.status(), RadarStatus::Error);
    assert_eq!(record.message(), Some("Server error: 503"));
    assert_eq!(record.bounds(), &GeoBounds::conus());
    assert_eq!(record.status_line(), "Error: Server error: 503");
}

#[tokio::test]
async fn test_garbage_body_becomes_error_record() {
    let app = Router::new().route("/api/radar/latest", get(|| async { "not json" }));
    let addr = serve(app).await;

    let record = client(addr).latest().await;
    assert_eq!(record.status(), RadarStatus::Error);
    assert!(record.message().unwrap().starts_with("Invalid response body"));
}

#[tokio::test]
async fn test_unreachable_api_becomes_error_record() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let record = client(addr).latest().await;
    assert_eq!(record.status(), RadarStatus::Error);
    assert!(record.message().unwrap().starts_with("Request failed"));
}
