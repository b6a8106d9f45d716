#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::Query,
    http::{StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use tram_display::{config::Config, services::transport::DepartureFetcher};

pub const TONI_AREAL: &str = "Zürich, Toni-Areal";
pub const RATHAUS: &str = "Zürich, Rathaus";

/// In-process stand-in for the stationboard API.
pub struct FakeApi {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl FakeApi {
    pub fn recorded(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

pub async fn serve_stationboard(status: StatusCode, body: String) -> FakeApi {
    serve_delayed(status, body, Duration::ZERO).await
}

/// Answers every request only after `delay`.
pub async fn serve_delayed(status: StatusCode, body: String, delay: Duration) -> FakeApi {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    let app = Router::new().route(
        "/v1/stationboard",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorded = recorded.clone();
            let body = body.clone();
            async move {
                recorded.lock().unwrap().push(params);
                tokio::time::sleep(delay).await;
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeApi {
        base_url: format!("http://{addr}"),
        requests,
    }
}

pub async fn serve_json(value: Value) -> FakeApi {
    serve_stationboard(StatusCode::OK, value.to_string()).await
}

/// A local address nobody listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}")
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        http_timeout: Duration::from_secs(2),
        ..Config::default()
    }
}

pub fn fetcher_for(base_url: &str) -> DepartureFetcher {
    DepartureFetcher::new(&config_for(base_url)).unwrap()
}

pub fn connection(departure: &str, stops: &[&str]) -> Value {
    json!({
        "stop": { "departure": departure, "platform": null },
        "passList": stops
            .iter()
            .map(|name| json!({ "station": { "name": name }, "departure": null }))
            .collect::<Vec<Value>>(),
    })
}

/// Five connections, where only indices 1 and 3 continue to Rathaus.
pub fn rathaus_board() -> Value {
    json!({
        "station": { "name": TONI_AREAL },
        "stationboard": [
            connection("2024-01-01T10:00:00Z", &["Zürich, Escher-Wyss-Platz"]),
            connection("2024-01-01T10:05:00Z", &["Zürich, Escher-Wyss-Platz", RATHAUS]),
            connection("2024-01-01T10:10:00Z", &["Zürich, Hardbrücke"]),
            connection("2024-01-01T10:20:00Z", &["Zürich, Limmatplatz", RATHAUS]),
            connection("2024-01-01T10:25:00Z", &["Zürich, Hardbrücke"]),
        ]
    })
}
