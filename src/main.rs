use std::{sync::Arc, time::Duration};

use axum::{BoxError, error_handling::HandleErrorLayer, http::StatusCode};
use dotenvy::dotenv;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tram_display::{
    AppState,
    config::Config,
    services::{
        board::DepartureBoard,
        internal::{refresh_board_from_preferences, router},
        preferences::PreferenceStore,
        transport::DepartureFetcher,
    },
};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let fetcher = DepartureFetcher::new(&config).expect("Failed to build HTTP client");

    let preferences = PreferenceStore::load(&config.preferences_path)
        .await
        .expect("Failed to load preferences");

    let state = AppState {
        fetcher: Arc::new(fetcher),
        board: Arc::new(DepartureBoard::new()),
        preferences: Arc::new(preferences),
        display_tz: config.display_tz,
    };

    // Same cadence as the watch complication's timeline.
    let refresh_state = state.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        loop {
            interval.tick().await;
            let stored = refresh_board_from_preferences(&refresh_state).await;
            tracing::debug!(stored, "board refreshed");
        }
    });

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|error: BoxError| async move {
                if error.is::<tower::timeout::error::Elapsed>() {
                    Ok(StatusCode::REQUEST_TIMEOUT)
                } else {
                    Err((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Unhandled internal error: {error}"),
                    ))
                }
            }))
            .timeout(Duration::from_secs(10))
            .layer(TraceLayer::new_for_http())
            .into_inner(),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");

    tracing::debug!("listening on {}", config.bind_addr);
    let _ = axum::serve(listener, app).await;
}
