use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    AppState,
    dtos::internal::{
        ComplicationDto, DeparturesDto, DeparturesQuery, ErrorDto, StationsDto, WidgetDto,
    },
    format,
    models::internal::{
        ComplicationLayout, Departure, KNOWN_STATIONS, Preferences, PreferencesUpdate,
    },
    services::board::BoardSnapshot,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/departures", get(get_departures))
        .route("/board", get(get_board))
        .route("/board/refresh", post(refresh_board))
        .route("/widget", get(get_widget))
        .route("/complication", get(get_complication))
        .route("/preferences", get(get_preferences).put(put_preferences))
        .route("/stations", get(get_stations))
        .with_state(state)
}

pub async fn get_departures(
    State(app_state): State<AppState>,
    Query(query): Query<DeparturesQuery>,
) -> Json<DeparturesDto> {
    let preferences = app_state.preferences.get().await;
    let station = query.station.unwrap_or(preferences.selected_station);
    let destination = query.destination.unwrap_or(preferences.selected_destination);

    let outcome = app_state.fetcher.fetch_outcome(&station, &destination).await;

    Json(DeparturesDto::new(
        Some(station),
        Some(destination),
        &outcome,
        app_state.display_tz,
        Utc::now(),
    ))
}

pub async fn get_board(State(app_state): State<AppState>) -> Json<DeparturesDto> {
    let snapshot = app_state.board.snapshot().await;

    Json(board_dto(snapshot, app_state.display_tz))
}

pub async fn refresh_board(State(app_state): State<AppState>) -> Json<DeparturesDto> {
    refresh_board_from_preferences(&app_state).await;

    get_board(State(app_state)).await
}

pub async fn get_widget(State(app_state): State<AppState>) -> Json<WidgetDto> {
    let snapshot = app_state.board.snapshot().await;

    Json(WidgetDto {
        departure_info: widget_info(snapshot.departures(), app_state.display_tz),
    })
}

pub async fn get_complication(State(app_state): State<AppState>) -> Json<ComplicationDto> {
    let preferences = app_state.preferences.get().await;
    let snapshot = app_state.board.snapshot().await;

    let station = snapshot
        .station
        .as_deref()
        .unwrap_or(&preferences.selected_station);

    Json(render_complication(
        snapshot.departures(),
        preferences.complication_layout,
        station,
        app_state.display_tz,
        Utc::now(),
    ))
}

pub async fn get_preferences(State(app_state): State<AppState>) -> Json<Preferences> {
    Json(app_state.preferences.get().await)
}

pub async fn put_preferences(
    State(app_state): State<AppState>,
    Json(input): Json<PreferencesUpdate>,
) -> Result<Json<Preferences>, (StatusCode, Json<ErrorDto>)> {
    let before = app_state.preferences.get().await;

    let after = app_state.preferences.update(input).await.map_err(|e| {
        tracing::error!("failed to save preferences: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                message: "Failed to save preferences.".to_string(),
            }),
        )
    })?;

    // The response does not wait for the board refresh.
    if before.selected_station != after.selected_station
        || before.selected_destination != after.selected_destination
    {
        let station = after.selected_station.clone();
        let destination = after.selected_destination.clone();
        tokio::spawn(async move {
            app_state
                .board
                .refresh(app_state.fetcher.as_ref(), &station, &destination)
                .await;
        });
    }

    Ok(Json(after))
}

pub async fn get_stations() -> Json<StationsDto> {
    Json(StationsDto {
        stations: KNOWN_STATIONS
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<String>>(),
    })
}

/// Refreshes the board for the currently selected pair.
pub async fn refresh_board_from_preferences(app_state: &AppState) -> bool {
    let preferences = app_state.preferences.get().await;

    app_state
        .board
        .refresh(
            app_state.fetcher.as_ref(),
            &preferences.selected_station,
            &preferences.selected_destination,
        )
        .await
}

fn board_dto(snapshot: BoardSnapshot, tz: Tz) -> DeparturesDto {
    let mut dto = DeparturesDto::new(
        snapshot.station.clone(),
        snapshot.destination.clone(),
        &snapshot.outcome,
        tz,
        Utc::now(),
    );
    dto.updated_at = snapshot.updated_at;
    dto
}

pub fn widget_info(departures: &[Departure], tz: Tz) -> String {
    departures
        .first()
        .map_or("No data".to_string(), |d| {
            format!("Dep: {}", format::format_time(&d.time, tz))
        })
}

pub fn render_complication(
    departures: &[Departure],
    layout: ComplicationLayout,
    station: &str,
    tz: Tz,
    now: DateTime<Utc>,
) -> ComplicationDto {
    let station_label = format!("From {}", format::short_station_name(station));

    let (text, progress) = match departures.first() {
        None => ("No departures".to_string(), None),
        Some(next) => match layout {
            ComplicationLayout::OneDeparture => (format::joined_times(departures, 1, tz), None),
            ComplicationLayout::ThreeDepartures => {
                (format::joined_times(departures, 3, tz), None)
            }
            ComplicationLayout::TimeUntil => (
                format!("{}m", format::minutes_until(&next.time, now)),
                format::tram_progress(departures, now),
            ),
        },
    };

    ComplicationDto {
        layout,
        station_label,
        text,
        progress,
    }
}
