use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    format,
    models::internal::{ComplicationLayout, Departure, FetchOutcome, OutcomeStatus},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDto {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeparturesQuery {
    pub station: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DepartureDto {
    pub id: Uuid,
    pub time: DateTime<FixedOffset>,
    pub display_time: String,
    pub minutes_until: i64,
}

impl DepartureDto {
    pub fn new(departure: &Departure, tz: Tz, now: DateTime<Utc>) -> Self {
        Self {
            id: departure.id,
            time: departure.time,
            display_time: format::format_time(&departure.time, tz),
            minutes_until: format::minutes_until(&departure.time, now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeparturesDto {
    pub station: Option<String>,
    pub destination: Option<String>,
    pub departures: Vec<DepartureDto>,
    pub outcome: OutcomeStatus,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeparturesDto {
    pub fn new(
        station: Option<String>,
        destination: Option<String>,
        outcome: &FetchOutcome,
        tz: Tz,
        now: DateTime<Utc>,
    ) -> Self {
        let departures = outcome
            .departures()
            .iter()
            .map(|d| DepartureDto::new(d, tz, now))
            .collect::<Vec<DepartureDto>>();

        Self {
            message: departures
                .is_empty()
                .then(|| format::NO_DEPARTURES_MESSAGE.to_string()),
            station,
            destination,
            departures,
            outcome: outcome.status(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WidgetDto {
    pub departure_info: String,
}

#[derive(Debug, Serialize)]
pub struct ComplicationDto {
    pub layout: ComplicationLayout,
    pub station_label: String,
    pub text: String,
    pub progress: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StationsDto {
    pub stations: Vec<String>,
}
