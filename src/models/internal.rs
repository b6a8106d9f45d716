use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FetchErrorKind;

pub const DEFAULT_STATION: &str = "Zürich, Toni-Areal";
pub const DEFAULT_DESTINATION: &str = "Zürich, Rathaus";
pub const KNOWN_STATIONS: [&str; 2] = ["Zürich, Rathaus", "Zürich, Toni-Areal"];

#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub id: Uuid,
    pub time: DateTime<FixedOffset>,
}

impl Departure {
    pub fn new(time: DateTime<FixedOffset>) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
        }
    }
}

/// Result of one stationboard lookup. `Departures` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Departures(Vec<Departure>),
    Empty,
    Failed(FetchErrorKind),
}

impl FetchOutcome {
    pub fn from_departures(departures: Vec<Departure>) -> Self {
        if departures.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Departures(departures)
        }
    }

    pub fn departures(&self) -> &[Departure] {
        match self {
            FetchOutcome::Departures(departures) => departures,
            FetchOutcome::Empty | FetchOutcome::Failed(_) => &[],
        }
    }

    pub fn into_departures(self) -> Vec<Departure> {
        match self {
            FetchOutcome::Departures(departures) => departures,
            FetchOutcome::Empty | FetchOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            FetchOutcome::Departures(_) => OutcomeStatus::Departures,
            FetchOutcome::Empty => OutcomeStatus::Empty,
            FetchOutcome::Failed(kind) => OutcomeStatus::Failed(*kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "error")]
pub enum OutcomeStatus {
    Departures,
    Empty,
    Failed(FetchErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ComplicationLayout {
    #[default]
    OneDeparture,
    ThreeDepartures,
    TimeUntil,
}

impl From<i64> for ComplicationLayout {
    fn from(value: i64) -> Self {
        match value {
            1 => ComplicationLayout::ThreeDepartures,
            2 => ComplicationLayout::TimeUntil,
            _ => ComplicationLayout::OneDeparture,
        }
    }
}

impl From<ComplicationLayout> for i64 {
    fn from(layout: ComplicationLayout) -> Self {
        match layout {
            ComplicationLayout::OneDeparture => 0,
            ComplicationLayout::ThreeDepartures => 1,
            ComplicationLayout::TimeUntil => 2,
        }
    }
}

/// Settings shared between the app view, the widget and the complication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "selectedStation", default = "default_station")]
    pub selected_station: String,
    #[serde(rename = "selectedDestination", default = "default_destination")]
    pub selected_destination: String,
    #[serde(rename = "complicationLayout", default)]
    pub complication_layout: ComplicationLayout,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            selected_station: default_station(),
            selected_destination: default_destination(),
            complication_layout: ComplicationLayout::default(),
        }
    }
}

fn default_station() -> String {
    DEFAULT_STATION.to_string()
}

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesUpdate {
    #[serde(rename = "selectedStation")]
    pub selected_station: Option<String>,
    #[serde(rename = "selectedDestination")]
    pub selected_destination: Option<String>,
    #[serde(rename = "complicationLayout")]
    pub complication_layout: Option<ComplicationLayout>,
}
