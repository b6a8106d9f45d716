use std::future::Future;

use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use url::Url;

use crate::{
    config::{Config, DEPARTURE_CAP},
    error::FetchError,
    models::{
        internal::{Departure, FetchOutcome},
        transport::StationBoardResponse,
    },
};

/// Anything that can produce departures for a station/destination pair.
pub trait DepartureSource: Send + Sync {
    fn fetch(&self, station: &str, destination: &str) -> impl Future<Output = FetchOutcome> + Send;
}

#[derive(Clone, Debug)]
pub struct DepartureFetcher {
    client: Client,
    base_url: String,
    station_limit: u32,
    max_departures: usize,
}

impl DepartureFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            station_limit: config.station_limit,
            max_departures: config.max_departures.min(DEPARTURE_CAP),
        }
    }

    pub fn stationboard_url(&self, station: &str) -> Result<Url, FetchError> {
        let limit = self.station_limit.to_string();
        let url = Url::parse_with_params(
            &format!("{}/v1/stationboard", self.base_url),
            &[("station", station), ("limit", limit.as_str())],
        )?;

        Ok(url)
    }

    pub async fn fetch_stationboard(
        &self,
        station: &str,
    ) -> Result<StationBoardResponse, FetchError> {
        let url = self.stationboard_url(station)?;
        tracing::debug!(%url, "fetching stationboard");

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = resp.bytes().await?;

        serde_json::from_slice::<StationBoardResponse>(&body).map_err(|e| {
            tracing::warn!(
                category = ?e.classify(),
                line = e.line(),
                column = e.column(),
                "stationboard response did not match the expected shape: {}",
                e
            );
            FetchError::Decode(e)
        })
    }

    pub async fn fetch_departures(
        &self,
        station: &str,
        destination: &str,
    ) -> Result<Vec<Departure>, FetchError> {
        let resp = self.fetch_stationboard(station).await?;

        tracing::debug!(
            connections = resp.stationboard.len(),
            station,
            destination,
            "decoded stationboard"
        );

        Ok(select_departures(&resp, destination, self.max_departures))
    }

    pub async fn fetch_outcome(&self, station: &str, destination: &str) -> FetchOutcome {
        match self.fetch_departures(station, destination).await {
            Ok(departures) => FetchOutcome::from_departures(departures),
            Err(e) => {
                tracing::warn!(station, destination, "no departures, fetch failed: {}", e);
                FetchOutcome::Failed(e.kind())
            }
        }
    }

    /// Every failure ends up as an empty list.
    pub async fn fetch_departures_or_empty(
        &self,
        station: &str,
        destination: &str,
    ) -> Vec<Departure> {
        self.fetch_outcome(station, destination)
            .await
            .into_departures()
    }
}

impl DepartureSource for DepartureFetcher {
    fn fetch(&self, station: &str, destination: &str) -> impl Future<Output = FetchOutcome> + Send {
        self.fetch_outcome(station, destination)
    }
}

/// Keeps connections that pass through `destination`, in API order, up to `max`.
pub fn select_departures(
    response: &StationBoardResponse,
    destination: &str,
    max: usize,
) -> Vec<Departure> {
    response
        .stationboard
        .iter()
        .filter(|connection| connection.serves(destination))
        .filter_map(|connection| {
            let time = parse_departure_time(&connection.stop.departure);
            if time.is_none() {
                tracing::debug!(
                    departure = %connection.stop.departure,
                    "dropping connection with unparseable departure"
                );
            }
            time.map(Departure::new)
        })
        .take(max)
        .collect::<Vec<Departure>>()
}

/// Internet date-time with whole seconds: an upper-case `T` separator and either `Z`
/// or a numeric offset. The API sends offsets without a colon (`+0100`), which RFC 3339
/// does not allow, so both offset spellings are taken.
pub fn parse_departure_time(value: &str) -> Option<DateTime<FixedOffset>> {
    if value.as_bytes().get(10) != Some(&b'T') || value.contains('.') || value.ends_with('z') {
        return None;
    }

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}
