use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    models::internal::{Departure, FetchOutcome},
    services::transport::DepartureSource,
};

#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub station: Option<String>,
    pub destination: Option<String>,
    pub outcome: FetchOutcome,
    pub updated_at: Option<DateTime<Utc>>,
    pub generation: u64,
}

impl BoardSnapshot {
    pub fn departures(&self) -> &[Departure] {
        self.outcome.departures()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            station: None,
            destination: None,
            outcome: FetchOutcome::Empty,
            updated_at: None,
            generation: 0,
        }
    }
}

/// Latest departures for the selected pair. When refreshes overlap, the one that
/// started last wins, whatever order the responses arrive in.
#[derive(Debug, Default)]
pub struct DepartureBoard {
    next_generation: AtomicU64,
    snapshot: RwLock<BoardSnapshot>,
}

impl DepartureBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when a newer refresh already stored its result.
    pub async fn refresh<S: DepartureSource>(
        &self,
        source: &S,
        station: &str,
        destination: &str,
    ) -> bool {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = source.fetch(station, destination).await;

        let mut snapshot = self.snapshot.write().await;
        if snapshot.generation > generation {
            tracing::debug!(
                generation,
                current = snapshot.generation,
                station,
                destination,
                "discarding stale departures"
            );
            return false;
        }

        *snapshot = BoardSnapshot {
            station: Some(station.to_string()),
            destination: Some(destination.to_string()),
            outcome,
            updated_at: Some(Utc::now()),
            generation,
        };

        true
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.snapshot.read().await.clone()
    }
}
