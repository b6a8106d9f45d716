pub mod config;
pub mod dtos;
pub mod error;
pub mod format;
pub mod models;
pub mod services;

use std::sync::Arc;

use chrono_tz::Tz;

use crate::services::{
    board::DepartureBoard, preferences::PreferenceStore, transport::DepartureFetcher,
};

/// Shared by every surface: one fetcher, one board, one settings store.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<DepartureFetcher>,
    pub board: Arc<DepartureBoard>,
    pub preferences: Arc<PreferenceStore>,
    pub display_tz: Tz,
}
