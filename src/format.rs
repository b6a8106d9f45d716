use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

use crate::models::internal::Departure;

pub const NO_DEPARTURES_MESSAGE: &str = "No departures found.";

/// Short time in the display timezone, e.g. `10:05`.
pub fn format_time(time: &DateTime<FixedOffset>, tz: Tz) -> String {
    time.with_timezone(&tz).format("%H:%M").to_string()
}

/// Whole minutes left, rounded up. Negative once the vehicle has left.
pub fn minutes_until(time: &DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    let seconds = time.with_timezone(&Utc).signed_duration_since(now).num_seconds();
    seconds.div_euclid(60) + i64::from(seconds.rem_euclid(60) != 0)
}

/// How far we are through the wait for the next tram, measured against the
/// headway between the next two departures. Clamped to `0.0..=1.0`.
pub fn tram_progress(departures: &[Departure], now: DateTime<Utc>) -> Option<f64> {
    let [next, following, ..] = departures else {
        return None;
    };

    let headway = following.time.signed_duration_since(next.time).num_seconds() as f64;
    if headway <= 0.0 {
        return None;
    }

    let remaining = next.time.with_timezone(&Utc).signed_duration_since(now).num_seconds() as f64;

    Some((1.0 - remaining / headway).clamp(0.0, 1.0))
}

pub fn short_station_name(name: &str) -> &str {
    name.split_once(", ").map_or(name, |(_, stop)| stop)
}

pub fn joined_times(departures: &[Departure], count: usize, tz: Tz) -> String {
    departures
        .iter()
        .take(count)
        .map(|d| format_time(&d.time, tz))
        .collect::<Vec<String>>()
        .join(" • ")
}
