use std::{io::ErrorKind, path::PathBuf};

use tokio::sync::RwLock;

use crate::{
    error::PreferencesError,
    models::internal::{Preferences, PreferencesUpdate},
};

/// Key-value settings shared by every surface, persisted as one JSON document.
/// Writes replace the whole file; the last writer wins.
#[derive(Debug)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    preferences: RwLock<Preferences>,
}

impl PreferenceStore {
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();

        let preferences = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Preferences>(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no preferences file, using defaults");
                Preferences::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            preferences: RwLock::new(preferences),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            preferences: RwLock::new(Preferences::default()),
        }
    }

    pub async fn get(&self) -> Preferences {
        self.preferences.read().await.clone()
    }

    pub async fn update(&self, update: PreferencesUpdate) -> Result<Preferences, PreferencesError> {
        let mut preferences = self.preferences.write().await;

        let mut next = preferences.clone();
        if let Some(station) = update.selected_station {
            next.selected_station = station;
        }
        if let Some(destination) = update.selected_destination {
            next.selected_destination = destination;
        }
        if let Some(layout) = update.complication_layout {
            next.complication_layout = layout;
        }

        if let Some(path) = &self.path {
            let json = serde_json::to_vec_pretty(&next)?;
            tokio::fs::write(path, json).await?;
        }

        *preferences = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::models::internal::{ComplicationLayout, DEFAULT_DESTINATION, DEFAULT_STATION};

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("tram-display-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_means_defaults() {
        let store = PreferenceStore::load(temp_path()).await.unwrap();

        let prefs = store.get().await;

        assert_eq!(prefs.selected_station, DEFAULT_STATION);
        assert_eq!(prefs.selected_destination, DEFAULT_DESTINATION);
        assert_eq!(prefs.complication_layout, ComplicationLayout::OneDeparture);
    }

    #[tokio::test]
    async fn update_persists_and_reloads() {
        let path = temp_path();
        let store = PreferenceStore::load(&path).await.unwrap();

        store
            .update(PreferencesUpdate {
                selected_station: Some("Zürich, Rathaus".to_string()),
                selected_destination: Some("Zürich, Toni-Areal".to_string()),
                complication_layout: Some(ComplicationLayout::TimeUntil),
            })
            .await
            .unwrap();

        let reloaded = PreferenceStore::load(&path).await.unwrap().get().await;
        assert_eq!(reloaded.selected_station, "Zürich, Rathaus");
        assert_eq!(reloaded.selected_destination, "Zürich, Toni-Areal");
        assert_eq!(reloaded.complication_layout, ComplicationLayout::TimeUntil);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"selectedStation\""));
        assert!(raw.contains("\"complicationLayout\": 2"));

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn partial_update_keeps_other_keys() {
        let store = PreferenceStore::in_memory();

        let prefs = store
            .update(PreferencesUpdate {
                complication_layout: Some(ComplicationLayout::ThreeDepartures),
                ..PreferencesUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(prefs.selected_station, DEFAULT_STATION);
        assert_eq!(prefs.complication_layout, ComplicationLayout::ThreeDepartures);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let path = temp_path();
        std::fs::write(&path, "{ not json").unwrap();

        let result = PreferenceStore::load(&path).await;

        assert!(matches!(result, Err(PreferencesError::Json(_))));
        std::fs::remove_file(path).unwrap();
    }
}
