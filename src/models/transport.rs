use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StationBoardResponse {
    pub stationboard: Vec<Connection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Connection {
    pub stop: Stop,
    #[serde(rename = "passList", default)]
    pub pass_list: Option<Vec<PassListEntry>>,
}

/// The connection's call at the requested origin station.
#[derive(Debug, Deserialize, Clone)]
pub struct Stop {
    pub departure: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PassListEntry {
    pub station: PassStation,
    /// absent at the terminus
    #[serde(default)]
    pub departure: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PassStation {
    #[serde(default)]
    pub name: Option<String>,
}

impl Connection {
    pub fn serves(&self, destination: &str) -> bool {
        self.pass_list.as_ref().is_some_and(|pass_list| {
            pass_list
                .iter()
                .any(|pass| pass.station.name.as_deref() == Some(destination))
        })
    }
}
