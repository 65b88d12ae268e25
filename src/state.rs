use scanner::{Status, StatusHistory, StatusReport};
use serde::Serialize;

#[derive(Default)]
pub struct AppState {
    pub report: Option<StatusReport>,
    pub history: StatusHistory,
}

impl AppState {
    pub fn recent_statuses(&self) -> Vec<Status> {
        self.history.iter().copied().collect()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendState {
    pub report: Option<StatusReport>,
    pub history: Vec<Status>,
    pub muted: bool,
    pub path: String,
    pub filename: String,
}
