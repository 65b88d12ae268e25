use std::time::Duration;

use config_store::{borrow_config_checked, borrow_config_mut_checked};
use log::{debug, info};
use parking_lot::Mutex;
use scanner::{StatusChecker, StatusReport, Transition};
use sound::{Clip, SOUND_PLAYER};
use tauri::{AppHandle, Manager};
use tokio::time::{MissedTickBehavior, interval};
use utils::app_emit;

use crate::{
    error::CommandError,
    inputs::normalize_input,
    state::{AppState, FrontendState},
};

pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

#[tauri::command]
pub fn fetch_state(state: tauri::State<'_, Mutex<AppState>>) -> FrontendState {
    let guard = state.lock();
    let config = borrow_config_checked();

    FrontendState {
        report: guard.report.clone(),
        history: guard.recent_statuses(),
        muted: SOUND_PLAYER.is_muted(),
        path: config.path_or_empty().to_string(),
        filename: config.filename_or_empty().to_string(),
    }
}

/// Stores the entered folder and filename, then re-checks right away.
#[tauri::command]
pub fn update_status(
    app: AppHandle,
    path: String,
    filename: String,
) -> Result<StatusReport, CommandError> {
    let path = normalize_input(&path);
    let filename = normalize_input(&filename);

    let mut config = borrow_config_mut_checked();
    config.path = Some(path.clone());
    config.filename = Some(filename.clone());
    config.commit()?;

    Ok(publish_status(&app, &path, &filename))
}

#[tauri::command]
pub fn refresh_status(app: AppHandle) -> StatusReport {
    refresh_from_config(&app)
}

pub fn refresh_from_config(app: &AppHandle) -> StatusReport {
    let (path, filename) = {
        let config = borrow_config_checked();
        (
            normalize_input(config.path_or_empty()),
            normalize_input(config.filename_or_empty()),
        )
    };

    publish_status(app, &path, &filename)
}

/// Checks the folder, records the result and pushes it to the frontend.
/// A change from the previous status plays a clip and pushes the history.
pub fn publish_status(app: &AppHandle, path: &str, filename: &str) -> StatusReport {
    let report = StatusChecker::new(path, filename).check_status();

    let (transition, recent) = {
        let state = app.state::<Mutex<AppState>>();
        let mut state_lock = state.lock();
        state_lock.report = Some(report.clone());

        let changed = state_lock.history.latest() != Some(report.status);
        let transition = state_lock.history.record(report.status);
        (transition, changed.then(|| state_lock.recent_statuses()))
    };

    if let Some(transition) = transition {
        info!("status changed from {} to {}", transition.from, transition.to);
        SOUND_PLAYER.play(clip_for(&transition));
    }

    app_emit!(app, "status/update", &report);
    if let Some(recent) = recent {
        app_emit!(app, "history/update", &recent);
    }
    report
}

pub fn clip_for(transition: &Transition) -> Clip {
    if transition.is_recovery() {
        Clip::Success
    } else {
        Clip::Error
    }
}

pub fn spawn_poller(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = refresh_from_config(&app);
            debug!("polled status: {}", report.message);
        }
    });
}
