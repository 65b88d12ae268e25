use config_store::{Config, borrow_config_checked, borrow_config_mut_checked};
use log::{debug, error, info, warn};
use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use utils::app_emit;

use crate::{inputs::normalize_input, status::update_status};

pub const INFO_TITLE: &str = "Information about the app";
pub const INFO_TEXT: &str = "Browse for the folder containing the deployed files\n\
and enter the filename to scan for.\n\n\
The application will check the status of the folder every 5 seconds.\n\n\
Press ENTER at the filename field to refresh instantly\n\n\
Show this message at startup?";

#[tauri::command]
pub fn fetch_settings() -> Config {
    borrow_config_checked().clone()
}

#[tauri::command]
pub fn show_info(app: AppHandle, was_click: bool) {
    show_info_control(&app, was_click);
}

/// On startup the dialog shows unless the user declined it before; a click
/// on the status always shows it. The answer decides the next startup.
pub fn show_info_control(app: &AppHandle, was_click: bool) {
    let should_show = was_click || borrow_config_checked().show_info_at_startup();
    if !should_show {
        debug!("info dialog disabled in settings");
        return;
    }

    let handle = app.clone();
    app.dialog()
        .message(INFO_TEXT)
        .title(INFO_TITLE)
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::YesNo)
        .show(move |show_again| {
            let mut config = borrow_config_mut_checked();
            config.show_info = Some(show_again);
            let settings = config.clone();
            if let Err(e) = config.commit() {
                error!("{e}");
                return;
            }
            app_emit!(&handle, "settings/update", &settings);
        });
}

/// Opens a folder picker; the chosen folder replaces the scanned path.
#[tauri::command]
pub fn browse_folder(app: AppHandle) {
    let handle = app.clone();
    app.dialog().file().pick_folder(move |folder| {
        let Some(folder) = folder else {
            debug!("folder selection cancelled");
            return;
        };

        let path = match folder.into_path() {
            Ok(path) => path.display().to_string(),
            Err(e) => {
                warn!("selected folder is not a local path: {e}");
                return;
            }
        };
        info!("selected folder {path}");

        let filename = normalize_input(borrow_config_checked().filename_or_empty());
        if let Err(e) = update_status(handle.clone(), path, filename) {
            error!("{e}");
            return;
        }

        let settings = borrow_config_checked().clone();
        app_emit!(&handle, "settings/update", &settings);
    });
}
