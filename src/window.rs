use log::debug;
use sound::SOUND_PLAYER;
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use utils::app_emit;

use crate::error::CommandError;

// Label, not title. The capabilities file refers to it.
pub const MAIN_WINDOW: &str = "main";
pub const TITLE: &str = "Folderscanner (is_deployed?)";
pub const MUTED_PREFIX: &str = "[MUTED] ";
pub const WINDOW_WIDTH: f64 = 400.0;
pub const WINDOW_HEIGHT: f64 = 135.0;

pub fn window_title(muted: bool) -> String {
    if muted {
        format!("{MUTED_PREFIX}{TITLE}")
    } else {
        TITLE.to_string()
    }
}

pub fn build_main_window(app: &AppHandle) -> tauri::Result<WebviewWindow> {
    WebviewWindowBuilder::new(app, MAIN_WINDOW, WebviewUrl::App("index.html".into()))
        .title(window_title(SOUND_PLAYER.is_muted()))
        .inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .resizable(false)
        .maximizable(false)
        .build()
}

pub fn focus_main_window(app: &AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
        let _ = window.unminimize();
        let _ = window.set_focus();
    }
}

fn update_title(app: &AppHandle, muted: bool) -> Result<(), CommandError> {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW) {
        window.set_title(&window_title(muted))?;
    }
    Ok(())
}

#[tauri::command]
pub fn toggle_mute(app: AppHandle) -> Result<bool, CommandError> {
    let muted = SOUND_PLAYER.toggle_mute();
    debug!("sound {}", if muted { "muted" } else { "unmuted" });

    update_title(&app, muted)?;
    app_emit!(&app, "mute/update", muted);
    Ok(muted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muted_title_is_prefixed() {
        assert_eq!(window_title(false), "Folderscanner (is_deployed?)");
        assert_eq!(window_title(true), "[MUTED] Folderscanner (is_deployed?)");
    }
}
