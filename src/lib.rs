#![deny(unused_must_use)]
#![deny(clippy::all)]

use std::{
    env,
    fs::{self, File},
    io::Write,
    panic::PanicHookInfo,
    str::FromStr,
    time::SystemTime,
};

use ::sound::{SOUND_PLAYER, SoundPlayerWrapper};
use config_store::{CONFIG, DATA_ROOT_DIR};
use log::{LevelFilter, debug, info, warn};
use log4rs::{
    Config,
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};
use parking_lot::Mutex;
use tauri::{AppHandle, Manager, RunEvent};
use tauri_plugin_dialog::DialogExt;

mod error;
mod inputs;
mod settings;
mod state;
mod status;
mod window;

use settings::*;
use state::AppState;
use status::*;
use window::*;

const LOG_PATTERN: &str = "{d} | {l} | {f}:{L} - {m}{n}";
// Bundled next to the binary, see `bundle.resources` in tauri.conf.json
const SFX_DIR: &str = "sfx";

fn setup_logging() {
    if let Err(e) = fs::create_dir_all(&**DATA_ROOT_DIR) {
        eprintln!("could not create {}: {e}", DATA_ROOT_DIR.display());
    }

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .append(false)
        .build(DATA_ROOT_DIR.join("is-deployed.log"))
        .expect("Failed to setup logfile");

    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let log_level = env::var("RUST_LOG").unwrap_or(String::from("Info"));

    let config = Config::builder()
        .appenders(vec![
            Appender::builder().build("logfile", Box::new(logfile)),
            Appender::builder().build("console", Box::new(console)),
        ])
        .build(
            Root::builder()
                .appenders(vec!["logfile", "console"])
                .build(LevelFilter::from_str(&log_level).unwrap_or(LevelFilter::Info)),
        )
        .expect("Failed to build config");

    log4rs::init_config(config).expect("Failed to initialise log4rs");
}

fn setup(handle: &AppHandle) -> tauri::Result<()> {
    setup_logging();

    debug!("loading config from {}", CONFIG.path().display());
    if let Some(backup) = CONFIG.backup() {
        warn!("config corrupted, original moved to {}", backup.display());
        handle
            .dialog()
            .message(format!(
                "The settings file was corrupted and has been reset. A copy has been saved at: {}",
                backup.display()
            ))
            .title("Settings corrupted")
            .show(|_| {});
    }

    let sfx_dir = match handle.path().resource_dir() {
        Ok(dir) => Some(dir.join(SFX_DIR)),
        Err(e) => {
            warn!("no resource dir, falling back to tones: {e}");
            None
        }
    };
    SoundPlayerWrapper::init(sfx_dir);

    build_main_window(handle)?;
    info!("initialized folder scanner");

    show_info_control(handle, false);
    spawn_poller(handle.clone());

    Ok(())
}

pub fn custom_panic_handler(e: &PanicHookInfo) -> Option<()> {
    let crash_file = DATA_ROOT_DIR.join(format!(
        "crash-{}.log",
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs()
    ));
    let mut file = File::create_new(crash_file).ok()?;
    file.write_all(format!("is_deployed crashed with the following panic:\n{e}").as_bytes())
        .ok()?;
    drop(file);

    Some(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    std::panic::set_hook(Box::new(|e| {
        let _ = custom_panic_handler(e);
        println!("{e}");
    }));

    #[allow(unused_mut)]
    let mut builder = tauri::Builder::default();

    // Single instance has to be the first plugin registered
    #[cfg(desktop)]
    {
        builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            focus_main_window(app);
        }));
    }

    let app = builder
        .plugin(tauri_plugin_dialog::init())
        .manage(Mutex::new(AppState::default()))
        .invoke_handler(tauri::generate_handler![
            // Status
            fetch_state,
            update_status,
            refresh_status,
            // Settings
            fetch_settings,
            browse_folder,
            show_info,
            // Window
            toggle_mute,
        ])
        .setup(|app| {
            setup(app.handle())?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while running tauri application");

    app.run(|_app_handle, event| {
        if let RunEvent::Exit = event {
            debug!("cleaning up and exiting application");
            SOUND_PLAYER.ensure_terminated();
        }
    });
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use ::sound::{
        Clip,
        clips::{ClipSource, find_clip_file},
    };

    use super::*;

    #[test]
    fn bundled_clips_are_found_and_decode() {
        let sfx_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(SFX_DIR);

        for clip in [Clip::Success, Clip::Error] {
            assert!(find_clip_file(&sfx_dir, clip).is_some());
            assert!(matches!(
                ClipSource::load(Some(&sfx_dir), clip),
                ClipSource::Encoded(_)
            ));
        }
    }

    #[test]
    fn bundle_ships_the_sfx_dir() {
        let conf = include_str!("../tauri.conf.json");
        assert!(conf.contains(&format!("\"{SFX_DIR}/*\"")));
    }
}
