use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Local};
use log::{debug, warn};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::{
    marker::{MarkerKind, MarkerPattern},
    status::Status,
};

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: Status,
    pub color: &'static str,
    pub text_color: &'static str,
    pub time: Option<String>,
    pub message: String,
    #[serde(skip)]
    pub changed_at: Option<SystemTime>,
}

impl StatusReport {
    pub fn new(status: Status, changed_at: Option<SystemTime>) -> Self {
        let time = changed_at.map(format_time);
        let message = match &time {
            Some(time) => format!("{} since {time}", status.label()),
            None => status.label().to_string(),
        };

        Self {
            status,
            color: status.color(),
            text_color: status.text_color(),
            time,
            message,
            changed_at,
        }
    }

    pub fn down() -> Self {
        Self::new(Status::Down, None)
    }
}

pub fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(TIME_FORMAT).to_string()
}

/// Resolves the deployment status of one folder at the instant of the call.
pub struct StatusChecker {
    path: PathBuf,
    filename: String,
}

impl StatusChecker {
    pub fn new(path: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
        }
    }

    pub fn check_status(&self) -> StatusReport {
        if !self.path.is_dir() {
            debug!("{} is not a directory, reporting down", self.path.display());
            return StatusReport::down();
        }

        let files = match self.list_files() {
            Some(files) => files,
            None => return StatusReport::down(),
        };

        for kind in MarkerKind::PRIORITY {
            let pattern = MarkerPattern::new(&self.filename, kind);

            let matched: Vec<&DirEntry> = files
                .iter()
                .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
                .collect();

            if matched.is_empty() {
                continue;
            }

            debug!(
                "found {} marker(s) for {} in {}",
                matched.len(),
                pattern.glob(),
                self.path.display()
            );
            return StatusReport::new(kind.status(), latest_modified(&matched));
        }

        StatusReport::new(Status::Down, folder_created(&self.path))
    }

    /// Regular files directly inside the folder. `None` when the folder
    /// itself can't be read.
    fn list_files(&self) -> Option<Vec<DirEntry>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry),
                Ok(_) => {}
                Err(e) if e.depth() == 0 => {
                    warn!("could not read {}: {e}", self.path.display());
                    return None;
                }
                Err(e) => debug!("skipping unreadable entry: {e}"),
            }
        }

        Some(files)
    }
}

fn latest_modified(entries: &[&DirEntry]) -> Option<SystemTime> {
    entries
        .iter()
        .filter_map(|entry| match entry.metadata() {
            Ok(metadata) => metadata.modified().ok(),
            Err(e) => {
                debug!("no metadata for {}: {e}", entry.path().display());
                None
            }
        })
        .max()
}

fn folder_created(path: &Path) -> Option<SystemTime> {
    let metadata = fs::metadata(path).ok()?;
    metadata.created().or_else(|_| metadata.modified()).ok()
}

#[cfg(test)]
mod tests {
    use std::{
        fs::File,
        time::{Duration, UNIX_EPOCH},
    };

    use filetime::{FileTime, set_file_mtime};
    use tempfile::TempDir;

    use super::*;

    fn touch(dir: &TempDir, name: &str, unix_secs: i64) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap();
        set_file_mtime(&path, FileTime::from_unix_time(unix_secs, 0)).unwrap();
        path
    }

    fn at(unix_secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(unix_secs)
    }

    #[test]
    fn deployed_marker_reports_its_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "app.war.deployed", 1_700_000_000);

        let report = StatusChecker::new(dir.path(), "app.war").check_status();

        assert_eq!(report.status, Status::Deployed);
        assert_eq!(report.color, "lightgreen");
        assert_eq!(report.changed_at, Some(at(1_700_000_000)));
        let time = format_time(at(1_700_000_000));
        assert_eq!(report.time.as_deref(), Some(time.as_str()));
        assert_eq!(report.message, format!("[DEPLOYED] since {time}"));
    }

    #[test]
    fn deployed_wins_over_deploying() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "app.war.isdeploying", 1_700_000_500);
        touch(&dir, "app.war.deployed", 1_700_000_000);

        let report = StatusChecker::new(dir.path(), "app.war").check_status();

        assert_eq!(report.status, Status::Deployed);
        assert_eq!(report.changed_at, Some(at(1_700_000_000)));
    }

    #[test]
    fn deploying_wins_over_failed() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "app.war.failed", 1_700_000_000);
        touch(&dir, "app.war.isdeploying", 1_700_000_100);

        let report = StatusChecker::new(dir.path(), "app.war").check_status();

        assert_eq!(report.status, Status::Deploying);
        assert_eq!(report.color, "yellow");
    }

    #[test]
    fn failed_marker_uses_white_text_on_red() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "app.war.failed", 1_700_000_000);

        let report = StatusChecker::new(dir.path(), "app.war").check_status();

        assert_eq!(report.status, Status::Failed);
        assert_eq!(report.color, "red");
        assert_eq!(report.text_color, "white");
    }

    #[test]
    fn newest_match_provides_the_time() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "a.war.deployed", 1_700_000_000);
        touch(&dir, "b.war.deployed", 1_700_009_000);
        touch(&dir, "c.war.deployed", 1_700_004_000);

        let report = StatusChecker::new(dir.path(), "*.war").check_status();

        assert_eq!(report.status, Status::Deployed);
        assert_eq!(report.changed_at, Some(at(1_700_009_000)));
    }

    #[test]
    fn filename_restricts_matches() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "other.war.deployed", 1_700_000_000);
        touch(&dir, "app.war.isdeploying", 1_700_000_000);

        let report = StatusChecker::new(dir.path(), "app.war").check_status();
        assert_eq!(report.status, Status::Deploying);

        let report = StatusChecker::new(dir.path(), "").check_status();
        assert_eq!(report.status, Status::Deployed);
    }

    #[test]
    fn no_markers_reports_down_with_folder_time() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "app.war", 1_700_000_000);

        let report = StatusChecker::new(dir.path(), "app.war").check_status();

        assert_eq!(report.status, Status::Down);
        assert_eq!(report.color, "pink");
        assert!(report.time.is_some());
        assert!(report.message.starts_with("[DOWN] since "));
    }

    #[test]
    fn missing_path_is_down_without_time() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let report = StatusChecker::new(&missing, "app.war").check_status();

        assert_eq!(report, StatusReport::down());
        assert_eq!(report.message, "[DOWN]");
    }

    #[test]
    fn file_path_is_down() {
        let dir = tempfile::tempdir().unwrap();
        let file = touch(&dir, "app.war.deployed", 1_700_000_000);

        let report = StatusChecker::new(&file, "app.war").check_status();

        assert_eq!(report.status, Status::Down);
        assert_eq!(report.time, None);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_folder_is_down_without_time() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        File::create(locked.join("app.war.deployed")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permissions don't apply to root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = StatusChecker::new(&locked, "app.war").check_status();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report, StatusReport::down());
    }

    #[test]
    fn marker_directories_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("app.war.deployed")).unwrap();

        let report = StatusChecker::new(dir.path(), "app.war").check_status();

        assert_eq!(report.status, Status::Down);
    }

    #[test]
    fn report_serializes_for_the_frontend() {
        let report = StatusReport::down();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "down");
        assert_eq!(json["textColor"], "black");
        assert_eq!(json["message"], "[DOWN]");
        assert!(json.get("changedAt").is_none());
    }
}
