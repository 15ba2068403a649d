use std::{
    env, fs,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use crate::DESKTOP_LOG_FILE;

pub(crate) fn resolve_desktop_log_path(root_dir: Option<&Path>, file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => root.join("logs").join(file_name),
        None => env::temp_dir().join("framescope").join(file_name),
    }
}

fn format_log_line(prefix: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        prefix,
        message
    )
}

fn append_log(prefix: &str, message: &str) {
    let root_dir = crate::runtime_paths::default_root_dir();
    let log_path = resolve_desktop_log_path(root_dir.as_deref(), DESKTOP_LOG_FILE);
    if let Some(parent_dir) = log_path.parent() {
        let _ = fs::create_dir_all(parent_dir);
    }

    // Logging must never take the app down; failures here are dropped.
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = file.write_all(format_log_line(prefix, message).as_bytes());
    }
}

pub(crate) fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub(crate) fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub(crate) fn append_ingest_log(message: &str) {
    append_log("ingest", message);
}
