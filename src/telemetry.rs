//! Logging setup.
//!
//! The terminal belongs to the TUI, so logs go to a file. `DRILLBOOK_LOG`
//! takes `EnvFilter` directives (e.g. "debug" or "info,drillbook::session=trace").

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "DRILLBOOK_LOG";
const DEFAULT_FILTER: &str = "info,drillbook=debug";

pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drillbook")
        .join("drillbook.log")
}

/// Install the global subscriber writing to `path`. If the file cannot be
/// opened, logging stays off and the app runs anyway.
pub fn init(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok()
}
