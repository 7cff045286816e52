//! Where the demo keeps its log.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Log file name, inside the cache dir or the working directory.
pub const LOG_FILE_NAME: &str = "select-menu-demo.log";

/// The per-user cache directory: `~/.cache/select-menu-demo` on Linux,
/// `~/Library/Caches/dev.termdom.select-menu-demo` on macOS.
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "termdom", "select-menu-demo")
        .map(|dirs| dirs.cache_dir().to_path_buf())
}

/// The log file in the cache dir, created on demand, or one in the working
/// directory when the cache dir is unknown or cannot be created.
pub fn log_file() -> PathBuf {
    cache_dir()
        .filter(|dir| match fs::create_dir_all(dir) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("cannot create {}: {err}", dir.display());
                false
            }
        })
        .map(|dir| dir.join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}
