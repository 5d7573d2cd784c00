use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing::Level;

/// Initialize the global tracing subscriber.
///
/// The terminal owns stdout and stderr while the desktop runs, so log
/// lines go to a file next to the state file. If the file can't be
/// opened, logging falls back to stderr (useful when piping). Safe to
/// call more than once; later calls are no-ops.
pub fn init(log_path: &Path, verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .with_target(false)
                .with_thread_names(false)
                .try_init();
        }
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_names(false)
                .try_init();
        }
    }
}
