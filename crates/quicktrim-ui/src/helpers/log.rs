// crates/quicktrim-ui/src/helpers/log.rs
//
// Logging setup for the binary.
//
// Release builds on Windows run with `windows_subsystem = "windows"`, so there
// is no console and stderr goes nowhere. Every event is therefore written
// twice: to stderr, and appended to %TEMP%\quicktrim.log (or $TMPDIR).
//
// Filter comes from RUST_LOG, defaulting to `info`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("quicktrim.log")
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // A log file that cannot be opened only costs the file copy.
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
        .ok()
        .map(|f| fmt::layer().with_writer(Mutex::new(f)).with_ansi(false).with_target(false));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init();
}
