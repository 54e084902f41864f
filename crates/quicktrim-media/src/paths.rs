// crates/quicktrim-media/src/paths.rs
// Where QuickTrim looks for a bundled encoder when none is on PATH.

use std::path::PathBuf;

/// `%APPDATA%\QuickTrim\ffmpeg` on Windows, `~/.local/share/QuickTrim/ffmpeg` elsewhere.
pub fn app_encoder_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let base = std::env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir());
    #[cfg(not(target_os = "windows"))]
    let base = std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share"))
        .unwrap_or_else(|_| std::env::temp_dir());
    base.join("QuickTrim").join("ffmpeg")
}
