// crates/quicktrim-core/src/error.rs
//
// Every failure the trimmer can report. All of them are recovered at the
// operation boundary and surfaced on the status bar; none is allowed to take
// the render loop down.

use std::path::PathBuf;
use thiserror::Error;

/// How loudly the status bar should report an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Error)]
pub enum TrimError {
    #[error("Cannot read media file {path}: {reason}")]
    UnreadableMedia { path: PathBuf, reason: String },

    #[error("Invalid trim range: start {start:.3}s must be before end {end:.3}s")]
    InvalidRange { start: f64, end: f64 },

    #[error("No output directory selected")]
    NoOutputDirectory,

    #[error("No save directory selected")]
    NoSaveDirectory,

    #[error("Encoder '{name}' was not found")]
    EncoderNotFound { name: String },

    #[error("Encoder exited with {status}: {diagnostic}")]
    EncodeFailed { status: String, diagnostic: String },

    #[error("{0}")]
    PreconditionNotMet(&'static str),

    #[error("An export to {0} is already running")]
    ExportInProgress(PathBuf),

    #[error("No video files found in {0}")]
    EmptyPlaylist(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrimError {
    pub fn severity(&self) -> Severity {
        match self {
            TrimError::PreconditionNotMet(_) | TrimError::EmptyPlaylist(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// What the user can do about it, when there is something to do.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TrimError::InvalidRange { .. } => {
                Some("Make sure to set both start and end times correctly.")
            }
            TrimError::NoOutputDirectory | TrimError::NoSaveDirectory => {
                Some("Use \"Select Save Folder\" to choose where trimmed clips go.")
            }
            TrimError::EncoderNotFound { .. } => {
                Some("Please make sure FFmpeg is installed and added to the system PATH, or pass --encoder.")
            }
            TrimError::UnreadableMedia { .. } => Some("The file was skipped."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_is_a_warning() {
        let err = TrimError::PreconditionNotMet("Please set start time first.");
        assert_eq!(err.severity(), Severity::Warning);
        assert_eq!(err.to_string(), "Please set start time first.");
    }

    #[test]
    fn invalid_range_mentions_both_ends() {
        let err = TrimError::InvalidRange { start: 2.0, end: 2.0 };
        let msg = err.to_string();
        assert!(msg.contains("2.000s"));
        assert_eq!(err.severity(), Severity::Error);
        assert!(err.hint().is_some());
    }

    #[test]
    fn encoder_not_found_has_remediation_hint() {
        let err = TrimError::EncoderNotFound { name: "ffmpeg".into() };
        assert!(err.to_string().contains("ffmpeg"));
        assert!(err.hint().unwrap_or_default().contains("PATH"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = TrimError::from(io);
        assert!(err.to_string().contains("read-only"));
    }
}
