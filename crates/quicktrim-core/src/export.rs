// crates/quicktrim-core/src/export.rs
//
// Pure half of the export path: request description, output naming and the
// encoder argument list. Process spawning, encoder discovery and the
// temp-file → final-file rename live in quicktrim-media::export.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::TrimError;
use crate::helpers::time::format_hms;

/// Fixed output file name used when a single file was opened.
pub const SINGLE_FILE_OUTPUT_NAME: &str = "trimmed_video.mp4";
/// Suffix added to the source stem when trimming from a folder playlist.
pub const BATCH_SUFFIX: &str = "_trimmed";
/// Output container extension (and the `-f` muxer name).
pub const OUTPUT_CONTAINER: &str = "mp4";
/// Shortest range the encoder can be asked for. `-t` takes whole seconds, so
/// anything shorter would encode an empty clip.
pub const MIN_EXPORT_SECS: f64 = 1.0;

/// How the current playlist was opened. Decides the output file name and
/// which "no destination" error is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    SingleFile,
    Batch,
}

/// Which external encoder to run and with what codecs.
#[derive(Clone, Debug, PartialEq)]
pub struct EncoderSettings {
    /// Explicit binary path. When `None` the encoder is looked up by `name`.
    pub binary:      Option<PathBuf>,
    pub name:        String,
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            binary:      None,
            name:        "ffmpeg".into(),
            video_codec: "libx264".into(),
            audio_codec: "aac".into(),
        }
    }
}

/// Everything needed to run one export.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportRequest {
    pub job_id:  Uuid,
    pub source:  PathBuf,
    pub start:   f64,
    pub end:     f64,
    pub out_dir: Option<PathBuf>,
    pub mode:    OutputMode,
}

impl ExportRequest {
    /// Range check first, then destination: the order the user sees errors in.
    pub fn validate(&self) -> Result<PathBuf, TrimError> {
        if self.start.partial_cmp(&self.end) != Some(std::cmp::Ordering::Less) {
            return Err(TrimError::InvalidRange { start: self.start, end: self.end });
        }
        if self.end - self.start < MIN_EXPORT_SECS {
            tracing::warn!(
                "[export] range {:.3}s – {:.3}s is shorter than {MIN_EXPORT_SECS}s",
                self.start, self.end,
            );
            return Err(TrimError::InvalidRange { start: self.start, end: self.end });
        }
        let Some(dir) = &self.out_dir else {
            return Err(self.no_directory_error());
        };
        Ok(output_path(self.mode, dir, &self.source))
    }

    /// The "nowhere to save" error for this request's mode.
    pub fn no_directory_error(&self) -> TrimError {
        match self.mode {
            OutputMode::SingleFile => TrimError::NoOutputDirectory,
            OutputMode::Batch      => TrimError::NoSaveDirectory,
        }
    }
}

/// `<dir>/<stem>_trimmed.mp4` in batch mode, `<dir>/trimmed_video.mp4` otherwise.
pub fn output_path(mode: OutputMode, dir: &Path, source: &Path) -> PathBuf {
    match mode {
        OutputMode::SingleFile => dir.join(SINGLE_FILE_OUTPUT_NAME),
        OutputMode::Batch => {
            let stem = source.file_stem().unwrap_or_default().to_string_lossy();
            dir.join(format!("{stem}{BATCH_SUFFIX}.{OUTPUT_CONTAINER}"))
        }
    }
}

/// Hidden sibling the encoder writes into; renamed over `output` on success.
pub fn partial_path(output: &Path) -> PathBuf {
    let name = output.file_name().unwrap_or_default().to_string_lossy();
    output.with_file_name(format!(".{name}.part"))
}

/// Encoder argument list (without the binary itself).
///
/// `-y` only ever overwrites the partial file; the final path is replaced by
/// rename. `-f` is required because the partial file's extension is not one
/// the muxer can guess from.
pub fn encoder_args(
    settings: &EncoderSettings,
    source:   &Path,
    start:    f64,
    end:      f64,
    target:   &Path,
) -> Vec<String> {
    vec![
        "-hide_banner".into(),
        "-y".into(),
        "-i".into(),
        source.to_string_lossy().into_owned(),
        "-ss".into(),
        format_hms(start),
        "-t".into(),
        format_hms(end - start),
        "-c:v".into(),
        settings.video_codec.clone(),
        "-c:a".into(),
        settings.audio_codec.clone(),
        "-strict".into(),
        "experimental".into(),
        "-f".into(),
        OUTPUT_CONTAINER.into(),
        target.to_string_lossy().into_owned(),
    ]
}
