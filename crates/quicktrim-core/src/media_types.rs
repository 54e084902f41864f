// crates/quicktrim-core/src/media_types.rs
//
// Types that flow across the channels between quicktrim-media and quicktrim-ui.
// No egui, no ffmpeg — just plain data.

use std::path::PathBuf;
use uuid::Uuid;

use crate::error::TrimError;

/// Stream properties fixed at open time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaInfo {
    pub duration:   f64,
    pub frame_rate: f64,
    /// Size of the frames the decoder will deliver (after preview scaling).
    pub width:      u32,
    pub height:     u32,
}

/// A decoded frame published by the playback thread.
pub struct PlaybackFrame {
    /// Load id the frame belongs to; frames from a previous file are dropped.
    pub id:        Uuid,
    /// Serial of the last seek the decoder had applied when it produced this
    /// frame. Frames older than the UI's latest seek are dropped.
    pub serial:    u64,
    pub timestamp: f64,
    pub width:     u32,
    pub height:    u32,
    pub data:      Vec<u8>, // RGBA
}

/// Results sent from the MediaWorker background threads to the UI.
#[derive(Debug)]
pub enum MediaResult {
    Opened       { id: Uuid, path: PathBuf, info: MediaInfo },
    OpenFailed   { id: Uuid, error: TrimError },
    ExportDone   { job_id: Uuid, output: PathBuf },
    ExportFailed { job_id: Uuid, error: TrimError },
}
