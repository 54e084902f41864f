// crates/quicktrim-media/src/helpers/seek.rs
//
// Seek helper wrapping avformat seek with a consistent soft-fail.
//
// On Windows `avformat_seek_file` returns EPERM for max_ts=0 on a freshly
// opened context and on some containers without random access. Every seek
// routes through here; what to do on failure is the caller's decision.

use ffmpeg_the_third as ffmpeg;
use tracing::warn;

/// Seek `ictx` to the keyframe at or before `target_secs`.
///
/// Returns `false` when the demuxer refused; it keeps reading from wherever
/// it was. Targets at or before 0 are not sent to the demuxer at all and
/// report `false` so the caller re-opens instead.
///
/// Backward (`..=ts`) so the landing keyframe is never after the target; the
/// pre-roll frames are dropped by the caller's timestamp filter.
pub fn seek_to_secs(
    ictx:        &mut ffmpeg::format::context::Input,
    target_secs: f64,
    label:       &str,
) -> bool {
    if target_secs <= 0.0 {
        return false;
    }

    let seek_ts = (target_secs * ffmpeg::ffi::AV_TIME_BASE as f64) as i64;
    match ictx.seek(seek_ts, ..=seek_ts) {
        Ok(()) => true,
        Err(e) => {
            warn!("[seek] soft-fail in {label} at {target_secs:.3}s: {e}");
            false
        }
    }
}
