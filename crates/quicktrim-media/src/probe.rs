// crates/quicktrim-media/src/probe.rs
//
// In-process FFmpeg probing: duration and frame rate.

use std::path::Path;

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::input;
use ffmpeg::media::Type;
use tracing::debug;

use quicktrim_core::error::TrimError;

/// Container duration in seconds, falling back to the best stream's own
/// duration when the container does not report one.
pub fn duration_secs(ctx: &ffmpeg::format::context::Input) -> Option<f64> {
    let dur = ctx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
    if dur.is_finite() && dur > 0.0 {
        return Some(dur);
    }
    let stream = ctx.streams().best(Type::Video)
        .or_else(|| ctx.streams().best(Type::Audio))?;
    let d = stream.duration() as f64 * f64::from(stream.time_base());
    (d.is_finite() && d > 0.0).then_some(d)
}

/// Average frame rate of `stream`, or its base rate when the average is unset.
pub fn frame_rate(stream: &ffmpeg::format::stream::Stream) -> Option<f64> {
    [stream.avg_frame_rate(), stream.rate()]
        .into_iter()
        .map(f64::from)
        .find(|r| r.is_finite() && *r > 0.0)
}

/// Open `path` just long enough to read its duration.
pub fn probe_duration(path: &Path) -> Result<f64, TrimError> {
    let ctx = input(path).map_err(|e| TrimError::UnreadableMedia {
        path:   path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let dur = duration_secs(&ctx).ok_or_else(|| TrimError::UnreadableMedia {
        path:   path.to_path_buf(),
        reason: "duration unknown".into(),
    })?;
    debug!("[media] duration {dur:.2}s ← {}", path.display());
    Ok(dur)
}
