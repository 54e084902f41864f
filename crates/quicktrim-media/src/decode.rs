// crates/quicktrim-media/src/decode.rs
//
// PlaybackSource: the single open media file the decode thread plays from.
//
// Stateful and sequential: `read_next_frame` keeps pulling packets from the
// same demuxer, and seeks reposition it instead of re-opening per frame. At
// end of stream the source rewinds to 0 and keeps going, so playback loops.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use tracing::{debug, info};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};
use ffmpeg::util::frame::video::Video;

use quicktrim_core::error::TrimError;
use quicktrim_core::media_types::MediaInfo;

use crate::helpers::frame::{packed_rgba, preview_size};
use crate::helpers::seek::seek_to_secs;
use crate::probe::{duration_secs, frame_rate};

/// Default upper bound on decoded frame width.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 1280;

/// One decoded, scaled frame.
#[derive(Clone, Debug)]
pub struct VideoFrame {
    pub timestamp: f64,
    pub width:     u32,
    pub height:    u32,
    pub data:      Vec<u8>, // RGBA, tightly packed
}

// ── Open decoder state ────────────────────────────────────────────────────────

struct Decoder {
    ictx:       ffmpeg::format::context::Input,
    decoder:    ffmpeg::decoder::video::Video,
    scaler:     SwsContext,
    video_idx:  usize,
    tb:         f64,
    start_pts:  i64,
    last_pts:   i64,
    out_w:      u32,
    out_h:      u32,
    /// Decoded frames before this time are discarded without scaling.
    skip_until: Option<f64>,
    eof_sent:   bool,
}

impl Decoder {
    fn open(path: &Path, preview_width: u32) -> Result<(Self, MediaInfo)> {
        let ictx = input(path).context("open failed")?;
        let (video_idx, tb, start_pts, rate, decoder) = {
            let stream = ictx.streams().best(Type::Video)
                .ok_or_else(|| anyhow!("no video stream"))?;
            let start_pts = match stream.start_time() {
                ts if ts == ffmpeg::ffi::AV_NOPTS_VALUE => 0,
                ts => ts,
            };
            let rate = frame_rate(&stream).ok_or_else(|| anyhow!("non-positive frame rate"))?;
            let dec_ctx = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
                .context("no decodable codec")?;
            let decoder = dec_ctx.decoder().video().context("no decodable codec")?;
            (stream.index(), f64::from(stream.time_base()), start_pts, rate, decoder)
        };
        let duration = duration_secs(&ictx).ok_or_else(|| anyhow!("non-positive duration"))?;

        let (out_w, out_h) = preview_size(decoder.width(), decoder.height(), preview_width);
        let scaler = SwsContext::get(
            decoder.format(), decoder.width(), decoder.height(),
            Pixel::RGBA, out_w, out_h, Flags::BILINEAR,
        ).context("scaler")?;

        let info = MediaInfo { duration, frame_rate: rate, width: out_w, height: out_h };
        Ok((
            Self {
                ictx, decoder, scaler, video_idx, tb, start_pts,
                last_pts: start_pts, out_w, out_h, skip_until: None, eof_sent: false,
            },
            info,
        ))
    }

    fn pts_to_secs(&self, pts: i64) -> f64 {
        ((pts - self.start_pts) as f64 * self.tb).max(0.0)
    }

    /// Next decoded (unscaled) frame, or `None` once the decoder is fully drained.
    fn decode_next(&mut self) -> Option<Video> {
        let mut decoded = Video::empty();
        loop {
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                return Some(decoded);
            }
            if self.eof_sent {
                return None;
            }
            let mut fed = false;
            for (stream, packet) in self.ictx.packets().flatten() {
                if stream.index() != self.video_idx { continue; }
                if self.decoder.send_packet(&packet).is_err() { continue; }
                fed = true;
                break;
            }
            if !fed {
                // Demuxer exhausted: flush the frames the decoder still holds.
                let _ = self.decoder.send_eof();
                self.eof_sent = true;
            }
        }
    }

    /// Next frame at or past `skip_until`, scaled to RGBA. `None` at end of stream.
    ///
    /// A seek target past the last frame lands on the last frame instead of
    /// draining into a rewind.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        // Last frame dropped by the skip filter, in case we hit EOF before the target.
        let mut last_good: Option<(Video, f64)> = None;
        while let Some(decoded) = self.decode_next() {
            let pts = decoded.pts().unwrap_or(self.last_pts + 1);
            self.last_pts = pts;
            let ts = self.pts_to_secs(pts);

            if let Some(target) = self.skip_until {
                if ts + 1e-3 < target {
                    last_good = Some((decoded, ts));
                    continue;
                }
                self.skip_until = None;
            }
            return self.scale(&decoded, ts).map(Some);
        }
        self.skip_until = None;
        match last_good {
            Some((decoded, ts)) => self.scale(&decoded, ts).map(Some),
            None => Ok(None),
        }
    }

    fn scale(&mut self, decoded: &Video, ts: f64) -> Result<VideoFrame> {
        let mut out = Video::empty();
        self.scaler.run(decoded, &mut out).context("scale")?;
        Ok(VideoFrame {
            timestamp: ts,
            width:     self.out_w,
            height:    self.out_h,
            data:      packed_rgba(&out, self.out_w, self.out_h),
        })
    }
}

// ── PlaybackSource ────────────────────────────────────────────────────────────

pub struct PlaybackSource {
    path:          PathBuf,
    preview_width: u32,
    info:          MediaInfo,
    position:      f64,
    /// `None` once closed.
    inner:         Option<Decoder>,
}

impl PlaybackSource {
    /// Open `path` for playback. Frames are scaled to at most `preview_width` wide.
    pub fn open(path: &Path, preview_width: u32) -> Result<Self, TrimError> {
        let (inner, info) = Decoder::open(path, preview_width).map_err(|e| {
            TrimError::UnreadableMedia { path: path.to_path_buf(), reason: format!("{e:#}") }
        })?;
        info!(
            "[media] opened {} ({:.2}s, {:.2} fps, preview {}x{})",
            path.display(), info.duration, info.frame_rate, info.width, info.height,
        );
        Ok(Self {
            path: path.to_path_buf(),
            preview_width,
            info,
            position: 0.0,
            inner: Some(inner),
        })
    }

    pub fn path(&self) -> &Path { &self.path }
    pub fn info(&self) -> MediaInfo { self.info }
    pub fn duration(&self) -> f64 { self.info.duration }
    pub fn frame_rate(&self) -> f64 { self.info.frame_rate }
    pub fn is_open(&self) -> bool { self.inner.is_some() }

    /// Presentation time of the last frame returned, or the last seek target.
    pub fn position(&self) -> f64 { self.position }

    /// Next frame in presentation order. At end of stream the source rewinds to
    /// 0 and the first frame of the file is returned instead.
    pub fn read_next_frame(&mut self) -> Result<VideoFrame, TrimError> {
        let frame = match self.read_raw()? {
            Some(frame) => frame,
            None => {
                debug!("[media] end of stream, looping {}", self.path.display());
                self.rewind()?;
                self.read_raw()?.ok_or_else(|| self.unreadable("no decodable frames"))?
            }
        };
        self.position = frame.timestamp;
        Ok(frame)
    }

    /// Best-effort seek. The demuxer lands on the keyframe before `time` and
    /// frames before `time` are dropped by the next `read_next_frame`.
    pub fn seek(&mut self, time: f64) -> Result<(), TrimError> {
        let target = time.clamp(0.0, self.info.duration);
        let inner  = self.inner.as_mut().ok_or(TrimError::PreconditionNotMet("No video loaded."))?;

        if seek_to_secs(&mut inner.ictx, target, "playback") {
            inner.decoder.flush();
            inner.eof_sent = false;
        } else {
            // Either a seek to 0 or the demuxer refused: start over and decode forward.
            self.rewind()?;
        }
        if let Some(inner) = self.inner.as_mut() {
            inner.skip_until = Some(target);
        }
        self.position = target;
        Ok(())
    }

    /// Release the decoder. Idempotent; later reads report `PreconditionNotMet`.
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            debug!("[media] closed {}", self.path.display());
        }
    }

    fn read_raw(&mut self) -> Result<Option<VideoFrame>, TrimError> {
        let inner = self.inner.as_mut().ok_or(TrimError::PreconditionNotMet("No video loaded."))?;
        inner.next_frame().map_err(|e| TrimError::UnreadableMedia {
            path:   self.path.clone(),
            reason: format!("{e:#}"),
        })
    }

    /// Re-open from the start. Avoids seeking to ts 0, which some demuxers reject.
    fn rewind(&mut self) -> Result<(), TrimError> {
        if self.inner.is_none() {
            return Err(TrimError::PreconditionNotMet("No video loaded."));
        }
        let (inner, _) = Decoder::open(&self.path, self.preview_width)
            .map_err(|e| self.unreadable(&format!("{e:#}")))?;
        self.inner    = Some(inner);
        self.position = 0.0;
        Ok(())
    }

    fn unreadable(&self, reason: &str) -> TrimError {
        TrimError::UnreadableMedia { path: self.path.clone(), reason: reason.to_string() }
    }
}

impl Drop for PlaybackSource {
    fn drop(&mut self) {
        self.close();
    }
}
