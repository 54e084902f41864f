// crates/quicktrim-media/src/worker.rs
//
// MediaWorker: owns the playback decode thread and spawns export threads.
// All public API that quicktrim-ui calls lives here.
//
// Playback thread
//   Owns the single PlaybackSource. Receives PlaybackCmd over a bounded
//   channel and publishes frames into a latest-wins slot; the UI takes the
//   newest frame each tick and never waits on the decoder. While playing,
//   reads are paced at the stream frame rate; while paused the thread blocks
//   on the command channel. Every seek publishes exactly one frame at once.
//
// Export threads
//   One detached thread per job; results come back on `rx`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use quicktrim_core::error::TrimError;
use quicktrim_core::export::{EncoderSettings, ExportRequest};
use quicktrim_core::media_types::{MediaResult, PlaybackFrame};

use crate::decode::PlaybackSource;
use crate::export::{run_export, InFlight};

/// Commands for the playback thread.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackCmd {
    /// Close the current source (if any) and open `path` under load id `id`.
    Open       { id: Uuid, path: PathBuf },
    Seek       { serial: u64, time: f64 },
    SetPlaying(bool),
    Close,
}

type FrameSlot = Arc<Mutex<Option<PlaybackFrame>>>;

// ── MediaWorker ───────────────────────────────────────────────────────────────

pub struct MediaWorker {
    /// Open results and export results.
    pub rx:    Receiver<MediaResult>,
    tx:        Sender<MediaResult>,
    pb_tx:     Sender<PlaybackCmd>,
    frame:     FrameSlot,
    encoder:   EncoderSettings,
    in_flight: InFlight,
    shutdown:  Arc<AtomicBool>,
    playback:  Mutex<Option<JoinHandle<()>>>,
}

/// How long `shutdown` waits for the playback thread to release its source.
const SHUTDOWN_WAIT: Duration = Duration::from_secs(2);

impl MediaWorker {
    pub fn new(encoder: EncoderSettings, preview_width: u32, playing: bool) -> Self {
        let (tx, rx)          = bounded(64);
        let (pb_tx, pb_rx)    = bounded::<PlaybackCmd>(64);
        let frame: FrameSlot  = Arc::new(Mutex::new(None));
        let shutdown          = Arc::new(AtomicBool::new(false));

        // The source is created and dropped on the playback thread only.
        let cmd_rx    = pb_rx;
        let result_tx = tx.clone();
        let slot      = Arc::clone(&frame);
        let sd        = Arc::clone(&shutdown);
        let playback = thread::spawn(move || {
            let mut pb = PlaybackThread {
                cmd_rx,
                result_tx,
                slot,
                shutdown: sd,
                preview_width,
                playing,
                serial: 0,
                source: None,
            };
            pb.run();
        });

        Self {
            rx, tx, pb_tx, frame, encoder,
            in_flight: InFlight::default(),
            shutdown,
            playback:  Mutex::new(Some(playback)),
        }
    }

    pub fn encoder(&self) -> &EncoderSettings { &self.encoder }

    /// Queue a playback command. Blocks only if the playback thread has fallen
    /// a full channel behind; consecutive seeks are coalesced on its side.
    pub fn send(&self, cmd: PlaybackCmd) {
        if self.pb_tx.send(cmd).is_err() {
            warn!("[pb] playback thread is gone; command dropped");
        }
    }

    /// Newest published frame, if one arrived since the last call.
    pub fn take_frame(&self) -> Option<PlaybackFrame> {
        self.frame.lock().take()
    }

    /// Spawn a background thread running the external encoder for `req`.
    pub fn start_export(&self, req: ExportRequest) {
        let tx        = self.tx.clone();
        let settings  = self.encoder.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let sd        = Arc::clone(&self.shutdown);
        thread::spawn(move || {
            let job_id = req.job_id;
            if sd.load(Ordering::Relaxed) {
                return;
            }
            let msg = match run_export(&settings, &req, &in_flight) {
                Ok(output) => MediaResult::ExportDone   { job_id, output },
                Err(error) => MediaResult::ExportFailed { job_id, error },
            };
            let _ = tx.send(msg);
        });
    }

    /// Output paths with an export running right now.
    pub fn exports_in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// True until `shutdown` has joined the playback thread.
    pub fn playback_running(&self) -> bool {
        self.playback.lock().as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the playback thread and wait (bounded) for it to drop its source.
    /// Running exports are abandoned, leaving at most their `.part` file.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.pb_tx.send(PlaybackCmd::Close);

        let Some(handle) = self.playback.lock().take() else { return };
        let deadline = Instant::now() + SHUTDOWN_WAIT;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        if handle.is_finished() {
            if handle.join().is_err() {
                warn!("[pb] playback thread panicked");
            }
        } else {
            warn!("[pb] playback thread still busy after {SHUTDOWN_WAIT:?}; detaching");
        }
    }
}

// ── Playback thread ───────────────────────────────────────────────────────────

struct PlaybackThread {
    cmd_rx:        Receiver<PlaybackCmd>,
    result_tx:     Sender<MediaResult>,
    slot:          FrameSlot,
    shutdown:      Arc<AtomicBool>,
    preview_width: u32,
    playing:       bool,
    /// Serial of the last seek applied; stamped on every published frame.
    serial:        u64,
    source:        Option<(Uuid, PlaybackSource)>,
}

impl PlaybackThread {
    fn run(&mut self) {
        let mut next_due = Instant::now();
        loop {
            // Block while there is nothing to play; otherwise wait until the
            // next frame is due, waking early for commands.
            let first = if self.playing && self.source.is_some() {
                let wait = next_due.saturating_duration_since(Instant::now());
                match self.cmd_rx.recv_timeout(wait) {
                    Ok(cmd)                             => Some(cmd),
                    Err(RecvTimeoutError::Timeout)      => None,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            } else {
                match self.cmd_rx.recv() {
                    Ok(cmd) => Some(cmd),
                    Err(_)  => return,
                }
            };

            if let Some(first) = first {
                let cmds: Vec<PlaybackCmd> =
                    std::iter::once(first).chain(self.cmd_rx.try_iter()).collect();
                for cmd in coalesce_seeks(cmds) {
                    self.handle(cmd);
                }
                if self.shutdown.load(Ordering::Relaxed) {
                    self.source = None;
                    debug!("[pb] playback thread exiting");
                    return;
                }
                // Commands never push an already-scheduled frame back.
                let now = Instant::now();
                if next_due < now {
                    next_due = now + self.frame_interval();
                }
                continue;
            }

            self.publish_next();
            let now = Instant::now();
            next_due += self.frame_interval();
            // Decode fell behind: resync instead of bursting to catch up.
            if next_due < now {
                next_due = now;
            }
        }
    }

    fn frame_interval(&self) -> Duration {
        let fps = self.source.as_ref().map(|(_, s)| s.frame_rate()).unwrap_or(25.0);
        Duration::from_secs_f64(1.0 / fps.clamp(1.0, 240.0))
    }

    fn handle(&mut self, cmd: PlaybackCmd) {
        match cmd {
            PlaybackCmd::Open { id, path } => {
                // Close first: two decoders are never alive at once.
                self.source = None;
                self.slot.lock().take();
                match PlaybackSource::open(&path, self.preview_width) {
                    Ok(source) => {
                        let info = source.info();
                        self.source = Some((id, source));
                        let _ = self.result_tx.send(MediaResult::Opened { id, path, info });
                        // Always show the first frame, even when paused.
                        self.publish_next();
                    }
                    Err(error) => {
                        warn!("[pb] open: {error}");
                        let _ = self.result_tx.send(MediaResult::OpenFailed { id, error });
                    }
                }
            }
            PlaybackCmd::Seek { serial, time } => {
                self.serial = serial;
                if let Some((_, source)) = &mut self.source {
                    if let Err(e) = source.seek(time) {
                        warn!("[pb] seek to {time:.3}s: {e}");
                    }
                    self.publish_next();
                }
            }
            PlaybackCmd::SetPlaying(playing) => {
                debug!("[pb] playing = {playing}");
                self.playing = playing;
            }
            PlaybackCmd::Close => {
                if let Some((id, _)) = self.source.take() {
                    info!("[pb] closed {id}");
                }
                self.slot.lock().take();
            }
        }
    }

    /// Decode one frame and replace whatever is in the slot.
    fn publish_next(&mut self) {
        let Some((id, source)) = &mut self.source else { return };
        let id = *id;
        match source.read_next_frame() {
            Ok(frame) => {
                *self.slot.lock() = Some(PlaybackFrame {
                    id,
                    serial:    self.serial,
                    timestamp: frame.timestamp,
                    width:     frame.width,
                    height:    frame.height,
                    data:      frame.data,
                });
            }
            Err(error) => {
                // The file stopped decoding mid-way. Drop it rather than spin.
                warn!("[pb] read: {error}");
                self.source = None;
                let error = match error {
                    e @ TrimError::UnreadableMedia { .. } => e,
                    other => TrimError::UnreadableMedia {
                        path:   PathBuf::new(),
                        reason: other.to_string(),
                    },
                };
                let _ = self.result_tx.send(MediaResult::OpenFailed { id, error });
            }
        }
    }
}

/// Collapse runs of consecutive seeks to the last one. Other commands keep
/// their order relative to the seeks around them.
fn coalesce_seeks(cmds: Vec<PlaybackCmd>) -> Vec<PlaybackCmd> {
    let mut out: Vec<PlaybackCmd> = Vec::with_capacity(cmds.len());
    for cmd in cmds {
        if matches!(cmd, PlaybackCmd::Seek { .. })
            && matches!(out.last(), Some(PlaybackCmd::Seek { .. }))
        {
            out.pop();
        }
        out.push(cmd);
    }
    out
}
