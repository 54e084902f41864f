// crates/quicktrim-core/src/session.rs
//
// Session: the single state-update step.
//
// Owns the TrimState, the playlist cursor and the play/pause flag. Every
// TrimCommand goes through `apply`, which mutates that state and returns the
// side effects the UI must carry out (talk to the decode worker, start an
// export, close the window). Results coming back from the worker are fed in
// through the `on_*` methods. Nothing in here blocks or does media I/O, so
// the whole interaction model is testable without a window or a decoder.

use std::path::{Path, PathBuf};

use tracing::{info, warn, error};
use uuid::Uuid;

use crate::commands::TrimCommand;
use crate::error::{Severity, TrimError};
use crate::export::{ExportRequest, OutputMode};
use crate::helpers::time::format_hms;
use crate::media_types::MediaInfo;
use crate::overlay::PlaylistPosition;
use crate::playlist::{scan_folder, PlaylistCursor};
use crate::trim::TrimState;

/// Side effects produced by `Session::apply`, executed by the UI.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Close the current source and open `path` under load id `id`.
    Load { id: Uuid, path: PathBuf },
    Seek { serial: u64, time: f64 },
    SetPlaying(bool),
    Export(ExportRequest),
    Quit,
}

/// Last message for the status bar.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusLine {
    pub severity: Option<Severity>,
    pub text:     String,
}

#[derive(Debug)]
pub struct Session {
    trim:        TrimState,
    playlist:    PlaylistCursor,
    mode:        OutputMode,
    save_dir:    Option<PathBuf>,
    playing:     bool,
    /// Load id of the source currently open (or opening) in the worker.
    media_id:    Option<Uuid>,
    /// Set once the worker confirms the open; seeks and exports wait for it.
    loaded:      bool,
    seek_serial: u64,
    status:      Option<StatusLine>,
    quit:        bool,
}

impl Session {
    pub fn new(playing: bool) -> Self {
        Self {
            trim:        TrimState::default(),
            playlist:    PlaylistCursor::default(),
            mode:        OutputMode::default(),
            save_dir:    None,
            playing,
            media_id:    None,
            loaded:      false,
            seek_serial: 0,
            status:      None,
            quit:        false,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────────

    pub fn trim(&self) -> &TrimState { &self.trim }
    pub fn playlist(&self) -> &PlaylistCursor { &self.playlist }
    pub fn mode(&self) -> OutputMode { self.mode }
    pub fn save_dir(&self) -> Option<&Path> { self.save_dir.as_deref() }
    pub fn is_playing(&self) -> bool { self.playing }
    pub fn is_loaded(&self) -> bool { self.loaded }
    pub fn media_id(&self) -> Option<Uuid> { self.media_id }
    pub fn seek_serial(&self) -> u64 { self.seek_serial }
    pub fn status(&self) -> Option<&StatusLine> { self.status.as_ref() }
    pub fn should_quit(&self) -> bool { self.quit }

    /// Playlist position for the overlay header, in batch mode only.
    pub fn playlist_position(&self) -> Option<PlaylistPosition<'_>> {
        if self.mode != OutputMode::Batch {
            return None;
        }
        let name = self.playlist.current()?.file_name()?.to_str()?;
        Some(PlaylistPosition { index: self.playlist.index(), len: self.playlist.len(), name })
    }

    // ── Status reporting ─────────────────────────────────────────────────────

    pub fn report(&mut self, err: &TrimError) {
        let text = match err.hint() {
            Some(hint) => format!("{err}. {hint}"),
            None       => err.to_string(),
        };
        match err.severity() {
            Severity::Warning => warn!("[app] {text}"),
            Severity::Error   => error!("[app] {text}"),
        }
        self.status = Some(StatusLine { severity: Some(err.severity()), text });
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("[app] {text}");
        self.status = Some(StatusLine { severity: None, text });
    }

    // ── Command dispatch ─────────────────────────────────────────────────────

    pub fn apply(&mut self, cmd: TrimCommand) -> Vec<Effect> {
        match cmd {
            // ── Trim range ───────────────────────────────────────────────────
            TrimCommand::MarkStart => {
                if self.require_loaded() {
                    let t = self.trim.mark_start();
                    self.notify(format!("Start time set to: {}", format_hms(t)));
                }
                Vec::new()
            }
            TrimCommand::MarkEnd => {
                if self.require_loaded() {
                    match self.trim.mark_end() {
                        Ok(t)    => self.notify(format!("End time set to: {}", format_hms(t))),
                        Err(err) => self.report(&err),
                    }
                }
                Vec::new()
            }
            TrimCommand::Export => {
                if !self.require_loaded() {
                    return Vec::new();
                }
                let Some(source) = self.playlist.current().map(Path::to_path_buf) else {
                    return Vec::new();
                };
                vec![Effect::Export(ExportRequest {
                    job_id:  Uuid::new_v4(),
                    source,
                    start:   self.trim.start_time(),
                    end:     self.trim.end_time(),
                    out_dir: self.save_dir.clone(),
                    mode:    self.mode,
                })]
            }

            // ── Playback ─────────────────────────────────────────────────────
            TrimCommand::Seek(t) => {
                if !self.loaded {
                    return Vec::new();
                }
                self.trim.set_current_time(t);
                self.seek_serial += 1;
                vec![Effect::Seek { serial: self.seek_serial, time: self.trim.current_time() }]
            }
            TrimCommand::TogglePause => {
                self.playing = !self.playing;
                vec![Effect::SetPlaying(self.playing)]
            }

            // ── Playlist ─────────────────────────────────────────────────────
            TrimCommand::NextItem => {
                match self.playlist.next().map(Path::to_path_buf) {
                    Some(path) => vec![self.load(path)],
                    None => {
                        self.report(&TrimError::PreconditionNotMet("No videos loaded."));
                        Vec::new()
                    }
                }
            }
            TrimCommand::PreviousItem => {
                match self.playlist.previous().map(Path::to_path_buf) {
                    Some(path) => vec![self.load(path)],
                    None => {
                        self.report(&TrimError::PreconditionNotMet("No videos loaded."));
                        Vec::new()
                    }
                }
            }
            TrimCommand::SelectItem(index) => {
                match self.playlist.select(index).map(Path::to_path_buf) {
                    Some(path) => vec![self.load(path)],
                    None       => Vec::new(),
                }
            }
            TrimCommand::LoadFolder(dir) => match scan_folder(&dir) {
                Ok(files) => {
                    self.notify(format!("Found {} videos in {}", files.len(), dir.display()));
                    self.playlist = PlaylistCursor::new(files);
                    self.mode     = OutputMode::Batch;
                    match self.playlist.current().map(Path::to_path_buf) {
                        Some(path) => vec![self.load(path)],
                        None       => Vec::new(),
                    }
                }
                Err(err) => {
                    self.report(&err);
                    Vec::new()
                }
            },
            TrimCommand::OpenFile(path) => {
                self.playlist = PlaylistCursor::new(vec![path.clone()]);
                self.mode     = OutputMode::SingleFile;
                vec![self.load(path)]
            }
            TrimCommand::SetSaveDir(dir) => {
                self.notify(format!("Save folder set to: {}", dir.display()));
                self.save_dir = Some(dir);
                Vec::new()
            }

            // ── App ──────────────────────────────────────────────────────────
            TrimCommand::Quit => {
                self.quit = true;
                vec![Effect::Quit]
            }
        }
    }

    fn require_loaded(&mut self) -> bool {
        if !self.loaded {
            self.report(&TrimError::PreconditionNotMet("No video loaded."));
        }
        self.loaded
    }

    fn load(&mut self, path: PathBuf) -> Effect {
        let id = Uuid::new_v4();
        self.media_id = Some(id);
        self.loaded   = false;
        self.trim.reset(0.0);
        Effect::Load { id, path }
    }

    // ── Worker results ───────────────────────────────────────────────────────

    /// The worker opened a source. Stale ids (a newer load is pending) are ignored.
    pub fn on_opened(&mut self, id: Uuid, info: &MediaInfo) {
        if self.media_id != Some(id) {
            return;
        }
        self.trim.reset(info.duration);
        self.loaded = true;
        let name = self.playlist.current_name().unwrap_or_default();
        self.notify(format!(
            "Loaded {name} ({}, {:.2} fps)",
            format_hms(info.duration),
            info.frame_rate,
        ));
    }

    pub fn on_open_failed(&mut self, id: Uuid, err: &TrimError) {
        if self.media_id != Some(id) {
            return;
        }
        self.loaded = false;
        self.trim.reset(0.0);
        self.report(err);
    }

    /// A frame arrived from the decoder. Returns false when it belongs to an
    /// older load or predates the latest seek and should not be shown.
    pub fn on_frame(&mut self, id: Uuid, serial: u64, timestamp: f64) -> bool {
        if !self.loaded || self.media_id != Some(id) || serial < self.seek_serial {
            return false;
        }
        self.trim.set_current_time(timestamp);
        true
    }

    pub fn on_export_done(&mut self, output: &Path) {
        self.notify(format!("Trimmed video saved to: {}", output.display()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(duration: f64) -> MediaInfo {
        MediaInfo { duration, frame_rate: 25.0, width: 1280, height: 720 }
    }

    /// Session with `files` opened as a folder and the first one loaded.
    fn loaded_batch(files: &[&str]) -> (Session, Uuid) {
        let mut s = Session::new(true);
        s.playlist = PlaylistCursor::new(files.iter().map(PathBuf::from).collect());
        s.mode     = OutputMode::Batch;
        let Effect::Load { id, .. } = s.apply(TrimCommand::SelectItem(0))[0].clone() else {
            panic!("expected load");
        };
        s.on_opened(id, &info(10.0));
        (s, id)
    }

    #[test]
    fn open_file_loads_in_single_file_mode() {
        let mut s = Session::new(true);
        let fx = s.apply(TrimCommand::OpenFile(PathBuf::from("/v/a.mp4")));
        assert!(matches!(&fx[..], [Effect::Load { path, .. }] if path == Path::new("/v/a.mp4")));
        assert_eq!(s.mode(), OutputMode::SingleFile);
        assert!(!s.is_loaded());
        assert!(s.playlist_position().is_none());
    }

    #[test]
    fn opened_resets_trim_to_full_range() {
        let (s, _) = loaded_batch(&["a.mp4"]);
        assert!(s.is_loaded());
        assert_eq!(s.trim().end_time(), 10.0);
        assert_eq!(s.trim().start_time(), 0.0);
        assert!(!s.trim().is_marking());
    }

    #[test]
    fn stale_open_result_is_ignored() {
        let mut s = Session::new(true);
        let fx = s.apply(TrimCommand::OpenFile(PathBuf::from("a.mp4")));
        let Effect::Load { id: first, .. } = fx[0].clone() else { panic!() };
        s.apply(TrimCommand::OpenFile(PathBuf::from("b.mp4")));
        s.on_opened(first, &info(10.0));
        assert!(!s.is_loaded());
    }

    #[test]
    fn next_wraps_and_resets_trim() {
        let (mut s, _) = loaded_batch(&["a.mp4", "b.mp4"]);
        s.apply(TrimCommand::Seek(3.0));
        s.apply(TrimCommand::MarkStart);
        assert!(s.trim().is_marking());

        let fx = s.apply(TrimCommand::NextItem);
        assert!(matches!(&fx[..], [Effect::Load { path, .. }] if path == Path::new("b.mp4")));
        assert_eq!(s.playlist().index(), 1);
        assert!(!s.trim().is_marking());
        assert_eq!(s.trim().start_time(), 0.0);

        let fx = s.apply(TrimCommand::NextItem);
        assert!(matches!(&fx[..], [Effect::Load { path, .. }] if path == Path::new("a.mp4")));
        assert_eq!(s.playlist().index(), 0);
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let (mut s, _) = loaded_batch(&["a.mp4", "b.mp4"]);
        s.apply(TrimCommand::PreviousItem);
        assert_eq!(s.playlist().index(), 1);
    }

    #[test]
    fn navigation_with_empty_playlist_warns() {
        let mut s = Session::new(true);
        assert!(s.apply(TrimCommand::NextItem).is_empty());
        assert_eq!(s.status().and_then(|l| l.severity), Some(Severity::Warning));
    }

    #[test]
    fn seek_bumps_serial_and_clamps() {
        let (mut s, _) = loaded_batch(&["a.mp4"]);
        let fx = s.apply(TrimCommand::Seek(42.0));
        assert_eq!(fx, vec![Effect::Seek { serial: 1, time: 10.0 }]);
        assert_eq!(s.trim().current_time(), 10.0);
    }

    #[test]
    fn seek_before_load_is_ignored() {
        let mut s = Session::new(true);
        assert!(s.apply(TrimCommand::Seek(2.0)).is_empty());
    }

    #[test]
    fn frames_older_than_latest_seek_are_dropped() {
        let (mut s, id) = loaded_batch(&["a.mp4"]);
        s.apply(TrimCommand::Seek(6.0));
        assert!(!s.on_frame(id, 0, 1.0));
        assert_eq!(s.trim().current_time(), 6.0);
        assert!(s.on_frame(id, 1, 6.04));
        assert_eq!(s.trim().current_time(), 6.04);
        assert!(!s.on_frame(Uuid::new_v4(), 1, 2.0));
    }

    #[test]
    fn looping_frame_moves_playhead_back_to_start() {
        let (mut s, id) = loaded_batch(&["a.mp4"]);
        assert!(s.on_frame(id, 0, 9.96));
        assert!(s.on_frame(id, 0, 0.0));
        assert_eq!(s.trim().current_time(), 0.0);
    }

    #[test]
    fn mark_end_while_idle_only_warns() {
        let (mut s, _) = loaded_batch(&["a.mp4"]);
        let before = s.trim().clone();
        assert!(s.apply(TrimCommand::MarkEnd).is_empty());
        assert_eq!(s.trim(), &before);
        let status = s.status().unwrap();
        assert_eq!(status.severity, Some(Severity::Warning));
        assert!(status.text.contains("start time first"));
    }

    #[test]
    fn export_carries_marks_and_destination() {
        let (mut s, id) = loaded_batch(&["/v/a.mp4"]);
        s.apply(TrimCommand::SetSaveDir(PathBuf::from("/out")));
        s.on_frame(id, 0, 2.0);
        s.apply(TrimCommand::MarkStart);
        s.apply(TrimCommand::Seek(7.0));
        s.apply(TrimCommand::MarkEnd);

        let fx = s.apply(TrimCommand::Export);
        let [Effect::Export(req)] = &fx[..] else { panic!("expected export, got {fx:?}") };
        assert_eq!((req.start, req.end), (2.0, 7.0));
        assert_eq!(req.source, PathBuf::from("/v/a.mp4"));
        assert_eq!(req.mode, OutputMode::Batch);
        assert_eq!(req.validate().unwrap(), PathBuf::from("/out/a_trimmed.mp4"));
    }

    #[test]
    fn start_then_end_then_export_is_invalid_range() {
        let (mut s, _) = loaded_batch(&["a.mp4"]);
        s.apply(TrimCommand::SetSaveDir(PathBuf::from("/out")));
        s.apply(TrimCommand::Seek(4.0));
        s.apply(TrimCommand::MarkStart);
        s.apply(TrimCommand::MarkEnd);
        let fx = s.apply(TrimCommand::Export);
        let [Effect::Export(req)] = &fx[..] else { panic!() };
        assert!(matches!(req.validate(), Err(TrimError::InvalidRange { .. })));
    }

    #[test]
    fn export_before_load_is_refused() {
        let mut s = Session::new(true);
        assert!(s.apply(TrimCommand::Export).is_empty());
        assert!(s.status().is_some());
    }

    #[test]
    fn toggle_pause_flips_flag() {
        let mut s = Session::new(true);
        assert_eq!(s.apply(TrimCommand::TogglePause), vec![Effect::SetPlaying(false)]);
        assert_eq!(s.apply(TrimCommand::TogglePause), vec![Effect::SetPlaying(true)]);
    }

    #[test]
    fn quit_sets_flag() {
        let mut s = Session::new(true);
        assert_eq!(s.apply(TrimCommand::Quit), vec![Effect::Quit]);
        assert!(s.should_quit());
    }

    #[test]
    fn load_folder_switches_to_batch_mode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.mp4"), b"x").unwrap();
        std::fs::write(dir.path().join("a.avi"), b"x").unwrap();
        let mut s = Session::new(true);
        let fx = s.apply(TrimCommand::LoadFolder(dir.path().to_path_buf()));
        assert!(matches!(&fx[..], [Effect::Load { path, .. }] if path.ends_with("a.avi")));
        assert_eq!(s.mode(), OutputMode::Batch);
        assert_eq!(s.playlist().len(), 2);
    }

    #[test]
    fn load_empty_folder_reports_and_keeps_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let (mut s, _) = loaded_batch(&["a.mp4"]);
        assert!(s.apply(TrimCommand::LoadFolder(dir.path().to_path_buf())).is_empty());
        assert_eq!(s.playlist().len(), 1);
        assert!(s.status().unwrap().text.contains("No video files found"));
    }

    #[test]
    fn open_failure_is_reported() {
        let mut s = Session::new(true);
        let fx = s.apply(TrimCommand::OpenFile(PathBuf::from("broken.mp4")));
        let Effect::Load { id, path } = fx[0].clone() else { panic!() };
        s.on_open_failed(id, &TrimError::UnreadableMedia { path, reason: "no video stream".into() });
        assert!(!s.is_loaded());
        assert_eq!(s.status().and_then(|l| l.severity), Some(Severity::Error));
    }

    #[test]
    fn playlist_position_in_batch_mode() {
        let (s, _) = loaded_batch(&["/v/a.mp4", "/v/b.mp4"]);
        let pos = s.playlist_position().unwrap();
        assert_eq!((pos.index, pos.len, pos.name), (0, 2, "a.mp4"));
    }
}
