// crates/quicktrim-core/src/commands.rs
//
// Every user action in QuickTrim is expressed as a TrimCommand.
// The interaction controller and the side panel emit these; `Session::apply`
// processes them after the UI pass. Adding a new action = add a variant here
// + one match arm in session.rs.

use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub enum TrimCommand {
    // ── Trim range ───────────────────────────────────────────────────────────
    MarkStart,
    MarkEnd,
    /// Export the current range (the Save button).
    Export,

    // ── Playback ─────────────────────────────────────────────────────────────
    /// Move the playhead to an absolute time in seconds (timeline scrub).
    Seek(f64),
    TogglePause,

    // ── Playlist ─────────────────────────────────────────────────────────────
    NextItem,
    PreviousItem,
    SelectItem(usize),
    /// Replace the playlist with the video files found in a folder (batch mode).
    LoadFolder(PathBuf),
    /// Replace the playlist with a single file (single-file mode).
    OpenFile(PathBuf),
    SetSaveDir(PathBuf),

    // ── App ──────────────────────────────────────────────────────────────────
    Quit,
}
