// crates/quicktrim-core/src/playlist.rs
//
// The ordered list of files being trimmed plus a cursor into it.
// Next/previous wrap around in both directions.

use std::path::{Path, PathBuf};

use crate::error::TrimError;

/// Extensions picked up when scanning a folder (compared case-insensitively).
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "avi", "mov"];

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.iter().any(|v| e.eq_ignore_ascii_case(v)))
        .unwrap_or(false)
}

/// List the video files directly inside `dir`, sorted by file name.
///
/// Raw directory order differs between platforms and filesystems, so the
/// listing is sorted to keep `n`/`p` navigation stable. Subdirectories are
/// not descended into.
pub fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>, TrimError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_video_file(p))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if files.is_empty() {
        return Err(TrimError::EmptyPlaylist(dir.to_path_buf()));
    }
    Ok(files)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaylistCursor {
    entries: Vec<PathBuf>,
    index:   usize,
}

impl PlaylistCursor {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries, index: 0 }
    }

    pub fn entries(&self) -> &[PathBuf] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn index(&self) -> usize { self.index }

    pub fn current(&self) -> Option<&Path> {
        self.entries.get(self.index).map(PathBuf::as_path)
    }

    /// Display name of the current entry (file name only).
    pub fn current_name(&self) -> Option<String> {
        self.current()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Option<&Path> {
        if index < self.entries.len() {
            self.index = index;
            self.current()
        } else {
            None
        }
    }

    pub fn next(&mut self) -> Option<&Path> {
        if self.entries.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.entries.len();
        self.current()
    }

    pub fn previous(&mut self) -> Option<&Path> {
        if self.entries.is_empty() {
            return None;
        }
        let n = self.entries.len();
        self.index = (self.index + n - 1) % n;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two() -> PlaylistCursor {
        PlaylistCursor::new(vec![PathBuf::from("a.mp4"), PathBuf::from("b.mp4")])
    }

    #[test]
    fn next_wraps_to_first() {
        let mut pl = two();
        pl.select(1);
        assert_eq!(pl.next(), Some(Path::new("a.mp4")));
        assert_eq!(pl.index(), 0);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut pl = two();
        assert_eq!(pl.previous(), Some(Path::new("b.mp4")));
        assert_eq!(pl.index(), 1);
    }

    #[test]
    fn empty_playlist_navigation_is_none() {
        let mut pl = PlaylistCursor::default();
        assert!(pl.next().is_none());
        assert!(pl.previous().is_none());
        assert!(pl.current().is_none());
    }

    #[test]
    fn select_out_of_range_keeps_cursor() {
        let mut pl = two();
        pl.select(1);
        assert!(pl.select(7).is_none());
        assert_eq!(pl.index(), 1);
        assert_eq!(pl.current_name().as_deref(), Some("b.mp4"));
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_video_file(Path::new("clip.MOV")));
        assert!(is_video_file(Path::new("/x/y/clip.avi")));
        assert!(!is_video_file(Path::new("clip.mkv")));
        assert!(!is_video_file(Path::new("README")));
    }

    #[test]
    fn scan_folder_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp4", "a.MOV", "notes.txt", "c.avi"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.mp4")).unwrap();
        let files = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = files.iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.MOV", "b.mp4", "c.avi"]);
    }

    #[test]
    fn scan_empty_folder_reports_empty_playlist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        assert!(matches!(scan_folder(dir.path()), Err(TrimError::EmptyPlaylist(_))));
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds(
            len   in 1usize..8,
            steps in prop::collection::vec(any::<bool>(), 0..40),
        ) {
            let entries = (0..len).map(|i| PathBuf::from(format!("{i}.mp4"))).collect();
            let mut pl = PlaylistCursor::new(entries);
            for forward in steps {
                if forward { pl.next(); } else { pl.previous(); }
                prop_assert!(pl.index() < len);
            }
        }

        #[test]
        fn next_then_previous_is_identity(len in 1usize..8, start in 0usize..8) {
            let entries = (0..len).map(|i| PathBuf::from(format!("{i}.mp4"))).collect();
            let mut pl = PlaylistCursor::new(entries);
            pl.select(start % len);
            let before = pl.index();
            pl.next();
            pl.previous();
            prop_assert_eq!(pl.index(), before);
        }
    }
}
