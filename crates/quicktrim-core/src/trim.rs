// crates/quicktrim-core/src/trim.rs
//
// TrimState: the in/out range being built for the current file.
//
// Two states — Idle and Marking. `mark_start` always enters Marking (a second
// press just moves the start), `mark_end` closes it. Seeking never touches
// the marks. The start < end check is deliberately deferred to export time:
// while the user is still working, any ordering of marks is allowed.

use crate::error::TrimError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkPhase {
    Idle,
    Marking,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrimState {
    current_time:   f64,
    start_time:     f64,
    end_time:       f64,
    total_duration: f64,
    is_marking:     bool,
}

impl TrimState {
    /// Fresh state for a newly loaded source: full range selected, not marking.
    pub fn new(total_duration: f64) -> Self {
        let total = total_duration.max(0.0);
        Self {
            current_time:   0.0,
            start_time:     0.0,
            end_time:       total,
            total_duration: total,
            is_marking:     false,
        }
    }

    /// Back to `(0, 0, total, false)` for a new source.
    pub fn reset(&mut self, total_duration: f64) {
        *self = Self::new(total_duration);
    }

    pub fn current_time(&self) -> f64 { self.current_time }
    pub fn start_time(&self) -> f64 { self.start_time }
    pub fn end_time(&self) -> f64 { self.end_time }
    pub fn total_duration(&self) -> f64 { self.total_duration }
    pub fn is_marking(&self) -> bool { self.is_marking }

    pub fn phase(&self) -> MarkPhase {
        if self.is_marking { MarkPhase::Marking } else { MarkPhase::Idle }
    }

    fn clamp(&self, t: f64) -> f64 {
        if t.is_nan() { 0.0 } else { t.clamp(0.0, self.total_duration) }
    }

    /// Move the playhead. Legal in either phase; never changes the marks.
    pub fn set_current_time(&mut self, t: f64) {
        self.current_time = self.clamp(t);
    }

    /// Place the start mark at the playhead and enter Marking.
    pub fn mark_start(&mut self) -> f64 {
        self.start_time = self.current_time;
        self.is_marking = true;
        self.start_time
    }

    /// Close the range at the playhead. Outside Marking this changes nothing
    /// and reports a warning.
    pub fn mark_end(&mut self) -> Result<f64, TrimError> {
        if !self.is_marking {
            return Err(TrimError::PreconditionNotMet("Please set start time first."));
        }
        self.end_time   = self.current_time;
        self.is_marking = false;
        Ok(self.end_time)
    }

    /// Export-time check: the range must be non-empty and forward.
    pub fn validate_range(&self) -> Result<(f64, f64), TrimError> {
        if self.start_time < self.end_time {
            Ok((self.start_time, self.end_time))
        } else {
            Err(TrimError::InvalidRange { start: self.start_time, end: self.end_time })
        }
    }
}

impl Default for TrimState {
    fn default() -> Self {
        Self::new(0.0)
    }
}
