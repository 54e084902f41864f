// crates/quicktrim-media/src/export.rs
//
// ExportInvoker: runs the external encoder for one ExportRequest.
//
// Preconditions are checked in the order the user sees them: range, output
// directory (selected, present and writable), encoder, in-flight. The encoder writes to a hidden `.part`
// sibling which is renamed over the final path only when it exits 0, so a
// failed or abandoned run never leaves a half-written file at the real name.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use quicktrim_core::error::TrimError;
use quicktrim_core::export::{encoder_args, partial_path, EncoderSettings, ExportRequest};

use crate::paths::app_encoder_dir;

/// Number of trailing stderr lines kept in `EncodeFailed`.
const STDERR_TAIL_LINES: usize = 12;

/// Output paths with an export currently running.
pub type InFlight = Arc<Mutex<HashSet<PathBuf>>>;

// ── Encoder discovery ─────────────────────────────────────────────────────────

/// Resolve the encoder binary: explicit path, then PATH, then the app data dir.
pub fn find_encoder(settings: &EncoderSettings) -> Result<PathBuf, TrimError> {
    if let Some(binary) = &settings.binary {
        return if is_executable(binary) {
            Ok(binary.clone())
        } else {
            Err(TrimError::EncoderNotFound { name: binary.display().to_string() })
        };
    }
    let path_var = std::env::var_os("PATH");
    find_encoder_in(&settings.name, path_var.as_deref(), &[app_encoder_dir()])
        .ok_or_else(|| TrimError::EncoderNotFound { name: settings.name.clone() })
}

/// Look for `name` in every directory of a PATH-style list, then in `extra`.
pub fn find_encoder_in(name: &str, path_var: Option<&OsStr>, extra: &[PathBuf]) -> Option<PathBuf> {
    let dirs = path_var.map(|p| std::env::split_paths(p).collect::<Vec<_>>()).unwrap_or_default();
    dirs.iter()
        .chain(extra)
        .flat_map(|dir| candidates(dir, name))
        .find(|c| is_executable(c))
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut out = vec![dir.join(name)];
    if cfg!(windows) && Path::new(name).extension().is_none() {
        out.push(dir.join(format!("{name}.exe")));
    }
    out
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ── In-flight registry ────────────────────────────────────────────────────────

/// Removes its output path from the registry when the job ends, however it ends.
struct InFlightGuard {
    registry: InFlight,
    output:   PathBuf,
}

impl InFlightGuard {
    fn acquire(registry: &InFlight, output: &Path) -> Result<Self, TrimError> {
        if !registry.lock().insert(output.to_path_buf()) {
            return Err(TrimError::ExportInProgress(output.to_path_buf()));
        }
        Ok(Self { registry: Arc::clone(registry), output: output.to_path_buf() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.output);
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// Validate `req`, run the encoder and return the final output path.
/// Blocks until the encoder exits; callers run it on a worker thread.
pub fn run_export(
    settings:  &EncoderSettings,
    req:       &ExportRequest,
    in_flight: &InFlight,
) -> Result<PathBuf, TrimError> {
    let output = req.validate()?;
    if let Some(dir) = output.parent() {
        if !is_writable_dir(dir) {
            warn!("[export] output directory {} is missing or not writable", dir.display());
            return Err(req.no_directory_error());
        }
    }
    let encoder = find_encoder(settings)?;
    let _guard  = InFlightGuard::acquire(in_flight, &output)?;

    let part = partial_path(&output);
    let args = encoder_args(settings, &req.source, req.start, req.end, &part);
    info!(
        "[export] {} [{:.3}s – {:.3}s] → {}",
        req.source.display(), req.start, req.end, output.display(),
    );

    let result = Command::new(&encoder)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output();

    let out = match result {
        Ok(out) => out,
        Err(e) => {
            let _ = std::fs::remove_file(&part);
            return Err(TrimError::Io(e));
        }
    };

    if !out.status.success() {
        let _ = std::fs::remove_file(&part);
        let diagnostic = stderr_tail(&out.stderr, STDERR_TAIL_LINES);
        warn!("[export] encoder failed ({}): {diagnostic}", out.status);
        return Err(TrimError::EncodeFailed { status: out.status.to_string(), diagnostic });
    }

    if let Err(e) = std::fs::rename(&part, &output) {
        let _ = std::fs::remove_file(&part);
        return Err(TrimError::Io(e));
    }
    info!("[export] saved {}", output.display());
    Ok(output)
}

/// True when `dir` exists and a file can be created in it.
fn is_writable_dir(dir: &Path) -> bool {
    dir.is_dir() && tempfile::tempfile_in(dir).is_ok()
}

/// Last `lines` non-empty lines of the encoder's stderr.
fn stderr_tail(stderr: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(stderr);
    let kept: Vec<&str> = text.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect();
    kept[kept.len().saturating_sub(lines)..].join("\n")
}
