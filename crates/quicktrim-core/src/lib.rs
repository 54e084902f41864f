// crates/quicktrim-core/src/lib.rs
//
// No egui, no ffmpeg. Everything in here is plain state and pure functions,
// shared by quicktrim-media (worker side) and quicktrim-ui (window side).
//
// Data flow per frame:
//   InputEvent ─▶ InteractionController ─▶ TrimCommand ─▶ Session::apply ─▶ Effect
//   TrimState  ─▶ build_overlay ─▶ Vec<OverlayShape> ─▶ painter

pub mod commands;
pub mod error;
pub mod export;
pub mod helpers;
pub mod input;
pub mod media_types;
pub mod overlay;
pub mod playlist;
pub mod session;
pub mod trim;

pub use commands::TrimCommand;
pub use error::{Severity, TrimError};
pub use export::{EncoderSettings, ExportRequest, OutputMode};
pub use input::{InputEvent, InteractionController, PointerButton};
pub use media_types::{MediaInfo, MediaResult, PlaybackFrame};
pub use session::{Effect, Session, StatusLine};
pub use trim::TrimState;
