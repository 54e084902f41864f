// crates/quicktrim-media/src/lib.rs
//
// No egui dependency. Communicates with quicktrim-ui via channels and the
// latest-wins frame slot only.
//
//   decode.rs   PlaybackSource: one open file, looping sequential reads, seek
//   probe.rs    duration / frame-rate lookup
//   export.rs   encoder discovery + external encoder run
//   worker.rs   MediaWorker: decode thread, export threads, result channel

pub mod decode;
pub mod export;
pub mod paths;
pub mod probe;
pub mod worker;

mod helpers;

use std::sync::Once;

pub use decode::{PlaybackSource, VideoFrame};
pub use export::{find_encoder, run_export, InFlight};
pub use worker::{MediaWorker, PlaybackCmd};
pub use quicktrim_core::media_types::{MediaInfo, MediaResult, PlaybackFrame};

static INIT: Once = Once::new();

/// Initialise ffmpeg once per process. Safe to call from tests and `main` alike.
pub fn init() -> Result<(), ffmpeg_the_third::Error> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = ffmpeg_the_third::init();
    });
    result
}
