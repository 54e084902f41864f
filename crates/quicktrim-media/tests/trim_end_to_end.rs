// crates/quicktrim-media/tests/trim_end_to_end.rs
//
// Full trim path against a real encoder: generate a 10 s clip, play it with
// PlaybackSource, mark 2 s → 7 s through a Session and export it.
//
// Needs an `ffmpeg` with libx264 on PATH (or in the app data dir). Without one
// every test here returns early.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use quicktrim_core::export::{EncoderSettings, SINGLE_FILE_OUTPUT_NAME};
use quicktrim_core::{Effect, Session, TrimCommand, TrimError};
use quicktrim_media::export::{find_encoder, run_export, InFlight};
use quicktrim_media::probe::probe_duration;
use quicktrim_media::{MediaResult, MediaWorker, PlaybackCmd, PlaybackFrame, PlaybackSource};
use uuid::Uuid;

/// Encode a 10 s, 25 fps test pattern with a sine tone. `None` when no
/// suitable encoder is installed.
fn make_clip(dir: &Path) -> Option<(PathBuf, EncoderSettings)> {
    let Ok(encoder) = find_encoder(&EncoderSettings::default()) else {
        eprintln!("skipping: no encoder found");
        return None;
    };
    let clip = dir.join("source.mp4");
    let status = Command::new(&encoder)
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-f", "lavfi", "-i", "testsrc=duration=10:size=320x240:rate=25"])
        .args(["-f", "lavfi", "-i", "sine=frequency=440:duration=10"])
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-c:a", "aac", "-shortest"])
        .arg(&clip)
        .status()
        .ok()?;
    if !status.success() {
        eprintln!("skipping: encoder could not generate the test clip");
        return None;
    }
    quicktrim_media::init().ok()?;
    let settings = EncoderSettings { binary: Some(encoder), ..EncoderSettings::default() };
    Some((clip, settings))
}

#[test]
fn playback_loops_and_seeks() {
    let dir = tempfile::tempdir().unwrap();
    let Some((clip, _)) = make_clip(dir.path()) else { return };

    let mut src = PlaybackSource::open(&clip, 1280).unwrap();
    assert!((src.duration() - 10.0).abs() < 0.25, "duration {}", src.duration());
    assert!((src.frame_rate() - 25.0).abs() < 0.5);
    assert_eq!((src.info().width, src.info().height), (320, 240));

    let first = src.read_next_frame().unwrap();
    assert!(first.timestamp < 0.1);
    assert_eq!(first.data.len(), 320 * 240 * 4);

    src.seek(5.0).unwrap();
    let at = src.read_next_frame().unwrap();
    assert!((4.9..=5.2).contains(&at.timestamp), "landed at {}", at.timestamp);
    assert_eq!(src.position(), at.timestamp);

    // Read across end of stream: time must wrap back to the start.
    src.seek(9.7).unwrap();
    let mut last = src.read_next_frame().unwrap().timestamp;
    let mut wrapped = false;
    for _ in 0..50 {
        let ts = src.read_next_frame().unwrap().timestamp;
        if ts < last {
            assert!(ts < 0.1, "wrapped to {ts}");
            wrapped = true;
            break;
        }
        last = ts;
    }
    assert!(wrapped, "playback did not loop");

    src.close();
    src.close();
    assert!(matches!(src.read_next_frame(), Err(TrimError::PreconditionNotMet(_))));
}

#[test]
fn seek_to_the_very_end_shows_the_last_frame() {
    let dir = tempfile::tempdir().unwrap();
    let Some((clip, _)) = make_clip(dir.path()) else { return };

    let mut src = PlaybackSource::open(&clip, 640).unwrap();
    let duration = src.duration();
    src.seek(duration).unwrap();
    let last = src.read_next_frame().unwrap();
    assert!(last.timestamp > duration - 0.2, "landed at {} of {duration}", last.timestamp);

    // The next read carries on past the end and loops.
    let next = src.read_next_frame().unwrap();
    assert!(next.timestamp < 0.1, "looped to {}", next.timestamp);
}

/// Poll the worker's frame slot until a frame shows up or `timeout` passes.
fn wait_for_frame(worker: &MediaWorker, timeout: Duration) -> Option<PlaybackFrame> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(frame) = worker.take_frame() {
            return Some(frame);
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn paused_worker_publishes_one_frame_per_seek() {
    let dir = tempfile::tempdir().unwrap();
    let Some((clip, settings)) = make_clip(dir.path()) else { return };

    let worker = MediaWorker::new(settings, 640, false);
    let id = Uuid::new_v4();
    worker.send(PlaybackCmd::Open { id, path: clip });
    match worker.rx.recv_timeout(Duration::from_secs(10)) {
        Ok(MediaResult::Opened { id: got, .. }) => assert_eq!(got, id),
        other => panic!("expected Opened, got {other:?}"),
    }

    // Opening shows the first frame even while paused, then nothing more.
    let first = wait_for_frame(&worker, Duration::from_secs(5)).expect("first frame");
    assert_eq!((first.id, first.serial), (id, 0));
    assert!(first.timestamp < 0.1);
    thread::sleep(Duration::from_millis(300));
    assert!(worker.take_frame().is_none(), "paused decoder kept reading");

    worker.send(PlaybackCmd::Seek { serial: 1, time: 5.0 });
    let seeked = wait_for_frame(&worker, Duration::from_secs(5)).expect("seek frame");
    assert_eq!(seeked.serial, 1);
    assert!((4.9..=5.2).contains(&seeked.timestamp), "landed at {}", seeked.timestamp);
    thread::sleep(Duration::from_millis(300));
    assert!(worker.take_frame().is_none(), "paused seek published more than one frame");

    worker.shutdown();
    assert!(!worker.playback_running());
}

#[test]
fn trim_two_to_seven_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let Some((clip, settings)) = make_clip(dir.path()) else { return };
    let out_dir = tempfile::tempdir().unwrap();

    let src = PlaybackSource::open(&clip, 640).unwrap();
    let mut session = Session::new(false);
    let Effect::Load { id, .. } = session.apply(TrimCommand::OpenFile(clip.clone())).remove(0) else {
        panic!("expected load");
    };
    session.on_opened(id, &src.info());
    session.apply(TrimCommand::SetSaveDir(out_dir.path().to_path_buf()));

    session.apply(TrimCommand::Seek(2.0));
    session.apply(TrimCommand::MarkStart);
    session.apply(TrimCommand::Seek(7.0));
    session.apply(TrimCommand::MarkEnd);
    let Effect::Export(req) = session.apply(TrimCommand::Export).remove(0) else {
        panic!("expected export");
    };

    let output = run_export(&settings, &req, &InFlight::default()).unwrap();
    assert_eq!(output, out_dir.path().join(SINGLE_FILE_OUTPUT_NAME));
    let dur = probe_duration(&output).unwrap();
    assert!((dur - 5.0).abs() < 0.5, "trimmed duration {dur}");
}

#[test]
fn empty_range_produces_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let Some((clip, settings)) = make_clip(dir.path()) else { return };
    let out_dir = tempfile::tempdir().unwrap();

    let src = PlaybackSource::open(&clip, 640).unwrap();
    let mut session = Session::new(false);
    let Effect::Load { id, .. } = session.apply(TrimCommand::OpenFile(clip.clone())).remove(0) else {
        panic!("expected load");
    };
    session.on_opened(id, &src.info());
    session.apply(TrimCommand::SetSaveDir(out_dir.path().to_path_buf()));
    session.apply(TrimCommand::Seek(4.0));
    session.apply(TrimCommand::MarkStart);
    session.apply(TrimCommand::MarkEnd);
    let Effect::Export(req) = session.apply(TrimCommand::Export).remove(0) else {
        panic!("expected export");
    };

    let err = run_export(&settings, &req, &InFlight::default()).unwrap_err();
    assert!(matches!(err, TrimError::InvalidRange { .. }));
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}
