// crates/quicktrim-ui/src/config.rs
//
// Command line. Nothing is persisted between runs.

use std::path::PathBuf;

use clap::Parser;

use quicktrim_core::export::EncoderSettings;
use quicktrim_core::TrimCommand;
use quicktrim_media::decode::DEFAULT_PREVIEW_WIDTH;

#[derive(Parser, Debug)]
#[command(name = "quicktrim")]
#[command(version)]
#[command(about = "Mark in/out points on a video and export the trimmed clip", long_about = None)]
pub struct Config {
    /// Video file to open, or a folder to load as a playlist
    pub path: Option<PathBuf>,

    /// Folder trimmed clips are written to
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Encoder binary to run instead of searching PATH
    #[arg(long, value_name = "PATH")]
    pub encoder: Option<PathBuf>,

    #[arg(long, default_value = "libx264")]
    pub video_codec: String,

    #[arg(long, default_value = "aac")]
    pub audio_codec: String,

    /// Maximum width of decoded preview frames
    #[arg(long, default_value_t = DEFAULT_PREVIEW_WIDTH)]
    pub preview_width: u32,

    /// Start with playback paused
    #[arg(long)]
    pub paused: bool,
}

impl Config {
    pub fn encoder_settings(&self) -> EncoderSettings {
        EncoderSettings {
            binary:      self.encoder.clone(),
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
            ..EncoderSettings::default()
        }
    }

    /// Commands that replay the command line as if the user had clicked it.
    pub fn startup_commands(&self) -> Vec<TrimCommand> {
        let mut cmds = Vec::new();
        if let Some(dir) = &self.save_dir {
            cmds.push(TrimCommand::SetSaveDir(dir.clone()));
        }
        if let Some(path) = &self.path {
            cmds.push(if path.is_dir() {
                TrimCommand::LoadFolder(path.clone())
            } else {
                TrimCommand::OpenFile(path.clone())
            });
        }
        cmds
    }
}
