//! Command-line interface definition.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use vot_format::config::ConfigError;
use vot_format::format::{FormatError, FrameAnnotations, FrameSource, TrackingTask};
use vot_format::model::{DEFAULT_LABEL, SequenceInfo};

#[derive(Parser, Debug)]
#[command(name = "vot-convert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert object-tracking annotations to and from VOT archives")]
#[command(after_help = "EXAMPLES:\n  \
    vot-convert import ball.zip -o ball.json\n  \
    vot-convert export ball.json ball.zip --images frames/\n  \
    vot-convert formats")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a VOT archive and write the task as JSON
    Import {
        /// VOT archive to read
        archive: PathBuf,

        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when tag files and ground truth differ in length
        #[arg(long)]
        strict: bool,

        /// Label given to imported shapes
        #[arg(long, default_value = DEFAULT_LABEL)]
        label: String,
    },

    /// Write a task JSON file as a VOT archive
    Export {
        /// Task JSON file to read
        task: PathBuf,

        /// VOT archive to write
        archive: PathBuf,

        /// Directory of frame images to include (sorted by file name)
        #[arg(long)]
        images: Option<PathBuf>,
    },

    /// List registered formats
    Formats,
}

/// Errors reported by the command-line tool.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No format registered for {0}")]
    UnknownFormat(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Format(FormatError::MissingFile { .. }) => 3,
            CliError::Format(FormatError::Parse { .. })
            | CliError::Format(FormatError::LineCountMismatch { .. }) => 4,
            CliError::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Frame source pairing a task with images from a directory.
///
/// The n-th image file (by name) belongs to frame `start_frame + n`.
pub struct DirectorySource<'a> {
    task: &'a TrackingTask,
    images: Vec<PathBuf>,
}

impl<'a> DirectorySource<'a> {
    pub fn new(task: &'a TrackingTask, dir: &Path) -> std::io::Result<Self> {
        let mut images: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && image::ImageFormat::from_path(p).is_ok())
            .collect();
        images.sort();
        log::info!("Found {} frame images in {:?}", images.len(), dir);
        Ok(Self { task, images })
    }

    fn load_image(&self, frame: u32) -> Option<image::DynamicImage> {
        let offset = frame.checked_sub(self.task.sequence.start_frame)?;
        let path = self.images.get(offset as usize)?;
        match image::open(path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Failed to decode {:?}: {}", path, e);
                None
            }
        }
    }
}

impl FrameSource for DirectorySource<'_> {
    fn sequence(&self) -> SequenceInfo {
        self.task.sequence()
    }

    fn frames(&self) -> Box<dyn Iterator<Item = FrameAnnotations> + '_> {
        Box::new(self.task.frames().map(move |frame| match self.load_image(frame.frame) {
            Some(image) => frame.with_image(image),
            None => frame,
        }))
    }
}
