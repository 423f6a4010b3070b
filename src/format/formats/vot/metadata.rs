//! Sequence descriptor files: `info.txt` and `sequence`.

use std::collections::HashMap;

use crate::config::SequenceDefaults;
use crate::format::error::FormatError;
use crate::model::{SequenceInfo, abbreviate, expand};

/// Name of the human-readable metadata file.
pub const INFO_FILE: &str = "info.txt";

/// Name of the sequence description file.
pub const SEQUENCE_FILE: &str = "sequence";

/// Directory holding exported frame images.
pub const IMAGE_DIR: &str = "data";

/// Image path template declared in the `sequence` file.
pub const CHANNEL_TEMPLATE: &str = "data/%08d.png";

/// Archive entry name of a frame image, matching [`CHANNEL_TEMPLATE`].
///
/// Image files are numbered from 1.
pub fn image_entry_name(frame: u32) -> String {
    format!("{}/{:08}.png", IMAGE_DIR, u64::from(frame) + 1)
}

/// Contents of `info.txt`.
///
/// Frame numbers are stored 1-based, as they appear in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoFile {
    pub sequence_name: String,
    pub spectrum: String,
    pub camera_name: String,
    pub frame_size: Option<(u32, u32)>,
    pub number_of_frames: u32,
    /// Attribute short codes.
    pub attributes: Vec<String>,
    pub location: String,
    pub year: String,
    pub original_video_file: String,
    pub original_frame_size: Option<(u32, u32)>,
    pub cropping_offset: (u32, u32),
    pub deinterlaced: bool,
    pub start_frame: u32,
    pub end_frame: u32,
}

impl InfoFile {
    /// Build the metadata for an exported sequence.
    ///
    /// `attributes` are full attribute names; they are written as short codes.
    pub fn new(sequence: &SequenceInfo, attributes: &[String], defaults: &SequenceDefaults) -> Self {
        Self {
            sequence_name: sequence.name.clone(),
            spectrum: defaults.spectrum.clone(),
            camera_name: defaults.camera_name.clone(),
            frame_size: sequence.frame_size,
            number_of_frames: sequence.frame_count,
            attributes: attributes
                .iter()
                .map(|name| abbreviate(name).to_string())
                .collect(),
            location: defaults.location.clone(),
            year: defaults.year.clone(),
            original_video_file: defaults.original_video_file.clone(),
            original_frame_size: sequence.frame_size,
            cropping_offset: (defaults.cropping_offset_x, defaults.cropping_offset_y),
            deinterlaced: defaults.deinterlaced,
            start_frame: sequence.start_frame + 1,
            end_frame: sequence.stop_frame + 1,
        }
    }

    /// Serialize as `key=value` lines in the fixed key order.
    pub fn to_file_content(&self) -> String {
        let size = |s: Option<(u32, u32)>, axis: usize| match s {
            Some((w, _)) if axis == 0 => w.to_string(),
            Some((_, h)) => h.to_string(),
            None => String::new(),
        };

        let entries: [(&str, String); 17] = [
            ("sequence_name", self.sequence_name.clone()),
            ("spectrum", self.spectrum.clone()),
            ("camera_name", self.camera_name.clone()),
            ("frame_size_x", size(self.frame_size, 0)),
            ("frame_size_y", size(self.frame_size, 1)),
            ("number_of_frames", self.number_of_frames.to_string()),
            ("attributes", self.attributes.join(",")),
            ("location", self.location.clone()),
            ("year", self.year.clone()),
            ("original_video_file", self.original_video_file.clone()),
            ("original_frame_size_x", size(self.original_frame_size, 0)),
            ("original_frame_size_y", size(self.original_frame_size, 1)),
            ("cropping_offset_x", self.cropping_offset.0.to_string()),
            ("cropping_offset_y", self.cropping_offset.1.to_string()),
            ("deinterlaced", u8::from(self.deinterlaced).to_string()),
            ("start_frame", self.start_frame.to_string()),
            ("end_frame", self.end_frame.to_string()),
        ];

        entries
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse `info.txt`. Unknown keys are ignored, missing keys keep defaults.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut values: HashMap<&str, (usize, &str)> = HashMap::new();
        for (idx, line) in text.lines().enumerate() {
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim(), (idx + 1, value.trim()));
            }
        }

        let text_value = |key: &str| {
            values
                .get(key)
                .map(|(_, v)| v.to_string())
                .unwrap_or_default()
        };
        let number = |key: &str| -> Result<Option<u32>, FormatError> {
            match values.get(key) {
                Some((_, v)) if v.is_empty() => Ok(None),
                Some((line, v)) => v
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|e| FormatError::parse(INFO_FILE, *line, format!("{key}: {e}"))),
                None => Ok(None),
            }
        };
        let pair = |x: &str, y: &str| -> Result<Option<(u32, u32)>, FormatError> {
            Ok(number(x)?.zip(number(y)?))
        };

        let start_frame = number("start_frame")?.unwrap_or(1);
        let number_of_frames = number("number_of_frames")?.unwrap_or(0);
        let end_frame = match number("end_frame")? {
            Some(end_frame) => end_frame,
            None => start_frame
                .checked_add(number_of_frames.saturating_sub(1))
                .ok_or_else(|| {
                    let line = values.get("start_frame").map_or(0, |(line, _)| *line);
                    FormatError::parse(
                        INFO_FILE,
                        line,
                        format!("start_frame {start_frame} + {number_of_frames} frames overflows"),
                    )
                })?,
        };

        Ok(Self {
            sequence_name: text_value("sequence_name"),
            spectrum: text_value("spectrum"),
            camera_name: text_value("camera_name"),
            frame_size: pair("frame_size_x", "frame_size_y")?,
            number_of_frames,
            attributes: text_value("attributes")
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect(),
            location: text_value("location"),
            year: text_value("year"),
            original_video_file: text_value("original_video_file"),
            original_frame_size: pair("original_frame_size_x", "original_frame_size_y")?,
            cropping_offset: (
                number("cropping_offset_x")?.unwrap_or(0),
                number("cropping_offset_y")?.unwrap_or(0),
            ),
            deinterlaced: matches!(text_value("deinterlaced").as_str(), "1" | "true" | "yes"),
            start_frame,
            end_frame,
        })
    }

    /// Full attribute names of the listed codes.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes
            .iter()
            .map(|code| expand(code).to_string())
            .collect()
    }

    /// Convert back to 0-based sequence metadata.
    pub fn to_sequence_info(&self) -> SequenceInfo {
        SequenceInfo {
            name: self.sequence_name.clone(),
            frame_count: self.number_of_frames,
            start_frame: self.start_frame.saturating_sub(1),
            stop_frame: self.end_frame.saturating_sub(1),
            frame_size: self.frame_size,
        }
    }
}

/// Contents of the `sequence` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFile {
    /// 1-based number of the first image.
    pub start: u32,
    pub fps: u32,
    pub name: String,
}

impl SequenceFile {
    pub fn new(sequence: &SequenceInfo, defaults: &SequenceDefaults) -> Self {
        Self {
            start: sequence.start_frame + 1,
            fps: defaults.fps,
            name: sequence.name.clone(),
        }
    }

    pub fn to_file_content(&self) -> String {
        format!(
            "channels.color={}\nstart={}\nformat=default\nfps={}\nname={}",
            CHANNEL_TEMPLATE, self.start, self.fps, self.name
        )
    }
}
