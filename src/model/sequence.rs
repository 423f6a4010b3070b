//! Sequence-level metadata.

use serde::{Deserialize, Serialize};

/// Description of a tracked video sequence.
///
/// Frame numbers are 0-based; file formats that count from 1 convert on
/// write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceInfo {
    /// Sequence name.
    pub name: String,

    /// Number of frames in the sequence.
    pub frame_count: u32,

    /// First frame of the sequence.
    pub start_frame: u32,

    /// Last frame of the sequence (inclusive).
    pub stop_frame: u32,

    /// Frame dimensions (width, height) if known.
    #[serde(default)]
    pub frame_size: Option<(u32, u32)>,
}

impl SequenceInfo {
    /// Create metadata for `frame_count` frames starting at frame 0.
    pub fn new(name: impl Into<String>, frame_count: u32) -> Self {
        Self {
            name: name.into(),
            frame_count,
            start_frame: 0,
            stop_frame: frame_count.saturating_sub(1),
            frame_size: None,
        }
    }

    /// Set the frame range.
    pub fn with_range(mut self, start_frame: u32, stop_frame: u32) -> Self {
        self.start_frame = start_frame;
        self.stop_frame = stop_frame;
        self
    }

    /// Set the frame dimensions.
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = Some((width, height));
        self
    }
}

impl Default for SequenceInfo {
    fn default() -> Self {
        Self::new("sequence", 0)
    }
}
