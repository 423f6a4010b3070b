//! In-memory tracking task used for import/export.
//!
//! `TrackingTask` is the annotation model used when no host model is
//! involved (the command-line tool, tests). It receives imported shapes as an
//! [`AnnotationSink`] and feeds an exporter as a [`FrameSource`], and
//! serializes to JSON.
//!
//! # Versioning
//!
//! The JSON layout uses semantic versioning (MAJOR.MINOR.PATCH). Version 0
//! files may change in breaking ways between minor releases.

use serde::{Deserialize, Serialize};

use crate::format::error::FormatError;
use crate::format::traits::{AnnotationSink, FrameAnnotations, FrameSource};
use crate::model::{SequenceInfo, TrackedShape};

/// A tracked sequence with its per-frame shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingTask {
    /// Format version for compatibility checking.
    pub version: String,

    /// Sequence metadata.
    pub sequence: SequenceInfo,

    /// Frames that carry at least one shape, in ascending frame order.
    pub frames: Vec<FrameEntry>,
}

impl TrackingTask {
    /// Current version of the task JSON layout.
    pub const CURRENT_VERSION: &'static str = "0.1.0";

    /// Major version number for compatibility checking.
    pub const VERSION_MAJOR: u32 = 0;

    /// Minor version number.
    pub const VERSION_MINOR: u32 = 1;

    /// Create an empty task for the given sequence.
    pub fn new(sequence: SequenceInfo) -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
            sequence,
            frames: Vec::new(),
        }
    }

    /// Parse a version string into (major, minor, patch) components.
    ///
    /// Returns None if the version string is invalid.
    pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let major = parts[0].parse().ok()?;
        let minor = parts[1].parse().ok()?;
        let patch = parts[2].parse().ok()?;
        Some((major, minor, patch))
    }

    /// Check if a version is compatible with the current version.
    ///
    /// For version 0.x.x (unstable), only exact minor version matches are compatible.
    pub fn is_version_compatible(file_version: &str) -> bool {
        let Some((file_major, file_minor, _)) = Self::parse_version(file_version) else {
            return false;
        };

        if Self::VERSION_MAJOR == 0 {
            file_major == 0 && file_minor == Self::VERSION_MINOR
        } else {
            file_major == Self::VERSION_MAJOR
        }
    }

    /// Insert a shape, keeping frames ordered and growing the frame range.
    pub fn push_shape(&mut self, shape: TrackedShape) {
        let frame = shape.frame;
        match self.frames.binary_search_by_key(&frame, |f| f.frame) {
            Ok(idx) => self.frames[idx].shapes.push(shape),
            Err(idx) => self.frames.insert(
                idx,
                FrameEntry {
                    frame,
                    shapes: vec![shape],
                },
            ),
        }

        if frame >= self.sequence.frame_count {
            self.sequence.frame_count = frame + 1;
        }
        if frame > self.sequence.stop_frame {
            self.sequence.stop_frame = frame;
        }
    }

    /// Get the shapes of a frame.
    pub fn frame(&self, frame: u32) -> Option<&FrameEntry> {
        self.frames
            .binary_search_by_key(&frame, |f| f.frame)
            .ok()
            .map(|idx| &self.frames[idx])
    }

    /// Get total shape count across all frames.
    pub fn total_shapes(&self) -> usize {
        self.frames.iter().map(|f| f.shapes.len()).sum()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, rejecting incompatible versions.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let task: Self = serde_json::from_str(json)?;
        if !Self::is_version_compatible(&task.version) {
            return Err(FormatError::invalid_format(format!(
                "Unsupported task version '{}' (expected {})",
                task.version,
                Self::CURRENT_VERSION
            )));
        }
        Ok(task)
    }
}

impl Default for TrackingTask {
    fn default() -> Self {
        Self::new(SequenceInfo::default())
    }
}

/// Shapes on a single frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameEntry {
    /// 0-based frame index.
    pub frame: u32,

    /// Shapes on this frame.
    pub shapes: Vec<TrackedShape>,
}

impl AnnotationSink for TrackingTask {
    fn set_sequence(&mut self, sequence: SequenceInfo) {
        self.sequence = sequence;
    }

    fn add_shape(&mut self, shape: TrackedShape) -> Result<(), FormatError> {
        self.push_shape(shape);
        Ok(())
    }
}

impl FrameSource for TrackingTask {
    fn sequence(&self) -> SequenceInfo {
        self.sequence.clone()
    }

    fn frames(&self) -> Box<dyn Iterator<Item = FrameAnnotations> + '_> {
        Box::new(
            self.frames
                .iter()
                .map(|f| FrameAnnotations::new(f.frame, f.shapes.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn shape(frame: u32) -> TrackedShape {
        TrackedShape::new(frame, BoundingBox::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn test_push_keeps_frames_sorted() {
        let mut task = TrackingTask::default();
        task.push_shape(shape(4));
        task.push_shape(shape(1));
        task.push_shape(shape(4));

        let frames: Vec<u32> = task.frames.iter().map(|f| f.frame).collect();
        assert_eq!(frames, vec![1, 4]);
        assert_eq!(task.frame(4).unwrap().shapes.len(), 2);
        assert!(task.frame(2).is_none());
        assert_eq!(task.total_shapes(), 3);
    }

    #[test]
    fn test_push_grows_sequence_range() {
        let mut task = TrackingTask::new(SequenceInfo::new("s", 2));
        task.push_shape(shape(0));
        assert_eq!(task.sequence.frame_count, 2);

        task.push_shape(shape(6));
        assert_eq!(task.sequence.frame_count, 7);
        assert_eq!(task.sequence.stop_frame, 6);
    }

    #[test]
    fn test_frame_source_yields_in_order() {
        let mut task = TrackingTask::default();
        task.push_shape(shape(2));
        task.push_shape(shape(0));

        let frames: Vec<FrameAnnotations> = task.frames().collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].frame, 0);
        assert_eq!(frames[1].frame, 2);
        assert!(frames.iter().all(|f| f.image.is_none()));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut task = TrackingTask::new(SequenceInfo::new("ball", 3).with_frame_size(320, 240));
        task.push_shape(shape(0).with_attribute("motion_blur", true));

        let json = task.to_json().unwrap();
        let loaded = TrackingTask::from_json(&json).unwrap();

        assert_eq!(loaded.sequence, task.sequence);
        assert_eq!(loaded.frames[0].shapes, task.frames[0].shapes);
    }

    #[test]
    fn test_version_compatibility() {
        assert!(TrackingTask::is_version_compatible("0.1.0"));
        assert!(TrackingTask::is_version_compatible("0.1.7"));
        assert!(!TrackingTask::is_version_compatible("0.2.0"));
        assert!(!TrackingTask::is_version_compatible("1.0"));

        let json = r#"{ "version": "9.0.0", "sequence": { "name": "a", "frame_count": 0,
            "start_frame": 0, "stop_frame": 0 }, "frames": [] }"#;
        assert!(matches!(
            TrackingTask::from_json(json),
            Err(FormatError::InvalidFormat { .. })
        ));
    }
}
