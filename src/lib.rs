//! VOT annotation format converter
//!
//! Imports and exports object-tracking annotations in the VOT (Visual Object
//! Tracking challenge) ZIP layout: per-frame ground-truth rectangles,
//! attribute tag files and sequence descriptors.

pub mod config;
pub mod format;
pub mod model;

pub use config::{LogLevel, VotConfig};
pub use format::{
    AnnotationFormat, AnnotationSink, ExportOptions, FormatError, FormatRegistry, FrameSource,
    ImportOptions, TrackingTask,
};
