//! Annotation format import/export system.
//!
//! Formats convert between archives and the tracking model through two
//! seams the host implements: an [`AnnotationSink`] that receives imported
//! shapes and a [`FrameSource`] that yields the frames to export.
//! [`TrackingTask`] implements both and is used when no host model exists.
//!
//! ## Supported Formats
//!
//! - **VOT 1.0 (ZIP)**: ground truth, attribute tags and sequence metadata
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vot_format::format::{FormatRegistry, ImportOptions, TrackingTask};
//!
//! let registry = FormatRegistry::new();
//! let format = registry.get("vot").unwrap();
//!
//! let mut task = TrackingTask::default();
//! let mut file = std::fs::File::open("ball.zip")?;
//! format.import(&mut file, &mut task, &ImportOptions::default())?;
//! ```

mod archive;
mod error;
pub mod formats;
mod registry;
mod task;
mod traits;

pub use error::FormatError;
pub use registry::FormatRegistry;
pub use task::{FrameEntry, TrackingTask};
pub use traits::{
    AnnotationFormat, AnnotationSink, ExportOptions, ExportResult, FormatDescriptor,
    FormatWarning, FrameAnnotations, FrameSource, ImportOptions, ImportResult, ReadSeek,
    WarningSeverity,
};
