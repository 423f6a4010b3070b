//! Trait definitions for annotation format implementations.

use std::io::{Read, Seek, Write};

use crate::config::VotConfig;
use crate::format::error::FormatError;
use crate::model::{DEFAULT_LABEL, SequenceInfo, TrackedShape};

/// Name, version and archive extension under which a format is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    pub extension: &'static str,
}

impl std::fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.extension)
    }
}

/// A readable, seekable byte stream (zip archives need random access).
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Receives the shapes produced by an importer.
///
/// Implemented by the host that owns the annotation task.
pub trait AnnotationSink {
    /// Called once, before any shape, when the archive carries sequence metadata.
    fn set_sequence(&mut self, _sequence: SequenceInfo) {}

    /// Add one shape.
    fn add_shape(&mut self, shape: TrackedShape) -> Result<(), FormatError>;
}

/// All annotations of a single frame, with optional image data.
#[derive(Debug, Clone)]
pub struct FrameAnnotations {
    /// 0-based frame index.
    pub frame: u32,

    /// Shapes on this frame, in output order.
    pub shapes: Vec<TrackedShape>,

    /// Decoded frame image, if the host has one.
    pub image: Option<image::DynamicImage>,
}

impl FrameAnnotations {
    /// Create a frame without image data.
    pub fn new(frame: u32, shapes: Vec<TrackedShape>) -> Self {
        Self {
            frame,
            shapes,
            image: None,
        }
    }

    /// Attach image data.
    pub fn with_image(mut self, image: image::DynamicImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Yields the frames an exporter serializes.
///
/// Implemented by the host's annotation extraction adapter.
pub trait FrameSource {
    /// Sequence-level metadata.
    fn sequence(&self) -> SequenceInfo;

    /// Frames in ascending order.
    fn frames(&self) -> Box<dyn Iterator<Item = FrameAnnotations> + '_>;
}

/// Trait for archive-based annotation format implementations.
pub trait AnnotationFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "vot").
    fn id(&self) -> &'static str;

    /// Registration tuple (name, version, extension).
    fn descriptor(&self) -> FormatDescriptor;

    /// Read an archive and hand every shape to `sink`.
    fn import(
        &self,
        reader: &mut dyn ReadSeek,
        sink: &mut dyn AnnotationSink,
        options: &ImportOptions,
    ) -> Result<ImportResult, FormatError>;

    /// Serialize the frames of `source` into an archive written to `writer`.
    ///
    /// Nothing is written to `writer` unless the whole archive was built.
    fn export(
        &self,
        writer: &mut dyn Write,
        source: &dyn FrameSource,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError>;
}

/// Options for export operations.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Whether to encode frame images into the archive.
    pub include_images: bool,

    /// Static metadata written into descriptor files.
    pub config: VotConfig,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include frame images in the archive.
    pub fn include_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Use the given configuration for static metadata.
    pub fn config(mut self, config: VotConfig) -> Self {
        self.config = config;
        self
    }
}

/// Options for import operations.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Label assigned to every imported shape.
    pub label: String,

    /// Fail when a per-frame file and the ground truth differ in length.
    pub strict_line_counts: bool,
}

impl ImportOptions {
    /// Create new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label of imported shapes.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Reject archives whose tag files don't match the ground truth length.
    pub fn strict_line_counts(mut self, strict: bool) -> Self {
        self.strict_line_counts = strict;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            strict_line_counts: false,
        }
    }
}

/// Result of an import operation.
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Number of ground-truth frames imported.
    pub frames_imported: usize,

    /// Attribute names found in the archive, sorted.
    pub attributes: Vec<String>,

    /// Sequence metadata, if the archive had any.
    pub sequence: Option<SequenceInfo>,

    /// Warnings generated during import.
    pub warnings: Vec<FormatWarning>,
}

impl ImportResult {
    /// Create a new import result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of frames exported.
    pub frames_exported: usize,

    /// Number of ground-truth lines written.
    pub shapes_exported: usize,

    /// Number of frame images encoded.
    pub images_exported: usize,

    /// Attributes written as tag files, sorted.
    pub attributes: Vec<String>,

    /// Warnings generated during export (e.g., frames without images).
    pub warnings: Vec<FormatWarning>,

    /// Archive entries created, in write order.
    pub files_created: Vec<String>,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Warning generated during format conversion.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Archive entry this warning relates to (if applicable).
    pub file: Option<String>,

    /// Human-readable warning message.
    pub message: String,

    /// Severity level of the warning.
    pub severity: WarningSeverity,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            file: None,
            message: message.into(),
            severity,
        }
    }

    /// Create an info-level warning.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Info)
    }

    /// Create a warning-level warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }

    /// Set the archive entry this warning relates to.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Severity level for format warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// Informational message, not a problem.
    Info,
    /// Warning that something was skipped or modified.
    Warning,
}
