//! VOT (Visual Object Tracking challenge) format implementation.
//!
//! A VOT sequence is a ZIP archive containing:
//!
//! - `groundtruth.txt`: one rectangle per line, or an all-`nan` line when the
//!   target is not visible
//! - `<attribute>.tag`: one `0`/`1` line per ground-truth line, for every
//!   attribute that is set somewhere in the sequence
//! - `info.txt`: `key=value` sequence metadata
//! - `sequence`: channel template, start frame, format, fps and name
//! - `data/NNNNNNNN.png`: frame images (optional)

mod groundtruth;
mod metadata;
mod tags;

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageFormat};

use crate::format::archive::{
    ArchiveBuilder, ArchiveContents, file_name, file_stem, parent_dir,
};
use crate::format::error::FormatError;
use crate::format::traits::{
    AnnotationFormat, AnnotationSink, ExportOptions, ExportResult, FormatDescriptor,
    FormatWarning, FrameSource, ImportOptions, ImportResult, ReadSeek,
};
use crate::model::{SequenceInfo, ShapeAttribute, TrackedShape};

pub use groundtruth::{ABSENT_LINE, GROUNDTRUTH_FILE, format_line, parse_line};
pub use metadata::{
    CHANNEL_TEMPLATE, INFO_FILE, InfoFile, SEQUENCE_FILE, SequenceFile, image_entry_name,
};
pub use tags::{TAG_EXTENSION, TagAccumulator, TagSeries, Visibility, parse_tag_file};

/// Registration tuple of the VOT format.
pub const VOT_DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    name: "VOT",
    version: "1.0",
    extension: "ZIP",
};

/// VOT ZIP format.
///
/// Supports:
/// - One rectangle per ground-truth line
/// - Boolean per-frame attributes as tag files
/// - Target absence via `full_occlusion` / `out_of_view`
/// - Optional PNG frame images on export
///
/// Does not support:
/// - Multiple labels (every imported shape gets the same label)
/// - Rotated rectangles or polygons
pub struct VotFormat;

impl AnnotationFormat for VotFormat {
    fn id(&self) -> &'static str {
        "vot"
    }

    fn descriptor(&self) -> FormatDescriptor {
        VOT_DESCRIPTOR
    }

    fn import(
        &self,
        reader: &mut dyn ReadSeek,
        sink: &mut dyn AnnotationSink,
        options: &ImportOptions,
    ) -> Result<ImportResult, FormatError> {
        log::info!("Importing VOT archive");

        let contents = ArchiveContents::read(reader, is_vot_entry)?;
        let (groundtruth_path, groundtruth) = contents
            .find(GROUNDTRUTH_FILE)
            .ok_or_else(|| FormatError::missing_file(GROUNDTRUTH_FILE))?;
        let sequence_dir = parent_dir(groundtruth_path);

        let mut result = ImportResult::new();

        let boxes = groundtruth
            .trim_end()
            .lines()
            .enumerate()
            .map(|(idx, line)| parse_line(line.trim(), idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        // Only files next to groundtruth.txt belong to the sequence
        let tags: Vec<(String, Vec<bool>)> = contents
            .with_extension(TAG_EXTENSION)
            .filter(|(path, _)| parent_dir(path) == sequence_dir)
            .map(|(path, text)| (file_stem(path).to_string(), parse_tag_file(text)))
            .collect();

        if let Some(info) = contents.get(&sibling_path(sequence_dir, INFO_FILE)) {
            let info = InfoFile::parse(info)?;
            check_listed_attributes(&info, &tags, &mut result);

            let sequence = rebase_sequence(info.to_sequence_info(), boxes.len());
            log::debug!("Sequence '{}' from {}", sequence.name, INFO_FILE);
            sink.set_sequence(sequence.clone());
            result.sequence = Some(sequence);
        }

        for (name, flags) in &tags {
            if flags.len() == boxes.len() {
                continue;
            }
            let file = format!("{name}.{TAG_EXTENSION}");
            if options.strict_line_counts {
                return Err(FormatError::LineCountMismatch {
                    file,
                    expected: boxes.len(),
                    found: flags.len(),
                });
            }
            log::warn!(
                "{} has {} lines but {} has {}; missing frames read as 0",
                file,
                flags.len(),
                GROUNDTRUTH_FILE,
                boxes.len()
            );
            result.add_warning(
                FormatWarning::warning(format!(
                    "{} lines, expected {}",
                    flags.len(),
                    boxes.len()
                ))
                .with_file(file),
            );
        }

        for (idx, bbox) in boxes.into_iter().enumerate() {
            let mut shape = TrackedShape::new(idx as u32, bbox).with_label(options.label.as_str());
            shape.attributes = tags
                .iter()
                .map(|(name, flags)| {
                    ShapeAttribute::new(name.as_str(), flags.get(idx).copied().unwrap_or(false))
                })
                .collect();
            sink.add_shape(shape)?;
            result.frames_imported += 1;
        }

        result.attributes = tags.into_iter().map(|(name, _)| name).collect();

        log::info!(
            "Imported {} frames with {} attributes ({} warnings)",
            result.frames_imported,
            result.attributes.len(),
            result.warnings.len()
        );

        Ok(result)
    }

    fn export(
        &self,
        writer: &mut dyn Write,
        source: &dyn FrameSource,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        let sequence = source.sequence();
        log::info!(
            "Exporting VOT sequence '{}' ({} frames)",
            sequence.name,
            sequence.frame_count
        );

        let mut archive = ArchiveBuilder::new();
        let mut tags = TagAccumulator::new();
        let mut groundtruth = Vec::new();
        let mut result = ExportResult::new();

        for frame in source.frames() {
            for shape in &frame.shapes {
                let visibility = tags.push(&shape.attributes);
                groundtruth.push(if visibility.is_visible() {
                    format_line(&shape.bbox)
                } else {
                    ABSENT_LINE.to_string()
                });
            }

            if options.include_images {
                match &frame.image {
                    Some(image) => {
                        let png = encode_png(image)?;
                        archive.add_bytes(&image_entry_name(frame.frame), &png)?;
                        result.images_exported += 1;
                    }
                    None => {
                        log::warn!("No image data for frame {}", frame.frame);
                        result.add_warning(FormatWarning::warning(format!(
                            "Skipped image for frame {}: no image data",
                            frame.frame
                        )));
                    }
                }
            }

            result.frames_exported += 1;
        }

        let series = tags.finish();
        for s in &series {
            archive.add_text(&s.file_name(), &s.to_file_content())?;
        }
        let attributes: Vec<String> = series.into_iter().map(|s| s.name).collect();

        archive.add_text(GROUNDTRUTH_FILE, &groundtruth.join("\n"))?;

        let defaults = &options.config.sequence;
        let info = InfoFile::new(&sequence, &attributes, defaults);
        archive.add_text(INFO_FILE, &info.to_file_content())?;
        archive.add_text(
            SEQUENCE_FILE,
            &SequenceFile::new(&sequence, defaults).to_file_content(),
        )?;

        let (bytes, files) = archive.finish()?;
        writer.write_all(&bytes)?;
        writer.flush()?;

        result.shapes_exported = groundtruth.len();
        result.attributes = attributes;
        result.files_created = files;

        log::info!(
            "Exported {} frames with {} shapes, {} images ({} warnings)",
            result.frames_exported,
            result.shapes_exported,
            result.images_exported,
            result.warnings.len()
        );

        Ok(result)
    }
}

/// Entries the importer reads; images and unknown files are left in the archive.
fn is_vot_entry(name: &str) -> bool {
    let name = file_name(name);
    name == GROUNDTRUTH_FILE
        || name == INFO_FILE
        || name.ends_with(&format!(".{TAG_EXTENSION}"))
}

/// Path of `name` inside `dir`, where an empty `dir` is the archive root.
fn sibling_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Imported frames are numbered by ground-truth line, so the range read from
/// `info.txt` is moved to start at frame 0.
fn rebase_sequence(sequence: SequenceInfo, lines: usize) -> SequenceInfo {
    let frame_count = u32::try_from(lines).unwrap_or(u32::MAX);
    if sequence.start_frame != 0 {
        log::debug!(
            "Rebasing frames {}..={} of '{}' to start at 0",
            sequence.start_frame,
            sequence.stop_frame,
            sequence.name
        );
    }
    SequenceInfo {
        frame_count,
        ..sequence
    }
    .with_range(0, frame_count.saturating_sub(1))
}

/// Warn when the `attributes` list of `info.txt` disagrees with the tag files.
fn check_listed_attributes(
    info: &InfoFile,
    tags: &[(String, Vec<bool>)],
    result: &mut ImportResult,
) {
    let listed = info.attribute_names();

    for name in listed.iter().filter(|name| !tags.iter().any(|(tag, _)| tag == *name)) {
        log::warn!("{} lists '{}' but has no tag file for it", INFO_FILE, name);
        result.add_warning(
            FormatWarning::warning(format!("attribute '{name}' has no tag file"))
                .with_file(INFO_FILE),
        );
    }

    for (name, _) in tags.iter().filter(|(tag, _)| !listed.contains(tag)) {
        log::warn!("{}.{} is not listed in {}", name, TAG_EXTENSION, INFO_FILE);
        result.add_warning(
            FormatWarning::warning(format!("attribute '{name}' is not listed"))
                .with_file(INFO_FILE),
        );
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, FormatError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_vot_entry() {
        assert!(is_vot_entry("groundtruth.txt"));
        assert!(is_vot_entry("ball/groundtruth.txt"));
        assert!(is_vot_entry("info.txt"));
        assert!(is_vot_entry("occlusion.tag"));
        assert!(!is_vot_entry("data/00000001.png"));
        assert!(!is_vot_entry("sequence"));
        assert!(!is_vot_entry("readme.txt"));
    }

    #[test]
    fn test_format_metadata() {
        let format = VotFormat;
        assert_eq!(format.id(), "vot");
        assert_eq!(format.descriptor().name, "VOT");
        assert_eq!(format.descriptor().version, "1.0");
        assert_eq!(format.descriptor().extension, "ZIP");
    }
}
