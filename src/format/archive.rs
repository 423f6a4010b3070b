//! ZIP archive reading and writing.
//!
//! Import reads only the text entries a format asks for into memory; export
//! stages the whole archive in a memory buffer so the caller's stream only
//! ever receives a complete archive.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::format::error::FormatError;

/// Check if an entry should be ignored (macOS metadata, hidden files).
fn is_skipped_entry(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("__macosx") || lower.contains("/.") || lower.starts_with('.')
}

/// Last path component of an archive entry name.
pub fn file_name(entry: &str) -> &str {
    entry.rsplit('/').next().unwrap_or(entry)
}

/// File name of an archive entry without its extension.
pub fn file_stem(entry: &str) -> &str {
    let name = file_name(entry);
    name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name)
}

/// Directory part of an archive entry name, empty at the archive root.
pub fn parent_dir(entry: &str) -> &str {
    entry.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Text entries extracted from an archive, keyed by entry path.
#[derive(Debug, Default)]
pub struct ArchiveContents {
    entries: BTreeMap<String, String>,
}

impl ArchiveContents {
    /// Read every non-directory entry accepted by `wanted` as UTF-8 text.
    pub fn read<R: Read + Seek>(
        reader: R,
        wanted: impl Fn(&str) -> bool,
    ) -> Result<Self, FormatError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = BTreeMap::new();

        log::debug!("ZIP contains {} entries", archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            if file.is_dir() {
                log::trace!("Skipping directory: {}", name);
                continue;
            }

            if is_skipped_entry(&name) || !wanted(&name) {
                log::trace!("Skipping entry: {}", name);
                continue;
            }

            let mut text = String::with_capacity(file.size() as usize);
            file.read_to_string(&mut text)?;

            log::debug!("Extracted '{}' ({} bytes)", name, text.len());
            entries.insert(name, text);
        }

        Ok(Self { entries })
    }

    /// Find the first entry (in path order) whose file name is `name`.
    pub fn find(&self, name: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find(|(path, _)| file_name(path) == name)
            .map(|(path, text)| (path.as_str(), text.as_str()))
    }

    /// Entry stored under exactly `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// All entries whose file name ends with `.{extension}`, in path order.
    pub fn with_extension<'a>(
        &'a self,
        extension: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.entries
            .iter()
            .filter(move |(path, _)| {
                file_name(path)
                    .rsplit_once('.')
                    .is_some_and(|(stem, ext)| !stem.is_empty() && ext == extension)
            })
            .map(|(path, text)| (path.as_str(), text.as_str()))
    }
}

/// Builds a deflate-compressed archive in memory.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    files: Vec<String>,
}

impl ArchiveBuilder {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            files: Vec::new(),
        }
    }

    /// Add a text file.
    pub fn add_text(&mut self, name: &str, text: &str) -> Result<(), FormatError> {
        self.add_bytes(name, text.as_bytes())
    }

    /// Add a binary file.
    pub fn add_bytes(&mut self, name: &str, data: &[u8]) -> Result<(), FormatError> {
        self.writer.start_file(name, self.options)?;
        self.writer.write_all(data)?;
        log::debug!("Added '{}' ({} bytes)", name, data.len());
        self.files.push(name.to_string());
        Ok(())
    }

    /// Finish the archive and return its bytes with the added file names.
    pub fn finish(self) -> Result<(Vec<u8>, Vec<String>), FormatError> {
        let cursor = self.writer.finish()?;
        Ok((cursor.into_inner(), self.files))
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_skipped_entry() {
        assert!(!is_skipped_entry("groundtruth.txt"));
        assert!(!is_skipped_entry("seq/occlusion.tag"));
        assert!(is_skipped_entry("__MACOSX/._groundtruth.txt"));
        assert!(is_skipped_entry(".hidden.tag"));
        assert!(is_skipped_entry("seq/.hidden.tag"));
    }

    #[test]
    fn test_file_name_and_stem() {
        assert_eq!(file_name("a/b/motion_blur.tag"), "motion_blur.tag");
        assert_eq!(file_stem("a/b/motion_blur.tag"), "motion_blur");
        assert_eq!(file_stem("groundtruth.txt"), "groundtruth");
        assert_eq!(file_stem("sequence"), "sequence");
        assert_eq!(parent_dir("a/b/motion_blur.tag"), "a/b");
        assert_eq!(parent_dir("groundtruth.txt"), "");
    }

    #[test]
    fn test_build_then_read() {
        let mut builder = ArchiveBuilder::new();
        builder.add_text("groundtruth.txt", "1,2,3,4,5,6,7,8").unwrap();
        builder.add_text("ball/fast_motion.tag", "0\n1").unwrap();
        builder.add_bytes("data/00000001.png", &[0x89, 0x50]).unwrap();
        let (bytes, files) = builder.finish().unwrap();
        assert_eq!(files.len(), 3);

        let contents = ArchiveContents::read(Cursor::new(bytes), |name| {
            name.ends_with(".txt") || name.ends_with(".tag")
        })
        .unwrap();

        assert!(contents.find("00000001.png").is_none());
        let (path, text) = contents.find("groundtruth.txt").unwrap();
        assert_eq!(path, "groundtruth.txt");
        assert_eq!(text, "1,2,3,4,5,6,7,8");

        let tags: Vec<_> = contents.with_extension("tag").collect();
        assert_eq!(tags, vec![("ball/fast_motion.tag", "0\n1")]);
        assert_eq!(contents.get("ball/fast_motion.tag"), Some("0\n1"));
        assert_eq!(contents.get("fast_motion.tag"), None);
    }

    #[test]
    fn test_rejects_non_zip() {
        let result = ArchiveContents::read(Cursor::new(b"not a zip".to_vec()), |_| true);
        assert!(matches!(result, Err(FormatError::Zip(_))));
    }
}
