//! Unit tests for annotation format implementations.
//!
//! These tests verify archive parsing, serialization, and round-trip
//! conversions through in-memory ZIP archives.


use std::collections::HashMap;
use std::io::{Cursor, Read};

use crate::format::archive::ArchiveBuilder;

/// Build a ZIP archive from (entry name, content) pairs.
pub(super) fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = ArchiveBuilder::new();
    for (name, content) in entries {
        builder.add_text(name, content).expect("Failed to add entry");
    }
    builder.finish().expect("Failed to finish archive").0
}

/// Read every entry of a ZIP archive as raw bytes.
pub(super) fn read_zip(bytes: &[u8]) -> HashMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Not a ZIP archive");
    let mut entries = HashMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("Failed to read entry");
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("Failed to read entry data");
        entries.insert(file.name().to_string(), data);
    }
    entries
}

/// Read a text entry of a ZIP archive.
pub(super) fn zip_text<'a>(entries: &'a HashMap<String, Vec<u8>>, name: &str) -> &'a str {
    let data = entries
        .get(name)
        .unwrap_or_else(|| panic!("Missing entry {name}"));
    std::str::from_utf8(data).expect("Entry is not UTF-8")
}
