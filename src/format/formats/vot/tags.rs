//! Per-frame attribute tag files (`<attribute>.tag`).

use std::collections::BTreeMap;

use crate::model::{ShapeAttribute, TrackingAttribute};

/// Extension of attribute tag files.
pub const TAG_EXTENSION: &str = "tag";

/// Visibility of the target on one ground-truth line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub full_occlusion: bool,
    pub out_of_view: bool,
}

impl Visibility {
    /// Whether the rectangle should be written for this line.
    pub fn is_visible(&self) -> bool {
        !self.full_occlusion && !self.out_of_view
    }
}

/// One attribute's flags, one per ground-truth line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSeries {
    pub name: String,
    pub flags: Vec<bool>,
}

impl TagSeries {
    /// Archive entry name of this series.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, TAG_EXTENSION)
    }

    /// File content: one `0`/`1` per line.
    pub fn to_file_content(&self) -> String {
        self.flags
            .iter()
            .map(|&flag| if flag { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the attribute is set on at least one line.
    pub fn is_ever_set(&self) -> bool {
        self.flags.iter().any(|&flag| flag)
    }
}

/// Collects attribute flags line by line while ground truth is written.
///
/// Every series always has exactly one flag per pushed line: an attribute
/// first seen late is back-filled with `false`, and an attribute missing from
/// a shape gets `false` for that line.
#[derive(Debug, Default)]
pub struct TagAccumulator {
    series: BTreeMap<String, Vec<bool>>,
    lines: usize,
}

impl TagAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the attributes of the next ground-truth line.
    pub fn push(&mut self, attributes: &[ShapeAttribute]) -> Visibility {
        let lines = self.lines;
        for attr in attributes {
            self.series
                .entry(attr.name.clone())
                .or_insert_with(|| vec![false; lines]);
        }

        for (name, flags) in &mut self.series {
            let set = attributes.iter().any(|a| a.name == *name && a.value);
            flags.push(set);
        }
        self.lines += 1;

        Visibility {
            full_occlusion: self.last(TrackingAttribute::FullOcclusion),
            out_of_view: self.last(TrackingAttribute::OutOfView),
        }
    }

    /// Most recent flag of `attribute`; `false` if it was never seen.
    pub fn last(&self, attribute: TrackingAttribute) -> bool {
        self.series
            .get(attribute.name())
            .and_then(|flags| flags.last())
            .copied()
            .unwrap_or(false)
    }

    /// Number of lines pushed.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Series that are set on at least one line, sorted by name.
    pub fn finish(self) -> Vec<TagSeries> {
        self.series
            .into_iter()
            .map(|(name, flags)| TagSeries { name, flags })
            .filter(|series| {
                let keep = series.is_ever_set();
                if !keep {
                    log::debug!("Dropping attribute '{}': never set", series.name);
                }
                keep
            })
            .collect()
    }
}

/// Parse a tag file: a line is set iff it reads `1`.
pub fn parse_tag_file(text: &str) -> Vec<bool> {
    text.lines().map(|line| line.trim() == "1").collect()
}
