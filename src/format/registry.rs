//! Format registry for discovering and accessing annotation formats.

use std::collections::HashMap;

use crate::format::formats::VotFormat;
use crate::format::traits::AnnotationFormat;

/// Registry of available annotation formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn AnnotationFormat>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(VotFormat));

        registry
    }

    /// Register a format implementation.
    pub fn register(&mut self, format: Box<dyn AnnotationFormat>) {
        log::debug!("Registering format {}", format.descriptor());
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn AnnotationFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Find a format by its registration tuple (case-insensitive).
    pub fn by_descriptor(
        &self,
        name: &str,
        version: &str,
        extension: &str,
    ) -> Option<&dyn AnnotationFormat> {
        self.formats
            .values()
            .find(|f| {
                let d = f.descriptor();
                d.name.eq_ignore_ascii_case(name)
                    && d.version == version
                    && d.extension.eq_ignore_ascii_case(extension)
            })
            .map(|f| f.as_ref())
    }

    /// Find formats by archive extension (case-insensitive).
    pub fn by_extension(&self, ext: &str) -> Vec<&dyn AnnotationFormat> {
        self.formats
            .values()
            .filter(|f| f.descriptor().extension.eq_ignore_ascii_case(ext))
            .map(|f| f.as_ref())
            .collect()
    }

    /// Get all registered formats.
    pub fn all(&self) -> Vec<&dyn AnnotationFormat> {
        self.formats.values().map(|f| f.as_ref()).collect()
    }

    /// Get all format IDs.
    pub fn ids(&self) -> Vec<&'static str> {
        self.formats.keys().copied().collect()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::new();
        assert!(registry.get("vot").is_some());
        assert!(registry.get("coco").is_none());
        assert_eq!(registry.ids(), vec!["vot"]);
        assert_eq!(registry.all().len(), 1);
    }

    #[test]
    fn test_lookup_by_descriptor() {
        let registry = FormatRegistry::new();
        let format = registry.by_descriptor("VOT", "1.0", "ZIP").unwrap();
        assert_eq!(format.id(), "vot");
        assert!(registry.by_descriptor("vot", "1.0", "zip").is_some());
        assert!(registry.by_descriptor("VOT", "2.0", "ZIP").is_none());
    }

    #[test]
    fn test_lookup_by_extension() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.by_extension("zip").len(), 1);
        assert!(registry.by_extension("json").is_empty());
    }
}
