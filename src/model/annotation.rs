//! Tracking annotation types and data structures.

use serde::{Deserialize, Serialize};

/// Label given to every shape created by an importer unless overridden.
pub const DEFAULT_LABEL: &str = "object";

/// Axis-aligned rectangle defined by its top-left and bottom-right corners
/// (in image coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xtl: f32,
    pub ytl: f32,
    pub xbr: f32,
    pub ybr: f32,
}

impl BoundingBox {
    /// Create a box from its two corners.
    pub fn new(xtl: f32, ytl: f32, xbr: f32, ybr: f32) -> Self {
        Self { xtl, ytl, xbr, ybr }
    }

    /// The all-zero box used for frames where the target is not visible.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Width of the box (may be zero for an absent target).
    pub fn width(&self) -> f32 {
        self.xbr - self.xtl
    }

    /// Height of the box (may be zero for an absent target).
    pub fn height(&self) -> f32 {
        self.ybr - self.ytl
    }

    /// Whether the box has no area and so carries no usable rectangle.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Corner coordinates as `[xtl, ytl, xbr, ybr]`.
    pub fn points(&self) -> [f32; 4] {
        [self.xtl, self.ytl, self.xbr, self.ybr]
    }
}

/// A named boolean attribute attached to a shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeAttribute {
    pub name: String,
    pub value: bool,
}

impl ShapeAttribute {
    pub fn new(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A rectangle tracked on a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedShape {
    /// 0-based frame index.
    pub frame: u32,

    /// Label name of the tracked object.
    pub label: String,

    /// The rectangle.
    pub bbox: BoundingBox,

    /// Attributes in the order they were attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ShapeAttribute>,
}

impl TrackedShape {
    /// Create a shape with the default label and no attributes.
    pub fn new(frame: u32, bbox: BoundingBox) -> Self {
        Self {
            frame,
            label: DEFAULT_LABEL.to_string(),
            bbox,
            attributes: Vec::new(),
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: bool) -> Self {
        self.attributes.push(ShapeAttribute::new(name, value));
        self
    }

    /// Look up an attribute value by name.
    ///
    /// Returns `None` when the shape does not carry the attribute at all.
    pub fn attribute(&self, name: &str) -> Option<bool> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value)
    }
}
