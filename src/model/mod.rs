//! Data models for tracking annotations.

mod annotation;
mod attribute;
mod sequence;

pub use annotation::{BoundingBox, DEFAULT_LABEL, ShapeAttribute, TrackedShape};
pub use attribute::{TrackingAttribute, abbreviate, expand};
pub use sequence::SequenceInfo;
