//! Standard VOT sequence attributes and their short codes.

/// Boolean per-frame attributes defined by the VOT/LaSOT labelling scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackingAttribute {
    AppearanceChange,
    AspectRatioChange,
    BackgroundClutter,
    CameraMotion,
    FastMotion,
    FullOcclusion,
    IlluminationVariation,
    LowResolution,
    MotionBlur,
    OutOfView,
    PartialOcclusion,
    ScaleVariation,
    SimilarObjects,
}

impl TrackingAttribute {
    /// Get all attributes in name order.
    pub fn all() -> &'static [TrackingAttribute] {
        &[
            TrackingAttribute::AppearanceChange,
            TrackingAttribute::AspectRatioChange,
            TrackingAttribute::BackgroundClutter,
            TrackingAttribute::CameraMotion,
            TrackingAttribute::FastMotion,
            TrackingAttribute::FullOcclusion,
            TrackingAttribute::IlluminationVariation,
            TrackingAttribute::LowResolution,
            TrackingAttribute::MotionBlur,
            TrackingAttribute::OutOfView,
            TrackingAttribute::PartialOcclusion,
            TrackingAttribute::ScaleVariation,
            TrackingAttribute::SimilarObjects,
        ]
    }

    /// Attribute name as used for `.tag` file stems and shape attributes.
    pub const fn name(self) -> &'static str {
        match self {
            TrackingAttribute::AppearanceChange => "appearance_change",
            TrackingAttribute::AspectRatioChange => "aspect_ratio_change",
            TrackingAttribute::BackgroundClutter => "background_clutter",
            TrackingAttribute::CameraMotion => "camera_motion",
            TrackingAttribute::FastMotion => "fast_motion",
            TrackingAttribute::FullOcclusion => "full_occlusion",
            TrackingAttribute::IlluminationVariation => "illumination_variation",
            TrackingAttribute::LowResolution => "low_resolution",
            TrackingAttribute::MotionBlur => "motion_blur",
            TrackingAttribute::OutOfView => "out_of_view",
            TrackingAttribute::PartialOcclusion => "partial_occlusion",
            TrackingAttribute::ScaleVariation => "scale_variation",
            TrackingAttribute::SimilarObjects => "similar_objects",
        }
    }

    /// Abbreviation written to the `attributes` key of `info.txt`.
    pub const fn code(self) -> &'static str {
        match self {
            TrackingAttribute::AppearanceChange => "APC",
            TrackingAttribute::AspectRatioChange => "ARC",
            TrackingAttribute::BackgroundClutter => "BC",
            TrackingAttribute::CameraMotion => "CM",
            TrackingAttribute::FastMotion => "FM",
            TrackingAttribute::FullOcclusion => "FOC",
            TrackingAttribute::IlluminationVariation => "IV",
            TrackingAttribute::LowResolution => "LR",
            TrackingAttribute::MotionBlur => "MB",
            TrackingAttribute::OutOfView => "OV",
            TrackingAttribute::PartialOcclusion => "POC",
            TrackingAttribute::ScaleVariation => "SV",
            TrackingAttribute::SimilarObjects => "SOB",
        }
    }

    /// Find the attribute with the given name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|a| a.name() == name)
    }

    /// Find the attribute with the given short code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|a| a.code() == code)
    }
}

/// Short code for an attribute name; unknown names are kept as-is.
pub fn abbreviate(name: &str) -> &str {
    TrackingAttribute::from_name(name).map_or(name, |a| a.code())
}

/// Full attribute name for a short code; unknown codes are kept as-is.
pub fn expand(code: &str) -> &str {
    TrackingAttribute::from_code(code).map_or(code, |a| a.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(abbreviate("full_occlusion"), "FOC");
        assert_eq!(abbreviate("out_of_view"), "OV");
        assert_eq!(abbreviate("illumination_variation"), "IV");
        assert_eq!(expand("POC"), "partial_occlusion");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(abbreviate("glare"), "glare");
        assert_eq!(expand("XYZ"), "XYZ");
    }

    #[test]
    fn test_table_is_bijective() {
        for attr in TrackingAttribute::all() {
            assert_eq!(TrackingAttribute::from_name(attr.name()), Some(*attr));
            assert_eq!(TrackingAttribute::from_code(attr.code()), Some(*attr));
        }
        let mut codes: Vec<_> = TrackingAttribute::all().iter().map(|a| a.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), TrackingAttribute::all().len());
    }
}
