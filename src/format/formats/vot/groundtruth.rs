//! `groundtruth.txt` line encoding.
//!
//! Each line holds 8 comma-separated numbers (four x,y pairs). A frame in
//! which the target is not visible is written as eight `nan` values.

use crate::format::error::FormatError;
use crate::model::BoundingBox;

/// Name of the ground-truth file inside the archive.
pub const GROUNDTRUTH_FILE: &str = "groundtruth.txt";

/// Line written for frames where the target is absent, occluded or out of view.
pub const ABSENT_LINE: &str = "nan,nan,nan,nan,nan,nan,nan,nan";

const VALUES_PER_LINE: usize = 8;

/// Parse one ground-truth line into a rectangle.
///
/// The rectangle spans the first and third corner (values 0,1 and 4,5).
/// Lines containing `nan` yield an empty box. `line_number` is 1-based and
/// only used for error reporting.
pub fn parse_line(line: &str, line_number: usize) -> Result<BoundingBox, FormatError> {
    if line.contains("nan") {
        return Ok(BoundingBox::empty());
    }

    let values = line
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FormatError::parse(GROUNDTRUTH_FILE, line_number, e.to_string()))?;

    if values.len() != VALUES_PER_LINE {
        return Err(FormatError::parse(
            GROUNDTRUTH_FILE,
            line_number,
            format!(
                "expected {} values, found {}",
                VALUES_PER_LINE,
                values.len()
            ),
        ));
    }

    Ok(BoundingBox::new(values[0], values[1], values[4], values[5]))
}

/// Format a visible rectangle as a ground-truth line.
///
/// Both corners are written twice (`tl, tl, br, br`), which keeps the
/// bottom-right corner at values 4,5 where [`parse_line`] reads it.
pub fn format_line(bbox: &BoundingBox) -> String {
    let BoundingBox { xtl, ytl, xbr, ybr } = *bbox;
    format!("{xtl},{ytl},{xtl},{ytl},{xbr},{ybr},{xbr},{ybr}")
}
