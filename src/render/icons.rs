//! Inline status glyphs drawn in the status column.

use crate::processing::PrStatus;

/// Rendered glyph size in pixels
pub const ICON_SIZE: u32 = 14;

const MERGED: &str = concat!(
    r##"<svg width="14" height="14" viewBox="0 0 16 16" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<circle cx="8" cy="8" r="8" fill="#8957e5"/>"##,
    r##"<path d="M5.5 3.5v9M5.5 6c0 2.5 2 3.5 5 3.5" stroke="#ffffff" stroke-width="1.5" fill="none" stroke-linecap="round"/>"##,
    r##"<circle cx="10.5" cy="9.5" r="1.4" fill="#ffffff"/>"##,
    "</svg>"
);

const OPEN: &str = concat!(
    r##"<svg width="14" height="14" viewBox="0 0 16 16" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<circle cx="8" cy="8" r="8" fill="#238636"/>"##,
    r##"<path d="M5 4v8M11 7v5M8.5 4.5H11v2.5" stroke="#ffffff" stroke-width="1.5" fill="none" stroke-linecap="round"/>"##,
    "</svg>"
);

const DRAFT: &str = concat!(
    r##"<svg width="14" height="14" viewBox="0 0 16 16" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<circle cx="8" cy="8" r="8" fill="#6e7681"/>"##,
    r##"<path d="M5 4v8M11 4.5v1.5M11 8v1.5M11 11.5v0.5" stroke="#ffffff" stroke-width="1.5" fill="none" stroke-linecap="round"/>"##,
    "</svg>"
);

const CLOSED: &str = concat!(
    r##"<svg width="14" height="14" viewBox="0 0 16 16" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<circle cx="8" cy="8" r="8" fill="#da3633"/>"##,
    r##"<path d="M5.5 5.5l5 5M10.5 5.5l-5 5" stroke="#ffffff" stroke-width="1.5" fill="none" stroke-linecap="round"/>"##,
    "</svg>"
);

pub fn status_icon(status: PrStatus) -> &'static str {
    match status {
        PrStatus::Merged => MERGED,
        PrStatus::Open => OPEN,
        PrStatus::Draft => DRAFT,
        PrStatus::Closed => CLOSED,
    }
}
