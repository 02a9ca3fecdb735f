//! SVG card rendering: column catalog, geometry, palettes and markup.

pub mod error_card;
pub mod fields;
pub mod format;
pub mod icons;
pub mod layout;
pub mod svg;
pub mod theme;

pub use error_card::render_error_card;
pub use fields::{parse_fields, Cell, FieldConfig, FieldKey, TableRow};
pub use layout::{compute_layout, CardLayout, StatsPanel};
pub use svg::{render_card, render_document};
pub use theme::Theme;
