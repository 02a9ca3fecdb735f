//! Render an SVG card summarizing a GitHub user's pull request contributions.
//!
//! Raw records flow through [`processing`] (normalize, filter, sort,
//! aggregate, stats) into [`render`], which lays out and emits the card.
//! [`github`] supplies the records, live or from a saved file.

pub mod card;
pub mod config;
pub mod error;
pub mod fetch;
pub mod github;
pub mod output;
pub mod params;
pub mod processing;
pub mod render;

pub use card::{build_card, RenderedCard};
pub use error::{CardError, Result};
pub use params::{CardParams, RawParams, ThemeName, ViewMode};
