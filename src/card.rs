//! One call from raw records to a finished card.

use serde::Serialize;

use crate::error::Result;
use crate::github::RawPullRequest;
use crate::params::CardParams;
use crate::processing::{process, ProcessedData};
use crate::render::render_card;

/// Processed data together with its rendered SVG
#[derive(Debug, Clone, Serialize)]
pub struct RenderedCard {
    #[serde(flatten)]
    pub data: ProcessedData,
    #[serde(skip)]
    pub svg: String,
}

/// Normalize, process and render in one pass
pub fn build_card(raw: &[RawPullRequest], params: &CardParams) -> Result<RenderedCard> {
    let data = process(raw, params)?;
    let svg = render_card(&data, params);
    Ok(RenderedCard { data, svg })
}
