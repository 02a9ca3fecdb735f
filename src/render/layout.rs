//! Card geometry, computed before any markup is written.
//!
//! The stats panel is sized from an estimate of its text width (a fixed
//! average glyph width), not from real text measurement.

use super::fields::{FieldConfig, CHAR_WIDTH};
use crate::processing::{StatGroup, StatKey, SummaryStats};

pub const LEFT_MARGIN: u32 = 20;
pub const TOP_MARGIN: u32 = 20;
pub const TABLE_PADDING: u32 = 40;
pub const TITLE_HEIGHT: u32 = 50;
pub const HEADER_HEIGHT: u32 = 40;
pub const ROW_HEIGHT: u32 = 35;
pub const BOTTOM_PADDING: u32 = 40;

pub const STATS_MIN_WIDTH: u32 = 400;
pub const STATS_ROW_HEIGHT: u32 = 25;
pub const STATS_PADDING: u32 = 20;
pub const STATS_MARGIN: u32 = 10;
pub const STATS_TEXT_PADDING: u32 = 80;
pub const STAT_SEPARATOR: &str = "   |   ";

/// Stats panel: one row of PR-scope stats and/or one of repo-scope stats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPanel {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<Vec<StatKey>>,
}

/// Every position and size the renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub fields: Vec<&'static FieldConfig>,
    /// Sum of column widths plus horizontal padding
    pub table_width: u32,
    pub stats: Option<StatsPanel>,
    pub width: u32,
    pub height: u32,
    pub row_count: usize,
    /// Left edge of the first column
    pub table_x: f64,
    pub title_y: u32,
    pub stats_y: u32,
    pub header_y: u32,
    pub body_y: u32,
}

impl CardLayout {
    /// Width of the drawn table (columns only)
    pub fn columns_width(&self) -> u32 {
        self.table_width - TABLE_PADDING
    }

    /// y of the top of body row `index`
    pub fn row_y(&self, index: usize) -> u32 {
        self.body_y + index as u32 * ROW_HEIGHT
    }
}

pub fn table_width(fields: &[&FieldConfig]) -> u32 {
    fields.iter().map(|f| f.width).sum::<u32>() + TABLE_PADDING
}

/// Text of one stats row, e.g. "Total PRs: 3   |   Merged PRs: 1"
pub fn stats_row_text(row: &[StatKey], stats: &SummaryStats) -> String {
    row.iter()
        .map(|key| key.text(stats))
        .collect::<Vec<_>>()
        .join(STAT_SEPARATOR)
}

/// Estimated pixel width of a stats row
pub fn estimate_text_width(text: &str) -> u32 {
    text.chars().count() as u32 * CHAR_WIDTH + STATS_TEXT_PADDING
}

/// Split selected stats into their rows; empty groups produce no row
pub fn stats_rows(selected: &[StatKey]) -> Vec<Vec<StatKey>> {
    let (pr_scope, repo_scope): (Vec<StatKey>, Vec<StatKey>) = selected
        .iter()
        .copied()
        .partition(|key| key.group() == StatGroup::PrScope);

    [pr_scope, repo_scope]
        .into_iter()
        .filter(|row| !row.is_empty())
        .collect()
}

/// Size the stats panel; `None` when nothing is selected
pub fn stats_panel(
    selected: &[StatKey],
    stats: &SummaryStats,
    table_width: u32,
) -> Option<StatsPanel> {
    let rows = stats_rows(selected);
    if rows.is_empty() {
        return None;
    }

    let widest = rows
        .iter()
        .map(|row| estimate_text_width(&stats_row_text(row, stats)))
        .max()
        .unwrap_or(0);
    let required = widest.max(STATS_MIN_WIDTH);

    Some(StatsPanel {
        width: required.max(table_width),
        height: rows.len() as u32 * STATS_ROW_HEIGHT + STATS_PADDING,
        rows,
    })
}

pub fn compute_layout(
    fields: Vec<&'static FieldConfig>,
    selected_stats: &[StatKey],
    stats: &SummaryStats,
    row_count: usize,
) -> CardLayout {
    let table_width = table_width(&fields);
    let panel = stats_panel(selected_stats, stats, table_width);

    let (stats_height, stats_margin) = match &panel {
        Some(p) => (p.height, STATS_MARGIN),
        None => (0, 0),
    };
    let width = panel.as_ref().map_or(table_width, |p| p.width);
    let height = TITLE_HEIGHT
        + stats_height
        + stats_margin
        + HEADER_HEIGHT
        + row_count as u32 * ROW_HEIGHT
        + BOTTOM_PADDING;

    // Centered when the stats panel is wider than the table
    let table_x = f64::from(LEFT_MARGIN) + f64::from(width - table_width) / 2.0;

    let title_y = TOP_MARGIN;
    let stats_y = title_y + TITLE_HEIGHT;
    let header_y = stats_y + stats_height + stats_margin;

    CardLayout {
        fields,
        table_width,
        stats: panel,
        width,
        height,
        row_count,
        table_x,
        title_y,
        stats_y,
        header_y,
        body_y: header_y + HEADER_HEIGHT,
    }
}
