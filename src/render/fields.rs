//! Column catalog and the row-value lookup shared by both view shapes.

use super::format::{format_pr_numbers, format_stars, truncate_text};
use crate::params::ViewMode;
use crate::processing::{PrStatus, ProcessedPr, RepoAggregate};

/// Approximate glyph width used to fit text into fixed columns
pub const CHAR_WIDTH: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Repo,
    Stars,
    PrTitle,
    PrNumber,
    Status,
    CreatedDate,
    MergedDate,
    PrNumbers,
    Total,
    Merged,
    Open,
    Draft,
    Closed,
    MergedRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// SVG `text-anchor` value
    pub fn anchor(&self) -> &'static str {
        match self {
            Align::Left => "start",
            Align::Center => "middle",
            Align::Right => "end",
        }
    }

    /// Text x position inside a cell starting at `x`
    pub fn text_x(&self, x: f64, width: u32) -> f64 {
        match self {
            Align::Left => x + 8.0,
            Align::Center => x + f64::from(width) / 2.0,
            Align::Right => x + f64::from(width) - 8.0,
        }
    }
}

/// A table column: key, header label, fixed pixel width, alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConfig {
    pub key: FieldKey,
    pub name: &'static str,
    pub label: &'static str,
    pub width: u32,
    pub align: Align,
}

const fn field(
    key: FieldKey,
    name: &'static str,
    label: &'static str,
    width: u32,
    align: Align,
) -> FieldConfig {
    FieldConfig {
        key,
        name,
        label,
        width,
        align,
    }
}

const REPO: FieldConfig = field(FieldKey::Repo, "repo", "Repository", 200, Align::Left);
const STARS: FieldConfig = field(FieldKey::Stars, "stars", "Stars", 80, Align::Right);

static PR_LIST_FIELDS: [FieldConfig; 7] = [
    REPO,
    STARS,
    field(FieldKey::PrTitle, "pr_title", "PR Title", 250, Align::Left),
    field(FieldKey::PrNumber, "pr_number", "PR #", 60, Align::Center),
    field(FieldKey::Status, "status", "Status", 80, Align::Center),
    field(FieldKey::CreatedDate, "created_date", "Created", 90, Align::Center),
    field(FieldKey::MergedDate, "merged_date", "Merged", 90, Align::Center),
];

static REPO_AGGREGATE_FIELDS: [FieldConfig; 9] = [
    REPO,
    STARS,
    field(FieldKey::PrNumbers, "pr_numbers", "PRs Number", 240, Align::Left),
    field(FieldKey::Total, "total", "Total", 60, Align::Center),
    field(FieldKey::Merged, "merged", "Merged", 60, Align::Center),
    field(FieldKey::Open, "open", "Open", 50, Align::Center),
    field(FieldKey::Draft, "draft", "Draft", 50, Align::Center),
    field(FieldKey::Closed, "closed", "Closed", 60, Align::Center),
    field(FieldKey::MergedRate, "merged_rate", "Merged Rate", 90, Align::Center),
];

/// Known columns for a view mode
pub fn catalog(mode: ViewMode) -> &'static [FieldConfig] {
    match mode {
        ViewMode::PrList => &PR_LIST_FIELDS,
        ViewMode::RepoAggregate => &REPO_AGGREGATE_FIELDS,
    }
}

/// Resolve the `fields` parameter against the mode's catalog.
///
/// Unknown keys and repeats are dropped; the repository column always comes
/// first, whether or not it was requested.
pub fn parse_fields(param: &str, mode: ViewMode) -> Vec<&'static FieldConfig> {
    let catalog = catalog(mode);
    let mut fields: Vec<&'static FieldConfig> = catalog
        .iter()
        .filter(|f| f.key == FieldKey::Repo)
        .collect();

    for name in param.split(',').map(str::trim) {
        if let Some(config) = catalog.iter().find(|f| f.name == name) {
            if !fields.iter().any(|f| f.key == config.key) {
                fields.push(config);
            }
        }
    }
    fields
}

/// Value of one table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Status(PrStatus),
}

/// A row that can be laid out in the card table
pub trait TableRow {
    fn cell(&self, field: &FieldConfig) -> Cell;
}

impl TableRow for ProcessedPr {
    fn cell(&self, field: &FieldConfig) -> Cell {
        let text = match field.key {
            FieldKey::Repo => truncate_text(&self.repo, 25),
            FieldKey::Stars => format_stars(self.stars),
            FieldKey::PrTitle => truncate_text(&self.pr_title, 35),
            FieldKey::PrNumber => format!("#{}", self.pr_number),
            FieldKey::Status => return Cell::Status(self.status),
            FieldKey::CreatedDate => self.created_date.format("%Y-%m-%d").to_string(),
            FieldKey::MergedDate => self
                .merged_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            _ => "-".to_string(),
        };
        Cell::Text(text)
    }
}

impl TableRow for RepoAggregate {
    fn cell(&self, field: &FieldConfig) -> Cell {
        let text = match field.key {
            FieldKey::Repo => truncate_text(&self.repo, 25),
            FieldKey::Stars => format_stars(self.stars),
            FieldKey::PrNumbers => truncate_text(
                &format_pr_numbers(&self.pr_numbers),
                (field.width / CHAR_WIDTH) as usize,
            ),
            FieldKey::Total => self.total.to_string(),
            FieldKey::Merged => self.merged.to_string(),
            FieldKey::Open => self.open.to_string(),
            FieldKey::Draft => self.draft.to_string(),
            FieldKey::Closed => self.closed.to_string(),
            FieldKey::MergedRate => format!("{}%", self.merged_rate),
            _ => "-".to_string(),
        };
        Cell::Text(text)
    }
}
