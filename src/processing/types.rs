use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::params::ViewMode;

/// Normalized pull request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    Merged,
    Open,
    Closed,
    Draft,
}

impl PrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrStatus::Merged => "merged",
            PrStatus::Open => "open",
            PrStatus::Closed => "closed",
            PrStatus::Draft => "draft",
        }
    }

    /// Ordering used by the `status` sort key: merged, open, draft, closed
    pub fn priority(&self) -> u8 {
        match self {
            PrStatus::Merged => 0,
            PrStatus::Open => 1,
            PrStatus::Draft => 2,
            PrStatus::Closed => 3,
        }
    }
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merged" => Ok(PrStatus::Merged),
            "open" => Ok(PrStatus::Open),
            "closed" => Ok(PrStatus::Closed),
            "draft" => Ok(PrStatus::Draft),
            _ => Err(()),
        }
    }
}

/// A pull request flattened for filtering, sorting and display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedPr {
    pub repo: String, // "owner/name" format
    pub stars: u64,
    pub pr_title: String,
    pub pr_number: u64,
    pub status: PrStatus,
    pub created_date: NaiveDate,
    pub merged_date: Option<NaiveDate>,
    pub url: String,
}

/// Per-repository rollup of processed pull requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoAggregate {
    pub repo: String,
    pub stars: u64,
    pub pr_numbers: Vec<u64>, // descending
    pub total: usize,
    pub merged: usize,
    pub open: usize,
    pub draft: usize,
    pub closed: usize,
    pub merged_rate: u32, // percent, rounded
}

/// Headline counts shown in the stats panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryStats {
    pub total_pr: usize,
    pub merged_pr: usize,
    pub display_pr: usize,
    pub repos_with_pr: usize,
    pub repos_with_merged_pr: usize,
    pub showing_repos: usize,
}

/// The rows selected for display, in one of the two view shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "rows", rename_all = "kebab-case")]
pub enum TableView {
    PrList(Vec<ProcessedPr>),
    RepoAggregate(Vec<RepoAggregate>),
}

impl TableView {
    pub fn len(&self) -> usize {
        match self {
            TableView::PrList(rows) => rows.len(),
            TableView::RepoAggregate(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View mode matching the shape of the rows
    pub fn mode(&self) -> ViewMode {
        match self {
            TableView::PrList(_) => ViewMode::PrList,
            TableView::RepoAggregate(_) => ViewMode::RepoAggregate,
        }
    }
}

/// Output of the filter/sort/aggregate pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedData {
    pub stats: SummaryStats,
    #[serde(flatten)]
    pub view: TableView,
}
