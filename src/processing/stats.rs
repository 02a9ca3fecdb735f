use std::collections::HashSet;

use super::types::{PrStatus, ProcessedPr, SummaryStats};

/// Compute headline counts.
///
/// `original` is the star-filtered population (before status filtering and
/// limiting); `display` is what actually ends up on the card.
pub fn calculate_stats(original: &[ProcessedPr], display: &[ProcessedPr]) -> SummaryStats {
    let merged: Vec<&ProcessedPr> = original
        .iter()
        .filter(|pr| pr.status == PrStatus::Merged)
        .collect();

    SummaryStats {
        total_pr: original.len(),
        merged_pr: merged.len(),
        display_pr: display.len(),
        repos_with_pr: distinct_repos(original.iter()),
        repos_with_merged_pr: distinct_repos(merged.into_iter()),
        showing_repos: distinct_repos(display.iter()),
    }
}

fn distinct_repos<'a>(prs: impl Iterator<Item = &'a ProcessedPr>) -> usize {
    prs.map(|pr| pr.repo.as_str()).collect::<HashSet<_>>().len()
}

/// Which stats-panel row a statistic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    PrScope,
    RepoScope,
}

/// A selectable statistic of the stats panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKey {
    TotalPr,
    MergedPr,
    DisplayPr,
    ReposWithPr,
    ReposWithMergedPr,
    ShowingRepos,
}

impl StatKey {
    /// Every statistic, in the order `all` selects them
    pub const ALL: [StatKey; 6] = [
        StatKey::TotalPr,
        StatKey::MergedPr,
        StatKey::DisplayPr,
        StatKey::ReposWithPr,
        StatKey::ReposWithMergedPr,
        StatKey::ShowingRepos,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        StatKey::ALL.into_iter().find(|key| key.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::TotalPr => "total_pr",
            StatKey::MergedPr => "merged_pr",
            StatKey::DisplayPr => "display_pr",
            StatKey::ReposWithPr => "repos_with_pr",
            StatKey::ReposWithMergedPr => "repos_with_merged_pr",
            StatKey::ShowingRepos => "showing_repos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKey::TotalPr => "Total PRs",
            StatKey::MergedPr => "Merged PRs",
            StatKey::DisplayPr => "Showing PRs",
            StatKey::ReposWithPr => "Repos(≥1 PR)",
            StatKey::ReposWithMergedPr => "Repos(≥1 Merged PR)",
            StatKey::ShowingRepos => "Showing Repos",
        }
    }

    pub fn group(&self) -> StatGroup {
        match self {
            StatKey::TotalPr | StatKey::MergedPr | StatKey::DisplayPr => StatGroup::PrScope,
            StatKey::ReposWithPr | StatKey::ReposWithMergedPr | StatKey::ShowingRepos => {
                StatGroup::RepoScope
            }
        }
    }

    /// Merged counts get the highlight color
    pub fn is_merged(&self) -> bool {
        matches!(self, StatKey::MergedPr | StatKey::ReposWithMergedPr)
    }

    pub fn value(&self, stats: &SummaryStats) -> usize {
        match self {
            StatKey::TotalPr => stats.total_pr,
            StatKey::MergedPr => stats.merged_pr,
            StatKey::DisplayPr => stats.display_pr,
            StatKey::ReposWithPr => stats.repos_with_pr,
            StatKey::ReposWithMergedPr => stats.repos_with_merged_pr,
            StatKey::ShowingRepos => stats.showing_repos,
        }
    }

    /// Rendered text, e.g. "Total PRs: 12"
    pub fn text(&self, stats: &SummaryStats) -> String {
        format!("{}: {}", self.label(), self.value(stats))
    }
}

/// Parse the `stats` parameter: `none`, `all`, or a comma-separated list.
/// Unknown names and repeats are dropped.
pub fn parse_stats(param: &str) -> Vec<StatKey> {
    let param = param.trim();
    match param {
        "" | "none" => Vec::new(),
        "all" => StatKey::ALL.to_vec(),
        _ => {
            let mut keys = Vec::new();
            for key in param.split(',').filter_map(|s| StatKey::parse(s.trim())) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            keys
        }
    }
}
