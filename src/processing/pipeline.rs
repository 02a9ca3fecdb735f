use std::collections::HashSet;

use super::aggregate::aggregate_by_repo;
use super::filter::{filter_by_min_stars, filter_by_status, limit_results, StatusFilter};
use super::normalize::normalize;
use super::sort::{parse_sort_keys, sort_rows, PrSortKey, RepoSortKey};
use super::stats::calculate_stats;
use super::types::{ProcessedData, ProcessedPr, TableView};
use crate::error::Result;
use crate::github::types::RawPullRequest;
use crate::params::{CardParams, ViewMode};

/// Run the full data pipeline on raw records.
///
/// Per-PR view: stars filter, status filter, sort, limit.
/// Aggregate view: stars filter, aggregate, sort, limit; the status filter
/// does not apply.
///
/// Headline totals always use the star-filtered population so the card
/// reports the user's overall volume regardless of status filter and limit.
pub fn process(raw: &[RawPullRequest], params: &CardParams) -> Result<ProcessedData> {
    let prs = normalize(raw)?;
    let scoped = filter_by_min_stars(&prs, params.min_stars);

    tracing::debug!(
        total = prs.len(),
        after_stars = scoped.len(),
        mode = %params.mode,
        "Processing pull requests"
    );

    match params.mode {
        ViewMode::PrList => Ok(process_pr_list(&scoped, params)),
        ViewMode::RepoAggregate => Ok(process_repo_aggregate(&scoped, params)),
    }
}

fn process_pr_list(scoped: &[ProcessedPr], params: &CardParams) -> ProcessedData {
    let filtered = filter_by_status(scoped, &StatusFilter::parse(&params.status));
    let keys: Vec<PrSortKey> = parse_sort_keys(&params.sort);
    let sorted = sort_rows(&filtered, &keys);
    let display = limit_results(&sorted, params.limit);

    ProcessedData {
        stats: calculate_stats(scoped, &display),
        view: TableView::PrList(display),
    }
}

fn process_repo_aggregate(scoped: &[ProcessedPr], params: &CardParams) -> ProcessedData {
    let repos = aggregate_by_repo(scoped);
    let keys: Vec<RepoSortKey> = parse_sort_keys(&params.sort);
    let sorted = sort_rows(&repos, &keys);
    let display = limit_results(&sorted, params.limit);

    // Display scope is every PR belonging to a shown repository
    let shown: HashSet<&str> = display.iter().map(|r| r.repo.as_str()).collect();
    let displayed_prs: Vec<ProcessedPr> = scoped
        .iter()
        .filter(|pr| shown.contains(pr.repo.as_str()))
        .cloned()
        .collect();

    ProcessedData {
        stats: calculate_stats(scoped, &displayed_prs),
        view: TableView::RepoAggregate(display),
    }
}
