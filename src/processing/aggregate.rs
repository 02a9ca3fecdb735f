use std::collections::HashMap;

use super::types::{PrStatus, ProcessedPr, RepoAggregate};

/// Group rows by repository, in the order repositories are first seen.
pub fn aggregate_by_repo(prs: &[ProcessedPr]) -> Vec<RepoAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&ProcessedPr>> = Vec::new();

    for pr in prs {
        let slot = *index.entry(pr.repo.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(pr);
    }

    groups.into_iter().map(|group| summarize(&group)).collect()
}

fn summarize(group: &[&ProcessedPr]) -> RepoAggregate {
    let count = |status: PrStatus| group.iter().filter(|pr| pr.status == status).count();

    let total = group.len();
    let merged = count(PrStatus::Merged);

    let mut pr_numbers: Vec<u64> = group.iter().map(|pr| pr.pr_number).collect();
    pr_numbers.sort_unstable_by(|a, b| b.cmp(a));

    RepoAggregate {
        // Groups are never empty; every PR of a repo carries the same star count
        repo: group.first().map(|pr| pr.repo.clone()).unwrap_or_default(),
        stars: group.first().map(|pr| pr.stars).unwrap_or(0),
        pr_numbers,
        total,
        merged,
        open: count(PrStatus::Open),
        draft: count(PrStatus::Draft),
        closed: count(PrStatus::Closed),
        merged_rate: merged_rate(merged, total),
    }
}

/// round(merged / total * 100), 0 for an empty repository
pub fn merged_rate(merged: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((merged as f64 / total as f64) * 100.0).round() as u32
}
