use super::types::{PrStatus, ProcessedPr};

/// Status allow-list parsed from a comma-separated parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(Vec<PrStatus>),
}

impl StatusFilter {
    /// Parse "all" or a list like "merged,open". Unknown names match nothing.
    pub fn parse(param: &str) -> Self {
        let param = param.trim();
        if param.is_empty() || param == "all" {
            return StatusFilter::All;
        }
        StatusFilter::Only(
            param
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect(),
        )
    }

    pub fn matches(&self, status: PrStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(allowed) => allowed.contains(&status),
        }
    }
}

/// Keep rows with at least `min_stars` stars; a threshold <= 0 keeps everything
pub fn filter_by_min_stars(prs: &[ProcessedPr], min_stars: i64) -> Vec<ProcessedPr> {
    if min_stars <= 0 {
        return prs.to_vec();
    }
    prs.iter()
        .filter(|pr| pr.stars >= min_stars as u64)
        .cloned()
        .collect()
}

pub fn filter_by_status(prs: &[ProcessedPr], filter: &StatusFilter) -> Vec<ProcessedPr> {
    prs.iter()
        .filter(|pr| filter.matches(pr.status))
        .cloned()
        .collect()
}

/// Keep the first `limit` rows; a limit <= 0 means unlimited
pub fn limit_results<T: Clone>(rows: &[T], limit: i64) -> Vec<T> {
    if limit <= 0 {
        return rows.to_vec();
    }
    rows.iter().take(limit as usize).cloned().collect()
}
