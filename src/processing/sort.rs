use std::cmp::Ordering;

use super::types::{ProcessedPr, RepoAggregate};

/// A named sort key that compares two rows of one view shape.
pub trait SortKey: Sized {
    type Row;

    /// Parse a key name such as `stars_desc`; `None` for unrecognized names
    fn parse(name: &str) -> Option<Self>;

    fn compare(&self, a: &Self::Row, b: &Self::Row) -> Ordering;
}

/// Sort keys for the per-PR view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrSortKey {
    StarsAsc,
    StarsDesc,
    CreatedDateAsc,
    CreatedDateDesc,
    Status,
}

impl SortKey for PrSortKey {
    type Row = ProcessedPr;

    fn parse(name: &str) -> Option<Self> {
        match name {
            "stars_asc" => Some(PrSortKey::StarsAsc),
            "stars_desc" => Some(PrSortKey::StarsDesc),
            "created_date_asc" => Some(PrSortKey::CreatedDateAsc),
            "created_date_desc" => Some(PrSortKey::CreatedDateDesc),
            "status" => Some(PrSortKey::Status),
            _ => None,
        }
    }

    fn compare(&self, a: &ProcessedPr, b: &ProcessedPr) -> Ordering {
        match self {
            PrSortKey::StarsAsc => a.stars.cmp(&b.stars),
            PrSortKey::StarsDesc => b.stars.cmp(&a.stars),
            PrSortKey::CreatedDateAsc => a.created_date.cmp(&b.created_date),
            PrSortKey::CreatedDateDesc => b.created_date.cmp(&a.created_date),
            PrSortKey::Status => a.status.priority().cmp(&b.status.priority()),
        }
    }
}

/// Sort keys for the repository-aggregate view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoSortKey {
    StarsAsc,
    StarsDesc,
    MergedAsc,
    MergedDesc,
    MergedRateAsc,
    MergedRateDesc,
}

impl SortKey for RepoSortKey {
    type Row = RepoAggregate;

    fn parse(name: &str) -> Option<Self> {
        match name {
            "stars_asc" => Some(RepoSortKey::StarsAsc),
            "stars_desc" => Some(RepoSortKey::StarsDesc),
            "merged_asc" => Some(RepoSortKey::MergedAsc),
            "merged_desc" => Some(RepoSortKey::MergedDesc),
            "merged_rate_asc" => Some(RepoSortKey::MergedRateAsc),
            "merged_rate_desc" => Some(RepoSortKey::MergedRateDesc),
            _ => None,
        }
    }

    fn compare(&self, a: &RepoAggregate, b: &RepoAggregate) -> Ordering {
        match self {
            RepoSortKey::StarsAsc => a.stars.cmp(&b.stars),
            RepoSortKey::StarsDesc => b.stars.cmp(&a.stars),
            RepoSortKey::MergedAsc => a.merged.cmp(&b.merged),
            RepoSortKey::MergedDesc => b.merged.cmp(&a.merged),
            RepoSortKey::MergedRateAsc => a.merged_rate.cmp(&b.merged_rate),
            RepoSortKey::MergedRateDesc => b.merged_rate.cmp(&a.merged_rate),
        }
    }
}

/// Parse a comma-separated key list. Unrecognized names are skipped, which is
/// the same as a key that always compares equal.
pub fn parse_sort_keys<K: SortKey>(param: &str) -> Vec<K> {
    param
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(K::parse)
        .collect()
}

/// Stable multi-key sort: the first key that discriminates decides, full ties
/// keep their input order.
pub fn sort_rows<K: SortKey>(rows: &[K::Row], keys: &[K]) -> Vec<K::Row>
where
    K::Row: Clone,
{
    let mut sorted = rows.to_vec();
    if keys.is_empty() {
        return sorted;
    }
    sorted.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::types::RawPrState;
    use crate::processing::aggregate::aggregate_by_repo;
    use crate::processing::normalize::{normalize, tests::raw_pr};
    use proptest::prelude::*;

    fn sample_prs() -> Vec<ProcessedPr> {
        let mut raw = vec![
            raw_pr("x", "y", 50, 1, RawPrState::Closed, false),
            raw_pr("p", "q", 5, 2, RawPrState::Open, false),
            raw_pr("x", "y", 50, 3, RawPrState::Merged, false),
            raw_pr("a", "b", 500, 4, RawPrState::Open, true),
            raw_pr("p", "q", 5, 5, RawPrState::Merged, false),
        ];
        raw[1].created_at = "2024-01-10T00:00:00Z".to_string();
        raw[3].created_at = "2023-12-31T00:00:00Z".to_string();
        normalize(&raw).unwrap()
    }

    fn numbers(prs: &[ProcessedPr]) -> Vec<u64> {
        prs.iter().map(|pr| pr.pr_number).collect()
    }

    #[test]
    fn test_parse_skips_unknown_keys() {
        let keys: Vec<PrSortKey> = parse_sort_keys("status, bogus ,stars_desc,,");
        assert_eq!(keys, vec![PrSortKey::Status, PrSortKey::StarsDesc]);

        let keys: Vec<RepoSortKey> = parse_sort_keys("merged_rate_asc,created_date_desc");
        assert_eq!(keys, vec![RepoSortKey::MergedRateAsc]);
    }

    #[test]
    fn test_status_then_stars() {
        let keys: Vec<PrSortKey> = parse_sort_keys("status,stars_desc");
        let sorted = sort_rows(&sample_prs(), &keys);
        // merged (#3 50*, #5 5*), open (#2), draft (#4), closed (#1)
        assert_eq!(numbers(&sorted), vec![3, 5, 2, 4, 1]);
    }

    #[test]
    fn test_stars_ascending_is_stable() {
        let keys: Vec<PrSortKey> = parse_sort_keys("stars_asc");
        let sorted = sort_rows(&sample_prs(), &keys);
        assert_eq!(numbers(&sorted), vec![2, 5, 1, 3, 4]);
    }

    #[test]
    fn test_created_date_keys() {
        let asc: Vec<PrSortKey> = parse_sort_keys("created_date_asc");
        assert_eq!(numbers(&sort_rows(&sample_prs(), &asc)), vec![4, 2, 1, 3, 5]);

        let desc: Vec<PrSortKey> = parse_sort_keys("created_date_desc");
        assert_eq!(numbers(&sort_rows(&sample_prs(), &desc)), vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_no_keys_preserves_order() {
        let keys: Vec<PrSortKey> = parse_sort_keys("unknown");
        assert_eq!(numbers(&sort_rows(&sample_prs(), &keys)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_repo_sort_merged_then_stars() {
        let repos = aggregate_by_repo(&sample_prs());
        let keys: Vec<RepoSortKey> = parse_sort_keys("merged_desc,stars_desc");
        let sorted = sort_rows(&repos, &keys);
        let names: Vec<&str> = sorted.iter().map(|r| r.repo.as_str()).collect();
        assert_eq!(names, vec!["x/y", "p/q", "a/b"]);
    }

    #[test]
    fn test_repo_sort_merged_rate() {
        let repos = aggregate_by_repo(&sample_prs());
        let keys: Vec<RepoSortKey> = parse_sort_keys("merged_rate_asc");
        let sorted = sort_rows(&repos, &keys);
        let rates: Vec<u32> = sorted.iter().map(|r| r.merged_rate).collect();
        assert_eq!(rates, vec![0, 50, 50]);
        // x/y and p/q tie at 50% and keep first-seen order
        assert_eq!(sorted[1].repo, "x/y");
        assert_eq!(sorted[2].repo, "p/q");
    }

    proptest! {
        #[test]
        fn prop_sort_is_stable(stars in proptest::collection::vec(0u64..4, 0..40)) {
            let raw: Vec<_> = stars
                .iter()
                .enumerate()
                .map(|(i, s)| raw_pr("o", "r", *s, i as u64, RawPrState::Open, false))
                .collect();
            let prs = normalize(&raw).unwrap();
            let keys: Vec<PrSortKey> = parse_sort_keys("stars_desc,status");
            let sorted = sort_rows(&prs, &keys);

            prop_assert_eq!(sorted.len(), prs.len());
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].stars >= pair[1].stars);
                if pair[0].stars == pair[1].stars {
                    // Input index is the PR number, so ties must stay ascending
                    prop_assert!(pair[0].pr_number < pair[1].pr_number);
                }
            }
        }
    }
}
