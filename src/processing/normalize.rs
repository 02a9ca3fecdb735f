use chrono::{DateTime, NaiveDate};

use super::types::{PrStatus, ProcessedPr};
use crate::error::{CardError, Result};
use crate::github::types::{RawPrState, RawPullRequest};

/// Map raw GraphQL records to processed rows, one to one.
///
/// Any malformed record fails the whole batch; aggregation downstream relies
/// on every row being well-formed.
pub fn normalize(raw: &[RawPullRequest]) -> Result<Vec<ProcessedPr>> {
    raw.iter()
        .enumerate()
        .map(|(index, pr)| normalize_one(index, pr))
        .collect()
}

fn normalize_one(index: usize, pr: &RawPullRequest) -> Result<ProcessedPr> {
    let invalid = |reason: String| CardError::InvalidRecord { index, reason };

    if pr.repository.owner.login.trim().is_empty() || pr.repository.name.trim().is_empty() {
        return Err(invalid(format!(
            "PR #{} has an empty repository owner or name",
            pr.number
        )));
    }

    let created_date = parse_day(&pr.created_at)
        .ok_or_else(|| invalid(format!("invalid createdAt timestamp '{}'", pr.created_at)))?;

    let merged_date = match pr.merged_at.as_deref() {
        Some(ts) => Some(
            parse_day(ts).ok_or_else(|| invalid(format!("invalid mergedAt timestamp '{}'", ts)))?,
        ),
        None => None,
    };

    Ok(ProcessedPr {
        repo: pr.repo_full_name(),
        stars: pr.repository.stargazer_count,
        pr_title: pr.title.clone(),
        pr_number: pr.number,
        status: map_status(pr),
        created_date,
        merged_date,
        url: pr.url.clone(),
    })
}

/// Draft flag wins over state; anything not merged or open counts as closed
pub fn map_status(pr: &RawPullRequest) -> PrStatus {
    if pr.is_draft {
        return PrStatus::Draft;
    }
    match pr.state {
        RawPrState::Merged => PrStatus::Merged,
        RawPrState::Open => PrStatus::Open,
        RawPrState::Closed | RawPrState::Draft | RawPrState::Other => PrStatus::Closed,
    }
}

/// Calendar day of an RFC 3339 timestamp, in the offset the timestamp carries
fn parse_day(ts: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(ts).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::github::types::{RawOwner, RawRepository};

    pub(crate) fn raw_pr(
        owner: &str,
        name: &str,
        stars: u64,
        number: u64,
        state: RawPrState,
        is_draft: bool,
    ) -> RawPullRequest {
        RawPullRequest {
            id: format!("PR_{}", number),
            number,
            title: format!("PR number {}", number),
            state,
            created_at: "2024-05-01T12:00:00Z".to_string(),
            merged_at: if state == RawPrState::Merged {
                Some("2024-05-03T08:15:00Z".to_string())
            } else {
                None
            },
            closed_at: None,
            is_draft,
            repository: RawRepository {
                name: name.to_string(),
                owner: RawOwner {
                    login: owner.to_string(),
                },
                stargazer_count: stars,
            },
            url: format!("https://github.com/{}/{}/pull/{}", owner, name, number),
        }
    }

    #[test]
    fn test_normalize_maps_fields() {
        let raw = vec![raw_pr("x", "y", 50, 1, RawPrState::Merged, false)];
        let prs = normalize(&raw).unwrap();

        assert_eq!(prs.len(), 1);
        let pr = &prs[0];
        assert_eq!(pr.repo, "x/y");
        assert_eq!(pr.stars, 50);
        assert_eq!(pr.pr_number, 1);
        assert_eq!(pr.status, PrStatus::Merged);
        assert_eq!(pr.created_date.to_string(), "2024-05-01");
        assert_eq!(pr.merged_date.map(|d| d.to_string()).as_deref(), Some("2024-05-03"));
        assert_eq!(pr.url, "https://github.com/x/y/pull/1");
    }

    #[test]
    fn test_draft_flag_takes_precedence() {
        for state in [
            RawPrState::Merged,
            RawPrState::Open,
            RawPrState::Closed,
            RawPrState::Other,
        ] {
            let pr = raw_pr("x", "y", 1, 1, state, true);
            assert_eq!(map_status(&pr), PrStatus::Draft);
        }
    }

    #[test]
    fn test_status_mapping_without_draft_flag() {
        assert_eq!(map_status(&raw_pr("x", "y", 1, 1, RawPrState::Merged, false)), PrStatus::Merged);
        assert_eq!(map_status(&raw_pr("x", "y", 1, 1, RawPrState::Open, false)), PrStatus::Open);
        assert_eq!(map_status(&raw_pr("x", "y", 1, 1, RawPrState::Closed, false)), PrStatus::Closed);
        // DRAFT state without the flag is not trusted
        assert_eq!(map_status(&raw_pr("x", "y", 1, 1, RawPrState::Draft, false)), PrStatus::Closed);
        assert_eq!(map_status(&raw_pr("x", "y", 1, 1, RawPrState::Other, false)), PrStatus::Closed);
    }

    #[test]
    fn test_date_keeps_source_offset() {
        let mut pr = raw_pr("x", "y", 1, 1, RawPrState::Open, false);
        pr.created_at = "2024-05-01T23:30:00-05:00".to_string();
        let prs = normalize(&[pr]).unwrap();
        assert_eq!(prs[0].created_date.to_string(), "2024-05-01");
    }

    #[test]
    fn test_invalid_timestamp_fails_whole_batch() {
        let good = raw_pr("x", "y", 1, 1, RawPrState::Open, false);
        let mut bad = raw_pr("x", "y", 1, 2, RawPrState::Open, false);
        bad.created_at = "yesterday".to_string();

        let err = normalize(&[good, bad]).unwrap_err();
        match err {
            CardError::InvalidRecord { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("createdAt"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_merged_timestamp_is_rejected() {
        let mut pr = raw_pr("x", "y", 1, 1, RawPrState::Merged, false);
        pr.merged_at = Some(String::new());
        assert!(matches!(
            normalize(&[pr]),
            Err(CardError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_repository_owner_is_rejected() {
        let pr = raw_pr("", "y", 1, 1, RawPrState::Open, false);
        assert!(matches!(
            normalize(&[pr]),
            Err(CardError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&[]).unwrap().is_empty());
    }
}
