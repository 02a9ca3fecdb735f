use octocrab::Octocrab;
use std::path::PathBuf;

use crate::error::{CardError, Result};
use crate::github::query::fetch_user_prs;
use crate::github::types::{records_from_values, RawPullRequest};

/// Where raw pull request records come from
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Live GraphQL API
    GitHub(Octocrab),
    /// JSON array of records saved from the API
    File(PathBuf),
}

impl DataSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::GitHub(_))
    }

    pub async fn fetch(&self, username: &str) -> Result<Vec<RawPullRequest>> {
        match self {
            DataSource::GitHub(client) => fetch_user_prs(client, username).await,
            DataSource::File(path) => read_records_file(path).await,
        }
    }
}

async fn read_records_file(path: &PathBuf) -> Result<Vec<RawPullRequest>> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        CardError::upstream(format!("Failed to read records from {}", path.display()), e)
    })?;

    // A file that is not a JSON array is unreadable; a bad element is a bad record
    let values: Vec<serde_json::Value> = serde_json::from_str(&contents).map_err(|e| {
        CardError::upstream(format!("Failed to parse records in {}", path.display()), e)
    })?;
    records_from_values(values, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[tokio::test]
    async fn test_file_source_reads_records() {
        let path = env::temp_dir().join(format!("pr-stats-card-source-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{
                "id": "PR_1", "number": 1, "title": "t", "state": "OPEN",
                "createdAt": "2024-01-01T00:00:00Z", "mergedAt": null, "closedAt": null,
                "isDraft": true,
                "repository": {"name": "r", "owner": {"login": "o"}, "stargazerCount": 0},
                "url": "https://github.com/o/r/pull/1"
            }]"#,
        )
        .unwrap();

        let source = DataSource::File(path.clone());
        assert!(!source.is_remote());
        let records = source.fetch("anyone").await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_draft);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_missing_file_is_upstream_failure() {
        let source = DataSource::File(env::temp_dir().join("pr-stats-card-does-not-exist.json"));
        let err = source.fetch("anyone").await.unwrap_err();
        assert!(matches!(err, CardError::UpstreamFailure { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_malformed_record_in_file_is_invalid_record() {
        let path = env::temp_dir().join(format!("pr-stats-card-malformed-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{
                "id": "PR_1", "number": 1, "title": "t", "state": "MERGED",
                "createdAt": "2024-01-01T00:00:00Z", "mergedAt": "2024-01-02T00:00:00Z",
                "closedAt": "2024-01-02T00:00:00Z", "isDraft": false,
                "repository": {"name": "r", "owner": {"login": "o"}, "stargazerCount": 0},
                "url": "https://github.com/o/r/pull/1"
            }, {
                "id": "PR_2", "number": "two", "title": "t", "state": "OPEN",
                "createdAt": "2024-01-01T00:00:00Z", "mergedAt": null, "closedAt": null,
                "isDraft": false, "repository": null,
                "url": "https://github.com/o/r/pull/2"
            }]"#,
        )
        .unwrap();

        let err = DataSource::File(path.clone()).fetch("anyone").await.unwrap_err();
        assert!(matches!(err, CardError::InvalidRecord { index: 1, .. }));
        assert_eq!(err.exit_code(), 3);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_non_array_file_is_upstream_failure() {
        let path = env::temp_dir().join(format!("pr-stats-card-object-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"records": []}"#).unwrap();

        let err = DataSource::File(path.clone()).fetch("anyone").await.unwrap_err();
        assert!(matches!(err, CardError::UpstreamFailure { .. }));

        let _ = std::fs::remove_file(&path);
    }
}
