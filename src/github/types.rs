use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// Pull request node as returned by the GitHub GraphQL API.
///
/// Timestamps are kept as the raw ISO-8601 strings from the API; they are
/// validated when the record is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPullRequest {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub state: RawPrState,
    pub created_at: String,
    pub merged_at: Option<String>,
    pub closed_at: Option<String>,
    pub is_draft: bool,
    pub repository: RawRepository,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawPrState {
    Merged,
    Open,
    Closed,
    Draft,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepository {
    pub name: String,
    pub owner: RawOwner,
    pub stargazer_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOwner {
    pub login: String,
}

impl RawPullRequest {
    /// Return the repository in "owner/name" format
    pub fn repo_full_name(&self) -> String {
        format!("{}/{}", self.repository.owner.login, self.repository.name)
    }
}

/// Decode records one at a time so a bad record is reported by position.
///
/// `first_index` is the position of `values[0]` in the full record list.
pub fn records_from_values(
    values: Vec<serde_json::Value>,
    first_index: usize,
) -> Result<Vec<RawPullRequest>> {
    values
        .into_iter()
        .enumerate()
        .map(|(offset, value)| {
            serde_json::from_value(value).map_err(|e| CardError::InvalidRecord {
                index: first_index + offset,
                reason: e.to_string(),
            })
        })
        .collect()
}
