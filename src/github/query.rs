use octocrab::Octocrab;
use serde::Deserialize;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use crate::error::{CardError, Result};
use crate::github::types::{records_from_values, RawPullRequest};

pub const PAGE_SIZE: u32 = 100;

const USER_PRS_QUERY: &str = r#"
query GetUserPRs($username: String!, $first: Int!, $after: String) {
  user(login: $username) {
    pullRequests(first: $first, after: $after, orderBy: {field: CREATED_AT, direction: DESC}) {
      totalCount
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        id
        number
        title
        state
        createdAt
        mergedAt
        closedAt
        isDraft
        repository {
          name
          owner {
            login
          }
          stargazerCount
        }
        url
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<UserData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<UserPullRequests>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPullRequests {
    pull_requests: WirePage,
}

/// Page as sent; nodes are decoded individually afterwards
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePage {
    total_count: u64,
    page_info: PageInfo,
    nodes: Vec<serde_json::Value>,
}

#[derive(Debug)]
pub struct PullRequestPage {
    pub total_count: u64,
    pub page_info: PageInfo,
    pub nodes: Vec<RawPullRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// Interpret one GraphQL response body.
///
/// A null `user` means the login does not exist, even when the API also
/// reports an error for it. `first_index` is the position of the page's
/// first node among all records fetched so far.
fn parse_page(
    username: &str,
    body: serde_json::Value,
    first_index: usize,
) -> Result<PullRequestPage> {
    let response: GraphqlResponse = serde_json::from_value(body).map_err(|e| {
        CardError::upstream(
            format!("Failed to fetch PRs for user \"{}\": unexpected response", username),
            e,
        )
    })?;

    match response.data {
        Some(UserData { user: Some(user) }) => {
            let page = user.pull_requests;
            Ok(PullRequestPage {
                total_count: page.total_count,
                page_info: page.page_info,
                nodes: records_from_values(page.nodes, first_index)?,
            })
        }
        Some(UserData { user: None }) => Err(CardError::UserNotFound {
            username: username.to_string(),
        }),
        None => {
            let reason = response
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            Err(CardError::upstream(
                format!("Failed to fetch PRs for user \"{}\"", username),
                if reason.is_empty() {
                    "empty GraphQL response".to_string()
                } else {
                    reason
                },
            ))
        }
    }
}

async fn fetch_page(
    client: &Octocrab,
    username: &str,
    after: Option<&str>,
    first_index: usize,
) -> Result<PullRequestPage> {
    let payload = serde_json::json!({
        "query": USER_PRS_QUERY,
        "variables": {
            "username": username,
            "first": PAGE_SIZE,
            "after": after,
        },
    });

    let body: serde_json::Value = client.graphql(&payload).await.map_err(|e| {
        CardError::upstream(format!("Failed to fetch PRs for user \"{}\"", username), e)
    })?;

    parse_page(username, body, first_index)
}

/// Only transport and API failures are worth another attempt
fn is_retryable(err: &CardError) -> bool {
    matches!(err, CardError::UpstreamFailure { .. })
}

/// Fetch every pull request authored by `username`, newest first.
///
/// Each page is retried with exponential backoff. A missing user or a
/// malformed record is not retried.
pub async fn fetch_user_prs(client: &Octocrab, username: &str) -> Result<Vec<RawPullRequest>> {
    let mut records = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(3);

        let first_index = records.len();
        let page = RetryIf::spawn(
            retry_strategy,
            || fetch_page(client, username, cursor.as_deref(), first_index),
            is_retryable,
        )
        .await?;

        tracing::debug!(
            username,
            page_records = page.nodes.len(),
            total_count = page.total_count,
            "Fetched pull request page"
        );

        records.extend(page.nodes);

        match page.page_info.end_cursor {
            Some(next) if page.page_info.has_next_page => cursor = Some(next),
            _ => break,
        }
    }

    Ok(records)
}
