use octocrab::Octocrab;

use crate::error::{CardError, Result};

/// Create a GitHub client authenticated with a personal access token
pub fn create_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| CardError::upstream("Failed to create GitHub client", e))
}

/// Read the token from `GITHUB_TOKEN`, treating an empty value as unset
pub fn token_from_env() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
