use crate::card::{build_card, RenderedCard};
use crate::error::Result;
use crate::github::{DataSource, PrCache, RawPullRequest};
use crate::params::CardParams;

/// Load a user's raw records, consulting the cache for remote sources.
///
/// Local files are always read fresh. A successful remote fetch refreshes
/// the cache entry.
pub async fn load_user_prs(
    source: &DataSource,
    cache: &PrCache,
    username: &str,
) -> Result<Vec<RawPullRequest>> {
    let use_cache = source.is_remote() && cache.is_enabled();

    if use_cache {
        if let Some(records) = cache.get(username).await {
            tracing::info!(username, records = records.len(), "Cache hit");
            return Ok(records);
        }
        tracing::info!(username, "Cache miss, fetching from GitHub");
    }

    let records = source.fetch(username).await?;
    tracing::info!(username, records = records.len(), "Fetched pull requests");

    if use_cache {
        cache.put(username, &records).await;
    }
    Ok(records)
}

/// Load records for `params.username` and render the card
pub async fn fetch_and_render(
    source: &DataSource,
    cache: &PrCache,
    params: &CardParams,
) -> Result<RenderedCard> {
    let records = load_user_prs(source, cache, &params.username).await?;
    let card = build_card(&records, params)?;

    tracing::debug!(
        mode = %params.mode,
        total_pr = card.data.stats.total_pr,
        rows = card.data.view.len(),
        "Rendered card"
    );
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::cache::DEFAULT_TTL;
    use crate::params::RawParams;
    use std::env;

    const RECORDS: &str = r#"[
        {"id": "a", "number": 5, "title": "Add <feature>", "state": "MERGED",
         "createdAt": "2024-03-01T10:00:00Z", "mergedAt": "2024-03-02T10:00:00Z",
         "closedAt": "2024-03-02T10:00:00Z", "isDraft": false,
         "repository": {"name": "r", "owner": {"login": "o"}, "stargazerCount": 40},
         "url": "https://github.com/o/r/pull/5"},
        {"id": "b", "number": 6, "title": "WIP", "state": "OPEN",
         "createdAt": "2024-03-05T10:00:00Z", "mergedAt": null, "closedAt": null,
         "isDraft": true,
         "repository": {"name": "r", "owner": {"login": "o"}, "stargazerCount": 40},
         "url": "https://github.com/o/r/pull/6"}
    ]"#;

    fn records_file(name: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!(
            "pr-stats-card-fetch-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, RECORDS).unwrap();
        path
    }

    #[tokio::test]
    async fn test_file_source_bypasses_cache() {
        let path = records_file("bypass");
        let cache_dir = env::temp_dir().join(format!("pr-stats-card-fetch-cache-{}", std::process::id()));
        let cache = PrCache::new(cache_dir.clone(), DEFAULT_TTL);

        let records = load_user_prs(&DataSource::File(path.clone()), &cache, "alice")
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(cache.get("alice").await.is_none());

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir_all(&cache_dir);
    }

    #[tokio::test]
    async fn test_fetch_and_render() {
        let path = records_file("render");
        let params = CardParams::resolve(RawParams {
            username: Some("alice".to_string()),
            ..RawParams::default()
        })
        .unwrap();

        let card = fetch_and_render(&DataSource::File(path.clone()), &PrCache::disabled(), &params)
            .await
            .unwrap();
        assert_eq!(card.data.stats.total_pr, 2);
        assert_eq!(card.data.stats.merged_pr, 1);
        assert!(card.svg.contains("Add &lt;feature&gt;"));

        let _ = std::fs::remove_file(&path);
    }
}
