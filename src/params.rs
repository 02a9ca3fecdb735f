//! Request parameters for a card.
//!
//! [`RawParams`] is the loose shape of a query string, CLI flags or config
//! defaults; [`CardParams::resolve`] fills in defaults and validates it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CardError, Result};

const DEFAULT_LIMIT: i64 = 10;
const DEFAULT_STATS: &str = "total_pr,merged_pr,display_pr";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    PrList,
    RepoAggregate,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::PrList => "pr-list",
            ViewMode::RepoAggregate => "repo-aggregate",
        }
    }

    pub fn default_sort(&self) -> &'static str {
        match self {
            ViewMode::PrList => "status,stars_desc",
            ViewMode::RepoAggregate => "merged_desc,stars_desc",
        }
    }

    pub fn default_fields(&self) -> &'static str {
        match self {
            ViewMode::PrList => "repo,stars,pr_title,pr_number,status,created_date,merged_date",
            ViewMode::RepoAggregate => "repo,stars,pr_numbers,total,merged,merged_rate",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "pr-list" => Ok(ViewMode::PrList),
            "repo-aggregate" => Ok(ViewMode::RepoAggregate),
            other => Err(CardError::InvalidParameter(format!(
                "unknown mode '{}' (expected pr-list or repo-aggregate)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl FromStr for ThemeName {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "dark" => Ok(ThemeName::Dark),
            "light" => Ok(ThemeName::Light),
            other => Err(CardError::InvalidParameter(format!(
                "unknown theme '{}' (expected dark or light)",
                other
            ))),
        }
    }
}

/// Unvalidated parameters; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pub username: Option<String>,
    pub theme: Option<String>,
    pub mode: Option<String>,
    pub status: Option<String>,
    pub min_stars: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub stats: Option<String>,
    pub fields: Option<String>,
}

impl RawParams {
    /// Parse a `key=value&key=value` query string as used by badge URLs.
    ///
    /// The first occurrence of a key wins; numbers that fail to parse are
    /// treated as absent.
    pub fn from_query(query: &str) -> Self {
        let mut params = RawParams::default();
        let query = query.trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = percent_decode(key);
            let value = percent_decode(value);

            let slot = match key.as_str() {
                "username" => &mut params.username,
                "theme" => &mut params.theme,
                "mode" => &mut params.mode,
                "status" => &mut params.status,
                "sort" => &mut params.sort,
                "stats" => &mut params.stats,
                "fields" => &mut params.fields,
                "min_stars" => {
                    if params.min_stars.is_none() {
                        params.min_stars = value.trim().parse().ok();
                    }
                    continue;
                }
                "limit" => {
                    if params.limit.is_none() {
                        params.limit = value.trim().parse().ok();
                    }
                    continue;
                }
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }

    /// Fill unset fields from `fallback`
    pub fn or(self, fallback: RawParams) -> RawParams {
        RawParams {
            username: self.username.or(fallback.username),
            theme: self.theme.or(fallback.theme),
            mode: self.mode.or(fallback.mode),
            status: self.status.or(fallback.status),
            min_stars: self.min_stars.or(fallback.min_stars),
            limit: self.limit.or(fallback.limit),
            sort: self.sort.or(fallback.sort),
            stats: self.stats.or(fallback.stats),
            fields: self.fields.or(fallback.fields),
        }
    }
}

/// Validated parameters with defaults applied.
///
/// List-valued options stay as strings; the pipeline and renderer parse them
/// leniently (unknown keys are dropped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardParams {
    pub username: String,
    pub theme: ThemeName,
    pub mode: ViewMode,
    pub status: String,
    pub min_stars: i64,
    pub limit: i64,
    pub sort: String,
    pub stats: String,
    pub fields: String,
}

impl CardParams {
    pub fn resolve(raw: RawParams) -> Result<Self> {
        let username = raw
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| CardError::InvalidParameter("username parameter is required".to_string()))?;

        let mode = match non_empty(raw.mode) {
            Some(m) => m.parse()?,
            None => ViewMode::default(),
        };
        let theme = match non_empty(raw.theme) {
            Some(t) => t.parse()?,
            None => ThemeName::default(),
        };

        Ok(CardParams {
            username,
            theme,
            mode,
            status: non_empty(raw.status).unwrap_or_else(|| "all".to_string()),
            min_stars: raw.min_stars.unwrap_or(0),
            limit: raw.limit.unwrap_or(DEFAULT_LIMIT),
            sort: non_empty(raw.sort).unwrap_or_else(|| mode.default_sort().to_string()),
            stats: non_empty(raw.stats).unwrap_or_else(|| DEFAULT_STATS.to_string()),
            fields: non_empty(raw.fields).unwrap_or_else(|| mode.default_fields().to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Decode `%XX` escapes and `+` as space; malformed escapes pass through
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                        continue;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_user(username: &str) -> RawParams {
        RawParams {
            username: Some(username.to_string()),
            ..RawParams::default()
        }
    }

    #[test]
    fn test_resolve_pr_list_defaults() {
        let params = CardParams::resolve(with_user("alice")).unwrap();
        assert_eq!(params.username, "alice");
        assert_eq!(params.theme, ThemeName::Dark);
        assert_eq!(params.mode, ViewMode::PrList);
        assert_eq!(params.status, "all");
        assert_eq!(params.min_stars, 0);
        assert_eq!(params.limit, 10);
        assert_eq!(params.sort, "status,stars_desc");
        assert_eq!(params.stats, "total_pr,merged_pr,display_pr");
        assert_eq!(
            params.fields,
            "repo,stars,pr_title,pr_number,status,created_date,merged_date"
        );
    }

    #[test]
    fn test_resolve_aggregate_defaults() {
        let raw = RawParams {
            mode: Some("repo-aggregate".to_string()),
            ..with_user("alice")
        };
        let params = CardParams::resolve(raw).unwrap();
        assert_eq!(params.mode, ViewMode::RepoAggregate);
        assert_eq!(params.sort, "merged_desc,stars_desc");
        assert_eq!(params.fields, "repo,stars,pr_numbers,total,merged,merged_rate");
    }

    #[test]
    fn test_missing_username_is_rejected() {
        assert!(matches!(
            CardParams::resolve(RawParams::default()),
            Err(CardError::InvalidParameter(_))
        ));
        assert!(matches!(
            CardParams::resolve(with_user("   ")),
            Err(CardError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_theme_and_mode_are_rejected() {
        let raw = RawParams {
            theme: Some("solarized".to_string()),
            ..with_user("alice")
        };
        assert!(CardParams::resolve(raw).is_err());

        let raw = RawParams {
            mode: Some("grid".to_string()),
            ..with_user("alice")
        };
        assert!(CardParams::resolve(raw).is_err());
    }

    #[test]
    fn test_empty_list_values_fall_back() {
        let raw = RawParams {
            sort: Some(String::new()),
            fields: Some(" ".to_string()),
            ..with_user("alice")
        };
        let params = CardParams::resolve(raw).unwrap();
        assert_eq!(params.sort, "status,stars_desc");
        assert!(params.fields.starts_with("repo,"));
    }

    #[test]
    fn test_from_query() {
        let raw = RawParams::from_query(
            "?username=alice&theme=light&stats=total_pr%2Cmerged_pr&limit=5&min_stars=abc&username=bob",
        );
        assert_eq!(raw.username.as_deref(), Some("alice"));
        assert_eq!(raw.theme.as_deref(), Some("light"));
        assert_eq!(raw.stats.as_deref(), Some("total_pr,merged_pr"));
        assert_eq!(raw.limit, Some(5));
        assert_eq!(raw.min_stars, None);
        assert_eq!(raw.mode, None);
    }

    #[test]
    fn test_from_query_plus_and_bad_escape() {
        let raw = RawParams::from_query("username=a+b&status=%zz");
        assert_eq!(raw.username.as_deref(), Some("a b"));
        assert_eq!(raw.status.as_deref(), Some("%zz"));
    }

    #[test]
    fn test_or_prefers_self() {
        let cli = RawParams {
            limit: Some(3),
            ..RawParams::default()
        };
        let defaults = RawParams {
            limit: Some(20),
            theme: Some("light".to_string()),
            ..RawParams::default()
        };
        let merged = cli.or(defaults);
        assert_eq!(merged.limit, Some(3));
        assert_eq!(merged.theme.as_deref(), Some("light"));
    }
}
