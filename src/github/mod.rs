pub mod cache;
pub mod client;
pub mod query;
pub mod source;
pub mod types;

pub use cache::{clear_cache, get_cache_path, PrCache};
pub use client::{create_client, token_from_env};
pub use query::fetch_user_prs;
pub use source::DataSource;
pub use types::RawPullRequest;
