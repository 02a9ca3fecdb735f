pub mod aggregate;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod sort;
pub mod stats;
pub mod types;

pub use aggregate::aggregate_by_repo;
pub use filter::{filter_by_min_stars, filter_by_status, limit_results, StatusFilter};
pub use normalize::normalize;
pub use pipeline::process;
pub use sort::{parse_sort_keys, sort_rows, PrSortKey, RepoSortKey, SortKey};
pub use stats::{calculate_stats, parse_stats, StatGroup, StatKey};
pub use types::{PrStatus, ProcessedData, ProcessedPr, RepoAggregate, SummaryStats, TableView};
