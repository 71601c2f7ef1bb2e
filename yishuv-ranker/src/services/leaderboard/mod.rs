// Leaderboard: filtered, sorted views over the canonical list

mod collate;
pub mod filters;
pub mod query;

pub use filters::{FieldFilter, parse_filter};
pub use query::{LeaderboardQuery, SortDirection, run_query};
