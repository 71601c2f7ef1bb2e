//! Command-line interface definitions

pub mod commands;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::services::battle::POOL_SIZES;
use crate::services::leaderboard::{FieldFilter, LeaderboardQuery, SortDirection, parse_filter};
use crate::yishuv::{FieldId, SettlementType};

#[derive(Parser, Debug)]
#[command(name = "yishuv-ranker")]
#[command(about = "Rank and explore Israeli municipalities using data.gov.il open data")]
#[command(version)]
pub struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Read population.json, census.json and socio.json from this directory instead of the API
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load all datasets and show coverage figures
    Summary,
    /// Show a filtered, sorted leaderboard
    Leaderboard(LeaderboardArgs),
    /// Show every field of one municipality
    Show(ShowArgs),
    /// Rank a random pool of municipalities by choosing between pairs
    Battle(BattleArgs),
    /// Export municipalities to CSV
    Export(ExportArgs),
    /// Manage favorite municipalities
    #[command(subcommand)]
    Favorites(FavoritesCommands),
    /// List sortable and filterable fields
    Fields,
}

/// Filtering and sorting shared by leaderboard and export
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Field to sort by (see `fields`)
    #[arg(short, long, default_value = "population", value_parser = parse_field)]
    pub sort: FieldId,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Only this district (e.g. "צפון")
    #[arg(short, long)]
    pub district: Option<String>,

    /// Only this settlement type: city, regional-council or locality
    #[arg(short = 't', long = "type", value_parser = parse_settlement_type)]
    pub settlement_type: Option<SettlementType>,

    /// Only names containing this text
    #[arg(long)]
    pub search: Option<String>,

    /// Field filter, `field=min..max` or `field=value` (repeatable)
    #[arg(short, long = "filter", value_parser = parse_filter_arg)]
    pub filters: Vec<(FieldId, FieldFilter)>,

    /// Only favorites
    #[arg(long)]
    pub favorites: bool,
}

impl QueryArgs {
    pub fn to_query(&self) -> LeaderboardQuery {
        let mut query = LeaderboardQuery {
            district: self.district.clone(),
            settlement_type: self.settlement_type,
            search: self.search.clone(),
            sort_key: self.sort,
            direction: if self.asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
            ..Default::default()
        };
        for (field, filter) in &self.filters {
            match filter {
                FieldFilter::Range { min, max } => query.filters.set_range(*field, *min, *max),
                FieldFilter::Exact { value } => query.filters.set_value(*field, value),
            }
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Maximum rows to print (defaults to the configured display limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Municipality code or (part of) its name
    pub municipality: String,
}

#[derive(Args, Debug)]
pub struct BattleArgs {
    /// Number of municipalities in the pool: 8, 16, 32 or 64
    #[arg(short = 'n', long, value_parser = parse_pool_size)]
    pub count: Option<usize>,

    /// Only this district
    #[arg(short, long)]
    pub district: Option<String>,

    /// Only this settlement type: city, regional-council or locality
    #[arg(short = 't', long = "type", value_parser = parse_settlement_type)]
    pub settlement_type: Option<SettlementType>,

    /// Resolve every comparison with a coin flip instead of asking
    #[arg(long)]
    pub auto: bool,

    /// Add the winner to favorites
    #[arg(long)]
    pub favorite_winner: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Export only these codes (repeatable); otherwise every row of the query
    #[arg(short, long = "code")]
    pub codes: Vec<String>,

    /// Output file (defaults to the export directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommands {
    /// List favorites
    List,
    /// Add municipalities by code
    Add { codes: Vec<String> },
    /// Remove municipalities by code
    Remove { codes: Vec<String> },
    /// Toggle municipalities by code
    Toggle { codes: Vec<String> },
    /// Remove all favorites
    Clear,
}

fn parse_field(s: &str) -> Result<FieldId, String> {
    s.parse()
}

fn parse_settlement_type(s: &str) -> Result<SettlementType, String> {
    s.parse()
}

fn parse_pool_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if POOL_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("pool size must be one of {:?}", POOL_SIZES))
    }
}

fn parse_filter_arg(s: &str) -> Result<(FieldId, FieldFilter), String> {
    parse_filter(s)
}
