use anyhow::Result;
use colored::*;

use super::{load_data, open_favorites};
use crate::cli::output::{display_value, format_count, pad_left, pad_right};
use crate::cli::LeaderboardArgs;
use crate::config::Config;
use crate::services::favorites::FavoriteSet;
use crate::services::leaderboard::{LeaderboardQuery, run_query};
use crate::yishuv::{Municipality, Snapshot, ranking_category};

const NAME_WIDTH: usize = 24;
const PLACE_WIDTH: usize = 26;

/// Rows of the query, narrowed to `favorites_only` when given
pub fn query_rows<'a>(
    snapshot: &'a Snapshot,
    query: &LeaderboardQuery,
    favorites_only: Option<&FavoriteSet>,
) -> Vec<&'a Municipality> {
    let rows = run_query(snapshot.all(), query);
    match favorites_only {
        Some(favorites) => rows.into_iter().filter(|m| favorites.contains(&m.code)).collect(),
        None => rows,
    }
}

pub async fn handle_leaderboard_command(args: LeaderboardArgs, config: &Config) -> Result<()> {
    let snapshot = load_data(config).await?;
    let favorites = open_favorites(config).await?.load().await?;

    let query = args.query.to_query();
    let rows = query_rows(&snapshot, &query, args.query.favorites.then_some(&favorites));
    let limit = args.limit.unwrap_or(config.leaderboard.display_limit);

    println!("{}", header(&query).bold());
    println!();

    if rows.is_empty() {
        println!("{}", "לא נמצאו יישובים התואמים את הסינון".yellow());
        return Ok(());
    }

    for (rank, m) in rows.iter().take(limit).enumerate() {
        println!("{}", format_row(rank, m, &query, favorites.contains(&m.code)));
    }

    if rows.len() > limit {
        println!();
        println!(
            "{}",
            format!("מציג {} מתוך {}", format_count(limit as u64), format_count(rows.len() as u64))
                .dimmed()
        );
    }

    Ok(())
}

fn header(query: &LeaderboardQuery) -> String {
    let label = ranking_category(query.sort_key)
        .map(|c| format!("{} {}", c.icon, c.label))
        .unwrap_or_else(|| query.sort_key.label().to_string());
    let mut parts = vec![format!("{} {}", label, query.direction.arrow())];

    if let Some(district) = &query.district {
        parts.push(format!("מחוז {}", district));
    }
    if let Some(kind) = query.settlement_type {
        parts.push(kind.label().to_string());
    }
    if let Some(search) = &query.search {
        parts.push(format!("\"{}\"", search));
    }
    for (field, filter) in query.filters.iter() {
        parts.push(format!("{} {}", field.key(), filter));
    }
    parts.join(" · ")
}

fn format_row(rank: usize, m: &Municipality, query: &LeaderboardQuery, favorite: bool) -> String {
    let marker = if favorite { "★" } else { " " };
    let place = format!("{} · {}", m.district, m.settlement_type.label());

    let value = display_value(query.sort_key, m.field(query.sort_key));
    let unit = ranking_category(query.sort_key)
        .map(|c| c.unit)
        .filter(|unit| !unit.is_empty() && *unit != "₪");
    let value = match unit {
        Some(unit) if !m.field(query.sort_key).is_null() => format!("{} {}", value, unit),
        _ => value,
    };

    format!(
        "{} {} {} {} {}",
        pad_left(&(rank + 1).to_string(), 4).dimmed(),
        marker.yellow(),
        pad_right(&m.name, NAME_WIDTH),
        pad_right(&place, PLACE_WIDTH).dimmed(),
        value.cyan()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::cli::Commands;
    use crate::cli::QueryArgs;
    use crate::services::leaderboard::SortDirection;
    use crate::yishuv::{AgeBrackets, FieldId, Socioeconomics};
    use clap::Parser;

    fn make(code: &str, name: &str, population: u64, wage: Option<f64>) -> Municipality {
        Municipality::new(
            code.into(),
            name.into(),
            "חיפה".into(),
            None,
            population,
            AgeBrackets::default(),
            Socioeconomics {
                median_wage: wage,
                ..Default::default()
            },
        )
    }

    fn args(extra: &[&str]) -> QueryArgs {
        let mut argv = vec!["yishuv-ranker", "leaderboard"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Leaderboard(args) => args.query,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_query_rows_favorites_only() {
        let snapshot = Snapshot::new(vec![
            make("1", "חיפה", 280_000, Some(9000.0)),
            make("2", "טירת כרמל", 21_000, None),
            make("3", "עוספיא", 12_000, Some(0.0)),
        ]);
        let favorites: FavoriteSet = ["3", "2"].into_iter().map(String::from).collect();

        let all = query_rows(&snapshot, &args(&[]).to_query(), None);
        assert_eq!(all.len(), 3);

        let only = query_rows(&snapshot, &args(&["--favorites"]).to_query(), Some(&favorites));
        let codes: Vec<&str> = only.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["2", "3"]);
    }

    #[test]
    fn test_query_rows_follow_the_given_query() {
        let snapshot = Snapshot::new(vec![
            make("1", "חיפה", 280_000, Some(9000.0)),
            make("2", "טירת כרמל", 21_000, None),
            make("3", "עוספיא", 12_000, Some(0.0)),
        ]);
        let mut query = args(&[]).to_query();
        query.sort_key = FieldId::Population;
        query.direction = SortDirection::Ascending;

        let rows = query_rows(&snapshot, &query, None);
        let codes: Vec<&str> = rows.iter().map(|m| m.code.as_str()).collect();

        assert_eq!(codes, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_row_shows_missing_and_zero_differently() {
        let query = LeaderboardQuery {
            sort_key: FieldId::MedianWage,
            ..Default::default()
        };
        colored::control::set_override(false);

        let missing = format_row(0, &make("2", "טירת כרמל", 21_000, None), &query, false);
        let zero = format_row(1, &make("3", "עוספיא", 12_000, Some(0.0)), &query, true);

        assert!(missing.ends_with("—"));
        assert!(zero.ends_with("₪0"));
        assert!(zero.contains('★'));
    }

    #[test]
    fn test_header_lists_active_constraints() {
        let query = args(&["-s", "medianAge", "--asc", "-d", "צפון", "-f", "religion=דרוזים"]).to_query();
        let text = header(&query);

        assert!(text.contains("גיל חציוני"));
        assert!(text.contains("מחוז צפון"));
        assert!(text.contains("religion"));
    }
}
