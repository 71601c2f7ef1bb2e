use anyhow::Result;
use colored::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::leaderboard::query_rows;
use super::{load_data, open_favorites};
use crate::cli::ExportArgs;
use crate::config::Config;
use crate::services::export::{default_file_name, export_to_path, write_csv};
use crate::services::favorites::FavoriteSet;
use crate::yishuv::{Municipality, Snapshot};

/// Selected rows in canonical order: the given codes, otherwise every
/// row the query shows
pub fn select_rows<'a>(
    snapshot: &'a Snapshot,
    args: &ExportArgs,
    favorites: &FavoriteSet,
) -> Vec<&'a Municipality> {
    let wanted: HashSet<&str> = if args.codes.is_empty() {
        let query = args.query.to_query();
        query_rows(snapshot, &query, args.query.favorites.then_some(favorites))
            .into_iter()
            .map(|m| m.code.as_str())
            .collect()
    } else {
        let codes: HashSet<&str> = args.codes.iter().map(|c| c.trim()).collect();
        for code in &codes {
            if snapshot.by_code(code).is_none() {
                log::warn!("Unknown municipality code skipped: {}", code);
            }
        }
        codes
    };

    snapshot.select_codes(|code| wanted.contains(code))
}

pub async fn handle_export_command(args: ExportArgs, config: &Config) -> Result<()> {
    let snapshot = load_data(config).await?;
    let favorites = if args.query.favorites {
        open_favorites(config).await?.load().await?
    } else {
        FavoriteSet::default()
    };

    let rows = select_rows(&snapshot, &args, &favorites);
    if rows.is_empty() {
        anyhow::bail!("Nothing to export: no municipalities match the selection");
    }

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.storage.export_dir.join(default_file_name(rows.len())));

    if path == Path::new("-") {
        write_csv(std::io::stdout().lock(), &rows)?;
        return Ok(());
    }

    export_to_path(&rows, &path)?;
    println!(
        "{} {} ({} יישובים)",
        "✓".green(),
        display_path(&path).cyan(),
        rows.len()
    );
    Ok(())
}

fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(PathBuf::from))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::yishuv::{AgeBrackets, Socioeconomics};
    use clap::Parser;

    fn make(code: &str, population: u64) -> Municipality {
        Municipality::new(
            code.into(),
            format!("ישוב {}", code),
            "רמלה".into(),
            None,
            population,
            AgeBrackets::default(),
            Socioeconomics::default(),
        )
    }

    fn export_args(extra: &[&str]) -> ExportArgs {
        let mut argv = vec!["yishuv-ranker", "export"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Export(args) => args,
            _ => unreachable!(),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(vec![make("10", 90_000), make("20", 40_000), make("30", 8_000)])
    }

    #[test]
    fn test_codes_keep_canonical_order() {
        let snapshot = snapshot();
        let args = export_args(&["-c", "30", "-c", "10", "-c", "999"]);

        let rows = select_rows(&snapshot, &args, &FavoriteSet::default());
        let codes: Vec<&str> = rows.iter().map(|m| m.code.as_str()).collect();

        assert_eq!(codes, vec!["10", "30"]);
    }

    #[test]
    fn test_query_selection_ignores_sort_order() {
        let snapshot = snapshot();
        let args = export_args(&["--asc", "-f", "population=10000..100000"]);

        let rows = select_rows(&snapshot, &args, &FavoriteSet::default());
        let codes: Vec<&str> = rows.iter().map(|m| m.code.as_str()).collect();

        assert_eq!(codes, vec!["10", "20"]);
    }

    #[test]
    fn test_export_writes_default_file_name() {
        let snapshot = snapshot();
        let dir = tempfile::tempdir().unwrap();
        let args = export_args(&["-c", "20"]);

        let rows = select_rows(&snapshot, &args, &FavoriteSet::default());
        let path = dir.path().join(default_file_name(rows.len()));
        export_to_path(&rows, &path).unwrap();

        assert!(dir.path().join("ישובים_1_נבחרים.csv").exists());
    }
}
