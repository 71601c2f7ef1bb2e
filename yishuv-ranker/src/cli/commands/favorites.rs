use anyhow::Result;
use colored::*;

use super::{load_data, open_favorites};
use crate::cli::FavoritesCommands;
use crate::cli::output::format_count;
use crate::config::Config;
use crate::yishuv::Snapshot;

pub async fn handle_favorites_command(command: FavoritesCommands, config: &Config) -> Result<()> {
    let store = open_favorites(config).await?;

    match command {
        FavoritesCommands::List => {
            let favorites = store.load().await?;
            if favorites.is_empty() {
                println!("{}", "אין מועדפים עדיין".dimmed());
                return Ok(());
            }

            let snapshot = load_data(config).await?;
            let resolved = favorites.resolve(&snapshot);
            println!("{}", format!("★ מועדפים ({})", favorites.len()).bold());
            for m in &resolved {
                println!(
                    "  {:<8} {}  {}",
                    m.code.dimmed(),
                    m.name,
                    format!("{} תושבים", format_count(m.population)).dimmed()
                );
            }

            let stale = favorites.len() - resolved.len();
            if stale > 0 {
                log::warn!("{} favorite code(s) are not in the current data", stale);
            }
        }
        FavoritesCommands::Add { codes } => {
            let snapshot = load_data(config).await?;
            for code in known_codes(&snapshot, &codes)? {
                if store.add(&code).await? {
                    println!("{} {}", "★".yellow(), label(&snapshot, &code));
                } else {
                    println!("{}", format!("{} already a favorite", label(&snapshot, &code)).dimmed());
                }
            }
        }
        FavoritesCommands::Remove { codes } => {
            for code in codes.iter().map(|c| c.trim()) {
                if store.remove(code).await? {
                    println!("{} {}", "☆".dimmed(), code);
                } else {
                    println!("{}", format!("{} was not a favorite", code).dimmed());
                }
            }
        }
        FavoritesCommands::Toggle { codes } => {
            let snapshot = load_data(config).await?;
            for code in known_codes(&snapshot, &codes)? {
                let star = if store.toggle(&code).await? {
                    "★".yellow()
                } else {
                    "☆".dimmed()
                };
                println!("{} {}", star, label(&snapshot, &code));
            }
        }
        FavoritesCommands::Clear => {
            let removed = store.clear().await?;
            println!("Removed {} favorite(s)", removed);
        }
    }

    Ok(())
}

/// Trimmed codes, all of which must exist in the snapshot
fn known_codes(snapshot: &Snapshot, codes: &[String]) -> Result<Vec<String>> {
    if codes.is_empty() {
        anyhow::bail!("Provide at least one municipality code");
    }

    let unknown: Vec<&str> = codes
        .iter()
        .map(|c| c.trim())
        .filter(|c| snapshot.by_code(c).is_none())
        .collect();
    if !unknown.is_empty() {
        anyhow::bail!("Unknown municipality code(s): {}", unknown.join(", "));
    }

    Ok(codes.iter().map(|c| c.trim().to_string()).collect())
}

fn label(snapshot: &Snapshot, code: &str) -> String {
    snapshot
        .by_code(code)
        .map(|m| format!("{} ({})", m.name, m.code))
        .unwrap_or_else(|| code.to_string())
}
