mod api;
mod cli;
mod config;
mod services;
mod yishuv;

use anyhow::Result;
use clap::Parser;
use colored::*;
use is_terminal::IsTerminal;

use cli::commands::{battle, export, favorites, fields, leaderboard, show, summary};
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.api.data_dir = Some(dir);
    }
    log::debug!("Using config: {:?}", config);

    match cli.command {
        Commands::Summary => summary::handle_summary_command(&config).await,
        Commands::Leaderboard(args) => leaderboard::handle_leaderboard_command(args, &config).await,
        Commands::Show(args) => show::handle_show_command(args, &config).await,
        Commands::Battle(args) => battle::handle_battle_command(args, &config).await,
        Commands::Export(args) => export::handle_export_command(args, &config).await,
        Commands::Favorites(command) => favorites::handle_favorites_command(command, &config).await,
        Commands::Fields => fields::handle_fields_command(),
    }
}
