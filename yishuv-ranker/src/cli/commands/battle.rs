use anyhow::Result;
use colored::*;
use dialoguer::{Select, theme::ColorfulTheme};
use is_terminal::IsTerminal;

use super::{load_data, open_favorites};
use crate::cli::BattleArgs;
use crate::cli::output::{format_count, progress_bar};
use crate::config::Config;
use crate::services::battle::{
    BattleSession, PoolConfig, Progression, Side, estimated_comparisons, max_comparisons, medal,
    select_pool, share_text, sort_with,
};
use crate::yishuv::Municipality;

const BAR_WIDTH: usize = 30;

enum Choice {
    Pick(Side),
    Skip,
    Quit,
}

pub async fn handle_battle_command(args: BattleArgs, config: &Config) -> Result<()> {
    if !args.auto && !std::io::stdin().is_terminal() {
        anyhow::bail!("Battle mode needs an interactive terminal. Use --auto to let chance decide");
    }

    let snapshot = load_data(config).await?;
    let pool_config = PoolConfig {
        count: args.count.unwrap_or(config.battle.pool_size),
        district: args.district.clone(),
        settlement_type: args.settlement_type,
    };

    let Some(ranking) = run_battle(snapshot.all(), &pool_config, args.auto)? else {
        println!("{}", "הקרב הופסק".yellow());
        return Ok(());
    };

    println!();
    println!("{}", "🏆 הדירוג שלך".bold());
    println!();
    print!("{}", format_ranking(&ranking));
    println!();
    println!("{}", share_text(&ranking).dimmed());

    if args.favorite_winner {
        let winner = ranking[0];
        let store = open_favorites(config).await?;
        if store.add(&winner.code).await? {
            println!();
            println!("{} {}", "★ נוסף למועדפים:".green(), winner.name);
        }
    }

    Ok(())
}

/// Select a pool and run the session to the end. `None` means the user quit.
fn run_battle<'a>(
    municipalities: &'a [Municipality],
    pool_config: &PoolConfig,
    auto: bool,
) -> Result<Option<Vec<&'a Municipality>>> {
    let mut rng = rand::rng();
    let pool = select_pool(municipalities, pool_config, &mut rng)?;

    println!(
        "{}",
        format!(
            "⚔️ {} יישובים, כ-{} השוואות (לכל היותר {})",
            pool.len(),
            estimated_comparisons(pool.len()),
            max_comparisons(pool.len())
        )
        .bold()
    );

    if auto {
        let (ranking, comparisons) = sort_with(pool, |_, _| Side::random(&mut rng))?;
        log::info!("Auto battle decided {} comparisons", comparisons);
        return Ok(Some(ranking));
    }

    let mut session = BattleSession::start(pool)?;
    while let Some((left, right)) = session.pending_items().map(|(l, r)| (*l, *r)) {
        let progress = session.progress();
        println!();
        println!(
            "{} {}",
            progress_bar(progress.percent(), BAR_WIDTH).cyan(),
            format!(
                "השוואה {} מתוך ~{}",
                progress.completed + 1,
                progress.estimated_total
            )
            .dimmed()
        );

        let step = match ask(left, right)? {
            Choice::Pick(side) => session.resolve(side)?,
            Choice::Skip => session.resolve_random(&mut rng)?,
            Choice::Quit => return Ok(None),
        };

        if let Progression::Finished = step {
            break;
        }
    }

    Ok(Some(session.finish()?))
}

fn ask(left: &Municipality, right: &Municipality) -> Result<Choice> {
    let choices = vec![
        describe(left),
        describe(right),
        "🎲 דלג (בחירה אקראית)".to_string(),
        "✖ יציאה".to_string(),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("איפה עדיף לגור?")
        .items(&choices)
        .default(0)
        .interact_opt()?;

    Ok(match selection {
        Some(0) => Choice::Pick(Side::Left),
        Some(1) => Choice::Pick(Side::Right),
        Some(2) => Choice::Skip,
        _ => Choice::Quit,
    })
}

fn describe(m: &Municipality) -> String {
    format!(
        "{} ({} · {} · {} תושבים)",
        m.name,
        m.district,
        m.settlement_type.label(),
        format_count(m.population)
    )
}

fn format_ranking(ranking: &[&Municipality]) -> String {
    ranking
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let place = medal(i)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}.", i + 1));
            format!("{:>4} {}  {}\n", place, m.name, m.district.dimmed())
        })
        .collect()
}
