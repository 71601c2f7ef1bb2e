use anyhow::Result;
use colored::*;

use super::load_data;
use crate::cli::output::format_count;
use crate::config::Config;
use crate::yishuv::{DISTRICTS, SettlementType};

pub async fn handle_summary_command(config: &Config) -> Result<()> {
    let snapshot = load_data(config).await?;
    let coverage = snapshot.coverage();

    println!(
        "נטענו {} יישובים · {} עם נתוני שכר · {} עם מדד חברתי-כלכלי · {} עם נתוני מפקד",
        format_count(coverage.total as u64).bold(),
        coverage.with_wage,
        coverage.with_socio,
        coverage.with_census,
    );
    println!(
        "{}",
        format!("Loaded at {}", snapshot.loaded_at().format("%Y-%m-%d %H:%M:%S")).dimmed()
    );
    println!();

    println!("{}", "לפי מחוז".bold());
    for district in DISTRICTS {
        let count = snapshot.all().iter().filter(|m| m.district == district).count();
        println!("  {:<12} {}", district, count);
    }
    let other = snapshot
        .all()
        .iter()
        .filter(|m| !DISTRICTS.contains(&m.district.as_str()))
        .count();
    if other > 0 {
        println!("  {:<12} {}", "אחר", other);
    }

    println!();
    println!("{}", "לפי סוג".bold());
    for kind in SettlementType::all() {
        let count = snapshot
            .all()
            .iter()
            .filter(|m| m.settlement_type == kind)
            .count();
        println!("  {:<12} {}", kind.label(), count);
    }

    Ok(())
}
