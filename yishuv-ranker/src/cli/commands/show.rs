use anyhow::Result;
use colored::*;

use super::{load_data, open_favorites};
use crate::cli::ShowArgs;
use crate::cli::output::{display_value, pad_right};
use crate::config::Config;
use crate::yishuv::{FieldId, Municipality, Snapshot};

const MAX_CANDIDATES: usize = 10;

/// Find one municipality by code, exact name or unique partial name
pub fn find_municipality<'a>(snapshot: &'a Snapshot, input: &str) -> Result<&'a Municipality> {
    let input = input.trim();
    if let Some(m) = snapshot.by_code(input) {
        return Ok(m);
    }
    if let Some(m) = snapshot.all().iter().find(|m| m.name == input) {
        return Ok(m);
    }

    let candidates = snapshot.search_name(input);
    match candidates.as_slice() {
        [] => anyhow::bail!("No municipality matches '{}'", input),
        [only] => Ok(*only),
        many => {
            let names: Vec<String> = many
                .iter()
                .take(MAX_CANDIDATES)
                .map(|m| format!("{} ({})", m.name, m.code))
                .collect();
            anyhow::bail!(
                "'{}' matches {} municipalities: {}{}",
                input,
                many.len(),
                names.join(", "),
                if many.len() > MAX_CANDIDATES { ", ..." } else { "" }
            )
        }
    }
}

pub async fn handle_show_command(args: ShowArgs, config: &Config) -> Result<()> {
    let snapshot = load_data(config).await?;
    let m = find_municipality(&snapshot, &args.municipality)?;
    let favorite = open_favorites(config).await?.load().await?.contains(&m.code);

    let title = if favorite {
        format!("★ {}", m.name)
    } else {
        m.name.clone()
    };
    println!("{}", title.bold());
    println!();

    let width = FieldId::ALL
        .iter()
        .map(|f| unicode_width::UnicodeWidthStr::width(f.label()))
        .max()
        .unwrap_or(0);
    for field in FieldId::ALL {
        println!(
            "  {}  {}",
            pad_right(field.label(), width).dimmed(),
            display_value(field, m.field(field))
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yishuv::{AgeBrackets, Socioeconomics};

    fn make(code: &str, name: &str) -> Municipality {
        Municipality::new(
            code.into(),
            name.into(),
            "ירושלים".into(),
            None,
            1000,
            AgeBrackets::default(),
            Socioeconomics::default(),
        )
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(vec![
            make("3000", "ירושלים"),
            make("3780", "ביתר עילית"),
            make("3616", "מעלה אדומים"),
            make("3796", "כפר אדומים"),
        ])
    }

    #[test]
    fn test_find_by_code_and_name() {
        let snapshot = snapshot();

        assert_eq!(find_municipality(&snapshot, " 3780 ").unwrap().name, "ביתר עילית");
        assert_eq!(find_municipality(&snapshot, "ירושלים").unwrap().code, "3000");
        assert_eq!(find_municipality(&snapshot, "ביתר").unwrap().code, "3780");
    }

    #[test]
    fn test_found_record_outlives_owned_input() {
        let snapshot = snapshot();
        let found = {
            let input = String::from(" מעלה ");
            find_municipality(&snapshot, &input).unwrap()
        };
        assert_eq!(found.code, "3616");
    }

    #[test]
    fn test_ambiguous_and_missing_names_fail() {
        let snapshot = snapshot();

        let err = find_municipality(&snapshot, "אדומים").unwrap_err().to_string();
        assert!(err.contains("matches 2"));
        assert!(find_municipality(&snapshot, "תל אביב").is_err());
    }
}
