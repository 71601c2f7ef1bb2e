use anyhow::Result;
use colored::*;

use crate::yishuv::fields::FilterField;
use crate::yishuv::{FILTER_FIELDS, FieldId, FieldKind, FilterControl, RANKING_CATEGORIES};

pub fn handle_fields_command() -> Result<()> {
    println!("{}", "Sort keys".bold());
    for category in RANKING_CATEGORIES {
        println!(
            "  {} {:<18} {}",
            category.icon,
            category.field.key().cyan(),
            category.label
        );
    }

    println!();
    println!("{}", "Filters".bold());
    for filter in FILTER_FIELDS {
        let hint = filter_hint(&filter);
        println!("  {:<40} {}", hint.cyan(), filter.label);
    }

    println!();
    println!("{}", "All fields".bold());
    for field in FieldId::ALL {
        let kind = match field.kind() {
            FieldKind::Numeric => "number",
            FieldKind::Text => "text",
        };
        println!("  {:<20} {:<7} {}", field.key(), kind.dimmed(), field.label());
    }

    Ok(())
}

fn filter_hint(filter: &FilterField) -> String {
    match filter.control {
        FilterControl::Range { min, max, step } => format!(
            "{}=<min>..<max>  ({}..{}, step {})",
            filter.field.key(),
            min,
            max,
            step
        ),
        FilterControl::Select { options } => format!("{}=<value>  ({})", filter.field.key(), options.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_hint_shows_step() {
        let population = FILTER_FIELDS
            .iter()
            .find(|f| f.field == FieldId::Population)
            .unwrap();

        assert_eq!(filter_hint(population), "population=<min>..<max>  (0..1000000, step 1000)");
    }
}
