//! Battle pool selection and result presentation helpers

use rand::Rng;
use rand::seq::SliceRandom;

use super::error::BattleError;
use crate::yishuv::{Municipality, SettlementType};

/// Pool sizes offered to the user
pub const POOL_SIZES: [usize; 4] = [8, 16, 32, 64];

pub const DEFAULT_POOL_SIZE: usize = 16;

/// How to pick the municipalities for a battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub count: usize,
    pub district: Option<String>,
    pub settlement_type: Option<SettlementType>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_POOL_SIZE,
            district: None,
            settlement_type: None,
        }
    }
}

/// Filter by district and type, shuffle, and keep up to `count` entries
pub fn select_pool<'a, R: Rng + ?Sized>(
    municipalities: &'a [Municipality],
    config: &PoolConfig,
    rng: &mut R,
) -> Result<Vec<&'a Municipality>, BattleError> {
    let mut pool: Vec<&Municipality> = municipalities
        .iter()
        .filter(|m| config.district.as_deref().is_none_or(|d| m.district == d))
        .filter(|m| config.settlement_type.is_none_or(|t| m.settlement_type == t))
        .collect();

    pool.shuffle(rng);
    pool.truncate(config.count);

    if pool.len() < 2 {
        return Err(BattleError::NotEnoughItems { count: pool.len() });
    }

    log::info!(
        "Selected {} municipalities for battle (district: {}, type: {})",
        pool.len(),
        config.district.as_deref().unwrap_or("all"),
        config
            .settlement_type
            .map(|t| t.label())
            .unwrap_or("all")
    );

    Ok(pool)
}

/// Medal for the top three places
pub fn medal(rank: usize) -> Option<&'static str> {
    match rank {
        0 => Some("🥇"),
        1 => Some("🥈"),
        2 => Some("🥉"),
        _ => None,
    }
}

/// Shareable plain-text summary of the top ten
pub fn share_text(ranking: &[&Municipality]) -> String {
    let lines: Vec<String> = ranking
        .iter()
        .take(10)
        .enumerate()
        .map(|(i, m)| match medal(i) {
            Some(medal) => format!("{} {}", medal, m.name),
            None => format!("{}. {}", i + 1, m.name),
        })
        .collect();

    format!(
        "🏘️ הדירוג שלי - מדרג הישובים:\n\n{}\n\nנוצר עם מדרג הישובים 🇮🇱",
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yishuv::{AgeBrackets, Socioeconomics};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make(code: usize, napa: &str, council: Option<&str>, population: u64) -> Municipality {
        Municipality::new(
            code.to_string(),
            format!("ישוב {}", code),
            napa.into(),
            council.map(String::from),
            population,
            AgeBrackets::default(),
            Socioeconomics::default(),
        )
    }

    fn fixture() -> Vec<Municipality> {
        vec![
            make(1, "חיפה", None, 280_000),
            make(2, "חדרה", None, 100_000),
            make(3, "חיפה", Some("חוף הכרמל"), 900),
            make(4, "באר שבע", None, 210_000),
            make(5, "באר שבע", None, 3_000),
        ]
    }

    #[test]
    fn test_pool_respects_filters_and_count() {
        let all = fixture();
        let mut rng = StdRng::seed_from_u64(1);

        let config = PoolConfig {
            count: 8,
            district: Some("חיפה".into()),
            settlement_type: None,
        };
        let pool = select_pool(&all, &config, &mut rng).unwrap();
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|m| m.district == "חיפה"));

        let config = PoolConfig {
            count: 2,
            ..Default::default()
        };
        assert_eq!(select_pool(&all, &config, &mut rng).unwrap().len(), 2);
    }

    #[test]
    fn test_pool_too_small_is_rejected() {
        let all = fixture();
        let mut rng = StdRng::seed_from_u64(1);
        let config = PoolConfig {
            district: Some("דרום".into()),
            settlement_type: Some(SettlementType::City),
            ..Default::default()
        };

        assert_eq!(
            select_pool(&all, &config, &mut rng).unwrap_err(),
            BattleError::NotEnoughItems { count: 1 }
        );
    }

    #[test]
    fn test_share_text_uses_medals_then_numbers() {
        let all = fixture();
        let ranking: Vec<&Municipality> = all.iter().collect();
        let text = share_text(&ranking);

        assert!(text.contains("🥇 ישוב 1"));
        assert!(text.contains("🥉 ישוב 3"));
        assert!(text.contains("4. ישוב 4"));
        assert!(text.starts_with("🏘️ הדירוג שלי"));
    }
}
