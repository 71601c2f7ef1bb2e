//! Leaderboard query: filter then sort the canonical list

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::collate;
use super::filters::FilterSet;
use crate::yishuv::{FieldId, FieldValue, Municipality, SettlementType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Everything that shapes a leaderboard view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub district: Option<String>,
    pub settlement_type: Option<SettlementType>,
    pub search: Option<String>,
    pub filters: FilterSet,
    pub sort_key: FieldId,
    pub direction: SortDirection,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            district: None,
            settlement_type: None,
            search: None,
            filters: FilterSet::default(),
            sort_key: FieldId::Population,
            direction: SortDirection::Descending,
        }
    }
}

impl LeaderboardQuery {
    /// Select a sort key. Re-selecting the active key flips the direction,
    /// a new key starts out descending.
    pub fn sort_by(&mut self, key: FieldId) {
        if self.sort_key == key {
            self.direction = self.direction.toggled();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Descending;
        }
    }

    /// Filtering part of the query, without sorting
    pub fn accepts(&self, m: &Municipality) -> bool {
        if let Some(district) = &self.district {
            if &m.district != district {
                return false;
            }
        }
        if let Some(kind) = self.settlement_type {
            if m.settlement_type != kind {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !m.name.contains(needle) {
                return false;
            }
        }
        self.filters.matches(m)
    }
}

/// Order two field values. Missing values are the lowest of all.
fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Null, _) => Ordering::Less,
        (_, FieldValue::Null) => Ordering::Greater,
        (FieldValue::Number(x), FieldValue::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (FieldValue::Text(x), FieldValue::Text(y)) => collate::compare(x, y),
        (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
        (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
    }
}

/// Run a query. Sorting is stable, so records with equal keys keep the
/// order they arrived in; with the default source that is population order.
pub fn run_query<'a, I>(items: I, query: &LeaderboardQuery) -> Vec<&'a Municipality>
where
    I: IntoIterator<Item = &'a Municipality>,
{
    let mut rows: Vec<&Municipality> = items.into_iter().filter(|m| query.accepts(m)).collect();

    let key = query.sort_key;
    rows.sort_by(|a, b| {
        let ordering = compare_values(a.field(key), b.field(key));
        match query.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::leaderboard::filters::FieldFilter;
    use crate::yishuv::{AgeBrackets, Socioeconomics};

    fn make(code: &str, name: &str, napa: &str, population: u64, wage: Option<f64>) -> Municipality {
        Municipality::new(
            code.into(),
            name.into(),
            napa.into(),
            None,
            population,
            AgeBrackets::default(),
            Socioeconomics {
                median_wage: wage,
                ..Default::default()
            },
        )
    }

    fn fixture() -> Vec<Municipality> {
        vec![
            make("1", "ירושלים", "ירושלים", 990_000, Some(90_000.0)),
            make("2", "תל אביב - יפו", "תל אביב", 470_000, None),
            make("3", "חיפה", "חיפה", 285_000, Some(120_000.0)),
            make("4", "בית שמש", "בית שמש", 150_000, None),
            make("5", "נשר", "חיפה", 24_000, Some(0.0)),
            make("6", "קריית טבעון", "חיפה", 19_000, Some(120_000.0)),
        ]
    }

    fn codes(rows: &[&Municipality]) -> Vec<String> {
        rows.iter().map(|m| m.code.clone()).collect()
    }

    #[test]
    fn test_default_query_is_population_descending() {
        let all = fixture();
        let rows = run_query(&all, &LeaderboardQuery::default());
        assert_eq!(codes(&rows), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_nulls_are_lowest_in_both_directions() {
        let all = fixture();
        let mut query = LeaderboardQuery {
            sort_key: FieldId::MedianWage,
            ..Default::default()
        };

        // Descending: nulls last, ties keep population order
        assert_eq!(codes(&run_query(&all, &query)), vec!["3", "6", "1", "5", "2", "4"]);

        query.direction = SortDirection::Ascending;
        assert_eq!(codes(&run_query(&all, &query)), vec!["2", "4", "5", "1", "3", "6"]);
    }

    #[test]
    fn test_filters_apply_in_combination() {
        let all = fixture();
        let mut query = LeaderboardQuery {
            district: Some("חיפה".into()),
            ..Default::default()
        };
        assert_eq!(codes(&run_query(&all, &query)), vec!["3", "5", "6"]);

        query.settlement_type = Some(SettlementType::City);
        assert_eq!(codes(&run_query(&all, &query)), vec!["3", "5"]);

        query.search = Some("נש".into());
        assert_eq!(codes(&run_query(&all, &query)), vec!["5"]);

        query.search = None;
        query.filters.set(
            FieldId::MedianWage,
            FieldFilter::Range { min: 1.0, max: 200_000.0 },
        );
        assert_eq!(codes(&run_query(&all, &query)), vec!["3"]);
    }

    #[test]
    fn test_query_is_idempotent() {
        let all = fixture();
        let mut query = LeaderboardQuery {
            sort_key: FieldId::Name,
            direction: SortDirection::Ascending,
            ..Default::default()
        };
        query.filters.set(
            FieldId::Population,
            FieldFilter::Range { min: 20_000.0, max: 500_000.0 },
        );

        let once = run_query(&all, &query);
        let twice = run_query(once.iter().copied(), &query);
        assert_eq!(codes(&once), codes(&twice));
        assert_eq!(codes(&once), vec!["4", "3", "5", "2"]);
    }

    #[test]
    fn test_sort_by_toggles_or_resets() {
        let mut query = LeaderboardQuery::default();
        query.sort_by(FieldId::Population);
        assert_eq!(query.direction, SortDirection::Ascending);

        query.sort_by(FieldId::MedianAge);
        assert_eq!(query.sort_key, FieldId::MedianAge);
        assert_eq!(query.direction, SortDirection::Descending);
    }
}
