//! Declarative field filters
//!
//! A `FilterSet` holds at most one filter per field. A field without an entry
//! is unconstrained, so clearing a filter is just removing its entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::yishuv::{FILTER_FIELDS, FieldId, FieldValue, FilterControl, Municipality};

/// Constraint on a single field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldFilter {
    /// Inclusive numeric range
    Range { min: f64, max: f64 },
    /// Stringified value must contain `value`
    Exact { value: String },
}

impl FieldFilter {
    /// Missing values never pass, whichever kind of filter is set
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (_, FieldValue::Null) => false,
            (FieldFilter::Range { min, max }, FieldValue::Number(n)) => n >= *min && n <= *max,
            (FieldFilter::Range { .. }, FieldValue::Text(_)) => false,
            (FieldFilter::Exact { value: wanted }, value) => value
                .to_text()
                .is_some_and(|text| text.contains(wanted.as_str())),
        }
    }
}

impl std::fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldFilter::Range { min, max } => write!(f, "{}..{}", min, max),
            FieldFilter::Exact { value } => write!(f, "{}", value),
        }
    }
}

/// Active filters keyed by field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: BTreeMap<FieldId, FieldFilter>,
}

impl FilterSet {
    pub fn set(&mut self, field: FieldId, filter: FieldFilter) {
        self.filters.insert(field, filter);
    }

    /// Set a range; a range spanning the field's whole catalogue bounds is
    /// the same as no filter and clears it.
    pub fn set_range(&mut self, field: FieldId, min: f64, max: f64) {
        let full_span = FILTER_FIELDS.iter().any(|f| {
            f.field == field
                && matches!(f.control, FilterControl::Range { min: lo, max: hi, .. } if lo == min && hi == max)
        });

        if full_span {
            self.clear(field);
        } else {
            self.set(field, FieldFilter::Range { min, max });
        }
    }

    /// Set an exact-match value; the "all" choice clears it
    pub fn set_value(&mut self, field: FieldId, value: &str) {
        let value = value.trim();
        if value.is_empty() || value == ALL_CHOICE {
            self.clear(field);
        } else {
            self.set(
                field,
                FieldFilter::Exact {
                    value: value.to_string(),
                },
            );
        }
    }

    pub fn clear(&mut self, field: FieldId) -> Option<FieldFilter> {
        self.filters.remove(&field)
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldFilter> {
        self.filters.get(&field)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldFilter)> {
        self.filters.iter().map(|(k, v)| (*k, v))
    }

    /// True when the record passes every active filter
    pub fn matches(&self, municipality: &Municipality) -> bool {
        self.filters
            .iter()
            .all(|(field, filter)| filter.matches(municipality.field(*field)))
    }
}

/// Label of the "no constraint" choice in selection lists
pub const ALL_CHOICE: &str = "הכל";

/// Parse a command-line filter: `field=min..max` or `field=value`
pub fn parse_filter(input: &str) -> Result<(FieldId, FieldFilter), String> {
    let (field, rest) = input
        .split_once('=')
        .ok_or_else(|| format!("filter '{}' must look like field=min..max or field=value", input))?;
    let field: FieldId = field.parse()?;
    let rest = rest.trim();

    if let Some((min, max)) = rest.split_once("..") {
        let min: f64 = min
            .trim()
            .parse()
            .map_err(|_| format!("invalid minimum '{}' in filter '{}'", min.trim(), input))?;
        let max: f64 = max
            .trim()
            .parse()
            .map_err(|_| format!("invalid maximum '{}' in filter '{}'", max.trim(), input))?;
        if min > max {
            return Err(format!("filter '{}' has min greater than max", input));
        }
        return Ok((field, FieldFilter::Range { min, max }));
    }

    if rest.is_empty() {
        return Err(format!("filter '{}' has no value", input));
    }

    Ok((
        field,
        FieldFilter::Exact {
            value: rest.to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yishuv::{AgeBrackets, Socioeconomics};

    fn with_population(population: u64, religion: Option<&str>) -> Municipality {
        Municipality::new(
            population.to_string(),
            "ישוב".into(),
            "רמלה".into(),
            None,
            population,
            AgeBrackets::default(),
            Socioeconomics {
                religion: religion.map(String::from),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_population_range_is_inclusive() {
        let mut filters = FilterSet::default();
        filters.set(
            FieldId::Population,
            FieldFilter::Range {
                min: 100_000.0,
                max: 200_000.0,
            },
        );

        let passing: Vec<u64> = [50_000, 150_000, 250_000, 100_000, 200_000]
            .into_iter()
            .map(|p| with_population(p, None))
            .filter(|m| filters.matches(m))
            .map(|m| m.population)
            .collect();

        assert_eq!(passing, vec![150_000, 100_000, 200_000]);
    }

    #[test]
    fn test_null_values_fail_every_filter() {
        let m = with_population(1000, None);
        let range = FieldFilter::Range { min: 0.0, max: 1e9 };
        let exact = FieldFilter::Exact { value: "".into() };

        assert!(!range.matches(m.field(FieldId::MedianWage)));
        assert!(!exact.matches(m.field(FieldId::Religion)));
    }

    #[test]
    fn test_exact_is_stringified_substring() {
        let m = with_population(150_000, Some("יהודים ואחרים"));
        let religion = FieldFilter::Exact { value: "יהודים".into() };
        let digits = FieldFilter::Exact { value: "500".into() };

        assert!(religion.matches(m.field(FieldId::Religion)));
        assert!(digits.matches(m.field(FieldId::Population)));
        let seven = FieldFilter::Exact { value: "7".into() };
        assert!(!seven.matches(m.field(FieldId::Population)));
    }

    #[test]
    fn test_full_span_range_and_all_choice_clear_filters() {
        let mut filters = FilterSet::default();
        filters.set_range(FieldId::SocioCluster, 3.0, 7.0);
        filters.set_value(FieldId::Religion, "נוצרים");
        assert_eq!(filters.len(), 2);

        filters.set_range(FieldId::SocioCluster, 1.0, 10.0);
        filters.set_value(FieldId::Religion, ALL_CHOICE);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("population=100000..200000"),
            Ok((
                FieldId::Population,
                FieldFilter::Range {
                    min: 100_000.0,
                    max: 200_000.0
                }
            ))
        );
        assert_eq!(
            parse_filter("religion=דרוזים"),
            Ok((
                FieldId::Religion,
                FieldFilter::Exact {
                    value: "דרוזים".into()
                }
            ))
        );
        assert!(parse_filter("population").is_err());
        assert!(parse_filter("population=9..1").is_err());
        assert!(parse_filter("nosuchfield=1").is_err());
    }
}
