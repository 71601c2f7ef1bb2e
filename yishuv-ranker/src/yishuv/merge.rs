//! Merge pipeline: population + census 2022 + socioeconomic index
//!
//! Joins the three raw record sets by municipality code and produces the
//! canonical list, sorted by population (descending). Rows that can't be
//! used are dropped without error since open-data feeds routinely carry them.

use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::models::{AgeBrackets, Municipality, Socioeconomics};

/// Population authority field names
pub mod population_fields {
    pub const CODE: &str = "סמל_ישוב";
    pub const NAME: &str = "שם_ישוב";
    pub const NAPA: &str = "נפה";
    pub const COUNCIL: &str = "מועצה_אזורית";
    pub const TOTAL: &str = "סהכ";
    pub const AGE_0_5: &str = "גיל_0_5";
    pub const AGE_6_18: &str = "גיל_6_18";
    pub const AGE_19_45: &str = "גיל_19_45";
    pub const AGE_46_55: &str = "גיל_46_55";
    pub const AGE_56_64: &str = "גיל_56_64";
    pub const AGE_65_PLUS: &str = "גיל_65_פלוס";
}

/// Census 2022 field names
pub mod census_fields {
    pub const CODE: &str = "LocalityCode";
    pub const STAT_AREA: &str = "StatArea";
    pub const DENSITY: &str = "pop_density";
    pub const MEDIAN_AGE: &str = "age_median";
    pub const MEDIAN_WAGE: &str = "employeesAnnual_medWage";
    pub const ACADEMIC_PCT: &str = "AcadmCert_pcnt";
    pub const EMPLOYMENT_PCT: &str = "Empl_pcnt";
    pub const HOUSEHOLD_SIZE: &str = "size_avg";
    pub const RELIGION: &str = "ReligionHeb";
    pub const SEX_RATIO: &str = "sexRatio";
    pub const CHILDREN_BORN: &str = "ChldBorn_avg";
    pub const MARRIAGE_AGE: &str = "MarriageAge_mdn";
    pub const WORK_PARTICIPATION: &str = "WrkY_pcnt";
    pub const OWN_PCT: &str = "own_pcnt";
    pub const RENT_PCT: &str = "rent_pcnt";
}

/// Socioeconomic index field names
pub mod socio_fields {
    pub const CODE: &str = "LOCALITY SYMBOL";
    pub const CLUSTER: &str = "ESHKOL 2019";
}

/// Normalize a municipality code: string-cast and trimmed.
/// Whole numbers serialized as floats ("70.0") collapse to "70".
pub fn normalize_code(value: &Value) -> Option<String> {
    let code = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", f as i64),
                    Some(f) => f.to_string(),
                    None => return None,
                }
            }
        }
        _ => return None,
    };

    if code.is_empty() { None } else { Some(code) }
}

/// Parse a loosely typed value as a finite float.
/// Missing, unparsable and non-finite values are `None`, never zero.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Parse a head count; anything missing or invalid counts as zero
fn parse_count(value: &Value) -> u64 {
    parse_number(value)
        .filter(|n| *n > 0.0)
        .map(|n| n.round() as u64)
        .unwrap_or(0)
}

/// Trimmed, non-empty text
fn parse_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn get<'a>(record: &'a Value, key: &str) -> &'a Value {
    record.get(key).unwrap_or(&Value::Null)
}

/// Build a code -> record lookup. Later records overwrite earlier ones.
fn index_by_code<'a>(records: &'a [Value], code_field: &str) -> HashMap<String, &'a Value> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(code) = normalize_code(get(record, code_field)) {
            index.insert(code, record);
        }
    }
    index
}

fn census_values(census: Option<&Value>, socio: Option<&Value>) -> Socioeconomics {
    use census_fields as c;

    let num = |key: &str| census.and_then(|r| parse_number(get(r, key)));

    Socioeconomics {
        density: num(c::DENSITY),
        median_age: num(c::MEDIAN_AGE),
        median_wage: num(c::MEDIAN_WAGE),
        academic_pct: num(c::ACADEMIC_PCT),
        employment_pct: num(c::EMPLOYMENT_PCT),
        avg_household_size: num(c::HOUSEHOLD_SIZE),
        religion: census.and_then(|r| parse_text(get(r, c::RELIGION))),
        sex_ratio: num(c::SEX_RATIO),
        avg_children_born: num(c::CHILDREN_BORN),
        median_marriage_age: num(c::MARRIAGE_AGE),
        work_participation: num(c::WORK_PARTICIPATION),
        own_pct: num(c::OWN_PCT),
        rent_pct: num(c::RENT_PCT),
        socio_cluster: socio.and_then(|r| parse_number(get(r, socio_fields::CLUSTER))),
    }
}

/// Keep only locality-level census rows (no statistical area breakdown)
pub fn locality_level_census(records: Vec<Value>) -> Vec<Value> {
    records
        .into_iter()
        .filter(|r| {
            let has_code = normalize_code(get(r, census_fields::CODE)).is_some();
            let stat_area_empty = match get(r, census_fields::STAT_AREA) {
                Value::Null => true,
                Value::String(s) => s.trim().is_empty(),
                _ => false,
            };
            has_code && stat_area_empty
        })
        .collect()
}

/// Merge the three sources into the canonical municipality list
pub fn merge(
    population_records: &[Value],
    census_records: &[Value],
    socio_records: &[Value],
) -> Vec<Municipality> {
    use population_fields as p;

    let census_index = index_by_code(census_records, census_fields::CODE);
    let socio_index = index_by_code(socio_records, socio_fields::CODE);

    let mut seen = HashSet::new();
    let mut dropped = 0usize;
    let mut municipalities = Vec::with_capacity(population_records.len());

    for record in population_records {
        let population = parse_number(get(record, p::TOTAL))
            .filter(|n| *n > 0.0)
            .map(|n| n.round() as u64)
            .filter(|n| *n > 0);
        let code_is_positive = parse_number(get(record, p::CODE)).is_some_and(|n| n > 0.0);
        let code = normalize_code(get(record, p::CODE));

        let (Some(population), Some(code), true) = (population, code, code_is_positive) else {
            dropped += 1;
            continue;
        };

        if !seen.insert(code.clone()) {
            log::debug!("Skipping duplicate population row for code {}", code);
            dropped += 1;
            continue;
        }

        let ages = AgeBrackets {
            age0_5: parse_count(get(record, p::AGE_0_5)),
            age6_18: parse_count(get(record, p::AGE_6_18)),
            age19_45: parse_count(get(record, p::AGE_19_45)),
            age46_55: parse_count(get(record, p::AGE_46_55)),
            age56_64: parse_count(get(record, p::AGE_56_64)),
            age65plus: parse_count(get(record, p::AGE_65_PLUS)),
        };

        let socio = census_values(
            census_index.get(&code).copied(),
            socio_index.get(&code).copied(),
        );

        municipalities.push(Municipality::new(
            code,
            parse_text(get(record, p::NAME)).unwrap_or_default(),
            parse_text(get(record, p::NAPA)).unwrap_or_default(),
            parse_text(get(record, p::COUNCIL)),
            population,
            ages,
            socio,
        ));
    }

    // Stable: equal populations keep source order
    municipalities.sort_by(|a, b| b.population.cmp(&a.population));

    log::debug!(
        "Merged {} municipalities ({} population rows dropped, {} census / {} socio keys)",
        municipalities.len(),
        dropped,
        census_index.len(),
        socio_index.len()
    );

    municipalities
}
