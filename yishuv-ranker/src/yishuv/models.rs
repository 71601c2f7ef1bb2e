use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Population threshold above which a non-council locality counts as a city
pub const CITY_POPULATION_THRESHOLD: u64 = 20_000;

/// Napa (sub-district) to district lookup
static NAPA_TO_DISTRICT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ירושלים", "ירושלים"),
        ("בית שמש", "ירושלים"),
        ("צפת", "צפון"),
        ("כנרת", "צפון"),
        ("גולן", "צפון"),
        ("עכו", "צפון"),
        ("יזרעאל", "צפון"),
        ("חיפה", "חיפה"),
        ("חדרה", "חיפה"),
        ("השרון", "מרכז"),
        ("פתח תקוה", "מרכז"),
        ("פתח תקווה", "מרכז"),
        ("רמלה", "מרכז"),
        ("רחובות", "מרכז"),
        ("תל אביב", "תל אביב"),
        ("אשקלון", "דרום"),
        ("באר שבע", "דרום"),
        ("אשדוד", "דרום"),
    ])
});

/// Districts offered as filter choices, in display order
pub const DISTRICTS: [&str; 6] = ["ירושלים", "תל אביב", "חיפה", "מרכז", "צפון", "דרום"];

/// Resolve the district for a napa name, falling back to the napa itself
pub fn district_for_napa(napa: &str) -> String {
    NAPA_TO_DISTRICT
        .get(napa)
        .map(|d| d.to_string())
        .unwrap_or_else(|| napa.to_string())
}

/// Kind of settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlementType {
    City,
    RegionalCouncil,
    Locality,
}

impl SettlementType {
    /// Classify a record: a council membership wins, then population size
    pub fn classify(council: Option<&str>, population: u64) -> Self {
        match council {
            Some(c) if !c.trim().is_empty() => SettlementType::RegionalCouncil,
            _ if population >= CITY_POPULATION_THRESHOLD => SettlementType::City,
            _ => SettlementType::Locality,
        }
    }

    /// Hebrew display label
    pub fn label(&self) -> &'static str {
        match self {
            SettlementType::City => "עיר",
            SettlementType::RegionalCouncil => "מועצה אזורית",
            SettlementType::Locality => "יישוב",
        }
    }

    pub fn all() -> [SettlementType; 3] {
        [
            SettlementType::City,
            SettlementType::Locality,
            SettlementType::RegionalCouncil,
        ]
    }
}

impl std::fmt::Display for SettlementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for SettlementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "city" | "עיר" => Ok(SettlementType::City),
            "regional-council" | "council" | "מועצה אזורית" => {
                Ok(SettlementType::RegionalCouncil)
            }
            "locality" | "יישוב" => Ok(SettlementType::Locality),
            other => Err(format!(
                "unknown settlement type '{}' (expected city, regional-council or locality)",
                other
            )),
        }
    }
}

/// Counts per age bracket as published by the population authority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBrackets {
    pub age0_5: u64,
    pub age6_18: u64,
    pub age19_45: u64,
    pub age46_55: u64,
    pub age56_64: u64,
    pub age65plus: u64,
}

impl AgeBrackets {
    /// Residents aged 0-18
    pub fn youth(&self) -> u64 {
        self.age0_5 + self.age6_18
    }
}

/// Census 2022 and socioeconomic index values. Every field is optional:
/// `None` means the source had no value, which is distinct from a measured zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Socioeconomics {
    pub density: Option<f64>,
    pub median_age: Option<f64>,
    pub median_wage: Option<f64>,
    pub academic_pct: Option<f64>,
    pub employment_pct: Option<f64>,
    pub avg_household_size: Option<f64>,
    pub religion: Option<String>,
    pub sex_ratio: Option<f64>,
    pub avg_children_born: Option<f64>,
    pub median_marriage_age: Option<f64>,
    pub work_participation: Option<f64>,
    pub own_pct: Option<f64>,
    pub rent_pct: Option<f64>,
    pub socio_cluster: Option<f64>,
}

/// A single municipality (yishuv) after merging all sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub code: String,
    pub name: String,
    pub district: String,
    pub napa: String,
    pub council: Option<String>,
    pub settlement_type: SettlementType,
    pub population: u64,
    pub ages: AgeBrackets,
    pub youth_percent: u64,
    pub elder_percent: u64,
    pub socio: Socioeconomics,
}

impl Municipality {
    /// Build a record, deriving district, type and age percentages.
    /// `population` must be positive; the merge pipeline drops anything else.
    pub fn new(
        code: String,
        name: String,
        napa: String,
        council: Option<String>,
        population: u64,
        ages: AgeBrackets,
        socio: Socioeconomics,
    ) -> Self {
        let council = council.filter(|c| !c.trim().is_empty());
        let settlement_type = SettlementType::classify(council.as_deref(), population);

        Self {
            district: district_for_napa(&napa),
            youth_percent: percent_of(ages.youth(), population),
            elder_percent: percent_of(ages.age65plus, population),
            code,
            name,
            napa,
            council,
            settlement_type,
            population,
            ages,
            socio,
        }
    }
}

/// Rounded share of `part` in `total`, in whole percent
fn percent_of(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_district_lookup_and_fallback() {
        assert_eq!(district_for_napa("באר שבע"), "דרום");
        assert_eq!(district_for_napa("פתח תקוה"), "מרכז");
        assert_eq!(district_for_napa("פתח תקווה"), "מרכז");
        assert_eq!(district_for_napa("יהודה והשומרון"), "יהודה והשומרון");
    }

    #[test]
    fn test_settlement_type_classification() {
        assert_eq!(
            SettlementType::classify(Some("מטה יהודה"), 500_000),
            SettlementType::RegionalCouncil
        );
        assert_eq!(
            SettlementType::classify(Some("   "), 20_000),
            SettlementType::City
        );
        assert_eq!(SettlementType::classify(None, 19_999), SettlementType::Locality);
    }

    #[test]
    fn test_derived_percentages() {
        let ages = AgeBrackets {
            age0_5: 100,
            age6_18: 150,
            age65plus: 125,
            ..Default::default()
        };
        let m = Municipality::new(
            "1".into(),
            "א".into(),
            "חיפה".into(),
            None,
            1000,
            ages,
            Socioeconomics::default(),
        );
        assert_eq!(m.youth_percent, 25);
        assert_eq!(m.elder_percent, 13);
        assert_eq!(m.district, "חיפה");
        assert_eq!(m.settlement_type, SettlementType::Locality);
    }

    #[test]
    fn test_settlement_type_from_str() {
        assert_eq!("city".parse::<SettlementType>(), Ok(SettlementType::City));
        assert_eq!(
            "מועצה אזורית".parse::<SettlementType>(),
            Ok(SettlementType::RegionalCouncil)
        );
        assert!("town".parse::<SettlementType>().is_err());
    }
}
