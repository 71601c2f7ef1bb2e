//! Field catalogue for municipality records
//!
//! Every field a user can sort, filter or export by has a fixed `FieldId`.
//! Lookups go through `Municipality::field`, which keeps "missing" and
//! "zero" apart via `FieldValue::Null`.

use serde::{Deserialize, Serialize};

use super::models::Municipality;

/// Kind of values stored in a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Text,
}

/// Identifier of a municipality field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    Name,
    Code,
    District,
    Napa,
    Type,
    Council,
    Population,
    YouthPercent,
    ElderPercent,
    Age0To5,
    Age6To18,
    Age19To45,
    Age46To55,
    Age56To64,
    Age65Plus,
    Density,
    MedianAge,
    MedianWage,
    AcademicPct,
    EmploymentPct,
    AvgHouseholdSize,
    Religion,
    SexRatio,
    AvgChildrenBorn,
    MedianMarriageAge,
    WorkParticipation,
    OwnPct,
    RentPct,
    SocioCluster,
}

impl FieldId {
    pub const ALL: [FieldId; 29] = [
        FieldId::Name,
        FieldId::Code,
        FieldId::District,
        FieldId::Napa,
        FieldId::Type,
        FieldId::Council,
        FieldId::Population,
        FieldId::YouthPercent,
        FieldId::ElderPercent,
        FieldId::Age0To5,
        FieldId::Age6To18,
        FieldId::Age19To45,
        FieldId::Age46To55,
        FieldId::Age56To64,
        FieldId::Age65Plus,
        FieldId::Density,
        FieldId::MedianAge,
        FieldId::MedianWage,
        FieldId::AcademicPct,
        FieldId::EmploymentPct,
        FieldId::AvgHouseholdSize,
        FieldId::Religion,
        FieldId::SexRatio,
        FieldId::AvgChildrenBorn,
        FieldId::MedianMarriageAge,
        FieldId::WorkParticipation,
        FieldId::OwnPct,
        FieldId::RentPct,
        FieldId::SocioCluster,
    ];

    /// Stable identifier used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Code => "code",
            FieldId::District => "district",
            FieldId::Napa => "napa",
            FieldId::Type => "type",
            FieldId::Council => "council",
            FieldId::Population => "population",
            FieldId::YouthPercent => "youthPercent",
            FieldId::ElderPercent => "elderPercent",
            FieldId::Age0To5 => "age0_5",
            FieldId::Age6To18 => "age6_18",
            FieldId::Age19To45 => "age19_45",
            FieldId::Age46To55 => "age46_55",
            FieldId::Age56To64 => "age56_64",
            FieldId::Age65Plus => "age65plus",
            FieldId::Density => "density",
            FieldId::MedianAge => "medianAge",
            FieldId::MedianWage => "medianWage",
            FieldId::AcademicPct => "academicPct",
            FieldId::EmploymentPct => "employmentPct",
            FieldId::AvgHouseholdSize => "avgHouseholdSize",
            FieldId::Religion => "religion",
            FieldId::SexRatio => "sexRatio",
            FieldId::AvgChildrenBorn => "avgChildrenBorn",
            FieldId::MedianMarriageAge => "medianMarriageAge",
            FieldId::WorkParticipation => "workParticipation",
            FieldId::OwnPct => "ownPct",
            FieldId::RentPct => "rentPct",
            FieldId::SocioCluster => "socioCluster",
        }
    }

    /// Hebrew column header / label
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "שם ישוב",
            FieldId::Code => "סמל ישוב",
            FieldId::District => "מחוז",
            FieldId::Napa => "נפה",
            FieldId::Type => "סוג",
            FieldId::Council => "מועצה אזורית",
            FieldId::Population => "אוכלוסייה",
            FieldId::YouthPercent => "% צעירים (0-18)",
            FieldId::ElderPercent => "% קשישים (65+)",
            FieldId::Age0To5 => "גיל 0-5",
            FieldId::Age6To18 => "גיל 6-18",
            FieldId::Age19To45 => "גיל 19-45",
            FieldId::Age46To55 => "גיל 46-55",
            FieldId::Age56To64 => "גיל 56-64",
            FieldId::Age65Plus => "גיל 65+",
            FieldId::Density => "צפיפות לקמ״ר",
            FieldId::MedianAge => "גיל חציוני",
            FieldId::MedianWage => "שכר חציוני שנתי",
            FieldId::AcademicPct => "% אקדמאים",
            FieldId::EmploymentPct => "% מועסקים",
            FieldId::AvgHouseholdSize => "גודל משק בית",
            FieldId::Religion => "דת עיקרית",
            FieldId::SexRatio => "יחס מינים",
            FieldId::AvgChildrenBorn => "ילדים שנולדו (ממוצע)",
            FieldId::MedianMarriageAge => "גיל נישואין חציוני",
            FieldId::WorkParticipation => "% השתתפות בעבודה",
            FieldId::OwnPct => "% בעלי דירה",
            FieldId::RentPct => "% שוכרים",
            FieldId::SocioCluster => "אשכול חברתי-כלכלי",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::Name
            | FieldId::Code
            | FieldId::District
            | FieldId::Napa
            | FieldId::Type
            | FieldId::Council
            | FieldId::Religion => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldId::ALL
            .iter()
            .find(|f| f.key().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| format!("unknown field '{}'", wanted))
    }
}

/// Value of a field on a specific record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Number(f64),
    Text(&'a str),
}

impl FieldValue<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Stringified value; `None` for null
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.to_string()),
        }
    }
}

fn opt_number(value: Option<f64>) -> FieldValue<'static> {
    value.map(FieldValue::Number).unwrap_or(FieldValue::Null)
}

impl Municipality {
    /// Look up a field by id
    pub fn field(&self, id: FieldId) -> FieldValue<'_> {
        let s = &self.socio;
        match id {
            FieldId::Name => FieldValue::Text(&self.name),
            FieldId::Code => FieldValue::Text(&self.code),
            FieldId::District => FieldValue::Text(&self.district),
            FieldId::Napa => FieldValue::Text(&self.napa),
            FieldId::Type => FieldValue::Text(self.settlement_type.label()),
            FieldId::Council => self
                .council
                .as_deref()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Null),
            FieldId::Population => FieldValue::Number(self.population as f64),
            FieldId::YouthPercent => FieldValue::Number(self.youth_percent as f64),
            FieldId::ElderPercent => FieldValue::Number(self.elder_percent as f64),
            FieldId::Age0To5 => FieldValue::Number(self.ages.age0_5 as f64),
            FieldId::Age6To18 => FieldValue::Number(self.ages.age6_18 as f64),
            FieldId::Age19To45 => FieldValue::Number(self.ages.age19_45 as f64),
            FieldId::Age46To55 => FieldValue::Number(self.ages.age46_55 as f64),
            FieldId::Age56To64 => FieldValue::Number(self.ages.age56_64 as f64),
            FieldId::Age65Plus => FieldValue::Number(self.ages.age65plus as f64),
            FieldId::Density => opt_number(s.density),
            FieldId::MedianAge => opt_number(s.median_age),
            FieldId::MedianWage => opt_number(s.median_wage),
            FieldId::AcademicPct => opt_number(s.academic_pct),
            FieldId::EmploymentPct => opt_number(s.employment_pct),
            FieldId::AvgHouseholdSize => opt_number(s.avg_household_size),
            FieldId::Religion => s
                .religion
                .as_deref()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Null),
            FieldId::SexRatio => opt_number(s.sex_ratio),
            FieldId::AvgChildrenBorn => opt_number(s.avg_children_born),
            FieldId::MedianMarriageAge => opt_number(s.median_marriage_age),
            FieldId::WorkParticipation => opt_number(s.work_participation),
            FieldId::OwnPct => opt_number(s.own_pct),
            FieldId::RentPct => opt_number(s.rent_pct),
            FieldId::SocioCluster => opt_number(s.socio_cluster),
        }
    }
}

/// A leaderboard ranking category
#[derive(Debug, Clone, Copy)]
pub struct RankingCategory {
    pub field: FieldId,
    pub label: &'static str,
    pub icon: &'static str,
    pub unit: &'static str,
}

pub const RANKING_CATEGORIES: [RankingCategory; 11] = [
    RankingCategory { field: FieldId::Population, label: "אוכלוסייה", icon: "👥", unit: "תושבים" },
    RankingCategory { field: FieldId::YouthPercent, label: "% צעירים (0-18)", icon: "👶", unit: "%" },
    RankingCategory { field: FieldId::ElderPercent, label: "% קשישים (65+)", icon: "👴", unit: "%" },
    RankingCategory { field: FieldId::Density, label: "צפיפות", icon: "🏘️", unit: "לקמ״ר" },
    RankingCategory { field: FieldId::MedianAge, label: "גיל חציוני", icon: "📅", unit: "" },
    RankingCategory { field: FieldId::MedianWage, label: "שכר חציוני", icon: "💰", unit: "₪" },
    RankingCategory { field: FieldId::AcademicPct, label: "% אקדמאים", icon: "🎓", unit: "%" },
    RankingCategory { field: FieldId::EmploymentPct, label: "% מועסקים", icon: "💼", unit: "%" },
    RankingCategory { field: FieldId::SocioCluster, label: "אשכול חברתי-כלכלי", icon: "📊", unit: "" },
    RankingCategory { field: FieldId::AvgHouseholdSize, label: "גודל משק בית", icon: "🏠", unit: "" },
    RankingCategory { field: FieldId::AvgChildrenBorn, label: "ילדים שנולדו (ממוצע)", icon: "👶", unit: "" },
];

/// Find the ranking category for a field, if it is one
pub fn ranking_category(field: FieldId) -> Option<&'static RankingCategory> {
    RANKING_CATEGORIES.iter().find(|c| c.field == field)
}

/// How a filterable field is constrained in the UI
#[derive(Debug, Clone, Copy)]
pub enum FilterControl {
    Range { min: f64, max: f64, step: f64 },
    Select { options: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub field: FieldId,
    pub label: &'static str,
    pub control: FilterControl,
}

pub const RELIGIONS: [&str; 4] = ["יהודים", "מוסלמים", "נוצרים", "דרוזים"];

pub const FILTER_FIELDS: [FilterField; 9] = [
    FilterField {
        field: FieldId::Population,
        label: "אוכלוסייה",
        control: FilterControl::Range { min: 0.0, max: 1_000_000.0, step: 1000.0 },
    },
    FilterField {
        field: FieldId::SocioCluster,
        label: "אשכול חברתי-כלכלי",
        control: FilterControl::Range { min: 1.0, max: 10.0, step: 1.0 },
    },
    FilterField {
        field: FieldId::MedianAge,
        label: "גיל חציוני",
        control: FilterControl::Range { min: 15.0, max: 50.0, step: 1.0 },
    },
    FilterField {
        field: FieldId::MedianWage,
        label: "שכר חציוני שנתי (₪)",
        control: FilterControl::Range { min: 0.0, max: 400_000.0, step: 5000.0 },
    },
    FilterField {
        field: FieldId::AcademicPct,
        label: "% אקדמאים",
        control: FilterControl::Range { min: 0.0, max: 70.0, step: 1.0 },
    },
    FilterField {
        field: FieldId::EmploymentPct,
        label: "% מועסקים",
        control: FilterControl::Range { min: 0.0, max: 100.0, step: 1.0 },
    },
    FilterField {
        field: FieldId::Density,
        label: "צפיפות (לקמ״ר)",
        control: FilterControl::Range { min: 0.0, max: 30_000.0, step: 500.0 },
    },
    FilterField {
        field: FieldId::AvgHouseholdSize,
        label: "גודל משק בית ממוצע",
        control: FilterControl::Range { min: 1.0, max: 8.0, step: 0.5 },
    },
    FilterField {
        field: FieldId::Religion,
        label: "דת עיקרית",
        control: FilterControl::Select { options: &RELIGIONS },
    },
];
