//! Municipality domain: record model, field catalogue, merge pipeline and
//! the shared snapshot the rest of the application reads from.

pub mod fields;
pub mod merge;
pub mod models;
pub mod snapshot;

pub use fields::{
    FILTER_FIELDS, FieldId, FieldKind, FieldValue, FilterControl, RANKING_CATEGORIES,
    ranking_category,
};
pub use merge::{locality_level_census, merge};
pub use models::{AgeBrackets, DISTRICTS, Municipality, SettlementType, Socioeconomics};
pub use snapshot::Snapshot;
