//! Open-data API access
//!
//! Fetches the raw population, census and socioeconomic datasets from the
//! data.gov.il CKAN datastore (or local dumps of it) for the merge pipeline.

pub mod client;
pub mod constants;
pub mod models;
pub mod source;

pub use source::{load_snapshot, source_from_config};
