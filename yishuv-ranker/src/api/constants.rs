//! data.gov.il CKAN endpoint and resource identifiers

/// CKAN datastore search action
pub const BASE_URL: &str = "https://data.gov.il/api/3/action/datastore_search";

/// Records requested per page
pub const PAGE_SIZE: usize = 10_000;

/// Population authority: residents by age group per locality
pub const POPULATION_RESOURCE: &str = "64edd0ee-3d5d-43ce-8562-c336c24dbc1f";

/// Census 2022 selected indicators
pub const CENSUS_2022_RESOURCE: &str = "9a9e085f-3bc8-41df-b15f-be0daaf99e30";

/// Socioeconomic index 2019
pub const SOCIOECONOMIC_RESOURCE: &str = "7c860e04-9f8d-41c2-9f24-6249958d2081";

pub const USER_AGENT: &str = concat!("yishuv-ranker/", env!("CARGO_PKG_VERSION"));
