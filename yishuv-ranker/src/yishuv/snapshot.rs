use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::Arc;

use super::models::Municipality;

/// The canonical municipality list, shared read-only by every consumer.
///
/// Order is the natural order produced by the merge (population descending).
#[derive(Debug, Clone)]
pub struct Snapshot {
    municipalities: Arc<[Municipality]>,
    positions: Arc<HashMap<String, usize>>,
    loaded_at: DateTime<Local>,
}

/// Coverage figures shown after a load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub total: usize,
    pub with_wage: usize,
    pub with_socio: usize,
    pub with_census: usize,
}

impl Snapshot {
    pub fn new(municipalities: Vec<Municipality>) -> Self {
        let positions = municipalities
            .iter()
            .enumerate()
            .map(|(i, m)| (m.code.clone(), i))
            .collect();

        Self {
            municipalities: municipalities.into(),
            positions: Arc::new(positions),
            loaded_at: Local::now(),
        }
    }

    pub fn all(&self) -> &[Municipality] {
        &self.municipalities
    }

    pub fn len(&self) -> usize {
        self.municipalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.municipalities.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    /// Find a municipality by its code
    pub fn by_code(&self, code: &str) -> Option<&Municipality> {
        self.positions
            .get(code.trim())
            .map(|&i| &self.municipalities[i])
    }

    /// Municipalities whose name contains `needle`, in natural order
    pub fn search_name(&self, needle: &str) -> Vec<&Municipality> {
        self.municipalities
            .iter()
            .filter(|m| m.name.contains(needle))
            .collect()
    }

    /// Municipalities whose code is accepted by `contains`, in natural order
    pub fn select_codes<'a, F>(&'a self, mut contains: F) -> Vec<&'a Municipality>
    where
        F: FnMut(&str) -> bool,
    {
        self.municipalities
            .iter()
            .filter(|m| contains(&m.code))
            .collect()
    }

    pub fn coverage(&self) -> Coverage {
        let all = self.all();
        Coverage {
            total: all.len(),
            // Counts present values, including measured zeros
            with_wage: all.iter().filter(|m| m.socio.median_wage.is_some()).count(),
            with_socio: all.iter().filter(|m| m.socio.socio_cluster.is_some()).count(),
            with_census: all
                .iter()
                .filter(|m| m.socio.median_age.is_some() || m.socio.density.is_some())
                .count(),
        }
    }
}
