use serde::{Deserialize, Serialize};

use crate::calc::Allocation;

/// Most-recent entries kept in the local mirror.
pub const HISTORY_CAP: usize = 50;

/// Local history mirror, newest entry first.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl State {
    pub fn push_entry(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_CAP);
    }

    pub fn find(&self, id: i64) -> Option<&HistoryEntry> {
        self.history.iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, id: i64) -> Option<&mut HistoryEntry> {
        self.history.iter_mut().find(|e| e.id == id)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoryEntry {
    /// Creation timestamp in milliseconds — identity and sort key. Assumed
    /// unique per device; collisions are accepted as negligible.
    pub id: i64,
    /// Row id assigned by the remote store once the entry is persisted there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    pub service_distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displacement: Option<f64>,
    pub provider_excess: f64,
    pub client_excess: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_details: Option<CostDetails>,
}

impl HistoryEntry {
    pub fn from_allocation(id: i64, allocation: &Allocation) -> Self {
        Self {
            id,
            remote_id: None,
            service_distance: allocation.service_distance,
            total_distance: allocation.total_distance,
            coverage_limit: allocation.coverage_limit,
            displacement: allocation.displacement,
            provider_excess: allocation.provider_excess,
            client_excess: allocation.client_excess,
            cost_details: None,
        }
    }

    /// Client-billable total, zero when no costs were priced.
    pub fn charged_total(&self) -> f64 {
        self.cost_details.as_ref().map_or(0.0, |c| c.total)
    }
}

/// Pricing attached to a calculation. Currency fields keep their canonical
/// locale display form so they round-trip into the summary unchanged.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CostDetails {
    pub rate_per_km: String,
    pub toll: String,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_toll: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_costs: Vec<ExtraCost>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExtraCost {
    pub id: String,
    pub description: String,
    pub value: String,
}
