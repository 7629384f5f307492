//! Remote persistence collaborator.
//!
//! A Supabase-style REST store holds one `calculations` row per entry, keyed
//! by the per-device identifier, plus a singular `app_settings` row for the
//! shared summary template. All calls are best effort: callers report
//! failures as non-fatal warnings and the local mirror stays authoritative.

mod weather;

pub use weather::{fetch_weather, Weather};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::config::{CostDetails, HistoryEntry, RemoteSettings};
use crate::error::{Result, RotaError};

const TEMPLATE_KEY: &str = "summary_template";

fn agent() -> Agent {
    Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(5)))
        .build()
        .into()
}

fn sync_err(e: impl std::fmt::Display) -> RotaError {
    RotaError::Sync(e.to_string())
}

fn endpoint(remote: &RemoteSettings, table: &str) -> String {
    format!("{}/rest/v1/{}", remote.url.trim_end_matches('/'), table)
}

/// Insert payload for the calculations table. Column names are the store's
/// fixed schema, not the crate's field names.
#[derive(Debug, Serialize)]
struct NewCalculation<'a> {
    device_id: &'a str,
    id_numeric: i64,
    r3: f64,
    r4: Option<f64>,
    cobertura_cliente: Option<f64>,
    deslocamento: Option<f64>,
    excedente_r3: f64,
    excedente_cliente: f64,
    cost_details: Option<&'a CostDetails>,
}

#[derive(Debug, Deserialize)]
struct RemoteCalculation {
    id: serde_json::Value,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    id_numeric: Option<i64>,
    r3: f64,
    #[serde(default)]
    r4: Option<f64>,
    #[serde(default)]
    cobertura_cliente: Option<f64>,
    #[serde(default)]
    deslocamento: Option<f64>,
    excedente_r3: f64,
    excedente_cliente: f64,
    #[serde(default)]
    cost_details: Option<CostDetails>,
}

impl RemoteCalculation {
    fn remote_id(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn local_id(&self) -> i64 {
        self.id_numeric.unwrap_or_else(|| {
            self.created_at
                .as_deref()
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                .map_or(0, |dt| dt.timestamp_millis())
        })
    }

    fn into_entry(self) -> HistoryEntry {
        HistoryEntry {
            id: self.local_id(),
            remote_id: Some(self.remote_id()),
            service_distance: self.r3,
            total_distance: self.r4,
            coverage_limit: self.cobertura_cliente,
            displacement: self.deslocamento,
            provider_excess: self.excedente_r3,
            client_excess: self.excedente_cliente,
            cost_details: self.cost_details,
        }
    }
}

/// Selector for one calculation row: remote id when known, otherwise the
/// device-scoped numeric id.
fn row_query(device_id: &str, entry: &HistoryEntry) -> String {
    match &entry.remote_id {
        Some(remote_id) => format!("id=eq.{remote_id}"),
        None => format!("id_numeric=eq.{}&device_id=eq.{}", entry.id, device_id),
    }
}

/// Persist a new calculation remotely; returns the store-assigned row id.
pub fn push_calculation(
    remote: &RemoteSettings,
    device_id: &str,
    entry: &HistoryEntry,
) -> Result<Option<String>> {
    let payload = serde_json::to_string(&[NewCalculation {
        device_id,
        id_numeric: entry.id,
        r3: entry.service_distance,
        r4: entry.total_distance,
        cobertura_cliente: entry.coverage_limit,
        deslocamento: entry.displacement,
        excedente_r3: entry.provider_excess,
        excedente_cliente: entry.client_excess,
        cost_details: entry.cost_details.as_ref(),
    }])
    .map_err(sync_err)?;

    let mut response = agent()
        .post(&endpoint(remote, "calculations"))
        .header("apikey", &remote.api_key)
        .header("Authorization", &format!("Bearer {}", remote.api_key))
        .header("Content-Type", "application/json")
        .header("Prefer", "return=representation")
        .send(payload.as_bytes())
        .map_err(sync_err)?;

    let body = response.body_mut().read_to_string().map_err(sync_err)?;
    let rows: Vec<RemoteCalculation> = serde_json::from_str(&body).map_err(sync_err)?;
    Ok(rows.first().map(|row| row.remote_id()))
}

/// Replace (or clear, when `None`) the cost-details blob on a stored row.
pub fn update_costs(remote: &RemoteSettings, device_id: &str, entry: &HistoryEntry) -> Result<()> {
    let payload = serde_json::to_string(&serde_json::json!({
        "cost_details": entry.cost_details,
    }))
    .map_err(sync_err)?;

    agent()
        .patch(&format!(
            "{}?{}",
            endpoint(remote, "calculations"),
            row_query(device_id, entry)
        ))
        .header("apikey", &remote.api_key)
        .header("Authorization", &format!("Bearer {}", remote.api_key))
        .header("Content-Type", "application/json")
        .send(payload.as_bytes())
        .map_err(sync_err)?;
    Ok(())
}

pub fn delete_calculation(
    remote: &RemoteSettings,
    device_id: &str,
    entry: &HistoryEntry,
) -> Result<()> {
    agent()
        .delete(&format!(
            "{}?{}",
            endpoint(remote, "calculations"),
            row_query(device_id, entry)
        ))
        .header("apikey", &remote.api_key)
        .header("Authorization", &format!("Bearer {}", remote.api_key))
        .call()
        .map_err(sync_err)?;
    Ok(())
}

/// Wipe every calculation stored for this device.
pub fn delete_all(remote: &RemoteSettings, device_id: &str) -> Result<()> {
    agent()
        .delete(&format!(
            "{}?device_id=eq.{}",
            endpoint(remote, "calculations"),
            device_id
        ))
        .header("apikey", &remote.api_key)
        .header("Authorization", &format!("Bearer {}", remote.api_key))
        .call()
        .map_err(sync_err)?;
    Ok(())
}

/// Fetch the device's 50 most recent calculations, newest first.
pub fn fetch_history(remote: &RemoteSettings, device_id: &str) -> Result<Vec<HistoryEntry>> {
    let url = format!(
        "{}?select=*&device_id=eq.{}&order=created_at.desc&limit=50",
        endpoint(remote, "calculations"),
        device_id
    );

    let mut response = agent()
        .get(&url)
        .header("apikey", &remote.api_key)
        .header("Authorization", &format!("Bearer {}", remote.api_key))
        .call()
        .map_err(sync_err)?;

    let body = response.body_mut().read_to_string().map_err(sync_err)?;
    let rows: Vec<RemoteCalculation> = serde_json::from_str(&body).map_err(sync_err)?;
    Ok(rows.into_iter().map(RemoteCalculation::into_entry).collect())
}

#[derive(Debug, Deserialize)]
struct SettingRow {
    value: String,
}

/// Read the shared summary template from the settings table, if one is set.
pub fn fetch_template(remote: &RemoteSettings) -> Result<Option<String>> {
    let url = format!(
        "{}?select=value&key=eq.{}",
        endpoint(remote, "app_settings"),
        TEMPLATE_KEY
    );

    let mut response = agent()
        .get(&url)
        .header("apikey", &remote.api_key)
        .header("Authorization", &format!("Bearer {}", remote.api_key))
        .call()
        .map_err(sync_err)?;

    let body = response.body_mut().read_to_string().map_err(sync_err)?;
    let rows: Vec<SettingRow> = serde_json::from_str(&body).map_err(sync_err)?;
    Ok(rows.into_iter().next().map(|row| row.value))
}

/// Upsert the shared summary template. Last write wins.
pub fn push_template(remote: &RemoteSettings, template: &str) -> Result<()> {
    let payload = serde_json::to_string(&[serde_json::json!({
        "key": TEMPLATE_KEY,
        "value": template,
    })])
    .map_err(sync_err)?;

    agent()
        .post(&format!(
            "{}?on_conflict=key",
            endpoint(remote, "app_settings")
        ))
        .header("apikey", &remote.api_key)
        .header("Authorization", &format!("Bearer {}", remote.api_key))
        .header("Content-Type", "application/json")
        .header("Prefer", "resolution=merge-duplicates")
        .send(payload.as_bytes())
        .map_err(sync_err)?;
    Ok(())
}
