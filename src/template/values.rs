use crate::config::{CostDetails, HistoryEntry};
use crate::locale::{format_currency, format_distance, parse_currency};

use super::renderer::TemplateValues;

/// Derive the template value map from a history entry. The vocabulary is
/// fixed; presentation formatting happens here so the renderer only ever
/// sees display strings.
pub fn build_values(entry: &HistoryEntry) -> TemplateValues {
    let mut values = TemplateValues::new();
    let costs = entry.cost_details.as_ref();

    values.insert("r3".into(), Some(format_distance(entry.service_distance)));
    values.insert("r4".into(), entry.total_distance.map(format_distance));
    values.insert("cobertura".into(), entry.coverage_limit.map(format_distance));
    values.insert("deslocamento".into(), entry.displacement.map(format_distance));
    values.insert(
        "excedente_r3".into(),
        Some(format_distance(entry.provider_excess)),
    );
    values.insert(
        "excedente_cliente".into(),
        (entry.client_excess > 0.0).then(|| format_distance(entry.client_excess)),
    );

    values.insert("valor_km".into(), costs.map(|c| c.rate_per_km.clone()));
    values.insert(
        "pedagio".into(),
        costs.and_then(|c| (parse_currency(&c.toll) > 0.0).then(|| c.toll.clone())),
    );
    values.insert(
        "total_cliente".into(),
        costs.and_then(|c| (c.total > 0.0).then(|| format_currency(c.total))),
    );
    values.insert(
        "custos_internos".into(),
        costs.and_then(internal_costs_block),
    );

    values
}

/// One line per internal provider cost; these show up in the summary but are
/// never billed to the client.
fn internal_costs_block(costs: &CostDetails) -> Option<String> {
    let mut lines = String::new();

    if let Some(toll) = &costs.provider_toll {
        if !toll.is_empty() && toll != "0,00" {
            lines.push_str(&format!("- Pedágio: R$ {toll}\n"));
        }
    }
    for extra in &costs.extra_costs {
        let description = if extra.description.is_empty() {
            "Extra"
        } else {
            extra.description.as_str()
        };
        let value = if extra.value.is_empty() {
            "0,00"
        } else {
            extra.value.as_str()
        };
        lines.push_str(&format!("- {description}: R$ {value}\n"));
    }

    let trimmed = lines.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
