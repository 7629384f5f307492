//! Distance allocation: splits a service run into displacement and
//! provider/client excess figures against the fixed provider allowance.

/// Distance the provider absorbs before any excess becomes billable (KM).
pub const PROVIDER_ALLOWANCE: f64 = 40.0;

/// Result of a single allocation. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Rota 3: the service round trip driving both allocations.
    pub service_distance: f64,
    /// Rota 4: the provider's full logistics route, when supplied.
    pub total_distance: Option<f64>,
    /// Client-side insurance cap on billable distance, when supplied.
    pub coverage_limit: Option<f64>,
    /// Provider detour beyond the service route, net of the allowance
    /// consumed there first. `None` when no total distance was given.
    pub displacement: Option<f64>,
    /// Distance billable to the provider beyond the allowance, net of the
    /// client carve-out.
    pub provider_excess: f64,
    /// Distance billable directly to the client beyond their coverage.
    pub client_excess: f64,
}

/// Allocate a route against the provider allowance.
///
/// The allowance is consumed by the displacement span first; whatever is
/// left offsets the service distance. A positive client excess is carved
/// out of the provider excess, never added on top of it.
pub fn allocate(service: f64, total: Option<f64>, coverage: Option<f64>) -> Allocation {
    let effective_total = total.unwrap_or(service);

    let displacement_span = (effective_total - service).max(0.0);
    let used_by_displacement = PROVIDER_ALLOWANCE.min(displacement_span);
    let raw_displacement = displacement_span - used_by_displacement;

    let remaining_allowance = PROVIDER_ALLOWANCE - used_by_displacement;
    let mut provider_excess = (service - remaining_allowance).max(0.0);

    let mut client_excess = 0.0;
    if let Some(limit) = coverage {
        client_excess = (service - limit).max(0.0);
        if client_excess > 0.0 {
            provider_excess = (provider_excess - client_excess).max(0.0);
        }
    }

    Allocation {
        service_distance: service,
        total_distance: total,
        coverage_limit: coverage,
        displacement: total.map(|_| ceil_tenth(raw_displacement)),
        provider_excess: ceil_tenth(provider_excess),
        client_excess: ceil_tenth(client_excess),
    }
}

/// Ceiling to one decimal: integers pass through, everything else has its
/// magnitude rounded up to the next tenth. Negative inputs keep their sign.
pub fn ceil_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if value.fract() == 0.0 {
        return value;
    }
    let sign = if value < 0.0 { -1.0 } else { 1.0 };
    (value.abs() * 10.0).ceil() / 10.0 * sign
}

/// Client-billable total: excess distance priced per KM plus a flat toll.
pub fn price(client_excess: f64, rate_per_km: f64, toll: f64) -> f64 {
    client_excess * rate_per_km + toll
}
