//! Lookup tables from network records to per-kg rates.

use std::collections::HashMap;

use tracing::warn;

use crate::error::FlowError;
use crate::sites::{RouteDistance, Vehicle, Vendor, Warehouse};

/// `(source_id, target_id)` → kilometres.
#[derive(Debug, Clone, Default)]
pub struct RouteCostMapper {
    distances: HashMap<(String, String), f64>,
}

impl RouteCostMapper {
    pub fn new(routes: &[RouteDistance]) -> Self {
        let distances = routes
            .iter()
            .map(|r| ((r.source_id.clone(), r.target_id.clone()), r.distance_km))
            .collect();
        Self { distances }
    }

    /// Unknown routes cost nothing to travel.
    pub fn distance(&self, source_id: &str, target_id: &str) -> f64 {
        match self
            .distances
            .get(&(source_id.to_string(), target_id.to_string()))
        {
            Some(d) => *d,
            None => {
                warn!(source_id, target_id, "no distance for route, using 0 km");
                0.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleRates {
    pub cost_per_kg_per_km: f64,
    pub co2_per_kg_per_km: f64,
}

/// `(company, vehicle name)` → transport rates.
#[derive(Debug, Clone, Default)]
pub struct VehicleCostMapper {
    rates: HashMap<(String, String), VehicleRates>,
}

impl VehicleCostMapper {
    pub fn new(vehicles: &[Vehicle]) -> Self {
        let rates = vehicles
            .iter()
            .map(|v| {
                (
                    (v.company.clone(), v.name.clone()),
                    VehicleRates {
                        cost_per_kg_per_km: v.cost_per_kg_per_km,
                        co2_per_kg_per_km: v.co2_emissions_per_kg_per_km,
                    },
                )
            })
            .collect();
        Self { rates }
    }

    pub fn rates(&self, company: &str, name: &str) -> Result<VehicleRates, FlowError> {
        self.rates
            .get(&(company.to_string(), name.to_string()))
            .copied()
            .ok_or_else(|| FlowError::UnknownVehicle {
                company: company.to_string(),
                name: name.to_string(),
            })
    }
}

/// Per-kg rates charged at the sites themselves.
#[derive(Debug, Clone, Default)]
pub struct SiteCostMapper {
    vendor_rates: HashMap<String, (f64, f64)>,
    storage_rates: HashMap<String, f64>,
}

impl SiteCostMapper {
    pub fn new(vendors: &[Vendor], warehouses: &[Warehouse]) -> Self {
        Self {
            vendor_rates: vendors
                .iter()
                .map(|v| (v.id.clone(), (v.cost_per_kg, v.co2_emissions_per_kg)))
                .collect(),
            storage_rates: warehouses
                .iter()
                .map(|w| (w.id.clone(), w.storage_cost_per_kg))
                .collect(),
        }
    }

    /// `(cost_per_kg, co2_per_kg)` of a vendor.
    pub fn vendor(&self, id: &str) -> Result<(f64, f64), FlowError> {
        self.vendor_rates
            .get(id)
            .copied()
            .ok_or_else(|| FlowError::UnknownSite(id.to_string()))
    }

    pub fn storage(&self, id: &str) -> Result<f64, FlowError> {
        self.storage_rates
            .get(id)
            .copied()
            .ok_or_else(|| FlowError::UnknownSite(id.to_string()))
    }
}
