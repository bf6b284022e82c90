use std::collections::HashSet;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Site identifiers still in service.
///
/// Construction validates every entry, so a value of this type is always
/// safe to filter against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSites {
    ids: HashSet<String>,
}

impl ActiveSites {
    pub fn new<I, S>(ids: I) -> Result<Self, FlowError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = HashSet::new();
        for (i, id) in ids.into_iter().enumerate() {
            let id: String = id.into();
            if id.trim().is_empty() {
                return Err(FlowError::InvalidSite(format!(
                    "blank site id at position {i}"
                )));
            }
            set.insert(id);
        }
        Ok(Self { ids: set })
    }

    /// Read the set from a string column of a DataFrame.
    pub fn from_column(df: &DataFrame, column: &str) -> Result<Self, FlowError> {
        let col = df
            .column(column)
            .map_err(|_| FlowError::MissingColumn(column.to_string()))?;
        let values = col.str().map_err(|_| {
            FlowError::InvalidSite(format!(
                "column '{column}' has dtype {}, expected string",
                col.dtype()
            ))
        })?;

        let mut ids = Vec::with_capacity(values.len());
        for (row, value) in values.into_iter().enumerate() {
            let id = value
                .ok_or_else(|| FlowError::InvalidSite(format!("null site id at row {row}")))?;
            ids.push(id.to_string());
        }
        Self::new(ids)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ── Network records ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub company: String,
    pub location: String,
    pub capacity: f64,
    pub cost_per_kg: f64,
    pub co2_emissions_per_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub location: String,
    pub inventory_capacity: f64,
    pub storage_cost_per_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub location: String,
    pub demand: f64,
}

/// A transport mode offered by a logistics company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub company: String,
    pub name: String,
    pub number_available: u32,
    pub capacity: f64,
    pub cost_per_kg_per_km: f64,
    pub co2_emissions_per_kg_per_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDistance {
    pub source_id: String,
    pub target_id: String,
    pub distance_km: f64,
}

/// Everything the solver and the plan builder need to know about the
/// network, as handed over by the data readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub vendors: Vec<Vendor>,
    pub warehouses: Vec<Warehouse>,
    pub restaurants: Vec<Restaurant>,
    pub vehicles: Vec<Vehicle>,
    pub supply_distances: Vec<RouteDistance>,
    pub distribution_distances: Vec<RouteDistance>,
}
