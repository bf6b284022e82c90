use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;
use crate::schema::{site_type, stage};

/// Which leg of the network an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Vendor → warehouse.
    Supply,
    /// Warehouse → restaurant.
    Distribution,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Supply => stage::SUPPLY,
            Stage::Distribution => stage::DISTRIBUTION,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            stage::SUPPLY => Ok(Stage::Supply),
            stage::DISTRIBUTION => Ok(Stage::Distribution),
            other => Err(FlowError::InvalidData(format!(
                "Invalid stage: '{other}'. Must be 'supply' or 'distribution'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Farm,
    Warehouse,
    Restaurant,
}

impl SiteType {
    pub fn as_str(self) -> &'static str {
        match self {
            SiteType::Farm => site_type::FARM,
            SiteType::Warehouse => site_type::WAREHOUSE,
            SiteType::Restaurant => site_type::RESTAURANT,
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteType {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            site_type::FARM => Ok(SiteType::Farm),
            site_type::WAREHOUSE => Ok(SiteType::Warehouse),
            site_type::RESTAURANT => Ok(SiteType::Restaurant),
            other => Err(FlowError::InvalidData(format!(
                "Invalid site type: '{other}'. Must be 'farm', 'warehouse' or 'restaurant'"
            ))),
        }
    }
}

/// One goods transfer between two sites.
///
/// Cost and emission components are totals for `amount`, pre-computed by
/// whoever produced the edge (see [`crate::builder::PlanBuilder`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub stage: Stage,
    pub source_id: String,
    pub source_name: String,
    pub source_type: SiteType,
    pub source_cost: f64,
    #[serde(rename = "source_co2_emissions")]
    pub source_co2: f64,
    pub target_id: String,
    pub target_name: String,
    pub target_type: SiteType,
    pub target_cost: f64,
    #[serde(rename = "target_co2_emissions")]
    pub target_co2: f64,
    pub vehicle_company: String,
    pub vehicle_type: String,
    pub amount: f64,
    pub transport_cost: f64,
    #[serde(rename = "transport_co2_emissions")]
    pub transport_co2: f64,
}

impl Edge {
    /// The warehouse this edge balances against.
    pub fn junction_id(&self) -> &str {
        match self.stage {
            Stage::Supply => &self.target_id,
            Stage::Distribution => &self.source_id,
        }
    }

    pub fn is_distribution(&self) -> bool {
        self.stage == Stage::Distribution
    }

    /// Amounts must be finite and non-negative.
    pub fn check_amount(&self) -> Result<(), FlowError> {
        if self.amount.is_finite() && self.amount >= 0.0 {
            return Ok(());
        }
        Err(FlowError::InvalidData(format!(
            "Invalid amount {} on {} edge {} ({}) -> {} ({})",
            self.amount,
            self.stage,
            self.source_id,
            self.source_name,
            self.target_id,
            self.target_name
        )))
    }

    /// Both endpoints pass `keep`.
    pub fn touches_only(&self, mut keep: impl FnMut(&str) -> bool) -> bool {
        keep(&self.source_id) && keep(&self.target_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(stage: Stage, source: &str, target: &str) -> Edge {
        Edge {
            stage,
            source_id: source.into(),
            source_name: source.into(),
            source_type: SiteType::Farm,
            source_cost: 0.0,
            source_co2: 0.0,
            target_id: target.into(),
            target_name: target.into(),
            target_type: SiteType::Warehouse,
            target_cost: 0.0,
            target_co2: 0.0,
            vehicle_company: "Cluck Logistics".into(),
            vehicle_type: "Refrigerated Electric Van".into(),
            amount: 1.0,
            transport_cost: 0.0,
            transport_co2: 0.0,
        }
    }

    #[test]
    fn junction_follows_stage() {
        assert_eq!(edge(Stage::Supply, "F1", "W1").junction_id(), "W1");
        assert_eq!(edge(Stage::Distribution, "W1", "R1").junction_id(), "W1");
    }

    #[test]
    fn amount_must_be_finite_and_non_negative() {
        let mut e = edge(Stage::Distribution, "W1", "R1");
        assert!(e.check_amount().is_ok());
        e.amount = 0.0;
        assert!(e.check_amount().is_ok());
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            e.amount = bad;
            assert!(matches!(e.check_amount(), Err(FlowError::InvalidData(_))));
        }
    }

    #[test]
    fn stage_parses_trimmed_text() {
        assert_eq!(" supply ".parse::<Stage>().unwrap(), Stage::Supply);
        assert_eq!("distribution".parse::<Stage>().unwrap(), Stage::Distribution);
        assert!(matches!(
            "Supply".parse::<Stage>(),
            Err(FlowError::InvalidData(_))
        ));
    }

    #[test]
    fn site_type_round_trips_through_text() {
        for t in [SiteType::Farm, SiteType::Warehouse, SiteType::Restaurant] {
            assert_eq!(t.as_str().parse::<SiteType>().unwrap(), t);
        }
    }
}
