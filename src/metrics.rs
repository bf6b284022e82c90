use serde::{Deserialize, Serialize};

use crate::edge::{Edge, Stage};

/// Plan-level totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Goods delivered to restaurants (distribution amounts only).
    pub total_amount: f64,
    pub total_cost: f64,
    pub total_co2_emissions: f64,
}

impl Metrics {
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut acc = MetricsAccumulator::default();
        for edge in edges {
            acc.fold(edge);
        }
        acc.finish()
    }

    /// Field-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Metrics, tolerance: f64) -> bool {
        (self.total_amount - other.total_amount).abs() <= tolerance
            && (self.total_cost - other.total_cost).abs() <= tolerance
            && (self.total_co2_emissions - other.total_co2_emissions).abs() <= tolerance
    }
}

/// Running totals, folded one edge at a time.
///
/// A distribution edge's source side is the warehouse, which was already
/// costed when its inbound supply edge was folded, so only the target and
/// transport components count.
#[derive(Debug, Default)]
pub struct MetricsAccumulator {
    totals: Metrics,
}

impl MetricsAccumulator {
    pub fn fold(&mut self, edge: &Edge) {
        match edge.stage {
            Stage::Supply => {
                self.totals.total_cost +=
                    edge.source_cost + edge.target_cost + edge.transport_cost;
                self.totals.total_co2_emissions +=
                    edge.source_co2 + edge.target_co2 + edge.transport_co2;
            }
            Stage::Distribution => {
                self.totals.total_amount += edge.amount;
                self.totals.total_cost += edge.target_cost + edge.transport_cost;
                self.totals.total_co2_emissions += edge.target_co2 + edge.transport_co2;
            }
        }
    }

    pub fn finish(self) -> Metrics {
        self.totals
    }
}
