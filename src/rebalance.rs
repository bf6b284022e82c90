use std::collections::HashMap;

use tracing::{debug, warn};

use crate::edge::{Edge, Stage};
use crate::error::FlowError;
use crate::junction::{EdgeId, JunctionGroup, JunctionIndex};

/// Inflow against outflow at one warehouse.
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionBalance {
    pub junction: String,
    pub inflow: f64,
    pub outflow: f64,
    /// Supply and distribution edges together.
    pub edge_count: usize,
}

/// What a junction needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    Balanced,
    /// Subtract `delta` from every distribution edge of the group.
    Reduce { delta: f64 },
}

impl JunctionBalance {
    pub fn measure(group: &JunctionGroup, edges: &[Edge]) -> Self {
        let mut inflow = 0.0;
        let mut outflow = 0.0;
        for &id in &group.members {
            let edge = &edges[id];
            match edge.stage {
                Stage::Supply => inflow += edge.amount,
                Stage::Distribution => outflow += edge.amount,
            }
        }
        Self {
            junction: group.junction.clone(),
            inflow,
            outflow,
            edge_count: group.len(),
        }
    }

    pub fn surplus(&self) -> f64 {
        self.inflow - self.outflow
    }

    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.surplus().abs() <= tolerance
    }

    /// A warehouse cannot ship more than it received: outflow above inflow
    /// is fatal. Surplus inflow is split equally over every edge of the
    /// group and taken off the distribution side.
    pub fn correction(&self, tolerance: f64) -> Result<Correction, FlowError> {
        let surplus = self.surplus();
        if self.is_balanced(tolerance) {
            Ok(Correction::Balanced)
        } else if surplus < 0.0 {
            Err(FlowError::Imbalance {
                junction: self.junction.clone(),
                inflow: self.inflow,
                outflow: self.outflow,
            })
        } else {
            Ok(Correction::Reduce {
                delta: surplus / self.edge_count as f64,
            })
        }
    }
}

/// Outcome of rebalancing every group of an arena.
#[derive(Debug, Clone, Default)]
pub struct Rebalance {
    /// Adjusted amount for every distribution edge that belongs to a group.
    pub amounts: HashMap<EdgeId, f64>,
    /// Balances as measured before any adjustment, in group order.
    pub balances: Vec<JunctionBalance>,
    pub adjusted_junctions: Vec<String>,
    /// Edges whose reduced amount would have gone negative.
    pub floored: Vec<EdgeId>,
}

/// Compute adjusted distribution amounts for every group.
///
/// Fails on the first junction whose outflow exceeds its inflow; no partial
/// result is returned.
pub fn rebalance(
    edges: &[Edge],
    groups: &[JunctionGroup],
    tolerance: f64,
) -> Result<Rebalance, FlowError> {
    let mut result = Rebalance::default();

    for group in groups {
        let balance = JunctionBalance::measure(group, edges);
        let correction = balance.correction(tolerance)?;

        let delta = match correction {
            Correction::Balanced => 0.0,
            Correction::Reduce { delta } => {
                debug!(
                    junction = %balance.junction,
                    inflow = balance.inflow,
                    outflow = balance.outflow,
                    delta,
                    "reducing distribution edges"
                );
                result.adjusted_junctions.push(balance.junction.clone());
                delta
            }
        };

        for &id in &group.members {
            let edge = &edges[id];
            if !edge.is_distribution() {
                continue;
            }
            let mut amount = edge.amount - delta;
            if amount < 0.0 {
                warn!(
                    junction = %balance.junction,
                    target_id = %edge.target_id,
                    amount = edge.amount,
                    delta,
                    "reduction exceeds edge amount, flooring at zero"
                );
                amount = 0.0;
                result.floored.push(id);
            }
            result.amounts.insert(id, amount);
        }

        result.balances.push(balance);
    }

    Ok(result)
}

/// Balance of every junction in `edges`, in first-appearance order.
pub fn junction_balances(edges: &[Edge]) -> Vec<JunctionBalance> {
    JunctionIndex::build(edges)
        .groups()
        .iter()
        .map(|g| JunctionBalance::measure(g, edges))
        .collect()
}
