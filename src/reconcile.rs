//! Re-derive a consistent plan after sites leave service.
//!
//! Filter → group by junction → rebalance → replace amounts → recompute
//! metrics. Pure: the input plan is never touched, nothing is read or
//! written outside the returned value.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::ReconcileConfig;
use crate::edge::Edge;
use crate::error::FlowError;
use crate::junction::{EdgeId, JunctionIndex};
use crate::plan::FlowPlan;
use crate::rebalance::{rebalance, JunctionBalance};
use crate::sites::ActiveSites;

/// What happened during one reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub input_edges: usize,
    pub dropped_edges: usize,
    /// Per-junction balance after filtering, before adjustment.
    pub balances: Vec<JunctionBalance>,
    pub adjusted_junctions: Vec<String>,
    pub floored_edges: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub plan: FlowPlan,
    pub report: ReconcileReport,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    pub fn reconcile(&self, plan: &FlowPlan, active: &ActiveSites) -> Result<FlowPlan, FlowError> {
        self.reconcile_with_report(plan, active).map(|r| r.plan)
    }

    pub fn reconcile_with_report(
        &self,
        plan: &FlowPlan,
        active: &ActiveSites,
    ) -> Result<Reconciliation, FlowError> {
        self.config.validate()?;
        for edge in plan.edges() {
            edge.check_amount()?;
        }

        let input_edges = plan.len();
        let working = filter_active(plan.edges(), active);
        let dropped = input_edges - working.len();

        let groups = JunctionIndex::build(&working).groups();
        debug!(junctions = groups.len(), "grouped edges by junction");

        let rebalanced = rebalance(&working, &groups, self.config.tolerance)?;
        let edges = apply_adjustments(working, &rebalanced.amounts)?;
        let plan = FlowPlan::new(edges);

        let metrics = plan.metrics();
        info!(
            dropped,
            adjusted = rebalanced.adjusted_junctions.len(),
            total_amount = metrics.total_amount,
            total_cost = metrics.total_cost,
            total_co2_emissions = metrics.total_co2_emissions,
            "reconciled flow plan"
        );

        Ok(Reconciliation {
            report: ReconcileReport {
                input_edges,
                dropped_edges: dropped,
                balances: rebalanced.balances,
                adjusted_junctions: rebalanced.adjusted_junctions,
                floored_edges: rebalanced.floored.len(),
            },
            plan,
        })
    }
}

/// Reconcile with the default tolerance.
pub fn reconcile(plan: &FlowPlan, active: &ActiveSites) -> Result<FlowPlan, FlowError> {
    Reconciler::default().reconcile(plan, active)
}

/// Copies of the edges whose endpoints are both active, in input order.
pub fn filter_active(edges: &[Edge], active: &ActiveSites) -> Vec<Edge> {
    let kept: Vec<Edge> = edges
        .iter()
        .filter(|e| e.touches_only(|id| active.contains(id)))
        .cloned()
        .collect();
    debug!(
        kept = kept.len(),
        dropped = edges.len() - kept.len(),
        "filtered edges to active sites"
    );
    kept
}

/// Write rebalanced amounts back onto the distribution edges of the arena.
pub fn apply_adjustments(
    mut edges: Vec<Edge>,
    amounts: &HashMap<EdgeId, f64>,
) -> Result<Vec<Edge>, FlowError> {
    for (id, edge) in edges.iter_mut().enumerate() {
        if !edge.is_distribution() {
            continue;
        }
        let amount = amounts
            .get(&id)
            .copied()
            .ok_or_else(|| FlowError::UnmatchedEdge {
                source_id: edge.source_id.clone(),
                source_name: edge.source_name.clone(),
                target_id: edge.target_id.clone(),
                target_name: edge.target_name.clone(),
            })?;
        edge.amount = amount;
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{SiteType, Stage};

    fn distribution(source: &str, target: &str, amount: f64) -> Edge {
        Edge {
            stage: Stage::Distribution,
            source_id: source.into(),
            source_name: format!("Warehouse {source}"),
            source_type: SiteType::Warehouse,
            source_cost: 0.0,
            source_co2: 0.0,
            target_id: target.into(),
            target_name: format!("Restaurant {target}"),
            target_type: SiteType::Restaurant,
            target_cost: 0.0,
            target_co2: 0.0,
            vehicle_company: "Cluck Logistics".into(),
            vehicle_type: "Deisel HGV Refrigerated Articulated".into(),
            amount,
            transport_cost: 0.0,
            transport_co2: 0.0,
        }
    }

    #[test]
    fn missing_adjustment_is_an_internal_error() {
        let edges = vec![distribution("W1", "R1", 10.0)];
        let err = apply_adjustments(edges, &HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            FlowError::UnmatchedEdge { ref source_id, ref target_name, .. }
                if source_id == "W1" && target_name == "Restaurant R1"
        ));
    }

    #[test]
    fn adjustments_land_on_their_arena_position() {
        let edges = vec![distribution("W1", "R1", 10.0), distribution("W1", "R1", 30.0)];
        let amounts = HashMap::from([(0, 4.0), (1, 24.0)]);
        let out = apply_adjustments(edges, &amounts).unwrap();
        assert_eq!(out[0].amount, 4.0);
        assert_eq!(out[1].amount, 24.0);
    }

    #[test]
    fn empty_plan_reconciles_to_empty_plan() {
        let active = ActiveSites::new(["W1"]).unwrap();
        let out = reconcile(&FlowPlan::empty(), &active).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.metrics().total_amount, 0.0);
    }
}
