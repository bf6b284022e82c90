use std::collections::HashMap;

use tracing::{debug, info};

use crate::edge::{Edge, SiteType, Stage};
use crate::error::FlowError;
use crate::mapper::{RouteCostMapper, SiteCostMapper, VehicleCostMapper};
use crate::plan::FlowPlan;
use crate::sites::Network;

/// One non-zero decision variable of a solved flow model.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowAssignment {
    pub stage: Stage,
    pub source_id: String,
    pub target_id: String,
    pub vehicle_company: String,
    pub vehicle_type: String,
    pub amount: f64,
}

/// The optimisation backend.
///
/// Implementations own model construction and solving; they only have to
/// hand back how much moves over which route with which vehicle.
pub trait FlowSolver {
    fn solve(&self, network: &Network) -> Result<Vec<FlowAssignment>, FlowError>;
}

/// Turns solver assignments into fully costed edges.
pub struct PlanBuilder<'a> {
    site_costs: SiteCostMapper,
    supply_routes: RouteCostMapper,
    distribution_routes: RouteCostMapper,
    vehicles: VehicleCostMapper,
    vendor_names: HashMap<&'a str, &'a str>,
    warehouse_names: HashMap<&'a str, &'a str>,
    restaurant_names: HashMap<&'a str, &'a str>,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self {
            site_costs: SiteCostMapper::new(&network.vendors, &network.warehouses),
            supply_routes: RouteCostMapper::new(&network.supply_distances),
            distribution_routes: RouteCostMapper::new(&network.distribution_distances),
            vehicles: VehicleCostMapper::new(&network.vehicles),
            vendor_names: network
                .vendors
                .iter()
                .map(|v| (v.id.as_str(), v.name.as_str()))
                .collect(),
            warehouse_names: network
                .warehouses
                .iter()
                .map(|w| (w.id.as_str(), w.name.as_str()))
                .collect(),
            restaurant_names: network
                .restaurants
                .iter()
                .map(|r| (r.id.as_str(), r.name.as_str()))
                .collect(),
        }
    }

    /// Build a plan: supply edges first, then distribution edges, each in
    /// assignment order. Assignments that move nothing are dropped.
    pub fn build(&self, assignments: &[FlowAssignment]) -> Result<FlowPlan, FlowError> {
        let mut supply = Vec::new();
        let mut distribution = Vec::new();

        for assignment in assignments.iter().filter(|a| a.amount > 0.0) {
            match assignment.stage {
                Stage::Supply => supply.push(self.supply_edge(assignment)?),
                Stage::Distribution => distribution.push(self.distribution_edge(assignment)?),
            }
        }

        debug!(
            supply = supply.len(),
            distribution = distribution.len(),
            skipped = assignments.len() - supply.len() - distribution.len(),
            "built edges from assignments"
        );

        supply.extend(distribution);
        Ok(FlowPlan::new(supply))
    }

    fn supply_edge(&self, a: &FlowAssignment) -> Result<Edge, FlowError> {
        let source_name = lookup_name(&self.vendor_names, &a.source_id)?;
        let target_name = lookup_name(&self.warehouse_names, &a.target_id)?;
        let (cost_per_kg, co2_per_kg) = self.site_costs.vendor(&a.source_id)?;
        let storage = self.site_costs.storage(&a.target_id)?;
        let rates = self.vehicles.rates(&a.vehicle_company, &a.vehicle_type)?;
        let km = self.supply_routes.distance(&a.source_id, &a.target_id);

        Ok(Edge {
            stage: Stage::Supply,
            source_id: a.source_id.clone(),
            source_name: source_name.to_string(),
            source_type: SiteType::Farm,
            source_cost: a.amount * cost_per_kg,
            source_co2: a.amount * co2_per_kg,
            target_id: a.target_id.clone(),
            target_name: target_name.to_string(),
            target_type: SiteType::Warehouse,
            target_cost: a.amount * storage,
            target_co2: 0.0,
            vehicle_company: a.vehicle_company.clone(),
            vehicle_type: a.vehicle_type.clone(),
            amount: a.amount,
            transport_cost: a.amount * km * rates.cost_per_kg_per_km,
            transport_co2: a.amount * km * rates.co2_per_kg_per_km,
        })
    }

    fn distribution_edge(&self, a: &FlowAssignment) -> Result<Edge, FlowError> {
        let source_name = lookup_name(&self.warehouse_names, &a.source_id)?;
        let target_name = lookup_name(&self.restaurant_names, &a.target_id)?;
        let storage = self.site_costs.storage(&a.source_id)?;
        let rates = self.vehicles.rates(&a.vehicle_company, &a.vehicle_type)?;
        let km = self.distribution_routes.distance(&a.source_id, &a.target_id);

        Ok(Edge {
            stage: Stage::Distribution,
            source_id: a.source_id.clone(),
            source_name: source_name.to_string(),
            source_type: SiteType::Warehouse,
            source_cost: a.amount * storage,
            source_co2: 0.0,
            target_id: a.target_id.clone(),
            target_name: target_name.to_string(),
            target_type: SiteType::Restaurant,
            target_cost: 0.0,
            target_co2: 0.0,
            vehicle_company: a.vehicle_company.clone(),
            vehicle_type: a.vehicle_type.clone(),
            amount: a.amount,
            transport_cost: a.amount * km * rates.cost_per_kg_per_km,
            transport_co2: a.amount * km * rates.co2_per_kg_per_km,
        })
    }
}

fn lookup_name<'a>(names: &HashMap<&'a str, &'a str>, id: &str) -> Result<&'a str, FlowError> {
    names
        .get(id)
        .copied()
        .ok_or_else(|| FlowError::UnknownSite(id.to_string()))
}

/// Solve the network and cost the result.
pub fn plan_with(solver: &dyn FlowSolver, network: &Network) -> Result<FlowPlan, FlowError> {
    let assignments = solver.solve(network)?;
    let plan = PlanBuilder::new(network).build(&assignments)?;
    let metrics = plan.metrics();
    info!(
        edges = plan.len(),
        total_amount = metrics.total_amount,
        total_cost = metrics.total_cost,
        "built flow plan"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::{Restaurant, RouteDistance, Vehicle, Vendor, Warehouse};

    fn network() -> Network {
        Network {
            vendors: vec![Vendor {
                id: "F1".into(),
                name: "Vendor A".into(),
                company: "Company A".into(),
                location: "London".into(),
                capacity: 1200.0,
                cost_per_kg: 0.4,
                co2_emissions_per_kg: 0.1,
            }],
            warehouses: vec![Warehouse {
                id: "W1".into(),
                name: "Warehouse 1".into(),
                location: "Paris".into(),
                inventory_capacity: 1500.0,
                storage_cost_per_kg: 2.0,
            }],
            restaurants: vec![Restaurant {
                id: "R1".into(),
                name: "Restaurant 1".into(),
                location: "Madrid".into(),
                demand: 800.0,
            }],
            vehicles: vec![Vehicle {
                company: "Cluck Logistics".into(),
                name: "Refrigerated Electric Van".into(),
                number_available: 13,
                capacity: 2500.0,
                cost_per_kg_per_km: 0.5,
                co2_emissions_per_kg_per_km: 0.2,
            }],
            supply_distances: vec![RouteDistance {
                source_id: "F1".into(),
                target_id: "W1".into(),
                distance_km: 10.0,
            }],
            distribution_distances: vec![RouteDistance {
                source_id: "W1".into(),
                target_id: "R1".into(),
                distance_km: 4.0,
            }],
        }
    }

    fn assignment(stage: Stage, source: &str, target: &str, amount: f64) -> FlowAssignment {
        FlowAssignment {
            stage,
            source_id: source.into(),
            target_id: target.into(),
            vehicle_company: "Cluck Logistics".into(),
            vehicle_type: "Refrigerated Electric Van".into(),
            amount,
        }
    }

    #[test]
    fn costs_each_side_of_the_edge() {
        let network = network();
        let plan = PlanBuilder::new(&network)
            .build(&[
                assignment(Stage::Distribution, "W1", "R1", 50.0),
                assignment(Stage::Supply, "F1", "W1", 100.0),
            ])
            .unwrap();

        let supply = &plan.edges()[0];
        assert_eq!(supply.stage, Stage::Supply);
        assert_eq!(supply.source_name, "Vendor A");
        assert!((supply.source_cost - 40.0).abs() < 1e-9);
        assert!((supply.source_co2 - 10.0).abs() < 1e-9);
        assert!((supply.target_cost - 200.0).abs() < 1e-9);
        assert!((supply.transport_cost - 500.0).abs() < 1e-9);
        assert!((supply.transport_co2 - 200.0).abs() < 1e-9);

        let distribution = &plan.edges()[1];
        assert_eq!(distribution.stage, Stage::Distribution);
        assert!((distribution.source_cost - 100.0).abs() < 1e-9);
        assert_eq!(distribution.target_cost, 0.0);
        assert!((distribution.transport_cost - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_assignments_are_skipped() {
        let network = network();
        let plan = PlanBuilder::new(&network)
            .build(&[assignment(Stage::Supply, "F1", "W1", 0.0)])
            .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn unknown_restaurant_is_rejected() {
        let network = network();
        let err = PlanBuilder::new(&network)
            .build(&[assignment(Stage::Distribution, "W1", "R9", 5.0)])
            .unwrap_err();
        assert!(matches!(err, FlowError::UnknownSite(id) if id == "R9"));
    }

    struct FixedSolver(Vec<FlowAssignment>);

    impl FlowSolver for FixedSolver {
        fn solve(&self, _network: &Network) -> Result<Vec<FlowAssignment>, FlowError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn plan_with_runs_the_solver() {
        let network = network();
        let solver = FixedSolver(vec![
            assignment(Stage::Supply, "F1", "W1", 100.0),
            assignment(Stage::Distribution, "W1", "R1", 100.0),
        ]);
        let plan = plan_with(&solver, &network).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.metrics().total_amount, 100.0);
    }
}
