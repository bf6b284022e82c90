#![allow(dead_code)]

use csc_flow::{Edge, FlowPlan, SiteType, Stage};

pub const VAN_COMPANY: &str = "Cluck Logistics";
pub const VAN: &str = "Refrigerated Electric Van";

/// Vendor → warehouse with per-kg costs proportional to `amount`.
pub fn supply(source: &str, target: &str, amount: f64) -> Edge {
    Edge {
        stage: Stage::Supply,
        source_id: source.into(),
        source_name: format!("Vendor {source}"),
        source_type: SiteType::Farm,
        source_cost: amount * 0.4,
        source_co2: amount * 0.1,
        target_id: target.into(),
        target_name: format!("Warehouse {target}"),
        target_type: SiteType::Warehouse,
        target_cost: amount * 2.0,
        target_co2: 0.0,
        vehicle_company: VAN_COMPANY.into(),
        vehicle_type: VAN.into(),
        amount,
        transport_cost: amount * 5.0,
        transport_co2: amount * 2.0,
    }
}

/// Warehouse → restaurant.
pub fn distribution(source: &str, target: &str, amount: f64) -> Edge {
    Edge {
        stage: Stage::Distribution,
        source_id: source.into(),
        source_name: format!("Warehouse {source}"),
        source_type: SiteType::Warehouse,
        source_cost: amount * 2.0,
        source_co2: 0.0,
        target_id: target.into(),
        target_name: format!("Restaurant {target}"),
        target_type: SiteType::Restaurant,
        target_cost: 0.0,
        target_co2: 0.0,
        vehicle_company: VAN_COMPANY.into(),
        vehicle_type: VAN.into(),
        amount,
        transport_cost: amount * 2.0,
        transport_co2: amount * 0.8,
    }
}

/// S1 → W1 100, W1 → R1 60, W1 → R2 40.
pub fn single_warehouse_plan() -> FlowPlan {
    FlowPlan::new(vec![
        supply("S1", "W1", 100.0),
        distribution("W1", "R1", 60.0),
        distribution("W1", "R2", 40.0),
    ])
}

/// Two balanced warehouses sharing vendor S1 and restaurant R2.
pub fn two_warehouse_plan() -> FlowPlan {
    FlowPlan::new(vec![
        supply("S1", "W1", 100.0),
        supply("S2", "W2", 50.0),
        supply("S1", "W2", 30.0),
        distribution("W1", "R1", 70.0),
        distribution("W1", "R2", 30.0),
        distribution("W2", "R2", 45.0),
        distribution("W2", "R3", 35.0),
    ])
}

pub fn amount_of(plan: &FlowPlan, source: &str, target: &str) -> Option<f64> {
    plan.edges()
        .iter()
        .find(|e| e.source_id == source && e.target_id == target)
        .map(|e| e.amount)
}

/// Same edge carried by another vehicle.
pub fn on_vehicle(mut edge: Edge, company: &str, vehicle: &str) -> Edge {
    edge.vehicle_company = company.into();
    edge.vehicle_type = vehicle.into();
    edge
}
