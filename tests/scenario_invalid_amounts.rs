mod common;

use common::*;
use csc_flow::{ActiveSites, FlowError, FlowPlan, Reconciler, ReconcileConfig};

fn all_active() -> ActiveSites {
    ActiveSites::new(["S1", "W1", "R1"]).unwrap()
}

#[test]
fn scenario_nan_amount_is_rejected() {
    let plan = FlowPlan::new(vec![
        supply("S1", "W1", 100.0),
        distribution("W1", "R1", f64::NAN),
    ]);

    let err = csc_flow::reconcile(&plan, &all_active()).unwrap_err();
    assert!(matches!(err, FlowError::InvalidData(ref msg) if msg.contains("R1")));
}

#[test]
fn scenario_negative_supply_is_rejected() {
    let plan = FlowPlan::new(vec![
        supply("S1", "W1", -50.0),
        distribution("W1", "R1", -80.0),
    ]);

    let err = csc_flow::reconcile(&plan, &all_active()).unwrap_err();
    assert!(matches!(err, FlowError::InvalidData(ref msg) if msg.contains("S1")));
}

#[test]
fn scenario_invalid_amount_on_inactive_edge_still_fails() {
    let plan = FlowPlan::new(vec![
        supply("S1", "W1", 100.0),
        distribution("W1", "R1", 100.0),
        distribution("W1", "R2", -1.0),
    ]);

    assert!(matches!(
        csc_flow::reconcile(&plan, &all_active()),
        Err(FlowError::InvalidData(_))
    ));
}

#[test]
fn scenario_negative_tolerance_is_rejected() {
    let reconciler = Reconciler::new(ReconcileConfig { tolerance: -1.0 });
    assert!(matches!(
        reconciler.reconcile(&single_warehouse_plan(), &all_active()),
        Err(FlowError::InvalidData(_))
    ));
}
