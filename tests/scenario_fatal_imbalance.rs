mod common;

use common::*;
use csc_flow::{ActiveSites, FlowError, FlowPlan};

#[test]
fn scenario_outflow_above_inflow_is_fatal() {
    let plan = FlowPlan::new(vec![
        supply("S1", "W1", 50.0),
        distribution("W1", "R1", 80.0),
    ]);
    let active = ActiveSites::new(["S1", "W1", "R1"]).unwrap();

    let err = csc_flow::reconcile(&plan, &active).unwrap_err();
    match err {
        FlowError::Imbalance {
            junction,
            inflow,
            outflow,
        } => {
            assert_eq!(junction, "W1");
            assert_eq!(inflow, 50.0);
            assert_eq!(outflow, 80.0);
        }
        other => panic!("expected imbalance, got {other:?}"),
    }
}

#[test]
fn scenario_vendor_deactivated_starves_warehouse() {
    let plan = two_warehouse_plan();
    let active = ActiveSites::new(["S1", "W1", "W2", "R1", "R2", "R3"]).unwrap();

    // W2 keeps 30 in from S1 but still ships 80
    let err = csc_flow::reconcile(&plan, &active).unwrap_err();
    assert!(matches!(err, FlowError::Imbalance { ref junction, .. } if junction == "W2"));
}

#[test]
fn scenario_only_vendor_deactivated_leaves_no_inflow() {
    let plan = single_warehouse_plan();
    let active = ActiveSites::new(["W1", "R1", "R2"]).unwrap();

    let err = csc_flow::reconcile(&plan, &active).unwrap_err();
    assert!(matches!(
        err,
        FlowError::Imbalance { inflow, outflow, .. } if inflow == 0.0 && outflow == 100.0
    ));
}
