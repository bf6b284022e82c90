mod common;

use common::*;
use csc_flow::{ActiveSites, FlowPlan, Metrics};
use rstest::rstest;

#[rstest]
#[case::single(single_warehouse_plan())]
#[case::pair(two_warehouse_plan())]
fn scenario_balanced_plan_is_returned_unchanged(#[case] plan: FlowPlan) {
    let active = ActiveSites::new(["S1", "S2", "W1", "W2", "R1", "R2", "R3", "R9"]).unwrap();

    let out = csc_flow::reconcile(&plan, &active).unwrap();
    assert_eq!(out, plan);

    let again = csc_flow::reconcile(&out, &active).unwrap();
    assert_eq!(again, out);
}

#[test]
fn scenario_remaining_surplus_is_reduced_again() {
    let active = ActiveSites::new(["S1", "W1", "R1"]).unwrap();
    let once = csc_flow::reconcile(&single_warehouse_plan(), &active).unwrap();
    let twice = csc_flow::reconcile(&once, &active).unwrap();

    // W1 still receives 100 against 40 shipped
    assert_eq!(amount_of(&once, "W1", "R1"), Some(40.0));
    assert_eq!(amount_of(&twice, "W1", "R1"), Some(10.0));
    assert_eq!(twice.len(), once.len());
}

#[test]
fn scenario_no_active_sites_empties_the_plan() {
    let active = ActiveSites::new(Vec::<String>::new()).unwrap();
    let out = csc_flow::reconcile(&two_warehouse_plan(), &active).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.metrics(), Metrics::default());
}
