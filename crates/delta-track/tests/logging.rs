mod common;

use common::model;
use delta_track::{Delta, DeltaSet};
use delta_track_model::StructuredValue;
use tracing_test::traced_test;

#[traced_test]
#[test]
fn refused_writes_are_logged() {
    let m = model();
    let mut delta = Delta::new(&m.order).with_updatable_properties(["Amount"]);
    assert!(!delta.try_set_property_value("Id", 1));
    assert!(!delta.try_set_property_value("Amount", "lots"));
    assert!(logs_contain("rejected: property is not updatable"));
    assert!(logs_contain("rejected: incompatible value"));
}

#[traced_test]
#[test]
fn skipped_nested_delta_set_is_logged() {
    let m = model();
    let mut delta = Delta::new(&m.customer);
    assert!(delta.try_set_property_value("Orders", DeltaSet::of(&m.order)));
    let mut original = StructuredValue::new(&m.customer);
    delta.patch(&mut original).unwrap();
    assert!(logs_contain("nested delta set is not merged"));
}

#[traced_test]
#[test]
fn derived_type_reconciliation_is_logged() {
    let m = model();
    let mut delta = Delta::for_type(&m.address, &m.home_address).unwrap();
    delta.try_set_property_value("HomeNo", 3);
    let mut original = StructuredValue::new(&m.office_address).with("City", "Turin");
    delta.patch(&mut original).unwrap();
    assert!(logs_contain("reconciling derived type"));
}
