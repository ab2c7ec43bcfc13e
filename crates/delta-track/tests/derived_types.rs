mod common;

use common::model;
use delta_track::{Delta, DeltaError};
use delta_track_model::{StructuredType, StructuredValue, Value};

#[test]
fn nested_complex_value_switches_to_sibling_derived_type() {
    let m = model();
    let mut nested = Delta::for_type(&m.address, &m.office_address).unwrap();
    assert!(nested.try_set_property_value("City", "Zurich"));
    let mut delta = Delta::new(&m.order);
    assert!(delta.try_set_property_value("ShippingAddress", nested));

    let home = StructuredValue::new(&m.home_address)
        .with("City", "Basel")
        .with("Street", "Rheinweg 2")
        .with("HomeNo", 12);
    let mut original = StructuredValue::new(&m.order).with("ShippingAddress", home);
    delta.patch(&mut original).unwrap();

    let shipping = original.get("ShippingAddress").and_then(Value::as_structured).unwrap();
    assert_eq!(shipping.type_name(), "OfficeAddress");
    assert_eq!(shipping.get("City"), Some(&Value::from("Zurich")));
    assert_eq!(shipping.get("Street"), Some(&Value::from("Rheinweg 2")));
    assert_eq!(shipping.get("OfficeNo"), Some(&Value::Int(0)));
    assert_eq!(shipping.get("HomeNo"), None);
}

#[test]
fn derived_only_field_set_by_delta_survives_reconciliation() {
    let m = model();
    let mut nested = Delta::for_type(&m.address, &m.office_address).unwrap();
    nested.try_set_property_value("OfficeNo", 404);
    let mut delta = Delta::new(&m.order);
    delta.try_set_property_value("ShippingAddress", nested);

    let mut original = StructuredValue::new(&m.order)
        .with("ShippingAddress", StructuredValue::new(&m.home_address).with("HomeNo", 1));
    delta.patch(&mut original).unwrap();

    let shipping = original.get("ShippingAddress").and_then(Value::as_structured).unwrap();
    assert_eq!(shipping.type_name(), "OfficeAddress");
    assert_eq!(shipping.get("OfficeNo"), Some(&Value::Int(404)));
}

#[test]
fn top_level_complex_patch_reconciles_original() {
    let m = model();
    let mut delta = Delta::for_type(&m.address, &m.home_address).unwrap();
    delta.try_set_property_value("HomeNo", 5);

    let mut original = StructuredValue::new(&m.office_address)
        .with("City", "Lyon")
        .with("OfficeNo", 9);
    delta.patch(&mut original).unwrap();

    assert_eq!(original.type_name(), "HomeAddress");
    assert_eq!(original.get("City"), Some(&Value::from("Lyon")));
    assert_eq!(original.get("HomeNo"), Some(&Value::Int(5)));
    assert_eq!(original.get("OfficeNo"), None);
}

#[test]
fn base_delta_patches_derived_original_without_reconciling() {
    let m = model();
    let mut delta = Delta::new(&m.customer);
    delta.try_set_property_value("Name", "Lin");

    let mut original = StructuredValue::new(&m.vip_customer).with("Level", 3);
    delta.patch(&mut original).unwrap();

    assert_eq!(original.type_name(), "VipCustomer");
    assert_eq!(original.get("Name"), Some(&Value::from("Lin")));
    assert_eq!(original.get("Level"), Some(&Value::Int(3)));
}

#[test]
fn derived_entity_delta_rejects_base_original() {
    let m = model();
    let mut delta = Delta::for_type(&m.customer, &m.vip_customer).unwrap();
    delta.try_set_property_value("Level", 2);

    let mut original = StructuredValue::new(&m.customer);
    let err = delta.patch(&mut original).unwrap_err();
    assert_eq!(
        err,
        DeltaError::TypeMismatch {
            expected: "VipCustomer".into(),
            actual: "Customer".into()
        }
    );
}

#[test]
fn unrelated_complex_original_is_a_type_mismatch() {
    let m = model();
    let mut delta = Delta::new(&m.address);
    delta.try_set_property_value("City", "Turin");
    let money = StructuredType::complex("Money").build().unwrap();
    let expected = DeltaError::TypeMismatch {
        expected: "Address".into(),
        actual: "Money".into(),
    };

    let mut original = StructuredValue::new(&money);
    assert_eq!(delta.patch(&mut original), Err(expected.clone()));
    assert_eq!(delta.put(&mut original), Err(expected.clone()));
    assert_eq!(delta.copy_changed_values(&mut original), Err(expected.clone()));
    assert_eq!(delta.copy_unchanged_values(&mut original), Err(expected));
    assert_eq!(original, StructuredValue::new(&money));
}

#[test]
fn nested_delta_of_derived_type_reconciles_up_to_property_type() {
    let m = model();
    let mut nested = Delta::new(&m.office_address);
    assert!(nested.try_set_property_value("OfficeNo", 7));
    let mut delta = Delta::new(&m.order);
    assert!(delta.try_set_property_value("ShippingAddress", nested));

    let home = StructuredValue::new(&m.home_address)
        .with("City", "Basel")
        .with("HomeNo", 12);
    let mut original = StructuredValue::new(&m.order).with("ShippingAddress", home);
    delta.patch(&mut original).unwrap();

    let shipping = original.get("ShippingAddress").and_then(Value::as_structured).unwrap();
    assert_eq!(shipping.type_name(), "OfficeAddress");
    assert_eq!(shipping.get("City"), Some(&Value::from("Basel")));
    assert_eq!(shipping.get("OfficeNo"), Some(&Value::Int(7)));
    assert_eq!(shipping.get("HomeNo"), None);
}

#[test]
fn nested_original_of_unrelated_type_is_a_type_mismatch() {
    let m = model();
    let mut nested = Delta::new(&m.address);
    nested.try_set_property_value("City", "Turin");
    let mut delta = Delta::new(&m.order);
    delta.try_set_property_value("Amount", 3.0);
    delta.try_set_property_value("ShippingAddress", nested);

    let money = StructuredType::complex("Money").build().unwrap();
    let start = StructuredValue::new(&m.order)
        .with("Amount", 1.0)
        .with("ShippingAddress", StructuredValue::new(&money));
    let mut original = start.clone();
    assert_eq!(
        delta.patch(&mut original),
        Err(DeltaError::TypeMismatch {
            expected: "Address".into(),
            actual: "Money".into()
        })
    );
    assert_eq!(original, start);
}

#[test]
fn derived_delta_exposes_derived_properties() {
    let m = model();
    let delta = Delta::for_type(&m.address, &m.home_address).unwrap();
    assert_eq!(delta.expected_type().name(), "Address");
    assert_eq!(delta.structured_type().name(), "HomeAddress");
    assert!(delta.is_complex_type());
    assert_eq!(delta.unchanged_property_names(), vec!["City", "Street", "HomeNo"]);
}
