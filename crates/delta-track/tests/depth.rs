mod common;

use common::model;
use delta_track::{Delta, DeltaError, DeltaOptions, DEFAULT_MAX_DEPTH};
use delta_track_model::{StructuredValue, TypeRef, Value};

/// Root `Node` delta with `levels` nested `Child` deltas below it.
fn chain(node: &TypeRef, levels: usize) -> Delta {
    let mut current = Delta::new(node);
    current.try_set_property_value("Value", levels as i64);
    for level in (0..levels).rev() {
        let mut parent = Delta::new(node);
        parent.try_set_property_value("Value", level as i64);
        assert!(parent.try_set_property_value("Child", current));
        current = parent;
    }
    current
}

fn depth_of(value: &StructuredValue) -> usize {
    match value.get("Child").and_then(Value::as_structured) {
        Some(child) => 1 + depth_of(child),
        None => 0,
    }
}

#[test]
fn default_options_allow_deep_chains() {
    let m = model();
    let delta = chain(&m.node, 10);
    assert_eq!(delta.options().max_depth, DEFAULT_MAX_DEPTH);
    let mut original = StructuredValue::new(&m.node);
    delta.patch(&mut original).unwrap();
    assert_eq!(depth_of(&original), 10);
}

#[test]
fn chain_at_the_limit_merges() {
    let m = model();
    let delta = chain(&m.node, 3).with_options(DeltaOptions { max_depth: 3 });
    let mut original = StructuredValue::new(&m.node);
    delta.patch(&mut original).unwrap();
    assert_eq!(depth_of(&original), 3);
}

#[test]
fn chain_past_the_limit_fails() {
    let m = model();
    let delta = chain(&m.node, 4).with_options(DeltaOptions { max_depth: 3 });
    let start = StructuredValue::new(&m.node).with("Value", 100);
    let mut original = start.clone();
    let err = delta.patch(&mut original).unwrap_err();
    assert_eq!(err, DeltaError::MaxDepthExceeded { max_depth: 3 });
    assert_eq!(err.to_string(), "MAX_DEPTH_EXCEEDED: nesting deeper than 3");
    assert_eq!(original, start);
    assert_eq!(delta.put(&mut original), Err(err.clone()));
    assert_eq!(delta.copy_changed_values(&mut original), Err(err));
    assert_eq!(original, start);
}

#[test]
fn failed_merge_leaves_every_level_untouched() {
    let m = model();
    let delta = chain(&m.node, 2).with_options(DeltaOptions { max_depth: 1 });
    let start = StructuredValue::new(&m.node).with("Value", 100).with(
        "Child",
        StructuredValue::new(&m.node).with("Value", 200).with(
            "Child",
            StructuredValue::new(&m.node).with("Value", 300),
        ),
    );
    let mut original = start.clone();
    assert_eq!(
        delta.patch(&mut original),
        Err(DeltaError::MaxDepthExceeded { max_depth: 1 })
    );
    assert_eq!(original, start);
}

#[test]
fn dynamic_nested_deltas_count_toward_the_limit() {
    let m = model();
    let mut inner = Delta::new(&m.address);
    inner.try_set_property_value("City", "Nice");
    let mut outer = Delta::new(&m.customer).with_options(DeltaOptions { max_depth: 0 });
    assert!(outer.try_set_property_value("Name", "Ola"));
    assert!(outer.try_set_property_value("Backup", inner));

    let mut original = StructuredValue::new(&m.customer);
    assert_eq!(
        outer.patch(&mut original),
        Err(DeltaError::MaxDepthExceeded { max_depth: 0 })
    );
    assert_eq!(original, StructuredValue::new(&m.customer));
}

#[test]
fn limit_applies_when_merging_into_existing_values() {
    let m = model();
    let delta = chain(&m.node, 2).with_options(DeltaOptions { max_depth: 1 });
    let existing = StructuredValue::new(&m.node).with(
        "Child",
        StructuredValue::new(&m.node).with("Child", StructuredValue::new(&m.node)),
    );
    let mut original = existing;
    assert_eq!(
        delta.patch(&mut original),
        Err(DeltaError::MaxDepthExceeded { max_depth: 1 })
    );
}

#[test]
fn options_deserialize_with_defaults() {
    let empty: DeltaOptions = toml::from_str("").unwrap();
    assert_eq!(empty, DeltaOptions::default());

    let tuned: DeltaOptions = toml::from_str("max_depth = 8").unwrap();
    assert_eq!(tuned.max_depth, 8);

    let json = serde_json::to_value(tuned).unwrap();
    assert_eq!(json, serde_json::json!({ "max_depth": 8 }));
}
