//! Tests for the parameter resolution policy

use std::sync::Arc;

use tether_domain::ports::{ClassInfo, ContainerInterface, ParameterSpec};
use tether_domain::value_objects::{Arguments, Value};
use tether_infrastructure::Container;
use tether_infrastructure::resolver::{Parameter, resolve_parameter};
use tether_infrastructure::signature::SignatureTable;

struct Node {
    label: String,
}

fn container() -> Container {
    let mut builder = SignatureTable::builder();
    builder
        .class(ClassInfo::new("Tree").instantiate_with(|| ()))
        .class(ClassInfo::new("Node").extends("Tree").constructor(
            vec![ParameterSpec::new("label").typed("string").default_value("leaf")],
            |args| Ok(Node { label: args.str(0)?.to_string() }),
        ));
    Container::new(Arc::new(builder.build()))
}

fn parameter(spec: ParameterSpec) -> Parameter {
    Parameter::derive(&spec, 0, None, Arc::from("test"))
}

fn resolve(parameter: &Parameter, arguments: &Arguments) -> tether_domain::Result<Value> {
    let container = container();
    let mut stack = container.new_stack();
    resolve_parameter(&container, &mut stack, parameter, arguments)
}

#[test]
fn test_null_wins_over_default_for_nullable_scalars() {
    let nullable = parameter(
        ParameterSpec::new("x")
            .typed("string")
            .nullable()
            .default_value("d"),
    );
    assert!(resolve(&nullable, &Arguments::new()).unwrap().is_null());

    let defaulted = parameter(ParameterSpec::new("x").typed("string").default_value("d"));
    assert_eq!(resolve(&defaulted, &Arguments::new()).unwrap().as_str(), Some("d"));
}

#[test]
fn test_untyped_parameter_resolves_to_null() {
    let untyped = parameter(ParameterSpec::new("x").default_value(5));
    assert!(resolve(&untyped, &Arguments::new()).unwrap().is_null());
}

#[test]
fn test_required_scalar_without_value_fails() {
    let required = parameter(ParameterSpec::new("x").typed("int"));
    let error = resolve(&required, &Arguments::new()).unwrap_err();
    assert!(error.is_build_failure());
    assert!(error.to_string().contains("Parameter[x] of test has no value provided"));
}

#[test]
fn test_overrides_are_used_verbatim() {
    let typed = parameter(ParameterSpec::new("node").typed("Node"));
    let by_position = resolve(&typed, &Arguments::new().at(0, "raw")).unwrap();
    assert_eq!(by_position.as_str(), Some("raw"));

    let by_name = resolve(&typed, &Arguments::new().named("node", Value::Null)).unwrap();
    assert!(by_name.is_null());
}

#[test]
fn test_self_and_parent_resolve_against_declaring_class() {
    let container = container();
    let node = container.metadata().class_info("Node").unwrap();
    let spec = ParameterSpec::new("other").typed("self");
    let self_typed = Parameter::derive(&spec, 0, Some(&node), Arc::from("Node::link"));
    let spec = ParameterSpec::new("root").typed("parent");
    let parent_typed = Parameter::derive(&spec, 1, Some(&node), Arc::from("Node::link"));

    let mut stack = container.new_stack();
    let built = resolve_parameter(&container, &mut stack, &self_typed, &Arguments::new()).unwrap();
    assert_eq!(built.as_object().unwrap().class(), "Node");
    assert_eq!(built.downcast::<Node>().unwrap().label, "leaf");

    let built = resolve_parameter(&container, &mut stack, &parent_typed, &Arguments::new()).unwrap();
    assert_eq!(built.as_object().unwrap().class(), "Tree");
}

#[test]
fn test_bucket_branch_must_be_an_argument_map() {
    let typed = parameter(ParameterSpec::new("node").typed("Node"));
    let mut bucket = Arguments::new();
    bucket.insert("Node", "oops");
    let arguments = Arguments::new().named("$node", bucket);

    let error = resolve(&typed, &arguments).unwrap_err();
    assert!(error.is_build_failure());
    assert!(error.to_string().contains("arguments for Node must be an argument map"));
}
