//! Tests for the metadata introspection port

use std::collections::HashMap;
use std::sync::Arc;

use tether_domain::error::{Error, ReflectedCode, Result};
use tether_domain::ports::{
    ClassInfo, Closure, FunctionInfo, MetadataProvider, MethodInfo, ParameterSpec, TypeRef,
    Visibility,
};
use tether_domain::value_objects::Value;

#[derive(Default)]
struct Classes(HashMap<String, Arc<ClassInfo>>);

impl Classes {
    fn with(mut self, info: ClassInfo) -> Self {
        self.0.insert(info.name.clone(), Arc::new(info));
        self
    }
}

impl MetadataProvider for Classes {
    fn class_info(&self, class: &str) -> Result<Arc<ClassInfo>> {
        self.0
            .get(class)
            .cloned()
            .ok_or_else(|| Error::reflected(ReflectedCode::ClassNotExist, class))
    }

    fn function_info(&self, function: &str) -> Result<Arc<FunctionInfo>> {
        Err(Error::reflected(ReflectedCode::FunctionNotExist, function))
    }

    fn method_info(&self, class: &str, method: &str) -> Result<Arc<MethodInfo>> {
        Err(Error::reflected(
            ReflectedCode::MethodNotExist,
            format!("{class}::{method}"),
        ))
    }

    fn function_exists(&self, _function: &str) -> bool {
        false
    }
}

#[test]
fn test_type_ref_classification() {
    assert_eq!(TypeRef::parse("int"), TypeRef::Builtin("int".into()));
    assert_eq!(TypeRef::parse(" self "), TypeRef::SelfType);
    assert_eq!(TypeRef::parse("parent"), TypeRef::Parent);
    assert_eq!(TypeRef::parse("Mailer"), TypeRef::Class("Mailer".into()));
    assert!(TypeRef::parse("mixed").admits_null());
    assert!(!TypeRef::parse("string").admits_null());
}

#[test]
fn test_instantiability() {
    let blank = ClassInfo::new("Blank").instantiate_with(|| ());
    let bare = ClassInfo::new("Bare");
    let public = ClassInfo::new("Public").constructor(vec![], |_| Ok(()));
    let private = ClassInfo::new("Private")
        .constructor(vec![], |_| Ok(()))
        .constructor_visibility(Visibility::Private);
    let abstract_class = ClassInfo::new("Shape").instantiate_with(|| ()).abstract_class();

    assert!(blank.is_instantiable());
    assert!(!bare.is_instantiable());
    assert!(public.is_instantiable());
    assert!(!private.is_instantiable());
    assert!(!abstract_class.is_instantiable());
    assert!(!ClassInfo::interface("Transport").is_instantiable());
}

#[test]
fn test_is_a_walks_parents_and_interfaces() {
    let classes = Classes::default()
        .with(ClassInfo::interface("Transport"))
        .with(ClassInfo::new("Smtp").implements("Transport"))
        .with(ClassInfo::new("SecureSmtp").extends("Smtp"));

    assert!(classes.is_a("SecureSmtp", "Smtp"));
    assert!(classes.is_a("SecureSmtp", "Transport"));
    assert!(classes.is_a("Smtp", "Smtp"));
    assert!(!classes.is_a("Smtp", "SecureSmtp"));
    assert!(!classes.is_a("Unknown", "Transport"));
}

#[test]
fn test_closure_inspection() {
    let classes = Classes::default();
    let valid = Closure::new(
        vec![ParameterSpec::new("a"), ParameterSpec::new("b").nullable()],
        |_| Ok(Value::Null),
    );
    let unnamed = Closure::new(vec![ParameterSpec::new("")], |_| Ok(Value::Null));
    let duplicate = Closure::new(
        vec![ParameterSpec::new("a"), ParameterSpec::new("a")],
        |_| Ok(Value::Null),
    );

    assert!(classes.inspect_closure(&valid).is_ok());
    assert!(matches!(
        classes.inspect_closure(&unnamed),
        Err(Error::Reflected { code: ReflectedCode::InvalidSignature, .. })
    ));
    assert!(classes.inspect_closure(&duplicate).is_err());
}

#[test]
fn test_method_info_builders() {
    let method = MethodInfo::new("Counter", "zero", vec![], |_, _| Ok(Value::from(0)))
        .static_method()
        .visibility(Visibility::Protected);
    assert!(method.is_static);
    assert!(!method.is_public());

    let abstract_method = MethodInfo::abstract_method("Shape", "area", vec![]);
    assert!(abstract_method.is_abstract);
    assert!(abstract_method.body.is_none());

    let function = FunctionInfo::new("f", vec![], |_| Ok(Value::Null)).disabled();
    assert!(function.disabled && !function.deprecated);
}
