//! Simple properties, methods and wrapper identity.

use stubgen_engine::{
    object_ref, Object, PropertyDescriptor, RuntimeError, StubGenerator, TypeDescriptor, TypeRef,
    Value,
};

use super::harness::*;

#[test]
fn test_zero_member_type_compiles() {
    let artifact = build(TypeDescriptor::new("Mock"));
    let class = artifact.class("MockWrapper").unwrap();
    assert_eq!(class.qualified_name(), "Stubs.MockWrapper");

    let source = object_ref(Mock::new("empty"));
    let wrapper = class.instantiate(source.clone()).unwrap();
    assert_eq!(wrapper.to_string().unwrap(), source.read().display());
    assert_eq!(wrapper.to_string().unwrap(), "Mock(empty)");
}

#[test]
fn test_read_write_property_round_trips() {
    let (wrapper, source) = wrap_mock(Mock::new("before"));
    assert_eq!(wrapper.get("Name").unwrap(), Value::from("before"));

    wrapper.set("Name", "after").unwrap();
    assert_eq!(wrapper.get("Name").unwrap(), Value::from("after"));
    assert_eq!(source.read().get("Name").unwrap(), Value::from("after"));
}

#[test]
fn test_read_only_property_setter_is_not_implemented() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    assert_eq!(wrapper.get("Size").unwrap(), Value::Int(2));
    assert_eq!(
        wrapper.set("Size", 5),
        Err(RuntimeError::AccessorNotImplemented {
            member: "Size".to_string(),
            accessor: "set",
        })
    );
}

#[test]
fn test_hidden_property_is_not_readable() {
    let ty = TypeDescriptor::new("Mock")
        .with_property(PropertyDescriptor::new("Name", TypeRef::String));
    let artifact = build(ty);
    let wrapper = artifact
        .class("MockWrapper")
        .unwrap()
        .instantiate(object_ref(Mock::new("m")))
        .unwrap();
    assert!(matches!(
        wrapper.get("Name"),
        Err(RuntimeError::AccessorNotImplemented { accessor: "get", .. })
    ));
    assert!(matches!(
        wrapper.get("source"),
        Err(RuntimeError::AccessorNotImplemented { .. })
    ));
}

#[test]
fn test_methods_forward_to_source() {
    let (wrapper, source) = wrap_mock(Mock::new("m"));
    source.write().invoke("set_Item", &mut [Value::Int(0), Value::Double(3.0)]).unwrap();

    assert_eq!(wrapper.invoke("Reset", &mut []).unwrap(), Value::Null);
    assert_eq!(
        source.write().invoke("get_Item", &mut [Value::Int(0)]).unwrap(),
        Value::Double(0.0)
    );
}

#[test]
fn test_out_parameters_are_written_back() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));

    let mut args = [Value::from("size"), Value::Null];
    assert_eq!(wrapper.invoke("TryGet", &mut args).unwrap(), Value::Bool(true));
    assert_eq!(args[1], Value::Double(2.0));

    let mut args = [Value::from("missing"), Value::Double(9.0)];
    assert_eq!(wrapper.invoke("TryGet", &mut args).unwrap(), Value::Bool(false));
    assert_eq!(args[0], Value::from("missing"));
    assert_eq!(args[1], Value::Double(0.0));
}

#[test]
fn test_argument_count_is_checked() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    assert_eq!(
        wrapper.invoke("Reset", &mut [Value::Int(1)]),
        Err(RuntimeError::ArgumentCount {
            member: "Reset".to_string(),
            expected: 0,
            actual: 1,
        })
    );
}

#[test]
fn test_missing_members() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    assert!(matches!(
        wrapper.get("Nope"),
        Err(RuntimeError::MissingMember { .. })
    ));
    assert!(matches!(
        wrapper.invoke("Nope", &mut []),
        Err(RuntimeError::MissingMember { .. })
    ));
}

#[test]
fn test_source_accessor_returns_the_source() {
    let (wrapper, source) = wrap_mock(Mock::new("m"));
    let via_property = wrapper.get("__Source").unwrap();
    assert_eq!(via_property, Value::Object(source.clone()));
    assert_eq!(Value::Object(wrapper.source().unwrap()), Value::Object(source));
}

#[test]
fn test_wrong_source_type_is_rejected() {
    let artifact = build(mock_descriptor());
    let err = artifact
        .class("MockWrapper")
        .unwrap()
        .instantiate(object_ref(Other))
        .unwrap_err();
    assert_eq!(
        err,
        RuntimeError::WrongSourceType {
            expected: "Mock".to_string(),
            found: "Other".to_string(),
        }
    );
}

#[test]
fn test_wrapper_is_an_object() {
    let (wrapper, _source) = wrap_mock(Mock::new("inner"));
    let handle = object_ref(wrapper.clone());

    assert_eq!(handle.read().type_name(), "MockWrapper");
    assert_eq!(handle.read().display(), "Mock(inner)");
    handle.write().set("Name", Value::from("renamed")).unwrap();
    assert_eq!(wrapper.get("Name").unwrap(), Value::from("renamed"));
    assert_eq!(
        handle.write().invoke("toString", &mut []).unwrap(),
        Value::from("Mock(renamed)")
    );
}

#[test]
fn test_options_shape_the_wrapper() {
    let options = stubgen_engine::GeneratorOptions::from_toml_str(
        "namespace = \"Bindings\"\nwrapper_suffix = \"Stub\"\nsource_accessor = \"Inner\"\n",
    )
    .unwrap();
    let artifact = StubGenerator::new(mock_descriptor())
        .with_options(options)
        .compile()
        .unwrap();
    assert_eq!(artifact.namespace(), Some("Bindings"));

    let wrapper = artifact
        .class("Bindings.MockStub")
        .unwrap()
        .instantiate(object_ref(Mock::new("m")))
        .unwrap();
    assert!(matches!(wrapper.get("Inner").unwrap(), Value::Object(_)));
}

#[test]
fn test_end_to_end_scenario() {
    let (wrapper, source) = wrap_mock(Mock::new("start"));

    wrapper.set("Name", "x").unwrap();
    assert_eq!(wrapper.get("Name").unwrap(), Value::from("x"));

    let item = wrapper.index("Item").unwrap();
    item.set(Value::Int(0), Value::Double(1.5)).unwrap();
    item.set(Value::Int(1), Value::Double(2.5)).unwrap();
    assert_eq!(item.get(Value::Int(0)).unwrap(), Value::Double(1.5));
    assert_eq!(item.get(Value::Int(1)).unwrap(), Value::Double(2.5));

    wrapper.invoke("Reset", &mut []).unwrap();
    assert_eq!(item.get(Value::Int(0)).unwrap(), Value::Double(0.0));
    assert_eq!(item.get(Value::Int(1)).unwrap(), Value::Double(0.0));
    assert_eq!(source.read().get("Resets").unwrap(), Value::Int(1));
}

#[test]
fn test_read_only_item_scenario() {
    let artifact = build(scenario_descriptor());
    let mut mock = Mock::new("start");
    mock.items = vec![1.0, 2.0, 3.0];
    let source = object_ref(mock);
    let wrapper = artifact
        .class("MockWrapper")
        .unwrap()
        .instantiate(source.clone())
        .unwrap();

    wrapper.set("Name", "renamed").unwrap();
    assert_eq!(wrapper.get("Name").unwrap(), Value::from("renamed"));

    let item = wrapper.index("Item").unwrap();
    assert!(!item.can_set());
    assert_eq!(item.get(Value::Int(1)).unwrap(), Value::Double(2.0));
    assert_eq!(
        item.set(Value::Int(1), Value::Double(9.0)),
        Err(RuntimeError::AccessorNotImplemented {
            member: "Item".to_string(),
            accessor: "set",
        })
    );
    assert_eq!(item.get(Value::Int(1)).unwrap(), Value::Double(2.0));

    assert_eq!(source.read().get("Resets").unwrap(), Value::Int(0));
    wrapper.invoke("Reset", &mut []).unwrap();
    assert_eq!(source.read().get("Resets").unwrap(), Value::Int(1));
    assert_eq!(item.get(Value::Int(2)).unwrap(), Value::Double(0.0));
}
