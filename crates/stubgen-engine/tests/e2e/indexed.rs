//! Indexed properties through IndexedAccessor.

use stubgen_engine::{RuntimeError, Value};

use super::harness::*;

#[test]
fn test_indexed_round_trip() {
    let (wrapper, source) = wrap_mock(Mock::new("m"));
    let item = wrapper.index("Item").unwrap();
    assert!(item.can_get());
    assert!(item.can_set());
    assert_eq!(item.member(), "Item");

    for i in 0..2 {
        let value = 10.0 + i as f64;
        item.set(Value::Int(i), Value::Double(value)).unwrap();
        assert_eq!(item.get(Value::Int(i)).unwrap(), Value::Double(value));
        assert_eq!(
            source.write().invoke("get_Item", &mut [Value::Int(i)]).unwrap(),
            Value::Double(value)
        );
    }
}

#[test]
fn test_each_read_builds_a_fresh_accessor() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    let a = wrapper.index("Item").unwrap();
    let b = wrapper.index("Item").unwrap();
    assert!(!std::sync::Arc::ptr_eq(&a, &b));

    a.set(Value::Int(1), Value::Double(4.0)).unwrap();
    assert_eq!(b.get(Value::Int(1)).unwrap(), Value::Double(4.0));
}

#[test]
fn test_read_only_indexed_property() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    let label = wrapper.index("Label").unwrap();
    assert!(!label.can_set());
    assert_eq!(label.get(Value::Int(1)).unwrap(), Value::from("second"));
    assert_eq!(
        label.set(Value::Int(0), Value::from("x")),
        Err(RuntimeError::AccessorNotImplemented {
            member: "Label".to_string(),
            accessor: "set",
        })
    );
}

#[test]
fn test_source_errors_propagate() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    let item = wrapper.index("Item").unwrap();
    assert!(matches!(
        item.get(Value::Int(7)),
        Err(RuntimeError::Native(message)) if message.contains("out of range")
    ));
}

#[test]
fn test_accessor_outliving_wrapper_fails() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    let item = wrapper.index("Item").unwrap();
    drop(wrapper);
    assert_eq!(item.get(Value::Int(0)), Err(RuntimeError::SourceReleased));
}

#[test]
fn test_accessor_property_cannot_be_assigned() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    assert!(matches!(
        wrapper.set("Item", Value::Null),
        Err(RuntimeError::AccessorNotImplemented { accessor: "set", .. })
    ));
}

#[test]
fn test_non_accessor_property_is_not_indexable() {
    let (wrapper, _source) = wrap_mock(Mock::new("m"));
    assert!(matches!(
        wrapper.index("Name"),
        Err(RuntimeError::TypeMismatch { .. })
    ));
}
