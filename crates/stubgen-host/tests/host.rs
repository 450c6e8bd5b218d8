//! Wrapping host objects end to end.

use stubgen_engine::{object_ref, Object, RuntimeError, StubGenerator, Value};
use stubgen_host::{
    core, release, wrap, wrap_core, wrap_records, HostError, MediaCore, Record, RecordList,
    RecordListExt,
};

fn sample() -> RecordList {
    RecordList::new("highlights").with_records([
        Record::new(0.5, 1.0),
        Record::captioned("chorus", 2.0, 3.75),
        Record::new(10.0, 12.5),
    ])
}

#[test]
fn test_record_helpers_read_through_wrapper() {
    let wrapper = wrap_records(object_ref(sample())).unwrap();
    assert_eq!(wrapper.record_count().unwrap(), 3);
    assert_eq!(wrapper.record(1).unwrap(), Record::captioned("chorus", 2.0, 3.75));
    assert_eq!(wrapper.records().unwrap(), sample().records().to_vec());
}

#[test]
fn test_verify_round_trip_restores_records() {
    let list = object_ref(sample());
    let wrapper = wrap_records(list.clone()).unwrap();
    wrapper
        .invoke(
            "AddCaption",
            &mut [Value::from("bridge"), Value::Double(20.0), Value::Double(21.0)],
        )
        .unwrap();

    assert_eq!(wrapper.verify_round_trip().unwrap(), 4);
    assert_eq!(list.read().get("Count").unwrap(), Value::Int(4));
    assert_eq!(wrapper.record(3).unwrap(), Record::captioned("bridge", 20.0, 21.0));
}

#[test]
fn test_verify_round_trip_on_empty_list() {
    let wrapper = wrap_records(object_ref(RecordList::new("exclusions"))).unwrap();
    assert_eq!(wrapper.verify_round_trip().unwrap(), 0);
}

#[test]
fn test_out_of_range_record_is_a_native_error() {
    let wrapper = wrap_records(object_ref(sample())).unwrap();
    assert!(matches!(wrapper.record(9), Err(RuntimeError::Native(_))));
}

#[test]
fn test_wrap_rejects_other_source_types() {
    let generator = StubGenerator::new(RecordList::descriptor());
    let err = wrap(&generator, object_ref(MediaCore::new())).unwrap_err();
    assert!(matches!(
        err,
        HostError::Runtime(RuntimeError::WrongSourceType { .. })
    ));
}

#[test]
fn test_wrapped_core_exposes_record_lists() {
    let wrapper = wrap_core().unwrap();
    assert_eq!(wrapper.get("Initialized").unwrap(), Value::Bool(true));

    let highlights = match wrapper.get("Highlights").unwrap() {
        Value::Object(list) => list,
        other => panic!("expected a record list, got {:?}", other),
    };
    let lists = wrap_records(highlights).unwrap();
    lists
        .invoke("AddRecord", &mut [Value::Double(1.0), Value::Double(2.0)])
        .unwrap();

    let again = wrap_core().unwrap();
    assert_eq!(again.source().unwrap().read().get("InitCount").unwrap(), Value::Int(1));
    let count = match again.get("Highlights").unwrap() {
        Value::Object(list) => list.read().get("Count").unwrap(),
        other => panic!("expected a record list, got {:?}", other),
    };
    assert_eq!(count, Value::Int(1));

    wrapper.invoke("Init", &mut [Value::Int(4)]).unwrap();
    assert_eq!(wrapper.get("InitCount").unwrap(), Value::Int(2));

    assert!(release());
    assert!(!release());
    let fresh = core().unwrap();
    assert_eq!(fresh.read().get("InitCount").unwrap(), Value::Int(1));
    assert!(release());
}
