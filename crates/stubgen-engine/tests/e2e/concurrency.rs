//! Concurrent generation and shared artifacts.

use std::collections::HashSet;
use std::thread;

use stubgen_engine::{object_ref, StubGenerator, Value};

use super::harness::*;

#[test]
fn test_concurrent_generations_get_distinct_names() {
    let descriptor = mock_descriptor();
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| StubGenerator::new(descriptor.clone()).compile()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("generation thread panicked"))
            .collect()
    });

    let artifacts: Vec<_> = results.into_iter().map(|r| r.unwrap()).collect();
    let names: HashSet<_> = artifacts.iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names.len(), 8);
    assert!(artifacts.iter().all(|a| a.source() == artifacts[0].source()));
}

#[test]
fn test_one_artifact_many_threads() {
    let artifact = build(mock_descriptor());
    let class = artifact.class("MockWrapper").unwrap();

    thread::scope(|scope| {
        for i in 0..4 {
            scope.spawn(move || {
                let wrapper = class
                    .instantiate(object_ref(Mock::new(&format!("m{}", i))))
                    .unwrap();
                let item = wrapper.index("Item").unwrap();
                item.set(Value::Int(1), Value::Double(i as f64)).unwrap();
                assert_eq!(item.get(Value::Int(1)).unwrap(), Value::Double(i as f64));
                assert_eq!(wrapper.to_string().unwrap(), format!("Mock(m{})", i));
            });
        }
    });
}

#[test]
fn test_wrapper_shared_between_threads() {
    let (wrapper, _source) = wrap_mock(Mock::new("shared"));
    thread::scope(|scope| {
        for i in 0..4 {
            let wrapper = wrapper.clone();
            scope.spawn(move || {
                let item = wrapper.index("Item").unwrap();
                item.set(Value::Int(i % 2), Value::Double(1.0)).unwrap();
            });
        }
    });
    let item = wrapper.index("Item").unwrap();
    assert_eq!(item.get(Value::Int(0)).unwrap(), Value::Double(1.0));
    assert_eq!(item.get(Value::Int(1)).unwrap(), Value::Double(1.0));
}
