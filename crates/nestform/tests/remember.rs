use std::sync::Arc;

use nestform::{error_map, Form, MemoryRememberStore, RememberStore};
use serde_json::json;

#[test]
fn state_survives_a_rebuild() {
    let store = Arc::new(MemoryRememberStore::new());
    let initial = json!({"user": {"name": ""}});

    let form = Form::builder(initial.clone())
        .remember("users/new", store.clone())
        .build();
    form.set_data("user.name", json!("Sam"));
    form.set_error("user.name", "is taken");
    drop(form);

    let restored = Form::builder(initial)
        .remember("users/new", store.clone())
        .build();
    assert_eq!(restored.get_data("user.name"), Some(json!("Sam")));
    assert_eq!(restored.errors(), error_map([("user.name", "is taken")]));
    assert!(restored.has_errors());
    assert!(restored.is_dirty());
    assert_eq!(restored.defaults(), json!({"user": {"name": ""}}));
}

#[test]
fn slots_are_written_after_each_change() {
    let store = Arc::new(MemoryRememberStore::new());
    let form = Form::builder(json!({"a": 1}))
        .remember("k", store.clone())
        .build();

    assert_eq!(store.restore("k:data"), None);
    form.set_data("a", json!(2));
    assert_eq!(store.restore("k:data"), Some(json!({"a": 2})));
    assert_eq!(store.restore("k:errors"), Some(json!({})));

    form.set_error("a", vec!["x", "y"]);
    assert_eq!(store.restore("k:errors"), Some(json!({"a": ["x", "y"]})));
}

#[test]
fn unreadable_errors_are_dropped() {
    let store = Arc::new(MemoryRememberStore::new());
    store.remember("k:errors", json!({"a": 1}));
    store.remember("k:data", json!({"a": "kept"}));

    let form = Form::builder(json!({"a": ""}))
        .remember("k", store)
        .build();
    assert!(form.errors().is_empty());
    assert!(!form.has_errors());
    assert_eq!(form.get_data("a"), Some(json!("kept")));
}

#[test]
fn separate_keys_do_not_collide() {
    let store = Arc::new(MemoryRememberStore::new());
    let first = Form::builder(json!({"v": 1})).remember("one", store.clone()).build();
    let second = Form::builder(json!({"v": 1})).remember("two", store.clone()).build();
    first.set_data("v", json!(10));
    second.set_data("v", json!(20));
    assert_eq!(store.restore("one:data"), Some(json!({"v": 10})));
    assert_eq!(store.restore("two:data"), Some(json!({"v": 20})));
}
