//! Dispatch semantics over a built bus.

mod common;
use common::tagged_manifest;

use plugbus::testing::{CountingHandler, RecordingHandler};
use plugbus::{Bus, Manifest};

#[tokio::test]
async fn test_serial_folds_in_registration_order() {
    let bus = Bus::<String>::builder()
        .module("first", tagged_manifest("1", &["t"]))
        .module("second", tagged_manifest("2", &["t"]))
        .build()
        .await
        .unwrap();

    let out = bus.serial("t", "0".to_string()).unwrap();
    assert_eq!(out, "0-1-2");
}

#[tokio::test]
async fn test_serial_unregistered_topic_returns_seed() {
    let bus = Bus::<String>::builder()
        .module("first", tagged_manifest("1", &["t"]))
        .build()
        .await
        .unwrap();

    let out = bus.serial("unheard-of", "0".to_string()).unwrap();
    assert_eq!(out, "0", "seed should pass through untouched");
}

#[tokio::test]
async fn test_serial_on_empty_bus_returns_seed() {
    let bus = Bus::<String>::builder().build().await.unwrap();

    let out = bus.serial("t", "0".to_string()).unwrap();
    assert_eq!(out, "0");
}

#[tokio::test]
async fn test_call_dispatches_serially() {
    let bus = Bus::<String>::builder()
        .module("first", tagged_manifest("1", &["t"]))
        .module("second", tagged_manifest("2", &["t"]))
        .build()
        .await
        .unwrap();

    let out = bus.call("t", "0".to_string()).unwrap();
    assert_eq!(out, "0-1-2");
}

#[tokio::test]
async fn test_one_invokes_only_the_first_handler() {
    let counter = CountingHandler::new();
    let bus = Bus::<String>::builder()
        .module("first", tagged_manifest("1", &["t"]))
        .module("second", Manifest::new().on("t", counter.clone()))
        .build()
        .await
        .unwrap();

    let out = bus.one("t", "0".to_string()).unwrap();
    assert_eq!(out, "0-1");
    assert_eq!(counter.count(), 0, "later handlers must not run");
}

#[tokio::test]
async fn test_one_unregistered_topic_returns_seed() {
    let bus = Bus::<String>::builder().build().await.unwrap();

    let out = bus.one("t", "0".to_string()).unwrap();
    assert_eq!(out, "0");
}

#[tokio::test]
async fn test_parallel_fans_out_independent_clones() {
    let bus = Bus::<String>::builder()
        .module("first", tagged_manifest("1", &["t"]))
        .module("second", tagged_manifest("2", &["t"]))
        .build()
        .await
        .unwrap();

    let outs = bus.parallel("t", "0".to_string()).unwrap();
    assert_eq!(outs, vec!["0-1", "0-2"]);
}

#[tokio::test]
async fn test_parallel_unregistered_topic_yields_empty() {
    let bus = Bus::<String>::builder()
        .module("first", tagged_manifest("1", &["t"]))
        .build()
        .await
        .unwrap();

    let outs = bus.parallel("unheard-of", "0".to_string()).unwrap();
    assert!(outs.is_empty());
}

#[tokio::test]
async fn test_one_module_can_serve_many_topics() {
    let bus = Bus::<String>::builder()
        .module("both", tagged_manifest("x", &["t", "u"]))
        .build()
        .await
        .unwrap();

    assert_eq!(bus.serial("t", "0".to_string()).unwrap(), "0-x");
    assert_eq!(bus.serial("u", "0".to_string()).unwrap(), "0-x");
}

#[tokio::test]
async fn test_declined_slot_dispatches_as_unregistered() {
    let manifest: Manifest<String> = Manifest::new()
        .on("kept", |d: String| d)
        .on_maybe("t", None::<fn(String) -> String>);

    let bus = Bus::<String>::builder()
        .module("choosy", manifest)
        .build()
        .await
        .unwrap();

    assert_eq!(bus.serial("t", "seed".to_string()).unwrap(), "seed");
    assert!(bus.parallel("t", "seed".to_string()).unwrap().is_empty());
    assert!(!bus.has_topic("t"), "a declined slot must not open the topic");
    assert!(bus.has_topic("kept"));
}

#[tokio::test]
async fn test_topic_introspection() {
    let bus = Bus::<String>::builder()
        .module("first", tagged_manifest("1", &["t", "u"]))
        .module("second", tagged_manifest("2", &["t"]))
        .build()
        .await
        .unwrap();

    assert!(bus.has_topic("t"));
    assert!(!bus.has_topic("nope"));
    assert_eq!(bus.handler_count("t"), 2);
    assert_eq!(bus.handler_count("u"), 1);

    let mut topics: Vec<_> = bus.topics().iter().map(|t| t.as_str().to_owned()).collect();
    topics.sort();
    assert_eq!(topics, ["t", "u"]);
}

#[tokio::test]
async fn test_recording_handler_observes_payloads() {
    let recorder = RecordingHandler::<String>::new();
    let bus = Bus::<String>::builder()
        .module("tap", Manifest::new().on("t", recorder.clone()))
        .build()
        .await
        .unwrap();

    bus.serial("t", "a".to_string()).unwrap();
    bus.serial("t", "b".to_string()).unwrap();

    assert_eq!(recorder.calls(), vec!["a", "b"]);
}
