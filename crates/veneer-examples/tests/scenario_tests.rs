//! Exact-transcript tests for the example scenarios.

use std::sync::Arc;

use veneer::MemorySink;
use veneer_examples::{decorator_shapes, hello_world, log, log_levels, magic_number, LogLevel};

#[test]
fn hello_world_transcript() {
    let sink = Arc::new(MemorySink::new());
    hello_world(sink.clone()).unwrap();
    assert_eq!(sink.lines(), ["Hello", "World"]);
}

#[test]
fn decorator_shapes_transcript() {
    let sink = Arc::new(MemorySink::new());
    decorator_shapes(sink.clone()).unwrap();
    assert_eq!(sink.lines(), ["Hello beautiful World!"]);
}

#[test]
fn magic_number_transcript() {
    let sink = Arc::new(MemorySink::new());
    magic_number(sink.clone()).unwrap();
    assert_eq!(sink.lines(), ["The magic number is: 42"]);
}

#[test]
fn log_factory_prints_init_line_eagerly() {
    let sink = Arc::new(MemorySink::new());
    // No class exists yet; configuration is still evaluated now.
    let _decorator = log(LogLevel::Error, sink.clone());
    assert_eq!(sink.lines(), ["Init with logLevel: error"]);
}

#[test]
fn log_levels_transcript() {
    let sink = Arc::new(MemorySink::new());
    log_levels(sink.clone()).unwrap();
    assert_eq!(
        sink.lines(),
        [
            "Init with logLevel: error",
            "Method called",
            "Done",
            "Method called",
            "Done",
        ]
    );
}
