//! Concurrent access tests for thread safety verification.
//!
//! The dispatcher holds no mutable state, so calls from many threads must
//! produce the same results as serial calls.

mod common;

use codify_mcp::{Dispatcher, ToolContext};
use common::{to_args, TestEnv};
use serde_json::json;
use std::sync::Arc;
use std::thread;

/// Sets up a project with one marker per file.
fn setup_concurrent_env() -> TestEnv {
    let env = TestEnv::new();
    for i in 0..10 {
        env.write_file(
            &format!("src/file_{i}.js"),
            format!("function f{i}() {{}}\n// TODO: item {i}\n"),
        );
    }
    env
}

#[test]
fn test_concurrent_scans_agree() {
    let env = setup_concurrent_env();
    let dispatcher = Arc::new(Dispatcher::new(ToolContext::new(env.dir.path().to_path_buf())));
    let expected = env.call_text("find_todos", json!({}));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let dispatcher = Arc::clone(&dispatcher);
            thread::spawn(move || {
                (0..5)
                    .map(|_| {
                        dispatcher
                            .dispatch("find_todos", &to_args(json!({})))
                            .unwrap()
                            .first_text()
                            .to_string()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for text in handle.join().expect("thread should not panic") {
            assert_eq!(text, expected);
        }
    }
    assert!(expected.contains("Found 10 items across 10 files:"));
}

#[test]
fn test_concurrent_mixed_tools() {
    let env = setup_concurrent_env();
    let dispatcher = Arc::new(Dispatcher::new(ToolContext::new(env.dir.path().to_path_buf())));
    let file = env.path_str("src/file_3.js");

    let handles: Vec<_> = ["code_roaster", "bug_predictor", "complexity_analyzer", "codify"]
        .into_iter()
        .map(|tool| {
            let dispatcher = Arc::clone(&dispatcher);
            let file = file.clone();
            thread::spawn(move || {
                let result = dispatcher
                    .dispatch(tool, &to_args(json!({ "filePath": file })))
                    .unwrap();
                assert!(!result.is_error, "{tool} failed: {}", result.first_text());
                assert!(result.first_text().contains("function f3() {}"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
}
