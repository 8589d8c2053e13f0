use std::sync::Arc;

use chrono::{TimeZone, Utc};

use paycheck_sanity::application::ports::{ErrorLog, ErrorLogEntry, LlmClientError};
use paycheck_sanity::application::services::AnalysisError;
use paycheck_sanity::infrastructure::error_log::{FileErrorLog, InMemoryErrorLog};

fn sample_entry(message: &str) -> ErrorLogEntry {
    ErrorLogEntry {
        timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        request_id: Some("req-1".to_string()),
        message: message.to_string(),
        trace: "    0: boom".to_string(),
    }
}

#[test]
fn given_entry_when_rendering_then_block_ends_with_blank_line() {
    let rendered = sample_entry("boom").render();

    assert_eq!(
        rendered,
        "[2024-03-15T12:00:00.000Z] Error: boom\nRequest: req-1\nStack:\n    0: boom\n\n"
    );
}

#[test]
fn given_nested_error_when_building_entry_then_trace_lists_source_chain() {
    let error = AnalysisError::Upstream(LlmClientError::RateLimited);

    let entry = ErrorLogEntry::from_error(&error, None, Utc::now());

    assert_eq!(entry.message, "model call failed: rate limited");
    assert!(entry.trace.contains("0: model call failed: rate limited"));
    assert!(entry.trace.contains("1: rate limited"));
    assert!(!entry.render().contains("Request:"));
}

#[test]
fn given_multi_line_upstream_body_when_rendering_then_entry_stays_one_block() {
    let error = AnalysisError::Upstream(LlmClientError::ApiRequestFailed(
        "HTTP 400: line1\n\nline2".to_string(),
    ));

    let rendered =
        ErrorLogEntry::from_error(&error, Some("req-1".to_string()), Utc::now()).render();

    let blocks: Vec<&str> = rendered
        .split("\n\n")
        .filter(|block| !block.is_empty())
        .collect();
    assert_eq!(blocks.len(), 1);
    assert!(
        blocks[0]
            .contains("Error: model call failed: api request failed: HTTP 400: line1\n    line2")
    );
    assert!(blocks[0].contains("    1: api request failed: HTTP 400: line1\n       line2"));
    assert!(rendered.ends_with("line2\n\n"));
}

#[test]
fn given_hand_built_entry_with_blank_lines_when_rendering_then_only_terminator_is_blank() {
    let entry = ErrorLogEntry {
        timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        request_id: None,
        message: "first\n\n\nsecond\n".to_string(),
        trace: "    0: a\n\n    1: b\n".to_string(),
    };

    assert_eq!(
        entry.render(),
        "[2024-03-15T12:00:00.000Z] Error: first\n    second\nStack:\n    0: a\n    1: b\n\n"
    );
}

#[tokio::test]
async fn given_entries_when_appending_to_file_then_all_are_persisted_in_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("logs").join("server_error.log");
    let log = FileErrorLog::new(&path);

    log.append(&sample_entry("first")).await.unwrap();
    log.append(&sample_entry("second")).await.unwrap();

    let content = std::fs::read_to_string(log.path()).unwrap();
    let first = content.find("Error: first").unwrap();
    let second = content.find("Error: second").unwrap();
    assert!(first < second);
    assert!(content.ends_with("\n\n"));
}

#[tokio::test]
async fn given_concurrent_appends_when_writing_file_then_entries_do_not_interleave() {
    let dir = tempfile::TempDir::new().unwrap();
    let log = Arc::new(FileErrorLog::new(dir.path().join("server_error.log")));

    let mut handles = Vec::new();
    for i in 0..32 {
        let log = Arc::clone(&log);
        handles.push(tokio::spawn(async move {
            let message = format!("failure-{i} {}", "x".repeat(2_000));
            log.append(&sample_entry(&message)).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let content = std::fs::read_to_string(log.path()).unwrap();
    let blocks: Vec<&str> = content
        .split("\n\n")
        .filter(|block| !block.is_empty())
        .collect();
    assert_eq!(blocks.len(), 32);
    for block in blocks {
        assert!(block.starts_with("[2024-03-15T12:00:00.000Z] Error: failure-"));
        assert!(block.ends_with("    0: boom"));
    }
}

#[tokio::test]
async fn given_entries_when_appending_in_memory_then_they_are_recorded() {
    let log = InMemoryErrorLog::new();

    log.append(&sample_entry("boom")).await.unwrap();

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "boom");
}
