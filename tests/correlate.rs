// ABOUTME: Integration tests for deploy-task correlation.
// ABOUTME: Covers the time window, host filtering, and the tie-break rule.

use chrono::{NaiveDate, NaiveDateTime};
use kiln::fog::correlate::match_scheduled_task;
use kiln::fog::{ActiveTask, TaskHost, TASK_TIME_FORMAT};
use kiln::types::TaskId;
use std::time::Duration;

const HOST: &str = "cephtest-042";
const WINDOW: Duration = Duration::from_secs(5);

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn task(id: u64, host: &str, offset_secs: i64) -> ActiveTask {
    let created = now() + chrono::Duration::seconds(offset_secs);
    ActiveTask {
        id: TaskId::new(id),
        host: TaskHost {
            name: host.to_string(),
        },
        created_time: created.format(TASK_TIME_FORMAT).to_string(),
    }
}

/// Test: Only tasks within the 5-second window qualify; among offsets
/// {-10s, -3s, -1s, +2s} the -10s task is excluded and the first
/// qualifying entry in listing order wins.
#[test]
fn window_filters_and_first_match_wins() {
    let tasks = vec![
        task(100, HOST, -10),
        task(200, HOST, -3),
        task(300, HOST, -1),
        task(400, HOST, 2),
    ];

    let matched = match_scheduled_task(&tasks, HOST, now(), WINDOW);
    assert_eq!(matched, Some(TaskId::new(200)));
}

/// Test: The tie-break is listing order, not closeness to now. With the
/// +2s task listed first it wins over the -1s task.
#[test]
fn tie_break_is_listing_order() {
    let tasks = vec![task(400, HOST, 2), task(300, HOST, -1)];

    let matched = match_scheduled_task(&tasks, HOST, now(), WINDOW);
    assert_eq!(matched, Some(TaskId::new(400)));
}

/// Test: Tasks for other hosts never match, however recent.
#[test]
fn other_hosts_are_ignored() {
    let tasks = vec![task(100, "cephtest-007", 0), task(200, "cephtest-108", -1)];

    assert_eq!(match_scheduled_task(&tasks, HOST, now(), WINDOW), None);
}

/// Test: A boundary task exactly at the window edge still qualifies, in
/// both skew directions.
#[test]
fn window_is_inclusive_both_directions() {
    let behind = vec![task(100, HOST, -5)];
    let ahead = vec![task(200, HOST, 5)];

    assert_eq!(
        match_scheduled_task(&behind, HOST, now(), WINDOW),
        Some(TaskId::new(100))
    );
    assert_eq!(
        match_scheduled_task(&ahead, HOST, now(), WINDOW),
        Some(TaskId::new(200))
    );
}

/// Test: No qualifying task means no id; the caller treats that as a
/// fatal correlation failure, never an implicit value.
#[test]
fn no_match_is_none() {
    assert_eq!(match_scheduled_task(&[], HOST, now(), WINDOW), None);

    let stale = vec![task(100, HOST, -3600)];
    assert_eq!(match_scheduled_task(&stale, HOST, now(), WINDOW), None);
}

/// Test: A window too large to represent falls back to the 5-second
/// default instead of matching everything in the listing.
#[test]
fn oversized_window_falls_back_to_default() {
    let tasks = vec![task(100, HOST, -3600), task(200, HOST, -3)];

    let matched = match_scheduled_task(&tasks, HOST, now(), Duration::MAX);
    assert_eq!(matched, Some(TaskId::new(200)));
}

/// Test: A malformed timestamp is skipped instead of failing the whole
/// correlation; a later well-formed task still matches.
#[test]
fn unparseable_timestamps_are_skipped() {
    let mut bad = task(100, HOST, 0);
    bad.created_time = "not a timestamp".to_string();
    let tasks = vec![bad, task(200, HOST, -1)];

    let matched = match_scheduled_task(&tasks, HOST, now(), WINDOW);
    assert_eq!(matched, Some(TaskId::new(200)));
}
