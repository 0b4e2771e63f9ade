// ABOUTME: Correlates a just-scheduled deploy task with FOG's active-task list.
// ABOUTME: Time-window heuristic, since scheduling returns no task id.

use super::records::{ActiveTask, TASK_TIME_FORMAT};
use crate::types::TaskId;
use chrono::NaiveDateTime;
use std::time::Duration;

/// Default tolerance between "now" and a candidate task's creation time.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5);

/// Pick out "our" task from the active listing: the first task whose host
/// name equals `short_name` and whose creation time lies within `window`
/// of `now` in either direction (the service clock may sit slightly ahead
/// of or behind ours).
///
/// This is a join without a shared key and therefore best-effort. A stale
/// deploy task for the same host outside the window is ignored; one inside
/// the window is indistinguishable from ours and the first listed entry
/// wins. `None` means correlation failed and the caller must treat it as
/// fatal rather than waiting on an unknown task.
pub fn match_scheduled_task(
    tasks: &[ActiveTask],
    short_name: &str,
    now: NaiveDateTime,
    window: Duration,
) -> Option<TaskId> {
    let window = chrono::Duration::from_std(window).unwrap_or_else(|_| {
        tracing::warn!(window_secs = window.as_secs(),
            "configured correlation window out of range, falling back to 5s");
        chrono::Duration::seconds(5)
    });
    tasks
        .iter()
        .filter(|task| task.host.name == short_name)
        .find(|task| {
            let created = match NaiveDateTime::parse_from_str(&task.created_time, TASK_TIME_FORMAT)
            {
                Ok(created) => created,
                Err(err) => {
                    tracing::warn!(task = %task.id, created_time = %task.created_time, %err,
                        "skipping task with unparseable creation time");
                    return false;
                }
            };
            let skew = now.signed_duration_since(created);
            -window <= skew && skew <= window
        })
        .map(|task| task.id)
}
