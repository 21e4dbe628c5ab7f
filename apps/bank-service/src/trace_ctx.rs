//! Task-local trace context for web requests.
//!
//! `RequestTrace` runs every request inside [`with_trace_id`], so anything on
//! the request task (error rendering, adapters logging a failure) can read the
//! current id without threading it through call signatures.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Fallback when no request scope is active (background tasks, startup).
pub const UNKNOWN_TRACE_ID: &str = "unknown";

/// Get the trace_id for the current task.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
        })
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run a future within a trace context.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
