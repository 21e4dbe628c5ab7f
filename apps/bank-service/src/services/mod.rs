//! Use cases. Each public operation takes a connection (usually the
//! transaction opened by `with_txn`) and returns `Result<_, AppError>`.

pub mod accounts;
pub mod customers;
pub mod exchange;
pub mod exchange_rates;
pub mod outbox_relay;

use tracing::error;

use crate::error::AppError;
use crate::trace_ctx;

/// Record a failed command. Used with `Result::inspect_err`.
pub(crate) fn log_command_failure(command: &'static str, err: &AppError) {
    error!(
        command,
        trace_id = %trace_ctx::trace_id(),
        code = %err.code(),
        status = err.status().as_u16(),
        error = %err,
        "command failed"
    );
}
