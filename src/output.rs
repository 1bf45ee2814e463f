//! JSON output for CLI commands.

use serde::Serialize;
use serde_json::json;

use ticketd_core::error::AppError;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(item: &T) {
    match serde_json::to_string_pretty(item) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

/// Print an error as `{ "error": { code, kind, message, retryable } }` on stdout.
pub fn print_error(err: &AppError) {
    print_json(&json!({
        "error": {
            "code": err.code(),
            "kind": err.kind,
            "message": err.message,
            "retryable": err.is_retryable(),
        }
    }));
}
