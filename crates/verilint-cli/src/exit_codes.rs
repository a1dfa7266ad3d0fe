//! Process exit codes. Per-module failures are recorded in the report and
//! never change the exit code.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // Invalid config, unreadable input, or report write failure
