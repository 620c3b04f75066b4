/// Exit codes for scripts and CI.
pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2;
pub const REQUEST_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
