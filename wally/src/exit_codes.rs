//! Stable exit codes for the wally CLI.

/// Configuration validated.
pub const OK: i32 = 0;
/// Unexpected failure unrelated to configuration validation (I/O, args file).
pub const FAILURE: i32 = 1;
/// Configuration was rejected by validation.
pub const INVALID_CONFIG: i32 = 2;
