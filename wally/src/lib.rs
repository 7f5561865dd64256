//! Configuration front-end for a loop that re-invokes an agent against a
//! prompt until a check script succeeds.
//!
//! - **[`config`]**: schema and validation pipeline. Turns an untyped input
//!   bag into a typed [`config::Config`] or a [`config::ConfigError`] listing
//!   every failing field in declaration order.
//! - **[`io`]**: filesystem probing and file-based input, behind the
//!   [`io::probe::PathProbe`] seam so tests can run without touching disk.
//! - **[`cli`]**: clap flags, raw input assembly, and `--flag reason` error
//!   rendering.

pub mod cli;
pub mod config;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
