//! I/O helpers: filesystem probing and file-based input.

pub mod args_file;
pub mod probe;
