//! Command handlers for the `lyirc` CLI.

mod check;

pub use check::{check_files, parse_check_options, CheckOptions};
