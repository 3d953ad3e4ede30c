//! CLI Adapter
//!
//! Command-line interface for bagsdex.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    render_table, CliApp, Command, ListCmd, OutputFormat, SearchCmd, ServeCmd,
};
