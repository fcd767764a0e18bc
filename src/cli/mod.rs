//! Command-line interface

pub mod commands;

pub use commands::{
    cmd_advance, cmd_call, cmd_contracts, cmd_init, cmd_restore, cmd_status, parse_arg, AppState, CliResult,
    CONFIG_FILE,
};
