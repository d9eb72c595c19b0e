//! Command-line interface for lbr

mod args;
pub mod commands;

pub use args::{
    Cli, Commands, ConfigAction, ConfigArgs, EnvironmentArgs, LabBookAction, LabBookArgs,
    OutputFormat, PageOptions, RemoteAction, RemoteArgs,
};
