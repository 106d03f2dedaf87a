//! Signorder CLI
//!
//! Validates recipient lists and replays edit scripts outside a UI.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;

pub use commands::{
    default_config_toml, load_config, load_list, replay, run_apply, run_validate, ApplyReport,
    StepReport, StepStatus,
};
