//! Browser policy generator.
//!
//! Reads one YAML policy source keyed by browser (chrome, brave, edge) and
//! writes, per browser, a macOS configuration profile, a Windows registry
//! import file and a Linux managed-policy JSON file.
//!
//! The public API is organised into layers:
//!
//! - **[`policy`]**: the value model, static per-browser metadata, loading and validation
//! - **[`transcode`]**: pure converters from a policy map to each output format
//! - **[`output`]**: the orchestrator that writes every (browser, format) output
//! - **[`commands`]**: top-level subcommands (`generate`, `validate`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod policy;
pub mod transcode;
