// logscrub/src/lib.rs
//! # logscrub CLI Application
//!
//! This crate provides the command-line interface over `logscrub-core`: the
//! `sanitize` and `scan` subcommands, argument parsing, and logger setup.

pub mod cli;
pub mod commands;
pub mod logger;
