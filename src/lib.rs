//! Patch-based feature templater.
//!
//! A template is a directory tree of `base.patch` files; each directory that
//! holds one is a feature, and a feature depends on every ancestor directory
//! that is itself a feature (plus an optional root feature).  The templater
//! applies requested features and their dependencies to a target project with
//! `git apply`, records what was applied in `<target>/.templater/applied.yml`,
//! and reverses already-applied patches if a later one fails.
//!
//! The public API is organised into layers:
//!
//! - **[`template`]**: catalog discovery, dependency resolution, applied-state
//!   record, planning, and the transactional apply engine
//! - **[`exec`]** / **[`fs`]**: injectable process and filesystem access
//! - **[`config`]**: `templater.toml` settings and feature list files
//! - **[`commands`]**: top-level subcommand orchestration (`list`, `status`, `apply`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod template;
