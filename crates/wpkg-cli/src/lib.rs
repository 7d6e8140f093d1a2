//! wpkg CLI library.
//!
//! Exposes the command implementations and output formatters of the `wpkg`
//! binary so they can be tested without spawning a process.

#![allow(clippy::format_push_string)]

pub mod commands;
pub mod formatters;
