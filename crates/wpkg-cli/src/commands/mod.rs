//! Command implementations for the wpkg CLI.
//!
//! Each command builds a serializable result from the repository
//! configuration and prints it in the requested output format.

pub mod completions;
pub mod config;
pub mod list;
pub mod show;

/// Whether `err` was caused by invalid user input, looking through any
/// context attached to it.
///
/// Such errors exit with [`ExitCode::INVALID_INPUT`](wpkg_core::cli::ExitCode::INVALID_INPUT).
#[must_use]
pub fn is_invalid_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<wpkg_core::Error>()
        .is_some_and(wpkg_core::Error::is_invalid_input)
}
