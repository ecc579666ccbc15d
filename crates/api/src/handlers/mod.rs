//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource group.
//! Handlers validate input via `forma_core`, delegate persistence to the
//! repositories in `forma_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod academy;
pub mod events;
pub mod onboarding;
pub mod training;
