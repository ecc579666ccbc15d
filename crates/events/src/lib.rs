//! Forma event bus infrastructure.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.
//!
//! The progression engine publishes `lesson.completed`, `module.completed`,
//! `module.unlocked`, `onboarding.completed`, `schema.period_started`, and
//! `schema.completed`.

pub mod bus;
pub mod persistence;

pub use bus::{EventBus, PlatformEvent};
pub use persistence::EventPersistence;
