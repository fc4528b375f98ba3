//! # SUFT Client
//!
//! The authenticated request pipeline for the SUFT time-sheet approval
//! service:
//! - [`AuthSession`]: credential and refresh-token exchange
//! - [`HttpGateway`]: authenticated dispatch with the single
//!   refresh-and-retry recovery on 401
//! - [`SuftClient`]: typed schedule and logging-time operations behind the
//!   [`SuftApi`] trait
//!
//! All tokens travel as HTTP cookies; all bodies are JSON. The client
//! performs exactly one recovery action (token refresh on 401) and no other
//! retries.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod gateway;

pub use api::{PageOptions, ScheduleOptions, SuftApi};
pub use auth::AuthSession;
pub use client::SuftClient;
pub use config::ClientConfig;
pub use gateway::HttpGateway;

use suft_domain::SuftError;

/// Map a reqwest failure (connect, DNS, timeout) to the transport error
/// variant. Transport failures are terminal; the client never retries them.
pub(crate) fn transport_error(err: &reqwest::Error) -> SuftError {
    SuftError::Transport(err.to_string())
}
