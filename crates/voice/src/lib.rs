//! Client for the voice-AI phone agent provider.
//!
//! - [`provider::VoiceAgentProvider`] -- the seam the API layer depends on.
//! - [`client::RetellClient`] -- the HTTP implementation.
//! - [`types`] -- request and response payloads.

pub mod client;
pub mod config;
pub mod provider;
pub mod types;

pub use client::{RetellClient, VoiceApiError};
pub use config::RetellConfig;
pub use provider::VoiceAgentProvider;
