//! Herald bot runtime: configuration, the chat-transport boundary, and the
//! two pipeline orchestrators (voice and pitch).
//!
//! The orchestrators own the error boundary: every component failure is
//! converted into exactly one user-visible outcome per inbound event, and
//! no per-event task ever propagates a panic or error into the dispatch
//! loop.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod runner;
pub mod telegram;
pub mod transport;

pub use config::Config;
pub use error::BotError;
pub use pipeline::{PitchPipeline, VoicePipeline};
pub use runner::{run_dispatch_loop, EventHandler};
pub use telegram::TelegramClient;
pub use transport::{ChatTransport, FileRef, InboundEvent, TransportError};
