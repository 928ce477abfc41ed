//! Client for the conversational-assistant provider.
//!
//! Wraps the provider's thread / message / run model behind the
//! [`AssistantApi`] port and layers the two pieces of local logic on top:
//! the session registry, which pins one provider thread to each user for
//! the process lifetime, and the run poller, which waits out a processing
//! run on a tiered schedule until it reaches a terminal status or the
//! overall deadline.
//!
//! Everything that talks HTTP lives in [`client`]; [`poll`] and
//! [`registry`] are generic over the port so they can be exercised with
//! in-memory fakes.

pub mod api;
pub mod client;
pub mod error;
pub mod poll;
pub mod registry;

pub use api::AssistantApi;
pub use client::AssistantClient;
pub use error::AssistantError;
pub use poll::{await_completion, PollPhase, PollSchedule};
pub use registry::SessionRegistry;
