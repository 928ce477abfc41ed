//! Sales-pitch generation from a company profile link.
//!
//! Fetches a structured company record from the profile-data provider,
//! builds a prompt from whatever fields the record actually carries, and
//! asks the text-generation provider to draft the pitch. The one piece of
//! classification logic that matters to users: a link that points at a
//! personal profile instead of a company page is a correctable input
//! error, not a provider failure, and is reported as such.

pub mod error;
pub mod generate;
pub mod profile;
pub mod prompt;

pub use error::PitchError;
pub use generate::{GenerationClient, TextGenerator};
pub use profile::{ProfileClient, ProfileSource};
pub use prompt::build_prompt;
