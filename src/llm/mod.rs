#[cfg(feature = "gemini")]
pub mod client;
pub mod model;
pub mod prompts;
pub mod types;

#[cfg(feature = "gemini")]
pub use client::*;
pub use model::*;
pub use types::*;
