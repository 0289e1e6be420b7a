//! OpenAI provider implementation
//!
//! Chat-completions over the OpenAI HTTP API.

pub mod client;
pub mod completion;
pub mod types;

pub use client::OpenAiClient;
pub use completion::OpenAiCompletionProvider;
