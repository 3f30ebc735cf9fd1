//! OpenAI-compatible chat completions adapter
//!
//! Implements the [`LlmGateway`](interview_application::LlmGateway) port
//! over HTTP. Any endpoint speaking the `/chat/completions` dialect works
//! (OpenAI, Azure OpenAI proxies, local servers).

pub mod error;
pub mod gateway;
pub mod session;
