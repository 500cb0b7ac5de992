//! Google Gemini `generateContent` client.
//!
//! Implements `ModelClient` for Gemini models via the Generative Language
//! API. The API is stateless, so each request carries the whole transcript.

mod api;
mod client;
mod config;


pub use client::GeminiClient;
pub use config::{GeminiConfig, GEMINI_API_BASE};
