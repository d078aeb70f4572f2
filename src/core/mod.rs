//! Core translation engine module

pub mod busy;
pub mod client;
pub mod config;
pub mod errors;
pub mod gemini;
pub mod models;
pub mod prompt;
