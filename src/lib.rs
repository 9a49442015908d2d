//! Respace - room redesign backend.
//!
//! Accepts a room photo and a target style over HTTP, asks a Gemini image
//! model to restyle the room, and returns the generated image as a data URL
//! together with the model's design suggestions.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod config;
pub mod context;
pub mod design;
pub mod error;
pub mod extract;
pub mod model;
pub mod ports;
pub mod prompt;
pub mod server;
