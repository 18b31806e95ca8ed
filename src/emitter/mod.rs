//! Emitter for generated monitoring configuration

pub mod config;
mod text;

pub use config::HeaderConfig;
pub use text::{emit, header};
