//! `WeatherText` - Weather forecast JSON to plain-text conversion service
//!
//! This library provides the core functionality for rendering structured
//! weather forecast payloads into a fixed-format text block intended as
//! pre-processed input for language models.

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod web;

// Re-export core types for public API
pub use config::ServerConfig;
pub use error::RenderError;
pub use render::{Rendered, render, render_forecast};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
