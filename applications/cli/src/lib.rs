//! Groove Player CLI Library
//!
//! Terminal front end for the playback session: configuration, a simulated
//! output device, text rendering and the interactive command loop.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod repl;

// Re-export commonly used types for convenience
pub use config::{CatalogSource, GrooveConfig};
pub use error::{CliError, Result};
pub use output::SimulatedOutput;
pub use repl::{parse_command, Command, Player, Reply};
