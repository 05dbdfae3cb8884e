//! VoxRelay - voice command relay for remote server consoles
//!
//! Recognized phrases are gated by confidence, rewritten through an alias
//! table, and sent to a server console as numbered JSON commands.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Aliases, recognition results, the confidence gate, commands,
//!   session state, and configuration
//! - **Application**: The relay session use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (web API, HTTP console,
//!   recognizers, alias and config files)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
