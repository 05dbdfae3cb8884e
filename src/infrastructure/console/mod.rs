//! Console transport adapters

mod http;

pub use http::{HttpConsoleConnector, HttpConsoleTransport};
