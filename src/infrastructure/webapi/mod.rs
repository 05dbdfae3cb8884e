//! Web API adapters

mod client;

pub use client::WebApiClient;
