#![doc = include_str!("../README.md")]

mod client;
mod error;
mod retry;

pub use client::RegistryClient;
pub use error::ClientError;
pub use retry::backoff_delay;
