//! Station binding, configuration and logging modules.

pub mod binding;
pub mod config;
pub mod logger;
pub mod registry;
pub mod station;
