pub mod address;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod router;
pub mod store;
pub mod tx;
pub mod update;
