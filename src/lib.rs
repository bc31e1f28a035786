// Crate root library declaration and module exports.
pub mod cli;
pub mod client;
pub mod config;
pub mod handler;
pub mod logging;
pub mod model;
pub mod server;
