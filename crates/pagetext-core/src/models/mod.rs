//! Data models shared by the CLI and the web server.

pub mod config;
