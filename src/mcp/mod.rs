//! MCP (Model Context Protocol) server module.
//!
//! This module implements the MCP server that exposes documentation tools
//! to LLM applications. The server uses stdio transport to communicate
//! with clients.
//!
//! # Architecture
//!
//! The MCP module is organized into:
//! - `server`: The `QuasarDocs` handler and response formatting
//! - `tools`: Tool parameter types with schema derivation and validation

pub mod server;
pub mod tools;

// Re-export the QuasarDocs server for convenient access
pub use server::QuasarDocs;
