//! Quasar Docs MCP Server
//!
//! An MCP (Model Context Protocol) server that gives LLM applications
//! (like Claude Code) searchable access to the Quasar Framework
//! documentation, fetched on demand from the official repository.
//!
//! # Overview
//!
//! This library provides:
//! - MCP server implementation with stdio transport
//! - A TTL-cached fetcher for the remote documentation source
//! - An in-memory page index with lexical search and a content-scan fallback
//! - Tools for component lookup, page retrieval, search and section browsing
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     stdio      ┌──────────────────┐
//! │   LLM Client    │◄──────────────►│   MCP Server     │
//! │  (Claude Code)  │    (MCP)       │ (quasar-docs-mcp)│
//! └─────────────────┘                └────────┬─────────┘
//!                                             │
//!                                   ┌─────────▼─────────┐
//!                                   │ Index + Search    │
//!                                   │ (TTL cached)      │
//!                                   └─────────┬─────────┘
//!                                             │ HTTPS
//!                                   ┌─────────▼─────────┐
//!                                   │  GitHub           │
//!                                   │  (quasarframework │
//!                                   │   /quasar docs)   │
//!                                   └───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoints, TTLs and the response size budget
//! - [`error`] - Error types for the entire application
//! - [`docs`] - Fetching, indexing, caching and search
//! - [`mcp`] - MCP server implementation

// Enforce documentation and other quality attributes
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are too strict
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod docs;
pub mod error;
pub mod mcp;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
