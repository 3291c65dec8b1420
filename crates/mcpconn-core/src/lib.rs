//! # McpConn Core Library
//!
//! Domain entities and collaborator contracts for McpConn.
//!
//! ## Modules
//!
//! - `domain` - Core entities (Server, Connection, Tool)
//! - `repository` - Record store traits
//! - `proxy` - Per-server proxy contract and locator
//! - `id` - Identifier generation

pub mod domain;
pub mod id;
pub mod proxy;
pub mod repository;

// Re-export commonly used types
pub use domain::*;
pub use id::{IdGenerator, UuidIdGenerator};
pub use proxy::{ProxyAddress, ProxyLocator, ProxyRequest, ProxyResponse, ServerProxy};
pub use repository::*;
