//! Serper MCP Library
//!
//! Google search through the Serper API, exposed as MCP tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use serper_mcp::{Config, SerperMcpServer};
//!
//! let server = SerperMcpServer::new(Config::load()?)?;
//! // Use with in-memory transport or serve via stdio
//! ```
//!
//! # Configuration
//! Set `SERPER_API_KEY` (env or `.env`) or configure in `~/.binks/serper.toml`

pub mod config;
pub mod gateway;
pub mod metrics;
pub mod resolver;
pub mod server;
pub mod types;

pub use config::Config;
pub use gateway::{GatewayError, SearchGateway, SerperGateway};
pub use server::SerperMcpServer;

// Re-export parameter types for direct API usage
pub use server::{
    AutocompleteParams, CountedSearchParams, NewsSearchParams, QueryParams, WebSearchParams,
};

// Re-export EmbeddableMcp trait for in-process usage
pub use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
