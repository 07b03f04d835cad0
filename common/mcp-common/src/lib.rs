//! MCP Common - plumbing shared by the MCP servers in this workspace
//!
//! - **Tracing**: [`init_tracing`] logs to stderr, keeping stdout for the protocol
//! - **Results**: [`json_success`] wraps serializable data as a tool result
//! - **Errors**: [`IntoMcpError`] / [`ResultExt`] turn library errors into `McpError`
//! - **Embeddable**: [`EmbeddableMcp`] dispatches tools in-process by name
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{json_success, ResultExt};
//!
//! async fn lookup(&self) -> Result<CallToolResult, McpError> {
//!     let response = self.gateway.post(endpoint, payload, None).await.to_mcp_err()?;
//!     json_success(&response)
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{IntoMcpError, McpResult, ResultExt};
pub use init::init_tracing;
pub use result::json_success;

pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

pub use async_trait::async_trait;
