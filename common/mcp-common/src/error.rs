//! Conversion of library errors into MCP errors
//!
//! Tool handlers return `Result<_, McpError>`. Error types that implement
//! [`IntoMcpError`] can be lifted with [`ResultExt::to_mcp_err`]:
//!
//! ```rust,ignore
//! let payload = serde_json::to_value(&payload).to_mcp_err()?;
//! ```

use rmcp::ErrorData as McpError;

/// Result alias for tool handlers
pub type McpResult<T> = Result<T, McpError>;

/// Convert an error into an MCP error
///
/// Implement this for a crate's own error type to make `to_mcp_err()`
/// available on its results:
///
/// ```rust,ignore
/// impl IntoMcpError for GatewayError {
///     fn into_mcp_error(self) -> McpError {
///         McpError::internal_error(self.to_string(), None)
///     }
/// }
/// ```
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

impl IntoMcpError for anyhow::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(self.to_string(), None)
    }
}

/// `to_mcp_err()` for any `Result` whose error implements [`IntoMcpError`]
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> McpResult<T>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> McpResult<T> {
        self.map_err(IntoMcpError::into_mcp_error)
    }
}
