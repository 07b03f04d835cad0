//! MCP Server implementation for Serper search
//!
//! Each tool maps its parameters to a Serper payload, forwards it through the
//! [`SearchGateway`], and returns the upstream JSON as text content.

use anyhow::Result;
use mcp_common::{
    async_trait, json_success, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError,
    ResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::{Config, SerperConfig};
use crate::gateway::{SearchGateway, SerperGateway};
use crate::metrics::UsageCounter;
use crate::resolver;
use crate::types::{
    CountedQueryPayload, Endpoint, NewsSearchPayload, QueryPayload, StructuredExtract,
    WebSearchPayload,
};

const DEFAULT_NUM: u32 = 10;
const DEFAULT_PAGE: u32 = 1;

/// The main Serper MCP Server
#[derive(Clone)]
pub struct SerperMcpServer {
    gateway: Arc<dyn SearchGateway>,
    config: SerperConfig,
    usage: UsageCounter,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for `search_web`
///
/// Absent `location`/`language` are left out of the upstream payload; the
/// remaining optionals fall back to the documented defaults.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// The search query
    #[schemars(description = "The search query string")]
    pub query: String,
    /// Free-form location, sent as `location`
    #[schemars(description = "Location to search from, e.g. 'Austin, Texas, United States'")]
    pub location: Option<String>,
    /// Interface language, sent as `hl`
    #[schemars(description = "Interface language code, e.g. 'en'")]
    pub language: Option<String>,
    /// Number of results to request
    #[schemars(description = "Number of results (default: 10)")]
    pub num: Option<u32>,
    /// 1-based result page
    #[schemars(description = "Result page (default: 1)")]
    pub page: Option<u32>,
    /// Whether upstream may rewrite a misspelled query
    #[schemars(description = "Let Google correct the query spelling (default: true)")]
    pub autocorrect: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct NewsSearchParams {
    /// The search query
    #[schemars(description = "The news search query string")]
    pub query: String,
    /// Free-form location, sent as `location`
    #[schemars(description = "Location to search from")]
    pub location: Option<String>,
    /// Interface language, sent as `hl`
    #[schemars(description = "Interface language code, e.g. 'en'")]
    pub language: Option<String>,
    /// Number of results to request
    #[schemars(description = "Number of results (default: 10)")]
    pub num: Option<u32>,
}

/// Query with an optional result count (images, videos)
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CountedSearchParams {
    /// The search query
    #[schemars(description = "The search query string")]
    pub query: String,
    /// Number of results to request
    #[schemars(description = "Number of results (default: 10)")]
    pub num: Option<u32>,
}

/// Bare query, shared by places, shopping, scholar, patent,
/// `extract_structured` and `quick_fact`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// The search query
    #[schemars(description = "The search query string")]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AutocompleteParams {
    /// Partial query, sent upstream as `q`
    #[schemars(description = "Partial query to complete")]
    pub prefix: String,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl SerperMcpServer {
    pub fn new(config: Config) -> Result<Self> {
        let gateway = SerperGateway::new(&config.serper)?;
        Ok(Self::with_gateway(Arc::new(gateway), config.serper))
    }

    /// Build a server over any gateway implementation
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let gateway = Arc::new(SerperGateway::new(&config.serper)?);
    /// let server = SerperMcpServer::with_gateway(gateway, config.serper);
    /// ```
    pub fn with_gateway(gateway: Arc<dyn SearchGateway>, config: SerperConfig) -> Self {
        Self {
            gateway,
            config,
            usage: UsageCounter::new(),
            tool_router: Self::tool_router(),
        }
    }

    async fn forward<P: Serialize>(
        &self,
        endpoint: Endpoint,
        payload: &P,
    ) -> Result<CallToolResult, McpError> {
        let payload = serde_json::to_value(payload).to_mcp_err()?;
        let response = self
            .gateway
            .post(endpoint, payload, None)
            .await
            .to_mcp_err()?;
        json_success(&response)
    }

    // ========================================================================
    // Search Tools
    // ========================================================================

    #[tool(description = "Google web search with optional location, language, result count, page and autocorrect.")]
    async fn search_web(
        &self,
        Parameters(params): Parameters<WebSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Web search for: {}", params.query);

        let payload = WebSearchPayload {
            q: params.query,
            location: params.location,
            hl: params.language,
            num: params.num.unwrap_or(DEFAULT_NUM),
            page: params.page.unwrap_or(DEFAULT_PAGE),
            autocorrect: params.autocorrect.unwrap_or(true),
        };
        self.forward(Endpoint::Search, &payload).await
    }

    #[tool(description = "Google News search.")]
    async fn search_news(
        &self,
        Parameters(params): Parameters<NewsSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("News search for: {}", params.query);

        let payload = NewsSearchPayload {
            q: params.query,
            location: params.location,
            hl: params.language,
            num: params.num.unwrap_or(DEFAULT_NUM),
        };
        self.forward(Endpoint::News, &payload).await
    }

    #[tool(description = "Google Images search.")]
    async fn search_images(
        &self,
        Parameters(params): Parameters<CountedSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Image search for: {}", params.query);

        let payload = CountedQueryPayload {
            q: params.query,
            num: params.num.unwrap_or(DEFAULT_NUM),
        };
        self.forward(Endpoint::Images, &payload).await
    }

    #[tool(description = "Google Videos search.")]
    async fn search_videos(
        &self,
        Parameters(params): Parameters<CountedSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Video search for: {}", params.query);

        let payload = CountedQueryPayload {
            q: params.query,
            num: params.num.unwrap_or(DEFAULT_NUM),
        };
        self.forward(Endpoint::Videos, &payload).await
    }

    #[tool(description = "Google Places search.")]
    async fn search_places(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Places search for: {}", params.query);
        let payload = QueryPayload::new(params.query);
        self.forward(Endpoint::Places, &payload).await
    }

    #[tool(description = "Google Shopping search.")]
    async fn search_shopping(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Shopping search for: {}", params.query);
        let payload = QueryPayload::new(params.query);
        self.forward(Endpoint::Shopping, &payload).await
    }

    #[tool(description = "Google Scholar search.")]
    async fn search_scholar(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Scholar search for: {}", params.query);
        let payload = QueryPayload::new(params.query);
        self.forward(Endpoint::Scholar, &payload).await
    }

    #[tool(description = "Google Patents search.")]
    async fn search_patent(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Patent search for: {}", params.query);
        let payload = QueryPayload::new(params.query);
        self.forward(Endpoint::Patent, &payload).await
    }

    #[tool(description = "Google search autocomplete suggestions for a partial query.")]
    async fn search_autocomplete(
        &self,
        Parameters(params): Parameters<AutocompleteParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Autocomplete for: {}", params.prefix);
        let payload = QueryPayload::new(params.prefix);
        self.forward(Endpoint::Autocomplete, &payload).await
    }

    // ========================================================================
    // Derived Tools
    // ========================================================================

    #[tool(description = "Extract the knowledge graph, People Also Ask, related searches and organic results from a web search.")]
    async fn extract_structured(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Structured extraction for: {}", params.query);

        let payload = serde_json::to_value(QueryPayload::new(params.query)).to_mcp_err()?;
        let response = self
            .gateway
            .post(Endpoint::Search, payload, None)
            .await
            .to_mcp_err()?;

        json_success(&StructuredExtract::from(response))
    }

    #[tool(description = "Best-effort short answer to a factual question. Returns {answer, source, type} or {error}.")]
    async fn quick_fact(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Quick fact for: {}", params.query);

        let fact = resolver::quick_fact(
            self.gateway.as_ref(),
            &params.query,
            self.config.quick_fact_timeout(),
        )
        .await;
        json_success(&fact)
    }

    #[tool(description = "Return basic usage metrics.")]
    async fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        let report = self.usage.record();
        tracing::info!("Metrics requested (total_searches={})", report.total_searches);
        json_success(&report)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for SerperMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Serper MCP Server - Google search through the Serper API. Supports web, \
                 news, images, videos, places, shopping, scholar, patents and autocomplete, \
                 plus structured extraction, quick fact lookup and usage metrics."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

fn parse<T: serde::de::DeserializeOwned>(params: Value) -> EmbeddableResult<Parameters<T>> {
    serde_json::from_value(params)
        .map(Parameters)
        .map_err(|e| EmbeddableError::InvalidParams(e.to_string()))
}

#[async_trait]
impl EmbeddableMcp for SerperMcpServer {
    fn server_name(&self) -> &str {
        "serper"
    }

    fn server_description(&self) -> Option<&str> {
        Some("Serper MCP Server - Google search tools backed by the Serper API.")
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        let result = match name {
            "search_web" => self.search_web(parse(params)?).await,
            "search_news" => self.search_news(parse(params)?).await,
            "search_images" => self.search_images(parse(params)?).await,
            "search_videos" => self.search_videos(parse(params)?).await,
            "search_places" => self.search_places(parse(params)?).await,
            "search_shopping" => self.search_shopping(parse(params)?).await,
            "search_scholar" => self.search_scholar(parse(params)?).await,
            "search_patent" => self.search_patent(parse(params)?).await,
            "search_autocomplete" => self.search_autocomplete(parse(params)?).await,
            "extract_structured" => self.extract_structured(parse(params)?).await,
            "quick_fact" => self.quick_fact(parse(params)?).await,
            "get_metrics" => self.get_metrics().await,
            _ => return Err(EmbeddableError::ToolNotFound(name.to_string())),
        };
        result.map_err(Into::into)
    }
}
