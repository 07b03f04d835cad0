//! Request payloads and response types for the Serper API
//!
//! Payload structs serialize exactly the fields the caller supplied: optional
//! fields that are `None` never appear on the wire. A response keeps the
//! upstream object as-is; the few sections this crate reads are parsed on
//! demand into typed views.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Upstream endpoints, rendered as the final path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    News,
    Images,
    Videos,
    Places,
    Shopping,
    Scholar,
    Patent,
    Autocomplete,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::News => "news",
            Endpoint::Images => "images",
            Endpoint::Videos => "videos",
            Endpoint::Places => "places",
            Endpoint::Shopping => "shopping",
            Endpoint::Scholar => "scholar",
            Endpoint::Patent => "patent",
            Endpoint::Autocomplete => "autocomplete",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request Payloads
// ============================================================================

/// Payload for the `search` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebSearchPayload {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    pub num: u32,
    pub page: u32,
    pub autocorrect: bool,
}

/// Payload for the `news` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsSearchPayload {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hl: Option<String>,
    pub num: u32,
}

/// Query plus result count (images, videos, and the quick-fact lookup)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountedQueryPayload {
    pub q: String,
    pub num: u32,
}

/// Bare query (places, shopping, scholar, patent, autocomplete, structured extraction)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPayload {
    pub q: String,
}

impl QueryPayload {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into() }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// A decoded Serper response
///
/// Holds the upstream JSON object untouched apart from `latency_seconds`.
/// The sections this crate reads are exposed through lenient typed views:
/// a section of an unexpected shape reads as absent instead of failing the
/// whole decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResponse(Map<String, Value>);

impl SearchResponse {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Record the wall-clock seconds spent on the upstream exchange
    pub fn set_latency(&mut self, seconds: f64) {
        self.0.insert("latency_seconds".to_string(), Value::from(seconds));
    }

    pub fn latency_seconds(&self) -> Option<f64> {
        self.0.get("latency_seconds").and_then(Value::as_f64)
    }

    pub fn answer_box(&self) -> Option<AnswerBox> {
        self.section("answerBox")
    }

    pub fn knowledge_graph(&self) -> Option<KnowledgeGraph> {
        self.section("knowledgeGraph")
    }

    /// First entry of `organic`, if the list has one
    ///
    /// An entry that is not an object still counts; its fields read as absent.
    pub fn first_organic(&self) -> Option<OrganicResult> {
        self.0
            .get("organic")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .map(|first| serde_json::from_value(first.clone()).unwrap_or_default())
    }

    fn section<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Featured answer box
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerBox {
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub source: Option<Value>,
}

/// Knowledge panel
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub website: Option<Value>,
}

/// One organic result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub snippet: Option<Value>,
    #[serde(default)]
    pub link: Option<Value>,
}

/// Output of `extract_structured`; absent sections default to empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredExtract {
    #[serde(rename = "knowledgeGraph")]
    pub knowledge_graph: Value,
    #[serde(rename = "peopleAlsoAsk")]
    pub people_also_ask: Value,
    #[serde(rename = "relatedSearches")]
    pub related_searches: Value,
    pub organic: Value,
}

impl From<SearchResponse> for StructuredExtract {
    fn from(response: SearchResponse) -> Self {
        let mut fields = response.into_inner();
        let mut take = |key: &str, empty: Value| match fields.remove(key) {
            Some(Value::Null) | None => empty,
            Some(v) => v,
        };

        Self {
            knowledge_graph: take("knowledgeGraph", Value::Object(Map::new())),
            people_also_ask: take("peopleAlsoAsk", Value::Array(Vec::new())),
            related_searches: take("relatedSearches", Value::Array(Vec::new())),
            organic: take("organic", Value::Array(Vec::new())),
        }
    }
}

/// Output of `get_metrics`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub total_searches: u64,
}
