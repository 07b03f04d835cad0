//! Best-effort answer lookup
//!
//! Runs a small web search and picks the first usable answer in this order:
//! featured answer box, knowledge panel, first organic result. Failures of
//! any kind are reported in-band as `{"error": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::gateway::SearchGateway;
use crate::types::{CountedQueryPayload, Endpoint, SearchResponse};

/// Result count used for the lookup search
pub const QUICK_FACT_RESULTS: u32 = 3;

const NOT_FOUND: &str = "No answer found in search results.";
const NO_SNIPPET: &str = "No answer found.";

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    FeaturedAnswer,
    KnowledgePanel,
    Organic,
}

/// Outcome of a quick-fact lookup
///
/// `answer` and `source` carry whatever JSON upstream put there, so a
/// numeric answer stays numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuickFact {
    Answer {
        answer: Value,
        source: Value,
        #[serde(rename = "type")]
        kind: AnswerKind,
    },
    Error {
        error: String,
    },
}

impl QuickFact {
    pub fn error(message: impl Into<String>) -> Self {
        QuickFact::Error {
            error: message.into(),
        }
    }
}

/// Pick the best answer out of a web-search response
pub fn pick_answer(response: &SearchResponse) -> QuickFact {
    if let Some(answer_box) = response.answer_box() {
        if let Some(answer) = usable(answer_box.answer) {
            return QuickFact::Answer {
                answer,
                source: answer_box
                    .source
                    .unwrap_or_else(|| Value::from("featured snippet")),
                kind: AnswerKind::FeaturedAnswer,
            };
        }
    }

    if let Some(panel) = response.knowledge_graph() {
        if let Some(description) = usable(panel.description) {
            return QuickFact::Answer {
                answer: description,
                source: panel
                    .website
                    .unwrap_or_else(|| Value::from("knowledge panel")),
                kind: AnswerKind::KnowledgePanel,
            };
        }
    }

    if let Some(first) = response.first_organic() {
        return QuickFact::Answer {
            answer: first.snippet.unwrap_or_else(|| Value::from(NO_SNIPPET)),
            source: first.link.unwrap_or(Value::Null),
            kind: AnswerKind::Organic,
        };
    }

    QuickFact::error(NOT_FOUND)
}

// Null and the empty string do not count as an answer
fn usable(field: Option<Value>) -> Option<Value> {
    field.filter(|v| v.as_str() != Some(""))
}

/// Look up a short answer for `query`
///
/// Never fails: transport and decode errors come back as [`QuickFact::Error`].
pub async fn quick_fact(gateway: &dyn SearchGateway, query: &str, timeout: Duration) -> QuickFact {
    let payload = CountedQueryPayload {
        q: query.to_string(),
        num: QUICK_FACT_RESULTS,
    };
    let payload = match serde_json::to_value(&payload) {
        Ok(p) => p,
        Err(e) => return QuickFact::error(e.to_string()),
    };

    match gateway.post(Endpoint::Search, payload, Some(timeout)).await {
        Ok(response) => pick_answer(&response),
        Err(e) => {
            tracing::warn!("quick_fact lookup for '{}' failed: {}", query, e);
            QuickFact::error(e.to_string())
        }
    }
}
