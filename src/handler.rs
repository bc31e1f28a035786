// File: ./src/handler.rs
//! Request dispatch for the voice-assistant webhook.
//!
//! A request is either a question about outstanding chores (`action: "query"`)
//! or a description of a chore to tick off (any other action, or none). Each
//! path runs its steps in order and stops at the first failure; there is no
//! partial success.
use crate::client::{LlmMatcher, SkylightClient, SkylightError};
use crate::config::Config;
use crate::model::matcher::incomplete;
use crate::model::{FamilyMember, Period, filter_chores, parse_query, speakable_summary};

use anyhow::Result;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

pub const NO_QUERY: &str = "No query specified";
pub const NO_CHORE: &str = "No chore specified";
pub const UNKNOWN_PERSON: &str = "Couldn't identify family member. Try: Miles morning tasks";
pub const NO_INCOMPLETE: &str = "No incomplete chores today";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to fetch chores")]
    UpstreamFetch(#[source] SkylightError),
    #[error("Failed to complete chore")]
    UpstreamWrite(#[source] SkylightError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamFetch(_) | ApiError::UpstreamWrite(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// An inbound request after lenient decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoreRequest {
    Query { query: String },
    Complete { chore: String },
}

impl ChoreRequest {
    /// Decode a raw body. Anything that is not a JSON object is treated as an
    /// empty object, which makes it a completion request with no chore.
    pub fn from_body(body: &[u8]) -> Self {
        let value = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        match value.get("action").and_then(Value::as_str) {
            Some("query") => ChoreRequest::Query {
                query: field("query"),
            },
            _ => ChoreRequest::Complete {
                chore: field("chore"),
            },
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ChoreRequest::Query { .. } => "query",
            ChoreRequest::Complete { .. } => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    pub person: FamilyMember,
    pub period: Option<Period>,
    pub count: usize,
    pub tasks: Vec<String>,
    pub speech: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteResponse {
    pub success: bool,
    pub chore: String,
    pub assigned_to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChoreResponse {
    Query(QueryResponse),
    Complete(CompleteResponse),
}

/// Holds the upstream clients for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct ChoreService {
    skylight: SkylightClient,
    llm: LlmMatcher,
}

impl ChoreService {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            skylight: SkylightClient::new(config)?,
            llm: LlmMatcher::new(config)?,
        })
    }

    pub async fn handle(&self, request: ChoreRequest) -> Result<ChoreResponse, ApiError> {
        log::info!("Handling {} request", request.action());
        let result = match &request {
            ChoreRequest::Query { query } => self.answer_query(query).await.map(ChoreResponse::Query),
            ChoreRequest::Complete { chore } => {
                self.complete_chore(chore).await.map(ChoreResponse::Complete)
            }
        };
        if let Err(e) = &result {
            match e {
                ApiError::UpstreamFetch(source) | ApiError::UpstreamWrite(source) => {
                    log::warn!("{} request failed: {}: {}", request.action(), e, source)
                }
                _ => log::info!("{} request rejected: {}", request.action(), e),
            }
        }
        result
    }

    /// Fetch, parse, filter, then summarize.
    pub async fn answer_query(&self, query: &str) -> Result<QueryResponse, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::Validation(NO_QUERY.to_string()));
        }

        let chores = self
            .skylight
            .get_todays_chores()
            .await
            .map_err(ApiError::UpstreamFetch)?;

        let parsed = parse_query(query);
        let Some(person) = parsed.person else {
            return Err(ApiError::Validation(UNKNOWN_PERSON.to_string()));
        };

        let filtered = filter_chores(&chores, Some(person), parsed.period);
        let speech = speakable_summary(&filtered, Some(person), parsed.period);

        Ok(QueryResponse {
            success: true,
            person,
            period: parsed.period,
            count: filtered.len(),
            tasks: filtered.into_iter().map(|c| c.name).collect(),
            speech,
        })
    }

    /// Fetch, ask the model which chore is meant, then mark it complete.
    pub async fn complete_chore(&self, chore_query: &str) -> Result<CompleteResponse, ApiError> {
        let chore_query = chore_query.trim();
        if chore_query.is_empty() {
            return Err(ApiError::Validation(NO_CHORE.to_string()));
        }

        let chores = self
            .skylight
            .get_todays_chores()
            .await
            .map_err(ApiError::UpstreamFetch)?;

        if incomplete(&chores).is_empty() {
            return Err(ApiError::NotFound(NO_INCOMPLETE.to_string()));
        }

        let Some(matched_id) = self.llm.match_chore(chore_query, &chores).await else {
            return Err(ApiError::NotFound(format!("No match for '{}'", chore_query)));
        };

        let matched = chores.iter().find(|c| c.id == matched_id);
        let chore = matched.map_or("Unknown", |c| c.name.as_str()).to_string();
        let assigned_to = matched.map_or("Unknown", |c| c.assigned_to.as_str()).to_string();

        self.skylight
            .complete_chore(&matched_id)
            .await
            .map_err(ApiError::UpstreamWrite)?;

        Ok(CompleteResponse {
            success: true,
            chore,
            assigned_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_decoding() {
        assert_eq!(
            ChoreRequest::from_body(br#"{"action": "query", "query": "  miles morning  "}"#),
            ChoreRequest::Query {
                query: "miles morning".to_string()
            }
        );
        assert_eq!(
            ChoreRequest::from_body(br#"{"chore": "dishes"}"#),
            ChoreRequest::Complete {
                chore: "dishes".to_string()
            }
        );
        assert_eq!(
            ChoreRequest::from_body(br#"{"action": "dance", "chore": "dishes"}"#),
            ChoreRequest::Complete {
                chore: "dishes".to_string()
            }
        );
    }

    #[test]
    fn test_request_decoding_is_lenient() {
        let empty = ChoreRequest::Complete {
            chore: String::new(),
        };
        assert_eq!(ChoreRequest::from_body(b"not json"), empty);
        assert_eq!(ChoreRequest::from_body(b""), empty);
        assert_eq!(ChoreRequest::from_body(b"[1, 2]"), empty);
        assert_eq!(ChoreRequest::from_body(br#"{"chore": 5}"#), empty);
        assert_eq!(
            ChoreRequest::from_body(br#"{"action": "query", "query": null}"#),
            ChoreRequest::Query {
                query: String::new()
            }
        );
    }

    #[test]
    fn test_error_mapping() {
        let e = ApiError::Validation(NO_QUERY.to_string());
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.body(), json!({"error": "No query specified"}));

        let e = ApiError::NotFound("No match for 'x'".to_string());
        assert_eq!(e.status(), StatusCode::NOT_FOUND);

        let e = ApiError::UpstreamFetch(SkylightError::Status(StatusCode::BAD_GATEWAY));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.body(), json!({"error": "Failed to fetch chores"}));

        let e = ApiError::UpstreamWrite(SkylightError::Status(StatusCode::CONFLICT));
        assert_eq!(e.body(), json!({"error": "Failed to complete chore"}));
    }

    #[test]
    fn test_query_response_shape() {
        let resp = ChoreResponse::Query(QueryResponse {
            success: true,
            person: FamilyMember::Miles,
            period: None,
            count: 0,
            tasks: vec![],
            speech: "Miles has no tasks left today.".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "success": true,
                "person": "miles",
                "period": null,
                "count": 0,
                "tasks": [],
                "speech": "Miles has no tasks left today."
            })
        );
    }
}
