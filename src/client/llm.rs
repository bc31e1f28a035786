// Resolves a free-text chore description to a chore id with a hosted
// instruction-tuned model.
//
// Every failure on this path (transport, timeout, non-200, unexpected reply
// shape, empty reply) is reported as "no match". Acceptance is a substring
// check of each incomplete chore id against the first token of the reply,
// so an id embedded in a longer token is accepted as well.
use crate::config::Config;
use crate::model::Chore;
use crate::model::matcher::incomplete;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const INST_OPEN: &str = "<s>[INST]";
const INST_CLOSE: &str = "[/INST]";

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
}

#[derive(Clone, Debug)]
pub struct LlmMatcher {
    http: Client,
    url: String,
    token: String,
    parameters: GenerationParameters,
    timeout: Duration,
}

impl LlmMatcher {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build inference HTTP client")?;
        Ok(Self {
            http,
            url: config.llm_url.clone(),
            token: config.hf_token.clone(),
            parameters: GenerationParameters {
                max_new_tokens: config.llm_max_new_tokens,
                temperature: config.llm_temperature,
            },
            timeout: config.llm_timeout(),
        })
    }

    /// Ask the model which incomplete chore `chore_query` refers to.
    pub async fn match_chore(&self, chore_query: &str, chores: &[Chore]) -> Option<String> {
        let candidates = incomplete(chores);
        let prompt = build_prompt(chore_query, &candidates);
        let reply = self.generate(&prompt).await?;
        let matched = pick_match(&reply, &candidates).map(|c| c.id.clone());
        match &matched {
            Some(id) => log::debug!("Model reply {:?} matched chore {}", reply, id),
            None => log::debug!("Model reply {:?} matched no chore", reply),
        }
        matched
    }

    /// Run one inference call and return the continuation after the
    /// instruction marker, or `None` on any failure.
    async fn generate(&self, prompt: &str) -> Option<String> {
        let body = InferenceRequest {
            inputs: format!("{} {} {}", INST_OPEN, prompt, INST_CLOSE),
            parameters: self.parameters,
        };

        let resp = match self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("Inference request failed: {}", e);
                return None;
            }
        };

        if resp.status() != StatusCode::OK {
            log::warn!("Inference endpoint returned {}", resp.status());
            return None;
        }

        let value: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Inference reply was not JSON: {}", e);
                return None;
            }
        };

        extract_generated_text(&value)
    }
}

/// Builds the instruction sent to the model. Only incomplete chores are listed.
pub fn build_prompt(chore_query: &str, candidates: &[&Chore]) -> String {
    let chores_text = candidates
        .iter()
        .map(|c| format!("ID:{} Name:{} Person:{}", c.id, c.name, c.assigned_to))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Match this request to a chore ID.\n\n\
         Request: \"{}\"\n\n\
         Chores:\n{}\n\n\
         Reply with ONLY the matching ID, nothing else. If no match, reply NONE.",
        chore_query, chores_text
    )
}

/// Pulls the continuation out of a `[{"generated_text": ...}]` reply.
///
/// Text after the last `[/INST]` is kept (trimmed); a reply without the marker
/// is returned as is. Empty text and any other shape yield `None`.
pub fn extract_generated_text(value: &Value) -> Option<String> {
    let first = value.as_array()?.first()?;
    let text = first.get("generated_text")?.as_str()?;

    let text = match text.rsplit_once(INST_CLOSE) {
        Some((_, after)) => after.trim(),
        None => text,
    };

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// First chore whose id occurs inside the first token of the reply. A chore
/// without an id can never be matched.
pub fn pick_match<'a>(reply: &str, candidates: &[&'a Chore]) -> Option<&'a Chore> {
    let token = reply.split_whitespace().next()?;
    candidates
        .iter()
        .copied()
        .find(|c| !c.id.is_empty() && token.contains(c.id.as_str()))
}
