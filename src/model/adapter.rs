// File: src/model/adapter.rs
//! Flattens the JSON:API chores payload into `Chore` records.
//!
//! The payload carries the chores in `data` and a side list of related
//! resources in `included`. Only `category` resources are used; their labels
//! become the assignee of every chore that links to them.
use crate::model::item::{Chore, ChoreStatus, UNASSIGNED};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoresPayload {
    #[serde(default)]
    pub data: Vec<ChoreResource>,
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoreResource {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub attributes: ChoreAttributes,
    #[serde(default)]
    pub relationships: ChoreRelationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoreAttributes {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoreRelationships {
    #[serde(default)]
    pub category: Option<RelationshipLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelationshipLink {
    #[serde(default)]
    pub data: Option<ResourceRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncludedResource {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub attributes: IncludedAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludedAttributes {
    #[serde(default)]
    pub label: Option<String>,
}

/// JSON:API ids are strings, but some endpoints emit bare numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

impl ChoresPayload {
    /// Category id -> label, built from the `included` side list.
    pub fn category_labels(&self) -> HashMap<&str, &str> {
        self.included
            .iter()
            .filter(|item| item.kind == "category")
            .map(|item| {
                let label = item.attributes.label.as_deref().unwrap_or(UNKNOWN_LABEL);
                (item.id.as_str(), label)
            })
            .collect()
    }

    pub fn into_chores(self) -> Vec<Chore> {
        let labels = self.category_labels();
        self.data
            .iter()
            .map(|resource| resource.to_chore(&labels))
            .collect()
    }
}

impl ChoreResource {
    fn category_id(&self) -> Option<&str> {
        self.relationships
            .category
            .as_ref()
            .and_then(|link| link.data.as_ref())
            .map(|r| r.id.as_str())
    }

    fn to_chore(&self, labels: &HashMap<&str, &str>) -> Chore {
        let assigned_to = self
            .category_id()
            .and_then(|id| labels.get(id))
            .copied()
            .unwrap_or(UNASSIGNED);

        let hour = self
            .attributes
            .scheduled_at
            .as_deref()
            .and_then(parse_scheduled_hour);

        Chore {
            id: self.id.clone(),
            name: self.attributes.summary.clone().unwrap_or_default(),
            assigned_to: assigned_to.to_string(),
            status: ChoreStatus::from(self.attributes.status.as_deref().unwrap_or_default()),
            hour,
        }
    }
}

/// Extracts the hour of day from an ISO-8601 timestamp.
///
/// Offsets are respected as written: `2025-01-01T08:30:00-05:00` yields 8.
/// A bare date yields 0. Anything unparseable yields `None`.
pub fn parse_scheduled_hour(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.hour());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.hour());
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.hour());
        }
    }

    if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
        return Some(0);
    }

    None
}
