//! Response and request bodies for the LinkedIn endpoints we call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /me` projected to id and localized name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: String,
    #[serde(default)]
    pub localized_first_name: String,
    #[serde(default)]
    pub localized_last_name: String,
}

impl MeResponse {
    #[must_use]
    pub fn urn(&self) -> String {
        format!("urn:li:person:{}", self.id)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        join_name(&self.localized_first_name, &self.localized_last_name)
    }
}

/// `GET /people/{id}` projected to the localized name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default)]
    pub localized_first_name: String,
    #[serde(default)]
    pub localized_last_name: String,
}

impl PersonName {
    #[must_use]
    pub fn display_name(&self) -> String {
        join_name(&self.localized_first_name, &self.localized_last_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditStamp {
    /// Epoch milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchPost {
    /// Activity URN, the reaction target.
    pub id: String,
    /// Person URN of the author.
    pub author: String,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub created: AuditStamp,
}

impl SearchPost {
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.time.and_then(DateTime::from_timestamp_millis)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub elements: Vec<SearchPost>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReactionRequest<'a> {
    pub actor: &'a str,
    pub object: &'a str,
    #[serde(rename = "type")]
    pub reaction_type: &'static str,
}

fn join_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_owned()
}
