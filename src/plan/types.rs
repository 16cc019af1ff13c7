//! Task and spec input shapes
//!
//! Both arrive from external integrations (tracker exports, spec parsers) as
//! JSON. Deserialization is lenient about nulls and numeric ids.

use serde::{Deserialize, Deserializer, Serialize};

/// A unit of planned work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, alias = "subject", deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    /// Tasks that cannot start until this one is done
    #[serde(default, deserialize_with = "nullable")]
    pub blocks: Vec<String>,
    /// Tasks that must finish before this one can start
    #[serde(
        default,
        rename = "blockedBy",
        alias = "blocked_by",
        deserialize_with = "nullable"
    )]
    pub blocked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_blocks(mut self, ids: &[&str]) -> Self {
        self.blocks = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_blocked_by(mut self, ids: &[&str]) -> Self {
        self.blocked_by = ids.iter().map(|id| id.to_string()).collect();
        self
    }
}

/// A requirement that tasks are expected to implement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub file: String,
}

impl Spec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            file: String::new(),
        }
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
