use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a tracked item.
///
/// Values that do not match one of the four known states are kept verbatim in
/// [`ItemStatus::Other`] so that snapshots written by newer tools still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    Available,
    InUse,
    Maintenance,
    Unavailable,
    Other(String),
}

impl ItemStatus {
    pub const KNOWN: [ItemStatus; 4] = [
        ItemStatus::Available,
        ItemStatus::InUse,
        ItemStatus::Maintenance,
        ItemStatus::Unavailable,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "available" | "disponivel" | "disponível" => ItemStatus::Available,
            "in-use" | "in_use" | "em-uso" => ItemStatus::InUse,
            "maintenance" | "manutencao" | "manutenção" => ItemStatus::Maintenance,
            "unavailable" | "indisponivel" | "indisponível" => ItemStatus::Unavailable,
            _ => ItemStatus::Other(value.to_string()),
        }
    }

    /// Wire name, as written to snapshots.
    pub fn as_str(&self) -> &str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::InUse => "in-use",
            ItemStatus::Maintenance => "maintenance",
            ItemStatus::Unavailable => "unavailable",
            ItemStatus::Other(value) => value,
        }
    }

    /// Human readable name for badges and reports.
    pub fn label(&self) -> &str {
        match self {
            ItemStatus::Available => "Available",
            ItemStatus::InUse => "In use",
            ItemStatus::Maintenance => "Maintenance",
            ItemStatus::Unavailable => "Unavailable",
            ItemStatus::Other(value) => value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ItemStatus::Other(_))
    }
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::Available
    }
}

impl From<&str> for ItemStatus {
    fn from(value: &str) -> Self {
        ItemStatus::parse(value)
    }
}

impl From<String> for ItemStatus {
    fn from(value: String) -> Self {
        ItemStatus::parse(&value)
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level site. Root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Sub-location inside exactly one [`Location`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "localidadeId")]
    pub location_id: String,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Unit {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            location_id: location_id.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Tracked asset stored in exactly one [`Unit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default, alias = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(alias = "unidadeId")]
    pub unit_id: String,
    #[serde(alias = "localidadeId")]
    pub location_id: String,
    #[serde(default, alias = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_id: impl Into<String>,
        location_id: impl Into<String>,
        status: ItemStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status,
            unit_id: unit_id.into(),
            location_id: location_id.into(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
