use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("unknown location `{0}`")]
    UnknownLocation(String),
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
    #[error("unknown item `{0}`")]
    UnknownItem(String),
    #[error("duplicate id `{0}`")]
    DuplicateId(String),
    #[error("item `{item}` names location `{location}` but its unit belongs to `{expected}`")]
    UnitLocationMismatch {
        item: String,
        location: String,
        expected: String,
    },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("inconsistent snapshot: {0}")]
    Inventory(#[from] InventoryError),
}
