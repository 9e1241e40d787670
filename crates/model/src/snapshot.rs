use serde::{Deserialize, Serialize};

use crate::entity::{Item, Location, Unit};
use crate::error::SnapshotError;
use crate::store::Inventory;

/// Serialized form of an [`Inventory`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, alias = "localidades")]
    pub locations: Vec<Location>,
    #[serde(default, alias = "unidades")]
    pub units: Vec<Unit>,
    #[serde(default, alias = "itens")]
    pub items: Vec<Item>,
}

impl Inventory {
    /// Rebuild an inventory, checking every parent reference on the way in.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut inventory = Inventory::new();
        for location in snapshot.locations {
            inventory.insert_location(location)?;
        }
        for unit in snapshot.units {
            inventory.insert_unit(unit)?;
        }
        for item in snapshot.items {
            inventory.insert_item(item)?;
        }
        Ok(inventory)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            locations: self.locations().to_vec(),
            units: self.units().to_vec(),
            items: self.items().to_vec(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn to_json_string(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }
}
