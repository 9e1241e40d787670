use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::entity::{Item, ItemStatus, Location, Unit};
use crate::error::InventoryError;

/// The inventory shared by every screen.
///
/// Collections keep insertion order, which is the order the map lays them out
/// in. Identifiers are unique across all three collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    locations: Vec<Location>,
    units: Vec<Unit>,
    items: Vec<Item>,
}

/// Fresh identifier for a new entity.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.units.is_empty() && self.items.is_empty()
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn units_of<'a>(&'a self, location_id: &'a str) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units.iter().filter(move |u| u.location_id == location_id)
    }

    pub fn items_of_unit<'a>(&'a self, unit_id: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |i| i.unit_id == unit_id)
    }

    pub fn items_of_location<'a>(
        &'a self,
        location_id: &'a str,
    ) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |i| i.location_id == location_id)
    }

    fn contains_id(&self, id: &str) -> bool {
        self.location(id).is_some() || self.unit(id).is_some() || self.item(id).is_some()
    }

    /// Register a new location and return its generated id.
    pub fn add_location(&mut self, name: impl Into<String>, description: Option<String>) -> String {
        let mut location = Location::new(new_id(), name);
        location.description = description;
        let id = location.id.clone();
        debug!(id = %id, name = %location.name, "adding location");
        self.locations.push(location);
        id
    }

    pub fn add_unit(
        &mut self,
        location_id: &str,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<String, InventoryError> {
        if self.location(location_id).is_none() {
            return Err(InventoryError::UnknownLocation(location_id.to_string()));
        }
        let mut unit = Unit::new(new_id(), name, location_id);
        unit.description = description;
        let id = unit.id.clone();
        debug!(id = %id, location = location_id, "adding unit");
        self.units.push(unit);
        Ok(id)
    }

    /// Register a new item in `unit_id`. The item's location is taken from
    /// the unit.
    pub fn add_item(
        &mut self,
        unit_id: &str,
        name: impl Into<String>,
        status: ItemStatus,
        description: Option<String>,
    ) -> Result<String, InventoryError> {
        let location_id = self
            .unit(unit_id)
            .map(|u| u.location_id.clone())
            .ok_or_else(|| InventoryError::UnknownUnit(unit_id.to_string()))?;
        let mut item = Item::new(new_id(), name, unit_id, location_id, status);
        item.description = description;
        let id = item.id.clone();
        debug!(id = %id, unit = unit_id, status = %item.status, "adding item");
        self.items.push(item);
        Ok(id)
    }

    /// Insert a location that already carries an id, e.g. from a snapshot.
    pub fn insert_location(&mut self, location: Location) -> Result<(), InventoryError> {
        if self.contains_id(&location.id) {
            return Err(InventoryError::DuplicateId(location.id));
        }
        self.locations.push(location);
        Ok(())
    }

    pub fn insert_unit(&mut self, unit: Unit) -> Result<(), InventoryError> {
        if self.contains_id(&unit.id) {
            return Err(InventoryError::DuplicateId(unit.id));
        }
        if self.location(&unit.location_id).is_none() {
            return Err(InventoryError::UnknownLocation(unit.location_id));
        }
        self.units.push(unit);
        Ok(())
    }

    pub fn insert_item(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.contains_id(&item.id) {
            return Err(InventoryError::DuplicateId(item.id));
        }
        let unit = self
            .unit(&item.unit_id)
            .ok_or_else(|| InventoryError::UnknownUnit(item.unit_id.clone()))?;
        if unit.location_id != item.location_id {
            return Err(InventoryError::UnitLocationMismatch {
                item: item.id,
                location: item.location_id,
                expected: unit.location_id.clone(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn update_item_status(
        &mut self,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<(), InventoryError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| InventoryError::UnknownItem(item_id.to_string()))?;
        debug!(id = item_id, from = %item.status, to = %status, "updating item status");
        item.status = status;
        item.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a location together with its units and their items.
    pub fn delete_location(&mut self, id: &str) -> bool {
        let before = self.locations.len();
        self.locations.retain(|l| l.id != id);
        if self.locations.len() == before {
            return false;
        }
        self.units.retain(|u| u.location_id != id);
        self.items.retain(|i| i.location_id != id);
        debug!(id, "deleted location");
        true
    }

    /// Remove a unit together with its items.
    pub fn delete_unit(&mut self, id: &str) -> bool {
        let before = self.units.len();
        self.units.retain(|u| u.id != id);
        if self.units.len() == before {
            return false;
        }
        self.items.retain(|i| i.unit_id != id);
        debug!(id, "deleted unit");
        true
    }

    pub fn delete_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Inventory, String, String, String) {
        let mut inventory = Inventory::new();
        let location = inventory.add_location("Warehouse", None);
        let unit = inventory.add_unit(&location, "Shelf A", None).unwrap();
        let item = inventory
            .add_item(&unit, "Drill", ItemStatus::Available, None)
            .unwrap();
        (inventory, location, unit, item)
    }

    #[test]
    fn test_add_item_inherits_unit_location() {
        let (inventory, location, unit, item) = sample();
        let item = inventory.item(&item).unwrap();
        assert_eq!(item.unit_id, unit);
        assert_eq!(item.location_id, location);
    }

    #[test]
    fn test_add_unit_rejects_unknown_location() {
        let mut inventory = Inventory::new();
        let err = inventory.add_unit("nowhere", "Shelf", None).unwrap_err();
        assert_eq!(err, InventoryError::UnknownLocation("nowhere".to_string()));
    }

    #[test]
    fn test_update_status_bumps_timestamp() {
        let (mut inventory, _, _, item) = sample();
        let before = inventory.item(&item).unwrap().updated_at;
        inventory
            .update_item_status(&item, ItemStatus::Maintenance)
            .unwrap();
        let updated = inventory.item(&item).unwrap();
        assert_eq!(updated.status, ItemStatus::Maintenance);
        assert!(updated.updated_at >= before);

        assert!(matches!(
            inventory.update_item_status("missing", ItemStatus::InUse),
            Err(InventoryError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_delete_location_cascades() {
        let (mut inventory, location, _, _) = sample();
        let other = inventory.add_location("Office", None);
        let other_unit = inventory.add_unit(&other, "Desk", None).unwrap();
        inventory
            .add_item(&other_unit, "Monitor", ItemStatus::InUse, None)
            .unwrap();

        assert!(inventory.delete_location(&location));
        assert_eq!(inventory.locations().len(), 1);
        assert_eq!(inventory.units().len(), 1);
        assert_eq!(inventory.items().len(), 1);
        assert_eq!(inventory.items()[0].name, "Monitor");
        assert!(!inventory.delete_location(&location));
    }

    #[test]
    fn test_delete_unit_cascades() {
        let (mut inventory, location, unit, _) = sample();
        assert!(inventory.delete_unit(&unit));
        assert!(inventory.items().is_empty());
        assert!(inventory.location(&location).is_some());
    }

    #[test]
    fn test_insert_rejects_duplicates_across_kinds() {
        let mut inventory = Inventory::new();
        inventory
            .insert_location(Location::new("x", "Warehouse"))
            .unwrap();
        let err = inventory.insert_unit(Unit::new("x", "Shelf", "x")).unwrap_err();
        assert_eq!(err, InventoryError::DuplicateId("x".to_string()));
    }

    #[test]
    fn test_insert_item_checks_location_consistency() {
        let mut inventory = Inventory::new();
        inventory.insert_location(Location::new("l1", "A")).unwrap();
        inventory.insert_location(Location::new("l2", "B")).unwrap();
        inventory.insert_unit(Unit::new("u1", "Shelf", "l1")).unwrap();
        let err = inventory
            .insert_item(Item::new("i1", "Drill", "u1", "l2", ItemStatus::Available))
            .unwrap_err();
        assert!(matches!(err, InventoryError::UnitLocationMismatch { .. }));
    }
}
