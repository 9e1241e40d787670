use serde::Serialize;
use std::collections::BTreeMap;

use crate::entity::ItemStatus;
use crate::store::Inventory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    pub units: usize,
    pub items: usize,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentItem {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub status: ItemStatus,
}

/// Number of items listed in [`InventorySummary::recent_items`].
pub const RECENT_ITEMS: usize = 5;

/// Numeric overview of an inventory. Every item is counted, including the
/// ones the map does not draw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub total_locations: usize,
    pub total_units: usize,
    pub total_items: usize,
    pub items_by_status: BTreeMap<String, usize>,
    pub locations: Vec<LocationSummary>,
    pub units: Vec<UnitSummary>,
    /// Locations whose aggregate status is maintenance.
    pub locations_in_maintenance: usize,
    /// Id of the location holding the most items; ties go to the first one
    /// registered.
    pub hub: Option<String>,
    /// Last registered items, newest first.
    pub recent_items: Vec<RecentItem>,
}

impl InventorySummary {
    pub fn count(&self, status: &ItemStatus) -> usize {
        self.items_by_status
            .get(status.as_str())
            .copied()
            .unwrap_or(0)
    }
}

impl Inventory {
    /// Worst item status at a location: maintenance beats unavailable, and
    /// anything else (including no items) reads as available.
    pub fn location_status(&self, location_id: &str) -> ItemStatus {
        let mut status = ItemStatus::Available;
        for item in self.items_of_location(location_id) {
            match item.status {
                ItemStatus::Maintenance => return ItemStatus::Maintenance,
                ItemStatus::Unavailable => status = ItemStatus::Unavailable,
                _ => {}
            }
        }
        status
    }

    pub fn summary(&self) -> InventorySummary {
        let mut items_by_status = BTreeMap::new();
        for item in self.items() {
            *items_by_status
                .entry(item.status.as_str().to_string())
                .or_insert(0) += 1;
        }

        let locations = self
            .locations()
            .iter()
            .map(|l| LocationSummary {
                id: l.id.clone(),
                name: l.name.clone(),
                units: self.units_of(&l.id).count(),
                items: self.items_of_location(&l.id).count(),
                status: self.location_status(&l.id),
            })
            .collect::<Vec<_>>();

        let locations_in_maintenance = locations
            .iter()
            .filter(|l| l.status == ItemStatus::Maintenance)
            .count();
        let hub = locations
            .iter()
            .fold(None::<&LocationSummary>, |best, l| match best {
                Some(b) if l.items <= b.items => Some(b),
                _ => Some(l),
            })
            .map(|l| l.id.clone());

        let recent_items = self
            .items()
            .iter()
            .rev()
            .take(RECENT_ITEMS)
            .map(|i| RecentItem {
                id: i.id.clone(),
                name: i.name.clone(),
                location: self.location(&i.location_id).map(|l| l.name.clone()),
                status: i.status.clone(),
            })
            .collect();

        let units = self
            .units()
            .iter()
            .map(|u| UnitSummary {
                id: u.id.clone(),
                name: u.name.clone(),
                location: self.location(&u.location_id).map(|l| l.name.clone()),
                items: self.items_of_unit(&u.id).count(),
            })
            .collect();

        InventorySummary {
            total_locations: self.locations().len(),
            total_units: self.units().len(),
            total_items: self.items().len(),
            items_by_status,
            locations,
            units,
            locations_in_maintenance,
            hub,
            recent_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_every_item() {
        let mut inventory = Inventory::new();
        let location = inventory.add_location("Warehouse", None);
        let unit = inventory.add_unit(&location, "Shelf", None).unwrap();
        for n in 0..5 {
            let status = if n % 2 == 0 {
                ItemStatus::Available
            } else {
                ItemStatus::Maintenance
            };
            inventory
                .add_item(&unit, format!("item-{n}"), status, None)
                .unwrap();
        }

        let summary = inventory.summary();
        assert_eq!(summary.total_items, 5);
        assert_eq!(summary.count(&ItemStatus::Available), 3);
        assert_eq!(summary.count(&ItemStatus::Maintenance), 2);
        assert_eq!(summary.count(&ItemStatus::InUse), 0);
        assert_eq!(summary.locations[0].units, 1);
        assert_eq!(summary.locations[0].items, 5);
        assert_eq!(summary.units[0].location.as_deref(), Some("Warehouse"));
    }

    #[test]
    fn test_location_status_takes_the_worst_item() {
        let mut inventory = Inventory::new();
        let quiet = inventory.add_location("Quiet", None);
        let broken = inventory.add_location("Broken", None);
        let mixed = inventory.add_location("Mixed", None);
        let empty = inventory.add_location("Empty", None);
        for (location, statuses) in [
            (&quiet, vec![ItemStatus::Available, ItemStatus::InUse]),
            (&broken, vec![ItemStatus::Unavailable, ItemStatus::Available]),
            (
                &mixed,
                vec![ItemStatus::Unavailable, ItemStatus::Maintenance],
            ),
        ] {
            let unit = inventory.add_unit(location, "Shelf", None).unwrap();
            for status in statuses {
                inventory.add_item(&unit, "thing", status, None).unwrap();
            }
        }

        assert_eq!(inventory.location_status(&quiet), ItemStatus::Available);
        assert_eq!(inventory.location_status(&broken), ItemStatus::Unavailable);
        assert_eq!(inventory.location_status(&mixed), ItemStatus::Maintenance);
        assert_eq!(inventory.location_status(&empty), ItemStatus::Available);

        let summary = inventory.summary();
        assert_eq!(summary.locations_in_maintenance, 1);
        assert_eq!(summary.locations[2].status, ItemStatus::Maintenance);
    }

    #[test]
    fn test_hub_is_the_first_location_with_most_items() {
        let mut inventory = Inventory::new();
        let first = inventory.add_location("First", None);
        let second = inventory.add_location("Second", None);
        let third = inventory.add_location("Third", None);
        assert_eq!(inventory.summary().hub.as_deref(), Some(first.as_str()));

        for (location, count) in [(&second, 2), (&third, 2)] {
            let unit = inventory.add_unit(location, "Shelf", None).unwrap();
            for _ in 0..count {
                inventory
                    .add_item(&unit, "thing", ItemStatus::Available, None)
                    .unwrap();
            }
        }
        assert_eq!(inventory.summary().hub.as_deref(), Some(second.as_str()));
    }

    #[test]
    fn test_recent_items_are_newest_first() {
        let mut inventory = Inventory::new();
        let location = inventory.add_location("Depot", None);
        let unit = inventory.add_unit(&location, "Rack", None).unwrap();
        for n in 0..7 {
            inventory
                .add_item(&unit, format!("item-{n}"), ItemStatus::InUse, None)
                .unwrap();
        }

        let recent = inventory.summary().recent_items;
        let names: Vec<&str> = recent.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["item-6", "item-5", "item-4", "item-3", "item-2"]);
        assert_eq!(recent[0].location.as_deref(), Some("Depot"));
        assert_eq!(recent[0].status, ItemStatus::InUse);
    }

    #[test]
    fn test_empty_summary() {
        let summary = Inventory::new().summary();
        assert_eq!(summary, InventorySummary::default());
    }
}
