//! KDL inventory descriptions.
//!
//! ```kdl
//! location "Central Warehouse" id="loc-1" description="Main building" {
//!     unit "Shelf A" {
//!         item "Drill" status="in-use" notes="Battery swapped"
//!     }
//! }
//! ```
//!
//! `id` is optional on every node; missing ids are generated.

use anyhow::{Context, Result, anyhow};
use inventory_model::{Inventory, Item, ItemStatus, Location, Unit, new_id};
use kdl::{KdlDocument, KdlNode};
use tracing::warn;

/// Parse a KDL description into a fresh inventory.
pub fn parse_inventory(content: &str) -> Result<Inventory> {
    let doc: KdlDocument = content.parse().context("invalid KDL document")?;
    let mut inventory = Inventory::new();

    for node in doc.nodes() {
        match node.name().value() {
            "location" => add_location(&mut inventory, node)?,
            other => warn!(node = other, "ignoring unknown top-level node"),
        }
    }

    Ok(inventory)
}

fn add_location(inventory: &mut Inventory, node: &KdlNode) -> Result<()> {
    let name = name_of(node)?;
    let mut location = Location::new(id_of(node), name);
    location.description = property(node, "description");
    let id = location.id.clone();
    inventory.insert_location(location)?;

    for child in children(node) {
        match child.name().value() {
            "unit" => add_unit(inventory, &id, child)
                .with_context(|| format!("in location `{name}`"))?,
            other => warn!(node = other, location = name, "ignoring unknown node"),
        }
    }
    Ok(())
}

fn add_unit(inventory: &mut Inventory, location_id: &str, node: &KdlNode) -> Result<()> {
    let name = name_of(node)?;
    let mut unit = Unit::new(id_of(node), name, location_id);
    unit.description = property(node, "description");
    let id = unit.id.clone();
    inventory.insert_unit(unit)?;

    for child in children(node) {
        match child.name().value() {
            "item" => add_item(inventory, location_id, &id, child)
                .with_context(|| format!("in unit `{name}`"))?,
            other => warn!(node = other, unit = name, "ignoring unknown node"),
        }
    }
    Ok(())
}

fn add_item(
    inventory: &mut Inventory,
    location_id: &str,
    unit_id: &str,
    node: &KdlNode,
) -> Result<()> {
    let status = property(node, "status")
        .map(ItemStatus::from)
        .unwrap_or_default();
    let mut item = Item::new(id_of(node), name_of(node)?, unit_id, location_id, status);
    item.description = property(node, "description");
    item.notes = property(node, "notes");
    inventory.insert_item(item)?;
    Ok(())
}

/// The first positional argument.
fn name_of(node: &KdlNode) -> Result<&str> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .ok_or_else(|| anyhow!("`{}` node without a name", node.name().value()))
}

fn property(node: &KdlNode, key: &str) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_some_and(|n| n.value() == key))
        .and_then(|e| e.value().as_string())
        .map(str::to_string)
}

fn id_of(node: &KdlNode) -> String {
    property(node, "id").unwrap_or_else(new_id)
}

fn children(node: &KdlNode) -> impl Iterator<Item = &KdlNode> {
    node.children().into_iter().flat_map(|doc| doc.nodes())
}
