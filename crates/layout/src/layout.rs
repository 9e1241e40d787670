use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use inventory_model::{Inventory, Item, Location, Unit};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, warn};

use crate::types::*;

/// Output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Sites, each followed by its units, each followed by its drawn items.
    pub nodes: Vec<MapNode>,
    pub edges: Vec<MapEdge>,
    /// Items left out because their unit already had `item_cap` drawn.
    pub hidden_items: usize,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Box enclosing every node circle, `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for node in &self.nodes {
            bounds.min_x = bounds.min_x.min(node.position.x - node.radius);
            bounds.min_y = bounds.min_y.min(node.position.y - node.radius);
            bounds.max_x = bounds.max_x.max(node.position.x + node.radius);
            bounds.max_y = bounds.max_y.max(node.position.y + node.radius);
        }
        Some(bounds)
    }

    /// Child → parent graph over node indices.
    pub fn hierarchy(&self) -> DiGraph<usize, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let indices: Vec<NodeIndex> = (0..self.nodes.len()).map(|i| graph.add_node(i)).collect();
        for edge in &self.edges {
            graph.add_edge(indices[edge.child], indices[edge.parent], ());
        }
        graph
    }

    /// Number of drawn nodes hanging directly off `id`.
    pub fn children_of(&self, id: &str) -> usize {
        let Some(index) = self.index_of(id) else {
            return 0;
        };
        self.hierarchy()
            .neighbors_directed(NodeIndex::new(index), Direction::Incoming)
            .count()
    }
}

struct Placement<'a> {
    nodes: Vec<MapNode>,
    edges: Vec<MapEdge>,
    seen: HashSet<&'a str>,
}

impl<'a> Placement<'a> {
    fn push(
        &mut self,
        id: &'a str,
        kind: NodeKind,
        position: Position,
        radius: f64,
        data: NodeData,
        parent: Option<usize>,
    ) -> Option<usize> {
        if !self.seen.insert(id) {
            warn!(id, kind = kind.label(), "duplicate id, node skipped");
            return None;
        }
        let index = self.nodes.len();
        let connections = match parent {
            Some(p) => {
                self.edges.push(MapEdge {
                    child: index,
                    parent: p,
                });
                vec![self.nodes[p].id.clone()]
            }
            None => Vec::new(),
        };
        self.nodes.push(MapNode {
            id: id.to_string(),
            position,
            radius,
            kind,
            data,
            connections,
        });
        Some(index)
    }
}

impl RadialLayout {
    pub fn layout_inventory(&self, inventory: &Inventory) -> LayoutResult {
        self.layout(inventory.locations(), inventory.units(), inventory.items())
    }

    /// Place sites on the inner ring, each site's units in a fan on the middle
    /// ring and up to `item_cap` items per unit on the outer ring.
    ///
    /// Positions depend only on ordinal indices and sibling counts, so the same
    /// collections always give the same layout.
    pub fn layout(&self, locations: &[Location], units: &[Unit], items: &[Item]) -> LayoutResult {
        if locations.is_empty() {
            return LayoutResult::default();
        }

        let mut units_by_site: HashMap<&str, Vec<&Unit>> = HashMap::new();
        for unit in units {
            units_by_site
                .entry(unit.location_id.as_str())
                .or_default()
                .push(unit);
        }
        let mut items_by_unit: HashMap<&str, Vec<&Item>> = HashMap::new();
        for item in items {
            items_by_unit
                .entry(item.unit_id.as_str())
                .or_default()
                .push(item);
        }

        let mut placement = Placement {
            nodes: Vec::with_capacity(locations.len() + units.len()),
            edges: Vec::new(),
            seen: HashSet::new(),
        };
        let mut hidden_items = 0;

        // Repeated location ids must not claim a slot on the ring.
        let mut site_ids = HashSet::new();
        let sites: Vec<&Location> = locations
            .iter()
            .filter(|l| {
                let first = site_ids.insert(l.id.as_str());
                if !first {
                    warn!(id = %l.id, kind = NodeKind::Site.label(), "duplicate id, node skipped");
                }
                first
            })
            .collect();
        let site_count = sites.len();

        for (site_index, location) in sites.into_iter().enumerate() {
            let site_angle = if site_count <= 1 {
                0.0
            } else {
                TAU * site_index as f64 / site_count as f64
            };
            let Some(site) = placement.push(
                &location.id,
                NodeKind::Site,
                self.polar(site_angle, self.site_ring),
                self.site_radius,
                NodeData {
                    name: location.name.clone(),
                    description: location.description.clone(),
                    status: None,
                },
                None,
            ) else {
                continue;
            };

            let site_units = units_by_site
                .get(location.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let unit_count = site_units.len() as f64;

            for (unit_index, unit) in site_units.iter().enumerate() {
                let unit_angle =
                    site_angle + (unit_index as f64 - unit_count / 2.0) * self.unit_spacing;
                let Some(unit_node) = placement.push(
                    &unit.id,
                    NodeKind::Unit,
                    self.polar(unit_angle, self.unit_ring),
                    self.unit_radius,
                    NodeData {
                        name: unit.name.clone(),
                        description: unit.description.clone(),
                        status: None,
                    },
                    Some(site),
                ) else {
                    continue;
                };

                let unit_items = items_by_unit
                    .get(unit.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                hidden_items += unit_items.len().saturating_sub(self.item_cap);

                for (item_index, item) in unit_items.iter().take(self.item_cap).enumerate() {
                    let item_angle = unit_angle + (item_index as f64 - 1.0) * self.item_spacing;
                    placement.push(
                        &item.id,
                        NodeKind::Item,
                        self.polar(item_angle, self.item_ring),
                        self.item_radius,
                        NodeData {
                            name: item.name.clone(),
                            description: item.description.clone(),
                            status: Some(item.status.clone()),
                        },
                        Some(unit_node),
                    );
                }
            }
        }

        let placed: HashSet<&str> = placement.nodes.iter().map(|n| n.id.as_str()).collect();
        let orphan_units = units
            .iter()
            .filter(|u| !placed.contains(u.location_id.as_str()))
            .count();
        if orphan_units > 0 {
            warn!(count = orphan_units, "units without a known location were not placed");
        }

        debug!(
            nodes = placement.nodes.len(),
            edges = placement.edges.len(),
            hidden_items,
            "radial layout computed"
        );

        LayoutResult {
            nodes: placement.nodes,
            edges: placement.edges,
            hidden_items,
        }
    }

    fn polar(&self, angle: f64, ring: f64) -> Position {
        Position {
            x: self.center.x + angle.cos() * ring,
            y: self.center.y + angle.sin() * ring,
        }
    }
}
