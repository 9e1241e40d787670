use inventory_model::ItemStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Position {
        Position {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Site,
    Unit,
    Item,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Site => "location",
            NodeKind::Unit => "unit",
            NodeKind::Item => "item",
        }
    }

    /// Number of characters of the entity name drawn inside the circle.
    pub fn label_limit(&self) -> usize {
        match self {
            NodeKind::Site | NodeKind::Unit => 8,
            NodeKind::Item => 5,
        }
    }
}

/// Display data copied from the source entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapNode {
    pub id: String,
    pub position: Position,
    pub radius: f64,
    pub kind: NodeKind,
    pub data: NodeData,
    /// Parent node ids. Empty for sites, one entry otherwise.
    pub connections: Vec<String>,
}

impl MapNode {
    pub fn parent(&self) -> Option<&str> {
        self.connections.first().map(String::as_str)
    }

    /// True if `point` (world space) lies on or inside the node's circle.
    pub fn contains(&self, point: Position) -> bool {
        self.position.distance(point) <= self.radius
    }
}

/// Resolved parent link, as indices into [`LayoutResult::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEdge {
    pub child: usize,
    pub parent: usize,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("node radii must shrink with depth (site {site}, unit {unit}, item {item})")]
    InvalidRadii { site: f64, unit: f64, item: f64 },
    #[error("ring radii must grow with depth (sites {sites}, units {units}, items {items})")]
    InvalidRings { sites: f64, units: f64, items: f64 },
    #[error("angular spacing must be finite and non-negative")]
    InvalidSpacing,
}

/// Parameters of the radial map layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialLayout {
    pub center: Position,
    pub site_ring: f64,
    pub unit_ring: f64,
    pub item_ring: f64,
    pub site_radius: f64,
    pub unit_radius: f64,
    pub item_radius: f64,
    /// Angle between neighbouring units of one site, in radians.
    pub unit_spacing: f64,
    /// Angle between neighbouring items of one unit, in radians.
    pub item_spacing: f64,
    /// Items drawn per unit. The rest are counted but not placed.
    pub item_cap: usize,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            center: Position { x: 400.0, y: 300.0 },
            site_ring: 120.0,
            unit_ring: 200.0,
            item_ring: 280.0,
            site_radius: 40.0,
            unit_radius: 25.0,
            item_radius: 15.0,
            unit_spacing: 0.3,
            item_spacing: 0.2,
            item_cap: 3,
        }
    }
}

impl RadialLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.site_radius > self.unit_radius
            && self.unit_radius > self.item_radius
            && self.item_radius > 0.0)
        {
            return Err(LayoutError::InvalidRadii {
                site: self.site_radius,
                unit: self.unit_radius,
                item: self.item_radius,
            });
        }
        if !(self.site_ring >= 0.0
            && self.unit_ring > self.site_ring
            && self.item_ring > self.unit_ring)
        {
            return Err(LayoutError::InvalidRings {
                sites: self.site_ring,
                units: self.unit_ring,
                items: self.item_ring,
            });
        }
        let spacing_ok = |s: f64| s.is_finite() && s >= 0.0;
        if !spacing_ok(self.unit_spacing) || !spacing_ok(self.item_spacing) {
            return Err(LayoutError::InvalidSpacing);
        }
        Ok(())
    }

    pub fn radius_for(&self, kind: NodeKind) -> f64 {
        match kind {
            NodeKind::Site => self.site_radius,
            NodeKind::Unit => self.unit_radius,
            NodeKind::Item => self.item_radius,
        }
    }
}
