use std::collections::HashMap;
use std::fmt;

use inventory_layout::{MapNode, NodeKind, Position, Size};
use inventory_model::ItemStatus;

use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

pub const SITE_COLOR: Rgb = Rgb(0x10b981);
pub const UNIT_COLOR: Rgb = Rgb(0xf59e0b);
pub const AVAILABLE_COLOR: Rgb = SITE_COLOR;
pub const IN_USE_COLOR: Rgb = UNIT_COLOR;
pub const MAINTENANCE_COLOR: Rgb = Rgb(0xef4444);
pub const FALLBACK_COLOR: Rgb = Rgb(0x6b7280);

const EDGE_COLOR: Rgb = Rgb(0x4ade80);
const OUTLINE_COLOR: Rgb = Rgb(0xffffff);
const LABEL_COLOR: Rgb = Rgb(0xffffff);
const SELECTION_COLOR: Rgb = Rgb(0x3b82f6);
const BACKGROUND_COLOR: Rgb = Rgb(0xffffff);

const EDGE_WIDTH: f64 = 2.0;
const EDGE_DASH: [f64; 2] = [5.0, 5.0];
const OUTLINE_WIDTH: f64 = 2.0;
const SELECTION_WIDTH: f64 = 3.0;

/// Fill color of a node. Sites and units have fixed colors, items are keyed
/// by status and anything unrecognized falls back to gray.
pub fn node_color(kind: NodeKind, status: Option<&ItemStatus>) -> Rgb {
    match kind {
        NodeKind::Site => SITE_COLOR,
        NodeKind::Unit => UNIT_COLOR,
        NodeKind::Item => match status {
            Some(ItemStatus::Available) => AVAILABLE_COLOR,
            Some(ItemStatus::InUse) => IN_USE_COLOR,
            Some(ItemStatus::Maintenance) => MAINTENANCE_COLOR,
            _ => FALLBACK_COLOR,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: &'static str,
}

pub fn legend() -> [LegendEntry; 4] {
    [
        LegendEntry {
            color: SITE_COLOR,
            label: "Locations / Available",
        },
        LegendEntry {
            color: UNIT_COLOR,
            label: "Units / In use",
        },
        LegendEntry {
            color: MAINTENANCE_COLOR,
            label: "Maintenance",
        },
        LegendEntry {
            color: FALLBACK_COLOR,
            label: "Unavailable",
        },
    ]
}

/// First `limit` characters of `name`.
pub fn truncate_label(name: &str, limit: usize) -> String {
    name.chars().take(limit).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Rgb,
    },
    /// Applies to every command after it.
    Transform {
        scale: f64,
        offset: Position,
    },
    Line {
        from: Position,
        to: Position,
        color: Rgb,
        width: f64,
        dash: Option<[f64; 2]>,
    },
    Circle {
        center: Position,
        radius: f64,
        fill: Option<Rgb>,
        stroke: Rgb,
        stroke_width: f64,
    },
    Label {
        text: String,
        at: Position,
        size: f64,
        color: Rgb,
    },
}

/// A complete display list. Surfaces only ever receive whole frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Immediate-mode drawing target.
pub trait Surface {
    fn present(&mut self, frame: &Frame);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    pub canvas: Size,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            canvas: Size::new(800.0, 600.0),
        }
    }
}

impl Renderer {
    pub fn new(canvas: Size) -> Self {
        Self { canvas }
    }

    /// Build the full frame for the current state: clear, transform, dashed
    /// parent edges, then node circles with their labels on top.
    pub fn render(&self, nodes: &[MapNode], viewport: &Viewport, selection: Option<&str>) -> Frame {
        let mut commands = Vec::with_capacity(2 + nodes.len() * 3);
        commands.push(DrawCommand::Clear {
            color: BACKGROUND_COLOR,
        });
        commands.push(DrawCommand::Transform {
            scale: viewport.scale(),
            offset: viewport.offset(),
        });

        let by_id: HashMap<&str, &MapNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
        for node in nodes {
            for parent in &node.connections {
                // Missing parent: no line.
                let Some(parent) = by_id.get(parent.as_str()) else {
                    continue;
                };
                commands.push(DrawCommand::Line {
                    from: node.position,
                    to: parent.position,
                    color: EDGE_COLOR,
                    width: EDGE_WIDTH,
                    dash: Some(EDGE_DASH),
                });
            }
        }

        for node in nodes {
            commands.push(DrawCommand::Circle {
                center: node.position,
                radius: node.radius,
                fill: Some(node_color(node.kind, node.data.status.as_ref())),
                stroke: OUTLINE_COLOR,
                stroke_width: OUTLINE_WIDTH,
            });
            if selection == Some(node.id.as_str()) {
                commands.push(DrawCommand::Circle {
                    center: node.position,
                    radius: node.radius + SELECTION_WIDTH,
                    fill: None,
                    stroke: SELECTION_COLOR,
                    stroke_width: SELECTION_WIDTH,
                });
            }
            commands.push(DrawCommand::Label {
                text: truncate_label(&node.data.name, node.kind.label_limit()),
                at: node.position,
                size: (node.radius / 3.0).max(10.0),
                color: LABEL_COLOR,
            });
        }

        Frame {
            size: self.canvas,
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_layout::NodeData;

    fn node(id: &str, name: &str, kind: NodeKind, parent: Option<&str>) -> MapNode {
        MapNode {
            id: id.to_string(),
            position: Position::new(0.0, 0.0),
            radius: 15.0,
            kind,
            data: NodeData {
                name: name.to_string(),
                description: None,
                status: (kind == NodeKind::Item).then(|| ItemStatus::Other("lost".into())),
            },
            connections: parent.map(|p| vec![p.to_string()]).unwrap_or_default(),
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(node_color(NodeKind::Site, None), Rgb(0x10b981));
        assert_eq!(node_color(NodeKind::Unit, None), Rgb(0xf59e0b));
        assert_eq!(
            node_color(NodeKind::Item, Some(&ItemStatus::Maintenance)),
            Rgb(0xef4444)
        );
        assert_eq!(
            node_color(NodeKind::Item, Some(&ItemStatus::Unavailable)),
            FALLBACK_COLOR
        );
        assert_eq!(node_color(NodeKind::Item, None), FALLBACK_COLOR);
        assert_eq!(Rgb(0x10b981).to_string(), "#10b981");
    }

    #[test]
    fn test_legend_matches_palette() {
        let legend = legend();
        assert_eq!(legend[0].color, node_color(NodeKind::Site, None));
        assert_eq!(
            legend[0].color,
            node_color(NodeKind::Item, Some(&ItemStatus::Available))
        );
        assert_eq!(legend[1].color, node_color(NodeKind::Unit, None));
        assert_eq!(
            legend[1].color,
            node_color(NodeKind::Item, Some(&ItemStatus::InUse))
        );
        assert_eq!(
            legend[2].color,
            node_color(NodeKind::Item, Some(&ItemStatus::Maintenance))
        );
        assert_eq!(
            legend[3].color,
            node_color(NodeKind::Item, Some(&ItemStatus::Unavailable))
        );
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_label("Almoxarifado", 8), "Almoxari");
        assert_eq!(truncate_label("Manutenção", 5), "Manut");
        assert_eq!(truncate_label("Ação", 8), "Ação");
    }

    #[test]
    fn test_edges_are_drawn_before_nodes() {
        let nodes = vec![
            node("s", "Warehouse", NodeKind::Site, None),
            node("u", "Shelf", NodeKind::Unit, Some("s")),
            node("i", "Hammer", NodeKind::Item, Some("u")),
        ];
        let frame = Renderer::default().render(&nodes, &Viewport::default(), None);

        assert!(matches!(frame.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(frame.commands[1], DrawCommand::Transform { .. }));
        let last_line = frame
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        let first_circle = frame
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { .. }))
            .unwrap();
        assert!(last_line < first_circle);

        let labels: Vec<&str> = frame.labels().collect();
        assert_eq!(labels, ["Warehous", "Shelf", "Hamme"]);
    }

    #[test]
    fn test_missing_parent_omits_line() {
        let nodes = vec![node("u", "Shelf", NodeKind::Unit, Some("gone"))];
        let frame = Renderer::default().render(&nodes, &Viewport::default(), None);
        assert!(
            !frame
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Line { .. }))
        );
    }

    #[test]
    fn test_selection_adds_ring() {
        let nodes = vec![
            node("s", "Warehouse", NodeKind::Site, None),
            node("u", "Shelf", NodeKind::Unit, Some("s")),
        ];
        let renderer = Renderer::default();
        let plain = renderer.render(&nodes, &Viewport::default(), None);
        let selected = renderer.render(&nodes, &Viewport::default(), Some("u"));
        assert_eq!(selected.commands.len(), plain.commands.len() + 1);
        assert!(selected.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Circle { fill: None, stroke, .. } if *stroke == SELECTION_COLOR
        )));
    }

    #[test]
    fn test_unknown_status_is_gray() {
        let nodes = vec![node("i", "Thing", NodeKind::Item, None)];
        let frame = Renderer::default().render(&nodes, &Viewport::default(), None);
        assert!(frame.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Circle { fill: Some(color), .. } if *color == FALLBACK_COLOR
        )));
    }
}
