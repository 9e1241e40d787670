use inventory_layout::{MapNode, Position};

use crate::viewport::Viewport;

/// Index of the node under `screen`, if any.
///
/// The point is mapped into world space first, so hit areas scale with the
/// zoom. When circles overlap, the first node in layout order wins: a site
/// beats its units and a unit beats its items.
pub fn hit_test_index(nodes: &[MapNode], viewport: &Viewport, screen: Position) -> Option<usize> {
    let world = viewport.to_world(screen);
    nodes.iter().position(|node| node.contains(world))
}

pub fn hit_test<'a>(
    nodes: &'a [MapNode],
    viewport: &Viewport,
    screen: Position,
) -> Option<&'a MapNode> {
    hit_test_index(nodes, viewport, screen).map(|i| &nodes[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_layout::{NodeData, NodeKind};

    fn node(id: &str, x: f64, y: f64, radius: f64) -> MapNode {
        MapNode {
            id: id.to_string(),
            position: Position::new(x, y),
            radius,
            kind: NodeKind::Site,
            data: NodeData {
                name: id.to_string(),
                description: None,
                status: None,
            },
            connections: Vec::new(),
        }
    }

    #[test]
    fn test_center_hits_and_edge_misses() {
        let nodes = vec![node("a", 100.0, 100.0, 40.0)];
        let viewport = Viewport::default();

        assert_eq!(
            hit_test(&nodes, &viewport, Position::new(100.0, 100.0)).map(|n| n.id.as_str()),
            Some("a")
        );
        assert!(hit_test(&nodes, &viewport, Position::new(140.0, 100.0)).is_some());
        assert!(hit_test(&nodes, &viewport, Position::new(140.0 + 1e-6, 100.0)).is_none());
    }

    #[test]
    fn test_hits_follow_zoom_and_pan() {
        let nodes = vec![node("a", 100.0, 100.0, 10.0)];
        let mut viewport = Viewport::default();
        viewport.set_scale(2.0);
        viewport.set_offset(Position::new(50.0, -20.0));

        // World (100, 100) is drawn at (250, 180) with a 20px radius.
        assert!(hit_test(&nodes, &viewport, Position::new(250.0, 180.0)).is_some());
        assert!(hit_test(&nodes, &viewport, Position::new(269.0, 180.0)).is_some());
        assert!(hit_test(&nodes, &viewport, Position::new(271.0, 180.0)).is_none());
        assert!(hit_test(&nodes, &viewport, Position::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn test_overlap_prefers_layout_order() {
        let nodes = vec![node("first", 0.0, 0.0, 30.0), node("second", 10.0, 0.0, 30.0)];
        let viewport = Viewport::default();
        assert_eq!(hit_test_index(&nodes, &viewport, Position::new(5.0, 0.0)), Some(0));
        assert_eq!(hit_test_index(&nodes, &viewport, Position::new(35.0, 0.0)), Some(1));
    }

    #[test]
    fn test_empty_node_set() {
        assert!(hit_test(&[], &Viewport::default(), Position::ORIGIN).is_none());
    }
}
