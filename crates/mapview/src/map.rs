use inventory_layout::{LayoutError, LayoutResult, MapNode, NodeKind, Position, RadialLayout};
use inventory_model::{Inventory, ItemStatus};
use serde::Serialize;
use tracing::debug;

use crate::hit::hit_test;
use crate::render::{Frame, Renderer, Surface};
use crate::viewport::Viewport;

/// Pointer travel, in screen pixels, below which a press-release counts as a
/// click rather than a pan.
pub const CLICK_SLOP: f64 = 3.0;

const FIT_PADDING: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(String),
    Cleared,
    Unchanged,
}

/// What the info panel shows for the selected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetails {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
    /// Drawn children only; capped items are not included.
    pub children: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MapStatistics {
    pub locations: usize,
    pub units: usize,
    pub items: usize,
    pub hidden_items: usize,
}

/// Interactive map state: the laid out nodes, the viewport and the selection.
///
/// Reads the inventory, never writes it. Every inventory change recomputes the
/// whole layout.
#[derive(Debug, Clone)]
pub struct MapView {
    layout: RadialLayout,
    result: LayoutResult,
    viewport: Viewport,
    renderer: Renderer,
    selection: Option<String>,
    press: Option<Position>,
    statistics: MapStatistics,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            layout: RadialLayout::default(),
            result: LayoutResult::default(),
            viewport: Viewport::default(),
            renderer: Renderer::default(),
            selection: None,
            press: None,
            statistics: MapStatistics::default(),
        }
    }
}

impl MapView {
    pub fn new(
        layout: RadialLayout,
        viewport: Viewport,
        renderer: Renderer,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self {
            layout,
            viewport,
            renderer,
            ..Default::default()
        })
    }

    pub fn set_inventory(&mut self, inventory: &Inventory) {
        self.result = self.layout.layout_inventory(inventory);
        self.statistics = MapStatistics {
            locations: inventory.locations().len(),
            units: inventory.units().len(),
            items: inventory.items().len(),
            hidden_items: self.result.hidden_items,
        };

        if let Some(id) = &self.selection
            && self.result.node(id).is_none()
        {
            debug!(id = %id, "selected node left the map");
            self.selection = None;
        }
    }

    pub fn nodes(&self) -> &[MapNode] {
        &self.result.nodes
    }

    pub fn layout_result(&self) -> &LayoutResult {
        &self.result
    }

    /// True when there is nothing to draw and an empty-state message should
    /// be shown instead.
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn statistics(&self) -> MapStatistics {
        self.statistics
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_node(&self) -> Option<&MapNode> {
        self.selection.as_deref().and_then(|id| self.result.node(id))
    }

    pub fn selected_details(&self) -> Option<NodeDetails> {
        let node = self.selected_node()?;
        Some(NodeDetails {
            id: node.id.clone(),
            name: node.data.name.clone(),
            kind: node.kind,
            description: node.data.description.clone(),
            status: node.data.status.clone(),
            children: self.result.children_of(&node.id),
        })
    }

    /// Select a node by id. Unknown ids clear the selection.
    pub fn select(&mut self, id: &str) -> SelectionChange {
        if self.result.node(id).is_some() {
            self.selection = Some(id.to_string());
            SelectionChange::Selected(id.to_string())
        } else {
            self.selection = None;
            SelectionChange::Cleared
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Select the node under `screen`, or clear the selection when the click
    /// lands on empty space. Ignored while a pan is in progress.
    pub fn click(&mut self, screen: Position) -> SelectionChange {
        if self.viewport.is_dragging() {
            return SelectionChange::Unchanged;
        }
        match hit_test(&self.result.nodes, &self.viewport, screen) {
            Some(node) => {
                debug!(id = %node.id, kind = node.kind.label(), "node selected");
                self.selection = Some(node.id.clone());
                SelectionChange::Selected(node.id.clone())
            }
            None => {
                self.selection = None;
                SelectionChange::Cleared
            }
        }
    }

    pub fn pointer_down(&mut self, screen: Position) {
        self.press = Some(screen);
        self.viewport.begin_drag(screen);
    }

    pub fn pointer_move(&mut self, screen: Position) -> bool {
        self.viewport.continue_drag(screen)
    }

    /// Finish a press. A release close to where the press started is treated
    /// as a click.
    pub fn pointer_up(&mut self, screen: Position) -> SelectionChange {
        self.viewport.end_drag();
        match self.press.take() {
            Some(origin) if origin.distance(screen) <= CLICK_SLOP => self.click(screen),
            _ => SelectionChange::Unchanged,
        }
    }

    /// Wheel zoom toward the cursor. Positive `delta` zooms in.
    pub fn scroll(&mut self, screen: Position, delta: f64) {
        if delta == 0.0 {
            return;
        }
        let step = self.viewport.config().zoom_step;
        let factor = if delta > 0.0 { step } else { 1.0 / step };
        self.viewport.zoom_at(screen, factor);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.press = None;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let offset = self.viewport.offset();
        self.viewport
            .set_offset(Position::new(offset.x + dx, offset.y + dy));
    }

    /// Zoom and pan so every node is visible.
    pub fn fit_to_content(&mut self) -> bool {
        let Some(bounds) = self.result.bounds() else {
            return false;
        };
        self.viewport
            .fit_to(bounds, self.renderer.canvas, FIT_PADDING)
    }

    pub fn render(&self) -> Frame {
        self.renderer
            .render(&self.result.nodes, &self.viewport, self.selection())
    }

    pub fn present<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.present(&self.render());
    }
}
