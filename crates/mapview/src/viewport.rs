use inventory_layout::{Bounds, Position, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ViewportError {
    #[error("zoom step must be finite and greater than 1, got {0}")]
    InvalidStep(f64),
    #[error("scale range [{min}, {max}] must be positive and contain 1")]
    InvalidRange { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Factor applied by one zoom-in or zoom-out.
    pub zoom_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.2,
            min_scale: 0.3,
            max_scale: 3.0,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), ViewportError> {
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(ViewportError::InvalidStep(self.zoom_step));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0 && self.max_scale >= 1.0)
            || !self.max_scale.is_finite()
        {
            return Err(ViewportError::InvalidRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }

    fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Pan and zoom state mapping world space to screen space.
///
/// `screen = world * scale + offset`, and [`Viewport::to_world`] is its exact
/// inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    config: ViewportConfig,
    scale: f64,
    offset: Position,
    // Screen point minus offset at drag start
    drag_anchor: Option<Position>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity(ViewportConfig::default())
    }
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Result<Self, ViewportError> {
        config.validate()?;
        Ok(Self::identity(config))
    }

    fn identity(config: ViewportConfig) -> Self {
        Self {
            config,
            scale: 1.0,
            offset: Position::ORIGIN,
            drag_anchor: None,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Non-finite scales are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = self.config.clamp(scale);
        }
    }

    pub fn set_offset(&mut self, offset: Position) {
        self.move_offset(offset);
    }

    // An active drag keeps following the pointer from the new offset.
    fn move_offset(&mut self, offset: Position) {
        if let Some(anchor) = &mut self.drag_anchor {
            anchor.x -= offset.x - self.offset.x;
            anchor.y -= offset.y - self.offset.y;
        }
        self.offset = offset;
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / self.config.zoom_step);
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Position::ORIGIN;
        self.drag_anchor = None;
    }

    /// Scale by `factor` while keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Position, factor: f64) {
        let world = self.to_world(screen);
        self.set_scale(self.scale * factor);
        self.move_offset(Position {
            x: screen.x - world.x * self.scale,
            y: screen.y - world.y * self.scale,
        });
    }

    pub fn begin_drag(&mut self, screen: Position) {
        self.drag_anchor = Some(Position {
            x: screen.x - self.offset.x,
            y: screen.y - self.offset.y,
        });
    }

    /// Recompute the offset from the drag anchor. Returns false when no drag
    /// is in progress.
    pub fn continue_drag(&mut self, screen: Position) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        self.offset = Position {
            x: screen.x - anchor.x,
            y: screen.y - anchor.y,
        };
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Center `bounds` on a canvas of `canvas` size, leaving `padding` on
    /// every side. Returns false if there is nothing sensible to fit.
    pub fn fit_to(&mut self, bounds: Bounds, canvas: Size, padding: f64) -> bool {
        let available_width = canvas.width - padding * 2.0;
        let available_height = canvas.height - padding * 2.0;
        if bounds.width() <= 0.0
            || bounds.height() <= 0.0
            || available_width <= 0.0
            || available_height <= 0.0
        {
            return false;
        }

        let scale = (available_width / bounds.width()).min(available_height / bounds.height());
        self.set_scale(scale);
        let center = bounds.center();
        self.move_offset(Position {
            x: canvas.width / 2.0 - center.x * self.scale,
            y: canvas.height / 2.0 - center.y * self.scale,
        });
        true
    }

    pub fn to_world(&self, screen: Position) -> Position {
        Position {
            x: (screen.x - self.offset.x) / self.scale,
            y: (screen.y - self.offset.y) / self.scale,
        }
    }

    pub fn to_screen(&self, world: Position) -> Position {
        Position {
            x: world.x * self.scale + self.offset.x,
            y: world.y * self.scale + self.offset.y,
        }
    }
}
