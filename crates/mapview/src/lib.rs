//! Interactive radial map of an inventory: viewport math, hit testing and a
//! display-list renderer with an SVG surface.

mod hit;
mod map;
mod render;
mod svg;
mod viewport;

pub use hit::{hit_test, hit_test_index};
pub use map::{CLICK_SLOP, MapStatistics, MapView, NodeDetails, SelectionChange};
pub use render::{
    AVAILABLE_COLOR, DrawCommand, FALLBACK_COLOR, Frame, IN_USE_COLOR, LegendEntry,
    MAINTENANCE_COLOR, Renderer, Rgb, SITE_COLOR, Surface, UNIT_COLOR, legend, node_color,
    truncate_label,
};
pub use self::svg::{SvgSurface, frame_to_document};
pub use viewport::{Viewport, ViewportConfig, ViewportError};
