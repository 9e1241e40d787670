//! Radial placement of the location → unit → item hierarchy.

mod layout;
mod types;

pub use layout::LayoutResult;
pub use types::*;
